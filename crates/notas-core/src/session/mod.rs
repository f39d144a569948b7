//! Session token and the storage seam the client persists it through.

use std::fmt;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Opaque bearer token issued by the service on login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionToken(String);

impl SessionToken {
    /// Returns `None` when the token is blank. Otherwise kept exactly as issued.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// The raw token, for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("SessionToken")
            .field(&"[REDACTED]")
            .finish()
    }
}

impl TryFrom<String> for SessionToken {
    type Error = &'static str;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::new(value).ok_or("session token must not be empty")
    }
}

impl From<SessionToken> for String {
    fn from(value: SessionToken) -> Self {
        value.0
    }
}

/// Durable home of the single session token.
///
/// Only [`crate::NotesClient`] writes through this trait.
pub trait TokenStore: Clone + Send + Sync + 'static {
    fn load_token(&self) -> Result<Option<SessionToken>>;
    fn save_token(&self, token: &SessionToken) -> Result<()>;
    /// Must succeed when nothing is stored.
    fn clear_token(&self) -> Result<()>;
}

/// In-process token cell. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<RwLock<Option<SessionToken>>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: SessionToken) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(token))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load_token(&self) -> Result<Option<SessionToken>> {
        let guard = self
            .slot
            .read()
            .map_err(|error| Error::TokenStorage(error.to_string()))?;
        Ok(guard.clone())
    }

    fn save_token(&self, token: &SessionToken) -> Result<()> {
        let mut guard = self
            .slot
            .write()
            .map_err(|error| Error::TokenStorage(error.to_string()))?;
        *guard = Some(token.clone());
        Ok(())
    }

    fn clear_token(&self) -> Result<()> {
        let mut guard = self
            .slot
            .write()
            .map_err(|error| Error::TokenStorage(error.to_string()))?;
        *guard = None;
        Ok(())
    }
}
