//! Keychain-backed session token storage, one entry per CLI profile.

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Mutex, OnceLock};

#[cfg(not(test))]
use keyring::Entry;

use notas_core::{Error, Result, SessionToken, TokenStore};

#[cfg(not(test))]
const KEYRING_SERVICE_NAME: &str = "notas-cli";

#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    username: String,
}

impl KeyringTokenStore {
    pub fn for_profile(profile_name: &str) -> Self {
        Self {
            username: format!("session_token:{profile_name}"),
        }
    }

    #[cfg(test)]
    fn test_store() -> &'static Mutex<HashMap<String, String>> {
        static STORE: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
        STORE.get_or_init(|| Mutex::new(HashMap::new()))
    }

    #[cfg(not(test))]
    fn entry(&self) -> Result<Entry> {
        Entry::new(KEYRING_SERVICE_NAME, &self.username)
            .map_err(|error| Error::TokenStorage(error.to_string()))
    }
}

impl TokenStore for KeyringTokenStore {
    #[cfg(not(test))]
    fn load_token(&self) -> Result<Option<SessionToken>> {
        let entry = self.entry()?;
        match entry.get_password() {
            Ok(raw) => Ok(SessionToken::new(raw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(Error::TokenStorage(error.to_string())),
        }
    }

    #[cfg(test)]
    fn load_token(&self) -> Result<Option<SessionToken>> {
        let guard = Self::test_store()
            .lock()
            .map_err(|error| Error::TokenStorage(error.to_string()))?;
        Ok(guard.get(&self.username).cloned().and_then(SessionToken::new))
    }

    #[cfg(not(test))]
    fn save_token(&self, token: &SessionToken) -> Result<()> {
        self.entry()?
            .set_password(token.expose())
            .map_err(|error| Error::TokenStorage(error.to_string()))
    }

    #[cfg(test)]
    fn save_token(&self, token: &SessionToken) -> Result<()> {
        let mut guard = Self::test_store()
            .lock()
            .map_err(|error| Error::TokenStorage(error.to_string()))?;
        guard.insert(self.username.clone(), token.expose().to_string());
        Ok(())
    }

    #[cfg(not(test))]
    fn clear_token(&self) -> Result<()> {
        let entry = self.entry()?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(Error::TokenStorage(error.to_string())),
        }
    }

    #[cfg(test)]
    fn clear_token(&self) -> Result<()> {
        let mut guard = Self::test_store()
            .lock()
            .map_err(|error| Error::TokenStorage(error.to_string()))?;
        guard.remove(&self.username);
        Ok(())
    }
}
