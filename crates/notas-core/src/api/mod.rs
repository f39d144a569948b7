//! Client for the remote notes service.
//!
//! One method per endpoint, one HTTP round trip per call. Authenticated
//! calls read the token from the [`TokenStore`] right before the request is
//! built, so a login or logout between two calls is always honored.

use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Operation, Result};
use crate::models::{NewNote, Note, NoteId, NotePatch};
use crate::session::{SessionToken, TokenStore};
use crate::util::{compact_text, is_http_url};

const JSON_CONTENT: &str = "application/json";

#[derive(Debug, Serialize)]
struct CredentialsPayload<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
}

/// Typed façade over the notes REST API.
///
/// Cheap to clone; clones share the HTTP connection pool and the token store.
#[derive(Clone)]
pub struct NotesClient<S: TokenStore> {
    base_url: String,
    client: Client,
    store: S,
}

impl<S: TokenStore> NotesClient<S> {
    pub fn new(base_url: impl AsRef<str>, store: S) -> Result<Self> {
        let base_url = normalize_base_url(base_url.as_ref())?;
        let client = Client::builder()
            .build()
            .map_err(|error| Error::InvalidConfiguration(error.to_string()))?;

        Ok(Self {
            base_url,
            client,
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange credentials for a session token and persist it.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<SessionToken> {
        validate_credentials(identifier, password)?;

        let operation = Operation::Login;
        let request = self
            .client
            .post(self.url("/auth/login"))
            .json(&CredentialsPayload {
                username: identifier,
                password,
            });
        let response = self.send(operation, request).await?;
        let payload: LoginResponse = decode(operation, response).await?;
        let token = payload
            .token
            .and_then(SessionToken::new)
            .ok_or_else(|| Error::Decode {
                operation,
                reason: "response did not include a token".to_string(),
            })?;

        self.store.save_token(&token)?;
        tracing::info!("Signed in; session token stored");
        Ok(token)
    }

    /// Create an account. Does not sign in.
    pub async fn register(&self, identifier: &str, password: &str) -> Result<()> {
        validate_credentials(identifier, password)?;

        let request = self
            .client
            .post(self.url("/auth/register"))
            .json(&CredentialsPayload {
                username: identifier,
                password,
            });
        self.send(Operation::Register, request).await?;
        Ok(())
    }

    /// Forget the stored token. Best effort: storage failures are only logged.
    pub fn logout(&self) {
        match self.store.clear_token() {
            Ok(()) => tracing::info!("Signed out; session token cleared"),
            Err(error) => tracing::warn!("Failed to clear session token: {}", error),
        }
    }

    /// The stored token, or `None` when signed out or unreadable.
    pub fn token(&self) -> Option<SessionToken> {
        match self.store.load_token() {
            Ok(token) => token,
            Err(error) => {
                tracing::warn!("Failed to read session token: {}", error);
                None
            }
        }
    }

    pub async fn list_notes(&self) -> Result<Vec<Note>> {
        let operation = Operation::ListNotes;
        let request = self.authorized(self.client.get(self.url("/tareas")))?;
        let response = self.send(operation, request).await?;
        decode(operation, response).await
    }

    pub async fn get_note(&self, id: NoteId) -> Result<Note> {
        let operation = Operation::GetNote(id);
        let request = self.authorized(self.client.get(self.note_url(id)))?;
        let response = self.send(operation, request).await?;
        decode(operation, response).await
    }

    /// Create a note. The title is trimmed and must not be blank.
    pub async fn create_note(&self, fields: &NewNote) -> Result<Note> {
        let fields = fields
            .clone()
            .normalized()
            .map_err(|error| Error::InvalidInput(error.to_string()))?;

        let operation = Operation::CreateNote;
        let request = self.authorized(self.client.post(self.url("/tareas")).json(&fields))?;
        let response = self.send(operation, request).await?;
        let note: Note = decode(operation, response).await?;
        tracing::debug!("Created note {}", note.id);
        Ok(note)
    }

    /// Replace the fields present in `patch`; the rest stay as they are.
    pub async fn update_note(&self, id: NoteId, patch: &NotePatch) -> Result<Note> {
        patch
            .validate()
            .map_err(|error| Error::InvalidInput(error.to_string()))?;

        let operation = Operation::UpdateNote(id);
        let request = self.authorized(self.client.put(self.note_url(id)).json(patch))?;
        let response = self.send(operation, request).await?;
        decode(operation, response).await
    }

    pub async fn delete_note(&self, id: NoteId) -> Result<()> {
        let request = self.authorized(self.client.delete(self.note_url(id)))?;
        self.send(Operation::DeleteNote(id), request).await?;
        tracing::debug!("Deleted note {}", id);
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn note_url(&self, id: NoteId) -> String {
        format!("{}/tareas/{}", self.base_url, id)
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.store.load_token()?.ok_or(Error::NotAuthenticated)?;
        Ok(request.bearer_auth(token.expose()))
    }

    async fn send(&self, operation: Operation, request: RequestBuilder) -> Result<Response> {
        let response = request
            .header(ACCEPT, JSON_CONTENT)
            .send()
            .await
            .map_err(|source| Error::Network { operation, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(
                "{} rejected with HTTP {}: {}",
                operation,
                status.as_u16(),
                compact_text(&body)
            );
            return Err(Error::Rejected { operation, status });
        }
        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(operation: Operation, response: Response) -> Result<T> {
    let body = response
        .bytes()
        .await
        .map_err(|source| Error::Network { operation, source })?;
    serde_json::from_slice(&body).map_err(|error| Error::Decode {
        operation,
        reason: error.to_string(),
    })
}

/// Validate and normalize the service base URL.
///
/// Requires an `http://` or `https://` scheme and drops trailing slashes.
pub fn normalize_base_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::InvalidConfiguration(
            "API base URL must not be empty".to_string(),
        ));
    }
    if !is_http_url(trimmed) {
        return Err(Error::InvalidConfiguration(
            "API base URL must include http:// or https://".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

fn validate_credentials(identifier: &str, password: &str) -> Result<()> {
    if identifier.trim().is_empty() {
        return Err(Error::InvalidInput("Email is required".to_string()));
    }
    if password.is_empty() {
        return Err(Error::InvalidInput("Password is required".to_string()));
    }
    Ok(())
}
