use std::io;

use notas_core::credentials::CredentialError;
use notas_core::models::ParseNoteIdError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] notas_core::Error),
    #[error(transparent)]
    Credentials(#[from] CredentialError),
    #[error(transparent)]
    InvalidNoteId(#[from] ParseNoteIdError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Note title cannot be empty")]
    EmptyTitle,
    #[error("Edited description is unchanged; nothing to update")]
    NothingToUpdate,
    #[error("Editor command failed: {0}")]
    EditorFailed(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(
        "Notes service URL is not configured. Run `notas config init --api-url <URL>` or set NOTAS_API_URL."
    )]
    ApiNotConfigured,
    #[error("Deletion cancelled")]
    Cancelled,
}

impl CliError {
    /// Hint printed under the error message, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Core(notas_core::Error::NotAuthenticated) => {
                Some("Run `notas auth login --email <EMAIL> --password <PASSWORD>` first.")
            }
            Self::Core(notas_core::Error::Rejected { operation, status })
                if operation.requires_auth() && status.as_u16() == 401 =>
            {
                Some("The stored session may have expired. Run `notas auth login` again.")
            }
            _ => None,
        }
    }
}
