//! Error types for notas-core

use std::fmt;

pub use reqwest::StatusCode;
use thiserror::Error;

use crate::models::NoteId;

/// Result type alias using notas-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// The remote call an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    Register,
    ListNotes,
    GetNote(NoteId),
    CreateNote,
    UpdateNote(NoteId),
    DeleteNote(NoteId),
}

impl Operation {
    #[must_use]
    pub const fn note_id(self) -> Option<NoteId> {
        match self {
            Self::GetNote(id) | Self::UpdateNote(id) | Self::DeleteNote(id) => Some(id),
            Self::Login | Self::Register | Self::ListNotes | Self::CreateNote => None,
        }
    }

    #[must_use]
    pub const fn requires_auth(self) -> bool {
        !matches!(self, Self::Login | Self::Register)
    }

    /// Neutral name of the request, for failures that say nothing about the outcome.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Login => "Sign-in request".to_string(),
            Self::Register => "Registration request".to_string(),
            Self::ListNotes => "Fetching notes".to_string(),
            Self::GetNote(id) => format!("Fetching note {id}"),
            Self::CreateNote => "Creating note".to_string(),
            Self::UpdateNote(id) => format!("Updating note {id}"),
            Self::DeleteNote(id) => format!("Deleting note {id}"),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => write!(f, "Invalid credentials"),
            Self::Register => write!(f, "Registration failed"),
            Self::ListNotes => write!(f, "Failed to fetch notes"),
            Self::GetNote(id) => write!(f, "Failed to fetch note {id}"),
            Self::CreateNote => write!(f, "Failed to create note"),
            Self::UpdateNote(id) => write!(f, "Failed to update note {id}"),
            Self::DeleteNote(id) => write!(f, "Failed to delete note {id}"),
        }
    }
}

/// Errors that can occur in notas-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced a response (connect, DNS, TLS, body read)
    #[error("{}: network error: {source}", .operation.label())]
    Network {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status
    #[error("{operation} (HTTP {})", .status.as_u16())]
    Rejected {
        operation: Operation,
        status: StatusCode,
    },

    /// The service answered with success but the body was not the expected JSON
    #[error("{}: unexpected response: {reason}", .operation.label())]
    Decode {
        operation: Operation,
        reason: String,
    },

    /// An authenticated call was attempted with no stored token
    #[error("Not signed in")]
    NotAuthenticated,

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid client configuration
    #[error("Invalid client configuration: {0}")]
    InvalidConfiguration(String),

    /// Token store read or write failed
    #[error("Token storage error: {0}")]
    TokenStorage(String),
}

impl Error {
    /// The remote operation this error belongs to, if any.
    #[must_use]
    pub const fn operation(&self) -> Option<Operation> {
        match self {
            Self::Network { operation, .. }
            | Self::Rejected { operation, .. }
            | Self::Decode { operation, .. } => Some(*operation),
            Self::NotAuthenticated
            | Self::InvalidInput(_)
            | Self::InvalidConfiguration(_)
            | Self::TokenStorage(_) => None,
        }
    }

    /// The note id involved, for per-note operations.
    #[must_use]
    pub fn note_id(&self) -> Option<NoteId> {
        self.operation().and_then(Operation::note_id)
    }

    /// HTTP status for rejected requests.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
