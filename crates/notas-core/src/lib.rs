//! notas-core - Core library for Notas
//!
//! This crate contains the note model, session token storage seam, and the
//! client for the remote notes service used by every Notas interface.

pub mod api;
pub mod credentials;
pub mod error;
pub mod models;
pub mod session;
pub mod util;

pub use api::NotesClient;
pub use error::{Error, Operation, Result};
pub use models::{NewNote, Note, NoteId, NotePatch};
pub use session::{MemoryTokenStore, SessionToken, TokenStore};
