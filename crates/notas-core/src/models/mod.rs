//! Data models for Notas

mod note;

pub use note::{
    strip_markup, NewNote, Note, NoteId, NotePatch, NoteValidationError, ParseNoteIdError,
};
