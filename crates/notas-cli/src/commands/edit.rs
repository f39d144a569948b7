use notas_core::{Note, NotePatch};

use crate::commands::common::{capture_editor_input_with_initial, parse_note_id, GlobalOptions};
use crate::error::CliError;

pub async fn run_edit(
    id: &str,
    title: Option<String>,
    description: Option<String>,
    global: &GlobalOptions,
) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;
    let session = global.open_session()?;

    let patch = if title.is_none() && description.is_none() {
        let note = session.client.get_note(note_id).await?;
        let edited = capture_editor_input_with_initial(&note.description)?.unwrap_or_default();
        patch_from_editor(&note, edited).ok_or(CliError::NothingToUpdate)?
    } else {
        NotePatch {
            title,
            description,
            completed: None,
        }
    };

    let updated = session.client.update_note(note_id, &patch).await?;
    println!("{}", updated.id);
    Ok(())
}

/// Patch carrying the edited description, or `None` when nothing changed.
pub fn patch_from_editor(note: &Note, edited: String) -> Option<NotePatch> {
    if edited == note.description.trim() {
        None
    } else {
        Some(NotePatch::description(edited))
    }
}
