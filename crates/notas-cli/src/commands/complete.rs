use notas_core::NotePatch;

use crate::commands::common::{parse_note_id, GlobalOptions};
use crate::error::CliError;

pub async fn run_set_completed(
    id: &str,
    completed: bool,
    global: &GlobalOptions,
) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;
    let session = global.open_session()?;
    let note = session
        .client
        .update_note(note_id, &NotePatch::completed(completed))
        .await?;

    let state = if note.completed { "completed" } else { "pending" };
    println!("{} {state}", note.id);
    Ok(())
}
