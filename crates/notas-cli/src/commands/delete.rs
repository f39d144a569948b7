use crate::commands::common::{confirm, parse_note_id, GlobalOptions};
use crate::error::CliError;

pub async fn run_delete(id: &str, skip_confirm: bool, global: &GlobalOptions) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;
    let session = global.open_session()?;

    if !skip_confirm && !confirm(&format!("Delete note {note_id} permanently?"))? {
        return Err(CliError::Cancelled);
    }

    session.client.delete_note(note_id).await?;
    println!("{note_id}");
    Ok(())
}
