use crate::commands::common::{format_note_detail, format_note_json, parse_note_id, GlobalOptions};
use crate::error::CliError;

pub async fn run_show(id: &str, as_json: bool, global: &GlobalOptions) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;
    let session = global.open_session()?;
    let note = session.client.get_note(note_id).await?;

    if as_json {
        println!("{}", format_note_json(&note)?);
    } else {
        println!("{}", format_note_detail(&note));
    }
    Ok(())
}
