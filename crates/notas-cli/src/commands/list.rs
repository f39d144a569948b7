use crate::cli::StatusFilter;
use crate::commands::common::{
    filter_notes, format_note_count, format_note_lines, note_to_list_item, GlobalOptions,
    NoteListItem,
};
use crate::error::CliError;

pub async fn run_list(
    limit: Option<usize>,
    status: StatusFilter,
    as_json: bool,
    global: &GlobalOptions,
) -> Result<(), CliError> {
    let session = global.open_session()?;
    let notes = filter_notes(session.client.list_notes().await?, status, limit);

    if as_json {
        let json_items = notes
            .iter()
            .map(note_to_list_item)
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if notes.is_empty() {
        println!("No notes yet. Create one with `notas add <TITLE>`.");
    } else {
        for line in format_note_lines(&notes) {
            println!("{line}");
        }
        println!("{}", format_note_count(notes.len()));
    }

    Ok(())
}
