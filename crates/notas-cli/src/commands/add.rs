use notas_core::NewNote;

use crate::commands::common::{normalize_content, read_piped_stdin, GlobalOptions};
use crate::error::CliError;

pub async fn run_add(
    title_parts: &[String],
    description: Option<String>,
    completed: bool,
    global: &GlobalOptions,
) -> Result<(), CliError> {
    let title = normalize_content(&title_parts.join(" ")).ok_or(CliError::EmptyTitle)?;
    let description = match description {
        Some(description) => description,
        None => read_piped_stdin()?.unwrap_or_default(),
    };

    let session = global.open_session()?;
    let fields = NewNote::new(title)
        .with_description(description)
        .with_completed(completed);
    let note = session.client.create_note(&fields).await?;

    println!("{}", note.id);
    Ok(())
}
