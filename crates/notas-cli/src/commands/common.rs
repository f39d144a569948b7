use std::env;
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use notas_core::util::truncate_with_ellipsis;
use notas_core::{Note, NoteId, NotesClient};
use serde::Serialize;

use crate::auth::KeyringTokenStore;
use crate::cli::StatusFilter;
use crate::config_profiles::{normalize_text_option, CliProfile, CliProfilesConfig};
use crate::error::CliError;

pub const API_URL_ENV_VAR: &str = "NOTAS_API_URL";

const TITLE_WIDTH: usize = 30;
const PREVIEW_WIDTH: usize = 50;

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub profile: Option<String>,
    pub api_url: Option<String>,
}

/// A client bound to one profile's URL and keychain entry.
pub struct ProfileSession {
    pub profile_name: String,
    pub client: NotesClient<KeyringTokenStore>,
}

impl GlobalOptions {
    pub fn open_session(&self) -> Result<ProfileSession, CliError> {
        let config = CliProfilesConfig::load().map_err(CliError::Config)?;
        let profile_name = config.resolve_profile_name(self.profile.as_deref());
        let api_url = resolve_api_base_url(
            self.api_url.clone(),
            env::var(API_URL_ENV_VAR).ok(),
            config.profile(&profile_name),
        )
        .ok_or(CliError::ApiNotConfigured)?;

        tracing::debug!("Using profile '{}' against {}", profile_name, api_url);
        let client = NotesClient::new(&api_url, KeyringTokenStore::for_profile(&profile_name))?;
        Ok(ProfileSession {
            profile_name,
            client,
        })
    }
}

/// Flag, then environment, then profile.
pub fn resolve_api_base_url(
    explicit: Option<String>,
    from_env: Option<String>,
    profile: Option<&CliProfile>,
) -> Option<String> {
    normalize_text_option(explicit)
        .or_else(|| normalize_text_option(from_env))
        .or_else(|| profile.and_then(CliProfile::api_base_url))
}

pub fn parse_note_id(raw: &str) -> Result<NoteId, CliError> {
    Ok(raw.parse::<NoteId>()?)
}

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: u64,
    pub title: String,
    pub completed: bool,
    pub preview: String,
    pub description: String,
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    NoteListItem {
        id: note.id.get(),
        title: note.title.clone(),
        completed: note.completed,
        preview: note.description_preview(PREVIEW_WIDTH),
        description: note.description.clone(),
    }
}

/// `show --json` output; same field names as the `list --json` items.
pub fn format_note_json(note: &Note) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(&note_to_list_item(note))?)
}

pub fn filter_notes(notes: Vec<Note>, status: StatusFilter, limit: Option<usize>) -> Vec<Note> {
    notes
        .into_iter()
        .filter(|note| match status {
            StatusFilter::All => true,
            StatusFilter::Pending => !note.completed,
            StatusFilter::Completed => note.completed,
        })
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

pub fn format_note_lines(notes: &[Note]) -> Vec<String> {
    notes
        .iter()
        .map(|note| {
            let mark = completion_mark(note);
            let title = truncate_with_ellipsis(note.title.trim(), TITLE_WIDTH);
            let preview = note.description_preview(PREVIEW_WIDTH);

            if preview.is_empty() {
                format!("{:>5}  [{mark}]  {title}", note.id)
            } else {
                format!("{:>5}  [{mark}]  {title:<TITLE_WIDTH$}  {preview}", note.id)
            }
        })
        .collect()
}

pub fn format_note_count(count: usize) -> String {
    if count == 1 {
        "1 note".to_string()
    } else {
        format!("{count} notes")
    }
}

pub fn format_note_detail(note: &Note) -> String {
    let mut rendered = format!("#{} [{}] {}", note.id, completion_mark(note), note.title);
    let body = note.plain_description();
    let body = body.trim();
    if !body.is_empty() {
        rendered.push_str("\n\n");
        rendered.push_str(body);
    }
    rendered
}

const fn completion_mark(note: &Note) -> char {
    if note.completed {
        'x'
    } else {
        ' '
    }
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}

/// Ask a yes/no question on the terminal. Non-interactive stdin answers no.
pub fn confirm(prompt: &str) -> Result<bool, CliError> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return Ok(false);
    }

    eprint!("{prompt} [y/N] ");
    io::stderr().flush()?;
    let mut answer = String::new();
    stdin.lock().read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

pub fn capture_editor_input_with_initial(
    initial_content: &str,
) -> Result<Option<String>, CliError> {
    let editor = preferred_editor();
    let temp_file = create_temp_note_file_path();
    std::fs::write(&temp_file, initial_content)?;

    let launch_result = launch_editor(&editor, &temp_file);
    let note_content = std::fs::read_to_string(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);

    launch_result?;
    Ok(normalize_content(&note_content))
}

pub fn launch_editor(editor: &str, file_path: &Path) -> Result<(), CliError> {
    match Command::new(editor).arg(file_path).status() {
        Ok(status) => {
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let mut parts = editor.split_whitespace();
            let Some(program) = parts.next() else {
                return Err(CliError::EditorFailed("empty EDITOR command".into()));
            };

            let mut command = Command::new(program);
            command.args(parts).arg(file_path);

            let status = command.status()?;
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) => Err(CliError::Io(err)),
    }
}

pub fn preferred_editor() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string())
}

pub const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

pub fn create_temp_note_file_path() -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    env::temp_dir().join(format!("notas-note-{}-{now}.html", std::process::id()))
}
