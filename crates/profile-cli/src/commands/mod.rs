//! REPL command parsing.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use profile_core::profile::ProfileField;

/// Names offered for completion.
pub const COMMAND_NAMES: [&str; 10] = [
    "show", "edit", "set", "dob", "picture", "save", "cancel", "help", "quit", "exit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Edit,
    Set { field: ProfileField, value: String },
    DateOfBirth(DateTime<Utc>),
    Picture,
    Save,
    Cancel,
    Help,
    Quit,
}

/// Parses one REPL line.
///
/// `set` takes the rest of the line verbatim as the value, so `set bio` with
/// nothing after it clears the field.
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim_start();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim_start()),
        None => (line, ""),
    };

    match name.to_ascii_lowercase().as_str() {
        "show" => Ok(Command::Show),
        "edit" => Ok(Command::Edit),
        "picture" | "pic" => Ok(Command::Picture),
        "save" => Ok(Command::Save),
        "cancel" => Ok(Command::Cancel),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value),
                None => (rest, ""),
            };
            if field.is_empty() {
                return Err("Usage: set <field> <value>".to_string());
            }
            let field = field.parse::<ProfileField>().map_err(|e| e.to_string())?;
            Ok(Command::Set {
                field,
                value: value.to_string(),
            })
        }
        "dob" => parse_date(rest.trim()).map(Command::DateOfBirth),
        other => Err(format!("Unknown command '{}'. Type 'help' for a list.", other)),
    }
}

impl Command {
    /// Whether the command only makes sense during an edit session.
    pub fn needs_edit_session(&self) -> bool {
        matches!(
            self,
            Self::Set { .. } | Self::DateOfBirth(_) | Self::Save | Self::Cancel
        )
    }
}

/// Hint to show instead of running `command`, if it needs an edit session
/// and none is open.
pub fn edit_mode_hint(command: &Command, editing: bool) -> Option<&'static str> {
    if editing || !command.needs_edit_session() {
        return None;
    }
    Some(match command {
        Command::Save => "Nothing to save. Type 'edit' first.",
        Command::Cancel => "Nothing to cancel.",
        _ => "Type 'edit' before changing your profile.",
    })
}

fn parse_date(text: &str) -> Result<DateTime<Utc>, String> {
    let day = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| "Usage: dob <YYYY-MM-DD>".to_string())?;
    let midnight = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| format!("Invalid date '{}'", text))?;
    Ok(Utc.from_utc_datetime(&midnight))
}

pub const HELP: &str = "\
Commands:
  show                     Show the profile
  edit                     Start editing
  set <field> <value>      Change first_name, last_name, nationality or bio
  dob <YYYY-MM-DD>         Change the date of birth
  picture                  Choose a new picture (saved immediately)
  save                     Validate and save your edits
  cancel                   Discard your edits
  quit                     Exit";
