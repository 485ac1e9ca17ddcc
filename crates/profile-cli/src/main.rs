use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use profile_application::{
    LoadOutcome, PictureOutcome, ProfileController, ProfileView, SubmitOutcome,
};
use profile_infrastructure::{ConfigService, FileProfileStore, ProfilePaths};

mod commands;
mod logging;
mod picker;

use commands::{COMMAND_NAMES, Command};
use picker::{StdinPrompt, TerminalImagePicker};

#[derive(Parser)]
#[command(name = "student-profile")]
#[command(about = "View and edit your student profile", long_about = None)]
struct Cli {
    /// Directory holding the profile record (and logs, and config.toml)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Path to config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" (overridden by STUDENT_PROFILE_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

/// Completion and hints for REPL commands.
#[derive(Clone)]
struct CliHelper;

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates = COMMAND_NAMES
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        match line.split_whitespace().next() {
            Some(first) if COMMAND_NAMES.contains(&first) => {
                Owned(line.replacen(first, &first.bright_cyan().to_string(), 1))
            }
            _ => Borrowed(line),
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.is_empty() || line.contains(' ') {
            return None;
        }
        COMMAND_NAMES
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for CliHelper {}

fn render(view: &ProfileView) {
    println!();
    if view.editing {
        println!("{}", "[editing - unsaved]".yellow());
    }
    println!("{}", view.full_name.bright_white().bold());
    println!("  {} {}", "Picture:".bright_black(), view.picture_label());
    println!("  {} {}", "Born:".bright_black(), view.date_of_birth);
    println!("  {} {}", "Nationality:".bright_black(), view.nationality);
    println!("  {} {}", "Bio:".bright_black(), view.bio);
    println!();
}

fn notice(message: &str) {
    println!("{}", message.bright_yellow());
}

/// Runs one command. Returns `false` when the REPL should exit.
async fn dispatch(controller: &mut ProfileController, command: Command) -> bool {
    if let Some(hint) = commands::edit_mode_hint(&command, controller.is_editing()) {
        notice(hint);
        return true;
    }

    match command {
        Command::Show => render(&controller.view()),
        Command::Edit => {
            controller.begin_edit();
            render(&controller.view());
            println!("{}", "Use 'set', 'dob', then 'save' or 'cancel'.".bright_black());
        }
        Command::Set { field, value } => match controller.update_field(field, value) {
            Ok(()) => println!("{}", format!("{} updated", field.label()).green()),
            Err(e) => notice(&e.to_string()),
        },
        Command::DateOfBirth(date) => match controller.set_date_of_birth(date) {
            Ok(()) => println!("{}", "Date of birth updated".green()),
            Err(e) => notice(&e.to_string()),
        },
        Command::Picture => {
            let outcome = controller.pick_picture().await;
            if let Some(n) = outcome.notice() {
                notice(&n.message());
            }
            match outcome {
                PictureOutcome::Updated { persisted: true, .. } => {
                    println!("{}", "Picture updated".green());
                    render(&controller.view());
                }
                PictureOutcome::Updated { persisted: false, .. } => {
                    println!("{}", "Picture updated (not saved, see log)".yellow());
                }
                PictureOutcome::Failed(e) => println!("{}", e.to_string().red()),
                PictureOutcome::PermissionDenied | PictureOutcome::Cancelled => {}
            }
        }
        Command::Save => {
            let outcome = controller.submit().await;
            if let Some(n) = outcome.notice() {
                notice(&n.message());
            }
            match outcome {
                SubmitOutcome::Saved => {
                    println!("{}", "Profile saved".green());
                    render(&controller.view());
                }
                SubmitOutcome::NotPersisted(_) => {
                    println!("{}", "Could not save right now; your edits are kept.".red());
                }
                SubmitOutcome::NotEditing | SubmitOutcome::Rejected(_) => {}
            }
        }
        Command::Cancel => {
            controller.cancel_edit();
            println!("{}", "Edits discarded".bright_black());
            render(&controller.view());
        }
        Command::Help => println!("{}", commands::HELP),
        Command::Quit => return false,
    }
    true
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ===== Configuration =====
    let paths = ProfilePaths::new(cli.data_dir.clone());
    let config_path = match cli.config {
        Some(path) => path,
        None => paths.config_file()?,
    };
    let config = ConfigService::load(&config_path)
        .await
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    let data_dir = match (cli.data_dir, config.storage.dir.clone()) {
        (Some(dir), _) | (None, Some(dir)) => dir,
        (None, None) => paths.data_dir()?,
    };

    // ===== Logging =====
    let level = cli.log_level.unwrap_or_else(|| config.logging.level.clone());
    let data_paths = ProfilePaths::new(Some(data_dir.clone()));
    let log_dir = if config.logging.file {
        Some(data_paths.log_dir()?)
    } else {
        None
    };
    let _log_guard = logging::init(&level, log_dir.as_deref());
    tracing::info!("[Bootstrap] Data directory: {:?}", data_dir);

    // ===== Controller =====
    let store = Arc::new(FileProfileStore::from_paths(&data_paths)?);
    let image_picker = Arc::new(TerminalImagePicker::new(Arc::new(StdinPrompt)));
    let mut controller = ProfileController::new(store, image_picker);

    if let LoadOutcome::Failed(_) = controller.load().await {
        println!("{}", "Could not read the saved profile; showing defaults.".yellow());
    }

    // ===== REPL =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper));

    println!("{}", "=== Student Profile ===".bright_magenta().bold());
    println!("{}", "Type 'help' for commands, 'quit' to exit.".bright_black());
    render(&controller.view());

    loop {
        let prompt = if controller.is_editing() { "edit> " } else { ">> " };

        match rl.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                match commands::parse(&line) {
                    Ok(command) => {
                        if !dispatch(&mut controller, command).await {
                            break;
                        }
                    }
                    Err(message) => println!("{}", message.red()),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    if controller.is_editing() {
        println!("{}", "Unsaved edits discarded.".bright_black());
    }
    println!("{}", "Goodbye!".bright_green());
    Ok(())
}
