mod catalog;
mod config;
mod defaults;
mod form;
mod format;
mod logging;
mod output;
mod text_field;
mod ui;
mod validators;

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info};

use crate::config::ConfigLoadStatus;
use crate::form::{FormOutcome, FormSession};

#[derive(Parser)]
#[command(name = "git-convention", version)]
#[command(about = "Create conventional branch names and commit messages")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a conventional branch name
    Branch,
    /// Create a conventional commit message
    Commit,
    /// Display the current configuration
    ConfigView,
}

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();

    // Initialize logging before anything else
    let log_ctx = match logging::init() {
        Ok(ctx) => {
            logging::cleanup_old_logs(&ctx.log_directory);
            Some(ctx)
        }
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    let path_override = config::resolve_override(cli.config);
    let loaded = config::load_settings(path_override.as_deref())
        .context("Failed to load configuration")?;
    debug!(
        config_path = %loaded.path.display(),
        status = ?loaded.status,
        "config_resolved"
    );
    if loaded.status == ConfigLoadStatus::Created {
        eprintln!("Created default config at {}", loaded.path.display());
    }

    match cli.command {
        Command::ConfigView => print!("{}", output::render_settings(&loaded.settings)),
        Command::Branch => run_flow(FormSession::branch(&loaded.settings))?,
        Command::Commit => run_flow(FormSession::commit(&loaded.settings))?,
    }

    if let Some(ctx) = &log_ctx {
        info!(
            session_id = %ctx.session_id,
            duration_secs = start_time.elapsed().as_secs_f64(),
            "session_end"
        );
    }

    Ok(())
}

/// Run a form in the alternate screen, then report its outcome.
fn run_flow(mut form: FormSession) -> Result<()> {
    let kind = form.kind;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_form(&mut terminal, &mut form);

    // Restore terminal
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;

    match form.outcome() {
        Some(FormOutcome::Generated(text)) => {
            print!("{}", output::render_report(kind, &text));
            // Best effort; a terminal without clipboard support is not an error
            match output::copy_to_clipboard(&text) {
                Ok(()) => println!("{}", output::clipboard_notice(kind)),
                Err(e) => debug!(error = %e, "clipboard_copy_failed"),
            }
        }
        Some(FormOutcome::Cancelled) | None => eprintln!("Cancelled."),
    }

    Ok(())
}

/// Blocking event loop: draw, wait for one event, dispatch it.
fn run_form(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    form: &mut FormSession,
) -> Result<()> {
    let (width, height) = crossterm::terminal::size()?;
    form.resize(width, height);

    while !form.is_finished() {
        terminal.draw(|f| ui::draw_form(f, form))?;
        let event = crossterm::event::read().context("Failed to read terminal event")?;
        form.handle_event(&event);
    }

    Ok(())
}
