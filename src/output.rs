//! Text printed after the form closes, and clipboard access.

use std::fmt::Write as _;
use std::io::{self, IsTerminal};

use crossterm::clipboard::CopyToClipboard;
use crossterm::execute;
use tracing::debug;

use crate::config::Settings;
use crate::form::FormKind;

/// Render settings for `config-view`, listing every type in file order.
pub fn render_settings(settings: &Settings) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Default Branch Prefix: {}", settings.default_branch_prefix);
    let _ = writeln!(out, "Default Commit Prefix: {}", settings.default_commit_prefix);
    let _ = writeln!(out, "Emojis Enabled: {}", settings.emojis_enabled);

    out.push_str("Branches:\n---------\n");
    for branch in &settings.branch_types {
        let _ = writeln!(out, "\t{}: {}", branch.tag, branch.description);
    }

    out.push_str("Commits:\n--------\n");
    for commit in &settings.commit_types {
        if commit.emoji.is_empty() {
            let _ = writeln!(out, "\t{}: {}", commit.tag, commit.description);
        } else {
            let _ = writeln!(
                out,
                "\t{}: {} {}",
                commit.tag, commit.emoji, commit.description
            );
        }
    }
    out
}

/// Example git invocation that uses the generated text.
pub fn git_command(kind: FormKind, generated: &str) -> String {
    match kind {
        FormKind::Branch => format!("git switch -c {}", generated),
        FormKind::Commit => format!("git commit -m \"{}\"", generated.replace('\n', "\\n")),
    }
}

/// Summary printed after a completed form.
pub fn render_report(kind: FormKind, generated: &str) -> String {
    match kind {
        FormKind::Branch => format!(
            "\nGenerated branch name: {}\nTo create this branch, run:\n{}\n",
            generated,
            git_command(kind, generated)
        ),
        FormKind::Commit => format!(
            "\nGenerated commit message:\n{}\nTo create this commit, run:\n{}\n",
            generated,
            git_command(kind, generated)
        ),
    }
}

pub fn clipboard_notice(kind: FormKind) -> &'static str {
    match kind {
        FormKind::Branch => "Branch name sent to clipboard (OSC 52)",
        FormKind::Commit => "Commit message sent to clipboard (OSC 52)",
    }
}

/// Ask the terminal to place `text` on the system clipboard (OSC 52).
///
/// Fails when stdout is not a terminal, since nothing would read the request.
/// Terminals without OSC 52 support silently ignore it.
pub fn copy_to_clipboard(text: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let is_terminal = stdout.is_terminal();
    request_clipboard_copy(&mut stdout.lock(), is_terminal, text)
}

fn request_clipboard_copy(
    out: &mut impl io::Write,
    is_terminal: bool,
    text: &str,
) -> io::Result<()> {
    if !is_terminal {
        return Err(io::Error::other("stdout is not a terminal"));
    }
    execute!(out, CopyToClipboard::to_clipboard_from(text))?;
    debug!(bytes = text.len(), "clipboard_copy_requested");
    Ok(())
}
