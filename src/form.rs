//! Step-sequenced input form state and input handling.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info};

use crate::catalog::{Catalog, TypeEntry};
use crate::config::Settings;
use crate::format::format_message;
use crate::text_field::TextField;
use crate::validators::{validate_has_words, validate_required};

/// Maximum characters in a branch description.
pub const BRANCH_DESCRIPTION_LIMIT: usize = 50;
/// Maximum characters in an issue number.
pub const ISSUE_NUMBER_LIMIT: usize = 20;
/// Maximum characters in a commit summary.
pub const COMMIT_SUMMARY_LIMIT: usize = 72;
/// Maximum characters in a commit body.
pub const COMMIT_BODY_LIMIT: usize = 500;

/// Form steps. Only ever moves forward, or to `Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    SelectType,
    EnterPrimaryText,
    EnterSecondaryText,
    Done,
    Cancelled,
}

impl Step {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }
}

/// Which message the form builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Branch,
    Commit,
}

impl FormKind {
    pub fn select_title(self) -> &'static str {
        match self {
            Self::Branch => "Select Branch Type",
            Self::Commit => "Select Commit Type",
        }
    }

    pub fn type_label(self) -> &'static str {
        match self {
            Self::Branch => "Branch Type",
            Self::Commit => "Commit Type",
        }
    }

    pub fn primary_label(self) -> &'static str {
        match self {
            Self::Branch => "Description",
            Self::Commit => "Summary",
        }
    }

    pub fn primary_prompt(self) -> &'static str {
        match self {
            Self::Branch => "Enter a brief description (required):",
            Self::Commit => "Enter a commit summary (required):",
        }
    }

    pub fn secondary_prompt(self) -> &'static str {
        match self {
            Self::Branch => "Enter issue number (optional):",
            Self::Commit => "Enter commit body (optional):",
        }
    }
}

/// Layout dimensions of the active widgets, recomputed on resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub list_height: u16,
    pub field_width: u16,
    pub body_height: u16,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_terminal(80, 24)
    }
}

impl Viewport {
    pub fn from_terminal(width: u16, height: u16) -> Self {
        Self {
            list_height: height.saturating_sub(6).max(3),
            field_width: width.saturating_sub(4),
            body_height: height.saturating_sub(10).max(3),
        }
    }
}

/// How a finished form ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Generated(String),
    Cancelled,
}

/// State for one run of the form.
#[derive(Debug, Clone)]
pub struct FormSession {
    pub kind: FormKind,
    pub step: Step,
    pub catalog: Catalog,
    /// Copied out of the catalog when leaving `SelectType`.
    pub selected_type: Option<TypeEntry>,
    /// Branch description or commit summary.
    pub primary: TextField,
    /// Issue number or commit body.
    pub secondary: TextField,
    pub last_validation_error: Option<String>,
    /// Final message, set on reaching `Done`.
    pub generated: Option<String>,
    pub viewport: Viewport,
}

impl FormSession {
    pub fn branch(settings: &Settings) -> Self {
        Self::new(
            FormKind::Branch,
            Catalog::branches(settings),
            TextField::single_line(
                BRANCH_DESCRIPTION_LIMIT,
                "Enter brief description (required)",
            ),
            TextField::single_line(ISSUE_NUMBER_LIMIT, "Enter issue number (optional)"),
        )
    }

    pub fn commit(settings: &Settings) -> Self {
        Self::new(
            FormKind::Commit,
            Catalog::commits(settings),
            TextField::single_line(COMMIT_SUMMARY_LIMIT, "Enter commit summary (required)"),
            TextField::multi_line(COMMIT_BODY_LIMIT, "Enter commit body (optional)"),
        )
    }

    fn new(kind: FormKind, catalog: Catalog, primary: TextField, secondary: TextField) -> Self {
        let mut session = Self {
            kind,
            step: Step::SelectType,
            catalog,
            selected_type: None,
            primary,
            secondary,
            last_validation_error: None,
            generated: None,
            viewport: Viewport::default(),
        };
        session
            .catalog
            .ensure_visible(session.viewport.list_height as usize);
        session
    }

    pub fn is_finished(&self) -> bool {
        self.step.is_terminal()
    }

    /// The result once a terminal step is reached.
    pub fn outcome(&self) -> Option<FormOutcome> {
        match self.step {
            Step::Done => self.generated.clone().map(FormOutcome::Generated),
            Step::Cancelled => Some(FormOutcome::Cancelled),
            _ => None,
        }
    }

    /// Text field that receives keystrokes in the current step.
    pub fn focused_field(&self) -> Option<&TextField> {
        match self.step {
            Step::EnterPrimaryText => Some(&self.primary),
            Step::EnterSecondaryText => Some(&self.secondary),
            _ => None,
        }
    }

    fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        match self.step {
            Step::EnterPrimaryText => Some(&mut self.primary),
            Step::EnterSecondaryText => Some(&mut self.secondary),
            _ => None,
        }
    }

    /// Recompute layout dimensions. Never changes the step.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport::from_terminal(width, height);
        self.catalog
            .ensure_visible(self.viewport.list_height as usize);
        debug!(width, height, "form_resized");
    }

    /// Dispatch a terminal event to the form.
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Resize(width, height) => self.resize(*width, *height),
            _ => {}
        }
    }

    /// Handle a key press in the current step.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.is_finished() || key.kind == KeyEventKind::Release {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.cancel();
            return;
        }

        match key.code {
            KeyCode::Esc => {
                if self.step == Step::SelectType && self.catalog.is_filtering() {
                    self.catalog.clear_filter();
                } else {
                    self.cancel();
                }
            }
            KeyCode::Enter
                if key
                    .modifiers
                    .intersects(KeyModifiers::ALT | KeyModifiers::SHIFT) =>
            {
                // Line break in multi-line fields; plain confirm elsewhere
                let multiline = self.focused_field().is_some_and(TextField::is_multiline);
                if !multiline {
                    self.confirm();
                } else if let Some(field) = self.focused_field_mut() {
                    field.insert_newline();
                }
            }
            KeyCode::Enter => self.confirm(),
            _ => match self.step {
                Step::SelectType => self.handle_select_key(key),
                _ => self.handle_text_key(key),
            },
        }
    }

    fn handle_select_key(&mut self, key: KeyEvent) {
        if self.catalog.is_filtering() {
            match key.code {
                KeyCode::Up => self.catalog.select_prev(),
                KeyCode::Down => self.catalog.select_next(),
                KeyCode::Backspace => self.catalog.pop_filter_char(),
                KeyCode::Char(c) if !has_command_modifier(key.modifiers) => {
                    self.catalog.push_filter_char(c)
                }
                _ => {}
            }
        } else {
            match key.code {
                KeyCode::Char('q') => {
                    self.cancel();
                    return;
                }
                KeyCode::Char('/') => self.catalog.start_filter(),
                KeyCode::Up | KeyCode::Char('k') => self.catalog.select_prev(),
                KeyCode::Down | KeyCode::Char('j') => self.catalog.select_next(),
                KeyCode::Home | KeyCode::Char('g') => self.catalog.select_first(),
                KeyCode::End | KeyCode::Char('G') => self.catalog.select_last(),
                _ => {}
            }
        }
        self.catalog
            .ensure_visible(self.viewport.list_height as usize);
    }

    fn handle_text_key(&mut self, key: KeyEvent) {
        let is_primary = self.step == Step::EnterPrimaryText;
        let Some(field) = self.focused_field_mut() else {
            return;
        };

        let changed = match key.code {
            KeyCode::Char(c) if !has_command_modifier(key.modifiers) => field.insert_char(c),
            KeyCode::Backspace => field.delete_char_before(),
            KeyCode::Delete => field.delete_char_at(),
            KeyCode::Left => {
                field.cursor_left();
                false
            }
            KeyCode::Right => {
                field.cursor_right();
                false
            }
            KeyCode::Home => {
                field.cursor_home();
                false
            }
            KeyCode::End => {
                field.cursor_end();
                false
            }
            KeyCode::Up if field.is_multiline() => {
                field.cursor_up();
                false
            }
            KeyCode::Down if field.is_multiline() => {
                field.cursor_down();
                false
            }
            _ => false,
        };

        // Editing the required field dismisses its error
        if changed && is_primary {
            self.last_validation_error = None;
        }
    }

    /// Advance from the current step if its condition holds.
    fn confirm(&mut self) {
        match self.step {
            Step::SelectType => {
                if let Some(entry) = self.catalog.take_selection() {
                    info!(kind = ?self.kind, selected = entry.title(), "type_selected");
                    self.selected_type = Some(entry);
                    self.step = Step::EnterPrimaryText;
                }
            }
            Step::EnterPrimaryText => {
                let label = self.kind.primary_label();
                let value = self.primary.value();
                // A branch description must leave something after whitespace folding
                let error = validate_required(label, value).or_else(|| match self.kind {
                    FormKind::Branch => validate_has_words(label, value),
                    FormKind::Commit => None,
                });
                match error {
                    Some(message) => {
                        debug!(error = %message, "form_validation_failed");
                        self.last_validation_error = Some(message);
                    }
                    None => {
                        self.last_validation_error = None;
                        self.step = Step::EnterSecondaryText;
                    }
                }
            }
            Step::EnterSecondaryText => {
                if let Some(entry) = &self.selected_type {
                    let message =
                        format_message(entry, self.primary.value(), self.secondary.value());
                    info!(kind = ?self.kind, "message_generated");
                    self.generated = Some(message);
                    self.step = Step::Done;
                }
            }
            Step::Done | Step::Cancelled => {}
        }
    }

    fn cancel(&mut self) {
        info!(kind = ?self.kind, step = ?self.step, "form_cancelled");
        self.step = Step::Cancelled;
    }
}

/// Control chords are commands, not text. Control with Alt is AltGr on some
/// layouts and still produces a character.
fn has_command_modifier(modifiers: KeyModifiers) -> bool {
    modifiers.contains(KeyModifiers::CONTROL) && !modifiers.contains(KeyModifiers::ALT)
}
