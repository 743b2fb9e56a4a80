//! UI rendering functions.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::catalog::TypeEntry;
use crate::form::{FormSession, Step};
use crate::text_field::TextField;

const HIGHLIGHT: Color = Color::Indexed(205);
const ERROR: Color = Color::Indexed(196);

/// Keep the end of `text` that fits in `max_width` display columns.
pub fn clip_to_width(text: &str, max_width: usize) -> &str {
    let mut start = 0;
    while text[start..].width() > max_width {
        match text[start..].chars().next() {
            Some(c) => start += c.len_utf8(),
            None => break,
        }
    }
    &text[start..]
}

/// One catalog row: title, emoji and description.
fn entry_line(entry: &TypeEntry, selected: bool, width: usize) -> Line<'static> {
    let marker = if selected { "> " } else { "  " };
    let title = if entry.emoji().is_empty() {
        entry.title().to_string()
    } else {
        format!("{} {}", entry.title(), entry.emoji())
    };
    let padded_title = format!("{:<14}", title);
    let description: String = entry
        .description()
        .chars()
        .take(width.saturating_sub(padded_title.width() + marker.len()))
        .collect();

    let (title_style, desc_style) = if selected {
        (
            Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Gray),
        )
    } else {
        (
            Style::default().fg(Color::White),
            Style::default().fg(Color::DarkGray),
        )
    };

    Line::from(vec![
        Span::styled(marker, title_style),
        Span::styled(padded_title, title_style),
        Span::styled(description, desc_style),
    ])
}

/// Lines for a focused text field, with a block cursor.
fn field_lines(field: &TextField, width: usize, max_lines: usize) -> Vec<Line<'static>> {
    let cursor_style = Style::default().fg(Color::Black).bg(Color::White);
    let text_style = Style::default().fg(Color::White);

    if field.is_empty() {
        return vec![Line::from(vec![
            Span::styled(" ", cursor_style),
            Span::styled(field.placeholder, Style::default().fg(Color::DarkGray)),
        ])];
    }

    let (before, after) = field.split_at_cursor();
    let before_lines: Vec<&str> = before.split('\n').collect();
    let after_lines: Vec<&str> = after.split('\n').collect();

    let head = before_lines[before_lines.len() - 1];
    let tail = after_lines[0];
    let cursor_char = tail.chars().next().map(String::from).unwrap_or(" ".into());
    let rest = tail.chars().skip(1).collect::<String>();
    let visible_head = clip_to_width(head, width.saturating_sub(1)).to_string();

    let mut lines: Vec<Line> = before_lines[..before_lines.len() - 1]
        .iter()
        .map(|l| Line::from(Span::styled(l.to_string(), text_style)))
        .collect();
    let cursor_row = lines.len();
    lines.push(Line::from(vec![
        Span::styled(visible_head, text_style),
        Span::styled(cursor_char, cursor_style),
        Span::styled(rest, text_style),
    ]));
    lines.extend(
        after_lines[1..]
            .iter()
            .map(|l| Line::from(Span::styled(l.to_string(), text_style))),
    );

    // Window the lines around the cursor row
    let max_lines = max_lines.max(1);
    let start = (cursor_row + 1).saturating_sub(max_lines);
    lines.into_iter().skip(start).take(max_lines).collect()
}

fn selected_type_line(form: &FormSession) -> Line<'static> {
    let Some(entry) = &form.selected_type else {
        return Line::from("");
    };
    let mut spans = vec![
        Span::raw(format!("{}: ", form.kind.type_label())),
        Span::styled(
            entry.title().to_string(),
            Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD),
        ),
    ];
    if !entry.emoji().is_empty() {
        spans.push(Span::raw(format!(" {}", entry.emoji())));
    }
    Line::from(spans)
}

fn counter_line(field: &TextField) -> Line<'static> {
    Line::from(Span::styled(
        format!("Characters: {}/{}", field.char_count(), field.char_limit()),
        Style::default().fg(Color::DarkGray),
    ))
}

fn help_text(form: &FormSession) -> &'static str {
    match form.step {
        Step::SelectType if form.catalog.is_filtering() => {
            "[type] Filter  [↑/↓] Move  [Enter] Select  [Esc] Clear filter"
        }
        Step::SelectType => "[↑/↓] Move  [/] Filter  [Enter] Select  [q] Quit",
        Step::EnterSecondaryText if form.secondary.is_multiline() => {
            "[Enter] Finish  [Alt+Enter] New line  [Esc] Quit"
        }
        _ => "[Enter] Continue  [Esc] Quit",
    }
}

/// Draw the form for its current step.
pub fn draw_form(f: &mut Frame, form: &FormSession) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Active step
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    match form.step {
        Step::SelectType => draw_selector(f, form, chunks[0]),
        Step::EnterPrimaryText | Step::EnterSecondaryText => draw_text_step(f, form, chunks[0]),
        Step::Done | Step::Cancelled => {}
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        help_text(form),
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(footer, chunks[1]);
}

fn draw_selector(f: &mut Frame, form: &FormSession, area: Rect) {
    let catalog = &form.catalog;
    let inner_width = area.width.saturating_sub(2) as usize;
    let list_height = form.viewport.list_height as usize;

    let mut content: Vec<Line> = Vec::new();
    if catalog.is_filtering() {
        content.push(Line::from(vec![
            Span::styled("Filter: ", Style::default().fg(Color::Cyan)),
            Span::raw(catalog.filter().to_string()),
            Span::styled(" ", Style::default().bg(Color::White)),
        ]));
    }

    if catalog.visible_len() == 0 {
        content.push(Line::from(Span::styled(
            "  No matching types",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        let rows = catalog
            .visible_entries()
            .enumerate()
            .skip(catalog.scroll_offset)
            .take(list_height)
            .map(|(i, entry)| entry_line(entry, i == catalog.selected_index(), inner_width));
        content.extend(rows);
    }

    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(form.kind.select_title()),
    );
    f.render_widget(panel, area);
}

fn draw_text_step(f: &mut Frame, form: &FormSession, area: Rect) {
    let Some(field) = form.focused_field() else {
        return;
    };
    let width = form.viewport.field_width as usize;

    let mut content = vec![selected_type_line(form)];
    let prompt = if form.step == Step::EnterPrimaryText {
        form.kind.primary_prompt()
    } else {
        content.push(Line::from(format!(
            "{}: {}",
            form.kind.primary_label(),
            form.primary.value()
        )));
        form.kind.secondary_prompt()
    };

    content.push(Line::from(""));
    content.push(Line::from(prompt));
    content.push(Line::from(""));

    let max_lines = if field.is_multiline() {
        form.viewport.body_height as usize
    } else {
        1
    };
    content.extend(field_lines(field, width, max_lines));
    content.push(Line::from(""));
    content.push(counter_line(field));

    if let Some(error) = &form.last_validation_error {
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(ERROR),
        )));
    }

    let panel = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::sample_settings;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(form: &FormSession, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw_form(f, form)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_clip_to_width_short() {
        assert_eq!(clip_to_width("hello", 10), "hello");
        assert_eq!(clip_to_width("", 3), "");
    }

    #[test]
    fn test_clip_to_width_keeps_tail() {
        assert_eq!(clip_to_width("hello world", 5), "world");
        assert_eq!(clip_to_width("abc", 0), "");
    }

    #[test]
    fn test_clip_to_width_wide_chars() {
        // Each CJK character is two columns wide
        assert_eq!(clip_to_width("日本語", 4), "本語");
        assert_eq!(clip_to_width("日本語", 5), "本語");
    }

    #[test]
    fn test_field_lines_windows_around_cursor() {
        let mut field = TextField::multi_line(100, "");
        for c in "a\nb\nc\nd".chars() {
            field.insert_char(c);
        }
        let lines = field_lines(&field, 20, 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].to_string(), "c");
        assert_eq!(lines[1].to_string(), "d ");
    }

    #[test]
    fn test_field_lines_placeholder() {
        let field = TextField::single_line(10, "required");
        let lines = field_lines(&field, 20, 1);
        assert_eq!(lines[0].to_string(), " required");
    }

    #[test]
    fn test_selector_renders_types() {
        let settings = sample_settings();
        let form = FormSession::branch(&settings);
        let screen = rendered(&form, 80, 24);

        assert!(screen.contains("Select Branch Type"));
        assert!(screen.contains("> feature"));
        assert!(screen.contains("hotfix"));
        assert!(screen.contains("[q] Quit"));
    }

    #[test]
    fn test_text_step_renders_validation_error() {
        let settings = sample_settings();
        let mut form = FormSession::branch(&settings);
        form.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        form.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        let screen = rendered(&form, 80, 24);

        assert!(screen.contains("Branch Type: feature"));
        assert!(screen.contains("Enter a brief description (required):"));
        assert!(screen.contains("Characters: 0/50"));
        assert!(screen.contains("Description is required"));
    }
}
