//! Editable text buffer with a cursor and a character limit.

/// A single-line or multi-line text input.
///
/// The cursor is a character index, not a byte offset, so multi-byte input
/// (accents, emoji) edits cleanly.
#[derive(Debug, Clone)]
pub struct TextField {
    value: String,
    /// Cursor position in characters.
    cursor: usize,
    /// Maximum number of characters accepted.
    char_limit: usize,
    /// Whether newlines may be inserted.
    multiline: bool,
    /// Hint shown while the field is empty.
    pub placeholder: &'static str,
}

impl TextField {
    pub fn single_line(char_limit: usize, placeholder: &'static str) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            char_limit,
            multiline: false,
            placeholder,
        }
    }

    pub fn multi_line(char_limit: usize, placeholder: &'static str) -> Self {
        Self {
            multiline: true,
            ..Self::single_line(char_limit, placeholder)
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    pub fn char_limit(&self) -> usize {
        self.char_limit
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Byte offset of the character at `char_idx` (or end of string).
    fn byte_offset(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Insert a character at the cursor. Input past the limit is dropped.
    /// Returns whether the value changed.
    pub fn insert_char(&mut self, c: char) -> bool {
        if c == '\n' && !self.multiline {
            return false;
        }
        if self.char_count() >= self.char_limit {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
        true
    }

    /// Insert a line break in multi-line fields.
    pub fn insert_newline(&mut self) -> bool {
        self.insert_char('\n')
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_char_before(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let at = self.byte_offset(self.cursor - 1);
        self.value.remove(at);
        self.cursor -= 1;
        true
    }

    /// Delete the character at the cursor position (delete key).
    pub fn delete_char_at(&mut self) -> bool {
        if self.cursor >= self.char_count() {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
        true
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Char ranges `(start, end)` of each line, excluding the `\n`.
    fn line_ranges(&self) -> Vec<(usize, usize)> {
        let mut ranges = Vec::new();
        let mut start = 0;
        for (i, c) in self.value.chars().enumerate() {
            if c == '\n' {
                ranges.push((start, i));
                start = i + 1;
            }
        }
        ranges.push((start, self.char_count()));
        ranges
    }

    /// Index of the line holding the cursor, and that line's range.
    fn cursor_line(&self) -> (usize, (usize, usize)) {
        let ranges = self.line_ranges();
        let row = ranges
            .iter()
            .position(|&(start, end)| self.cursor >= start && self.cursor <= end)
            .unwrap_or(ranges.len() - 1);
        (row, ranges[row])
    }

    /// Move to the same column on the previous line, clamped to its length.
    pub fn cursor_up(&mut self) {
        let (row, (start, _)) = self.cursor_line();
        if row == 0 {
            return;
        }
        let column = self.cursor - start;
        let (prev_start, prev_end) = self.line_ranges()[row - 1];
        self.cursor = prev_start + column.min(prev_end - prev_start);
    }

    /// Move to the same column on the next line, clamped to its length.
    pub fn cursor_down(&mut self) {
        let ranges = self.line_ranges();
        let (row, (start, _)) = self.cursor_line();
        let Some(&(next_start, next_end)) = ranges.get(row + 1) else {
            return;
        };
        let column = self.cursor - start;
        self.cursor = next_start + column.min(next_end - next_start);
    }

    /// Move to the start of the current line.
    pub fn cursor_home(&mut self) {
        let (_, (start, _)) = self.cursor_line();
        self.cursor = start;
    }

    /// Move to the end of the current line.
    pub fn cursor_end(&mut self) {
        let (_, (_, end)) = self.cursor_line();
        self.cursor = end;
    }

    /// Text before and after the cursor.
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.value.split_at(self.byte_offset(self.cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(field: &mut TextField, text: &str) {
        for c in text.chars() {
            field.insert_char(c);
        }
    }

    #[test]
    fn test_insert_and_cursor() {
        let mut field = TextField::single_line(10, "");
        typed(&mut field, "abc");
        assert_eq!(field.value(), "abc");
        assert_eq!(field.cursor(), 3);

        field.cursor_left();
        field.insert_char('X');
        assert_eq!(field.value(), "abXc");
        assert_eq!(field.cursor(), 3);
    }

    #[test]
    fn test_char_limit_stops_input() {
        let mut field = TextField::single_line(3, "");
        typed(&mut field, "abcdef");
        assert_eq!(field.value(), "abc");
        assert!(!field.insert_char('z'));
        assert_eq!(field.char_count(), field.char_limit());
    }

    #[test]
    fn test_char_limit_counts_characters_not_bytes() {
        let mut field = TextField::single_line(3, "");
        typed(&mut field, "ééé");
        assert_eq!(field.value(), "ééé");
        assert!(!field.insert_char('e'));
    }

    #[test]
    fn test_multibyte_editing() {
        let mut field = TextField::single_line(20, "");
        typed(&mut field, "añb");
        field.cursor_left();
        assert!(field.delete_char_before());
        assert_eq!(field.value(), "ab");
        assert_eq!(field.cursor(), 1);
        assert_eq!(field.split_at_cursor(), ("a", "b"));
    }

    #[test]
    fn test_delete_at_and_boundaries() {
        let mut field = TextField::single_line(10, "");
        assert!(!field.delete_char_before());
        assert!(!field.delete_char_at());

        typed(&mut field, "abc");
        field.cursor_home();
        assert!(field.delete_char_at());
        assert_eq!(field.value(), "bc");
        field.cursor_end();
        assert!(!field.delete_char_at());
        field.cursor_right();
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn test_newline_only_in_multiline() {
        let mut single = TextField::single_line(10, "");
        assert!(!single.insert_newline());
        assert!(single.is_empty());

        let mut multi = TextField::multi_line(10, "");
        typed(&mut multi, "a");
        assert!(multi.insert_newline());
        typed(&mut multi, "b");
        assert_eq!(multi.value(), "a\nb");
        assert!(multi.is_multiline());
    }

    #[test]
    fn test_cursor_up_down_keeps_column() {
        let mut field = TextField::multi_line(100, "");
        typed(&mut field, "abc");
        field.insert_newline();
        typed(&mut field, "def");
        assert_eq!(field.cursor(), 7);

        field.cursor_up();
        assert_eq!(field.cursor(), 3);
        field.insert_char('X');
        assert_eq!(field.value(), "abcX\ndef");

        field.cursor_left();
        field.cursor_down();
        assert_eq!(field.cursor(), 8);
        assert_eq!(field.split_at_cursor(), ("abcX\ndef", ""));
    }

    #[test]
    fn test_cursor_up_down_clamps_to_shorter_line() {
        let mut field = TextField::multi_line(100, "");
        typed(&mut field, "a\nlonger");
        field.cursor_up();
        assert_eq!(field.cursor(), 1);

        // Already on the first line
        field.cursor_up();
        assert_eq!(field.cursor(), 1);

        field.cursor_down();
        assert_eq!(field.cursor(), 3);
        field.cursor_end();
        field.cursor_down();
        assert_eq!(field.cursor(), 8);
    }

    #[test]
    fn test_home_end_are_line_relative() {
        let mut field = TextField::multi_line(100, "");
        typed(&mut field, "abc\ndef\nghi");
        field.cursor_up();
        field.cursor_left();

        field.cursor_home();
        assert_eq!(field.cursor(), 4);
        field.cursor_end();
        assert_eq!(field.cursor(), 7);
        assert_eq!(field.split_at_cursor(), ("abc\ndef", "\nghi"));
    }
}
