//! Type catalog: the selectable list of branch or commit types.

use crate::config::{BranchType, CommitType, Settings};

/// A displayable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeEntry {
    Branch(BranchType),
    Commit(CommitType),
}

impl TypeEntry {
    pub fn title(&self) -> &str {
        match self {
            Self::Branch(b) => &b.tag,
            Self::Commit(c) => &c.tag,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Branch(b) => &b.description,
            Self::Commit(c) => &c.description,
        }
    }

    /// Text matched against the selector filter.
    pub fn filter_key(&self) -> &str {
        self.title()
    }

    /// Emoji shown beside the title. Branch entries have none.
    pub fn emoji(&self) -> &str {
        match self {
            Self::Branch(_) => "",
            Self::Commit(c) => &c.emoji,
        }
    }
}

/// Ordered, filterable list of type entries with a highlighted item.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<TypeEntry>,
    /// Indices into `entries` that pass the current filter.
    visible: Vec<usize>,
    /// Highlighted position within `visible`.
    selected: usize,
    /// First visible row when the list is taller than its viewport.
    pub scroll_offset: usize,
    /// Current filter text.
    filter: String,
    /// Whether keystrokes are going into the filter.
    filtering: bool,
}

impl Catalog {
    fn new(entries: Vec<TypeEntry>, selected: usize) -> Self {
        let visible = (0..entries.len()).collect();
        Self {
            entries,
            visible,
            selected,
            scroll_offset: 0,
            filter: String::new(),
            filtering: false,
        }
    }

    /// Branch types, highlighting `default_branch_prefix` when it matches.
    pub fn branches(settings: &Settings) -> Self {
        let selected = settings
            .branch_types
            .iter()
            .position(|b| b.tag == settings.default_branch_prefix)
            .unwrap_or(0);
        let entries = settings
            .branch_types
            .iter()
            .cloned()
            .map(TypeEntry::Branch)
            .collect();
        Self::new(entries, selected)
    }

    /// Commit types. Emojis are dropped when disabled in settings.
    pub fn commits(settings: &Settings) -> Self {
        let entries = settings
            .commit_types
            .iter()
            .map(|c| {
                let mut entry = c.clone();
                if !settings.emojis_enabled {
                    entry.emoji.clear();
                }
                TypeEntry::Commit(entry)
            })
            .collect();
        Self::new(entries, 0)
    }

    /// Entries currently shown, in catalog order.
    pub fn visible_entries(&self) -> impl Iterator<Item = &TypeEntry> {
        self.visible.iter().map(|&i| &self.entries[i])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Highlighted position within the visible entries.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&TypeEntry> {
        self.visible.get(self.selected).map(|&i| &self.entries[i])
    }

    /// Copy out the highlighted entry, detached from the catalog.
    pub fn take_selection(&self) -> Option<TypeEntry> {
        self.selected_entry().cloned()
    }

    /// Move selection up, wrapping to the bottom.
    pub fn select_prev(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.visible.len() - 1
        } else {
            self.selected - 1
        };
    }

    /// Move selection down, wrapping to the top.
    pub fn select_next(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.visible.len();
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible.len().saturating_sub(1);
    }

    pub fn is_filtering(&self) -> bool {
        self.filtering
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn start_filter(&mut self) {
        self.filtering = true;
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter.push(c);
        self.apply_filter();
    }

    pub fn pop_filter_char(&mut self) {
        self.filter.pop();
        self.apply_filter();
    }

    /// Leave filter mode and show every entry again.
    pub fn clear_filter(&mut self) {
        let highlighted = self.visible.get(self.selected).copied();
        self.filtering = false;
        self.filter.clear();
        self.visible = (0..self.entries.len()).collect();
        // Keep the same entry highlighted once the full list is back
        self.selected = highlighted.unwrap_or(0);
        self.scroll_offset = 0;
    }

    fn apply_filter(&mut self) {
        let highlighted = self.visible.get(self.selected).copied();
        let needle = self.filter.to_lowercase();
        self.visible = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.filter_key().to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();
        self.selected = highlighted
            .and_then(|h| self.visible.iter().position(|&i| i == h))
            .unwrap_or(0);
        self.scroll_offset = 0;
    }

    /// Ensure selected item is visible, adjusting scroll_offset if needed.
    pub fn ensure_visible(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected - visible_height + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::sample_settings;

    fn titles(catalog: &Catalog) -> Vec<&str> {
        catalog.visible_entries().map(TypeEntry::title).collect()
    }

    #[test]
    fn test_branch_default_selection_matches_prefix() {
        let mut settings = sample_settings();
        settings.default_branch_prefix = "hotfix".to_string();

        let catalog = Catalog::branches(&settings);
        assert_eq!(catalog.selected_entry().unwrap().title(), "hotfix");
    }

    #[test]
    fn test_branch_default_selection_falls_back_to_first() {
        let mut settings = sample_settings();
        settings.default_branch_prefix = "does-not-exist".to_string();

        let catalog = Catalog::branches(&settings);
        assert_eq!(catalog.selected_index(), 0);
        assert_eq!(
            catalog.selected_entry().unwrap().title(),
            settings.branch_types[0].tag
        );
    }

    #[test]
    fn test_commit_default_selection_is_first() {
        let settings = sample_settings();
        let catalog = Catalog::commits(&settings);
        assert_eq!(catalog.selected_entry().unwrap().title(), "feat");
        assert_eq!(catalog.selected_entry().unwrap().emoji(), "✨");
    }

    #[test]
    fn test_commit_emojis_dropped_when_disabled() {
        let mut settings = sample_settings();
        settings.emojis_enabled = false;

        let catalog = Catalog::commits(&settings);
        assert!(catalog.visible_entries().all(|e| e.emoji().is_empty()));
        // Settings themselves are untouched
        assert_eq!(settings.commit_types[0].emoji, "✨");
    }

    #[test]
    fn test_entry_capabilities() {
        let branch = TypeEntry::Branch(BranchType {
            tag: "fix".to_string(),
            description: "A bug fix".to_string(),
        });
        assert_eq!(branch.title(), "fix");
        assert_eq!(branch.description(), "A bug fix");
        assert_eq!(branch.filter_key(), "fix");
        assert_eq!(branch.emoji(), "");

        let commit = TypeEntry::Commit(CommitType {
            tag: "docs".to_string(),
            description: "Docs".to_string(),
            emoji: "📝".to_string(),
        });
        assert_eq!(commit.title(), "docs");
        assert_eq!(commit.emoji(), "📝");
    }

    #[test]
    fn test_navigation_wraps() {
        let settings = sample_settings();
        let mut catalog = Catalog::commits(&settings);
        let len = catalog.visible_len();

        catalog.select_prev();
        assert_eq!(catalog.selected_index(), len - 1);
        catalog.select_next();
        assert_eq!(catalog.selected_index(), 0);

        catalog.select_last();
        assert_eq!(catalog.selected_index(), len - 1);
        catalog.select_first();
        assert_eq!(catalog.selected_index(), 0);
    }

    #[test]
    fn test_filter_narrows_and_clears() {
        let settings = sample_settings();
        let mut catalog = Catalog::commits(&settings);

        catalog.start_filter();
        catalog.push_filter_char('F');
        catalog.push_filter_char('i');
        assert!(catalog.is_filtering());
        assert_eq!(titles(&catalog), vec!["fix"]);
        assert_eq!(catalog.selected_entry().unwrap().title(), "fix");

        catalog.pop_filter_char();
        assert_eq!(titles(&catalog), vec!["feat", "fix", "refactor", "perf"]);

        catalog.clear_filter();
        assert!(!catalog.is_filtering());
        assert_eq!(catalog.visible_len(), settings.commit_types.len());
    }

    #[test]
    fn test_filter_keeps_highlight_when_still_visible() {
        let settings = sample_settings();
        let mut catalog = Catalog::commits(&settings);
        catalog.select_next(); // fix

        catalog.start_filter();
        catalog.push_filter_char('f');
        assert_eq!(catalog.selected_entry().unwrap().title(), "fix");

        catalog.clear_filter();
        assert_eq!(catalog.selected_entry().unwrap().title(), "fix");
    }

    #[test]
    fn test_filter_without_matches_has_no_selection() {
        let settings = sample_settings();
        let mut catalog = Catalog::branches(&settings);

        catalog.start_filter();
        for c in "zzz".chars() {
            catalog.push_filter_char(c);
        }
        assert_eq!(catalog.visible_len(), 0);
        assert!(catalog.take_selection().is_none());

        // Navigation on an empty list is a no-op
        catalog.select_next();
        catalog.select_prev();
        assert!(catalog.selected_entry().is_none());
    }

    #[test]
    fn test_take_selection_is_a_copy() {
        let settings = sample_settings();
        let mut catalog = Catalog::branches(&settings);

        let taken = catalog.take_selection().unwrap();
        catalog.select_next();
        assert_eq!(taken.title(), "feature");
        assert_ne!(catalog.selected_entry().unwrap(), &taken);
    }

    #[test]
    fn test_ensure_visible() {
        let settings = sample_settings();
        let mut catalog = Catalog::commits(&settings);

        catalog.select_last();
        catalog.ensure_visible(3);
        assert_eq!(catalog.scroll_offset, catalog.visible_len() - 3);

        catalog.select_first();
        catalog.ensure_visible(3);
        assert_eq!(catalog.scroll_offset, 0);
    }
}
