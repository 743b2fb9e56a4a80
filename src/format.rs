//! Branch name and commit message formatting.

use crate::catalog::TypeEntry;
use crate::config::{BranchType, CommitType};

/// Lowercase a description and join its words with single hyphens.
fn slugify(description: &str) -> String {
    description
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Formats a branch name as `type/description` or `type/issue-description`.
///
/// Only case and whitespace are normalized; other characters pass through.
pub fn format_branch_name(branch_type: &BranchType, description: &str, issue: &str) -> String {
    let description = slugify(description);
    if issue.is_empty() {
        format!("{}/{}", branch_type.tag, description)
    } else {
        format!("{}/{}-{}", branch_type.tag, issue, description)
    }
}

/// Formats a commit message as `type<emoji>: summary`, plus the body after a
/// blank line when one was given.
pub fn format_commit_message(commit_type: &CommitType, summary: &str, body: &str) -> String {
    let mut message = format!("{}{}: {}", commit_type.tag, commit_type.emoji, summary);
    if !body.is_empty() {
        message.push_str("\n\n");
        message.push_str(body);
    }
    message
}

/// Dispatch to the formatter matching the entry's kind.
pub fn format_message(entry: &TypeEntry, primary: &str, secondary: &str) -> String {
    match entry {
        TypeEntry::Branch(b) => format_branch_name(b, primary, secondary),
        TypeEntry::Commit(c) => format_commit_message(c, primary, secondary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(tag: &str) -> BranchType {
        BranchType {
            tag: tag.to_string(),
            description: String::new(),
        }
    }

    fn commit(tag: &str, emoji: &str) -> CommitType {
        CommitType {
            tag: tag.to_string(),
            description: String::new(),
            emoji: emoji.to_string(),
        }
    }

    #[test]
    fn test_branch_name_lowercase_hyphenated() {
        assert_eq!(
            format_branch_name(&branch("feature"), "Add Login Flow", ""),
            "feature/add-login-flow"
        );
    }

    #[test]
    fn test_branch_name_with_issue() {
        assert_eq!(
            format_branch_name(&branch("fix"), "null check", "42"),
            "fix/42-null-check"
        );
    }

    #[test]
    fn test_branch_name_collapses_whitespace_runs() {
        assert_eq!(
            format_branch_name(&branch("chore"), "  bump \t deps  now ", ""),
            "chore/bump-deps-now"
        );
    }

    #[test]
    fn test_branch_name_passes_punctuation_through() {
        assert_eq!(
            format_branch_name(&branch("fix"), "Parse a/b: Edge", "JIRA-7"),
            "fix/JIRA-7-parse-a/b:-edge"
        );
    }

    #[test]
    fn test_commit_message_without_body() {
        assert_eq!(
            format_commit_message(&commit("fix", "🐛"), "handle nil input", ""),
            "fix🐛: handle nil input"
        );
    }

    #[test]
    fn test_commit_message_with_body() {
        let body = "First line\n\nSecond paragraph";
        assert_eq!(
            format_commit_message(&commit("feat", "✨"), "add login", body),
            "feat✨: add login\n\nFirst line\n\nSecond paragraph"
        );
    }

    #[test]
    fn test_commit_message_whitespace_body_is_kept() {
        // Body emptiness is checked on the raw value
        assert_eq!(
            format_commit_message(&commit("docs", ""), "readme", " "),
            "docs: readme\n\n "
        );
    }

    #[test]
    fn test_commit_message_without_emoji() {
        assert_eq!(
            format_commit_message(&commit("ci", ""), "cache deps", ""),
            "ci: cache deps"
        );
    }

    #[test]
    fn test_formatters_are_idempotent() {
        let b = branch("feature");
        let c = commit("fix", "🐛");
        assert_eq!(
            format_branch_name(&b, "Same Input", "1"),
            format_branch_name(&b, "Same Input", "1")
        );
        assert_eq!(
            format_commit_message(&c, "same", "body"),
            format_commit_message(&c, "same", "body")
        );
    }

    #[test]
    fn test_format_message_dispatch() {
        let entry = TypeEntry::Branch(branch("feature"));
        assert_eq!(format_message(&entry, "New UI", ""), "feature/new-ui");

        let entry = TypeEntry::Commit(commit("fix", "🐛"));
        assert_eq!(format_message(&entry, "oops", ""), "fix🐛: oops");
    }
}
