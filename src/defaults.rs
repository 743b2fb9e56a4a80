//! Embedded default configuration, written to disk on first run.

/// Default settings payload in the on-disk JSON format.
pub const DEFAULT_CONFIG_JSON: &str = r#"{
  "default_branch_prefix": "feature",
  "default_commit_prefix": "feat",
  "emojis_enabled": true,
  "branch_types": [
    { "type": "feature", "description": "A new feature or enhancement" },
    { "type": "fix", "description": "A bug fix" },
    { "type": "hotfix", "description": "An urgent fix for production" },
    { "type": "release", "description": "Preparation of a new release" },
    { "type": "chore", "description": "Maintenance that does not touch features" },
    { "type": "docs", "description": "Documentation only changes" },
    { "type": "refactor", "description": "Code restructuring without behavior change" },
    { "type": "test", "description": "Adding or correcting tests" }
  ],
  "commit_types": [
    { "type": "feat", "description": "A new feature", "emoji": "✨" },
    { "type": "fix", "description": "A bug fix", "emoji": "🐛" },
    { "type": "docs", "description": "Documentation only changes", "emoji": "📝" },
    { "type": "style", "description": "Formatting, missing semicolons, etc.", "emoji": "💄" },
    { "type": "refactor", "description": "A code change that neither fixes a bug nor adds a feature", "emoji": "♻️" },
    { "type": "perf", "description": "A code change that improves performance", "emoji": "⚡️" },
    { "type": "test", "description": "Adding missing tests or correcting existing tests", "emoji": "✅" },
    { "type": "build", "description": "Changes to the build system or dependencies", "emoji": "📦" },
    { "type": "ci", "description": "Changes to CI configuration files and scripts", "emoji": "👷" },
    { "type": "chore", "description": "Other changes that don't modify src or test files", "emoji": "🔧" },
    { "type": "revert", "description": "Reverts a previous commit", "emoji": "⏪️" }
  ]
}
"#;
