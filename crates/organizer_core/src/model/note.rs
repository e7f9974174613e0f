//! Note record and tag parsing.
//!
//! # Invariants
//! - `tags` never contains blank entries; duplicates are kept as typed.
//! - `category` is never blank once stored.

use crate::model::task::validate_title;
use crate::model::validation::ValidationError;
use crate::model::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category applied when a note is saved without one.
pub const DEFAULT_NOTE_CATEGORY: &str = "General";

const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_category")]
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// First 100 characters of `content`, with `...` appended when cut.
    pub fn preview(&self) -> String {
        let mut preview: String = self.content.chars().take(PREVIEW_CHARS).collect();
        if self.content.chars().count() > PREVIEW_CHARS {
            preview.push_str("...");
        }
        preview
    }

    pub(crate) fn apply(&mut self, patch: NotePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(tags) = patch.tags {
            self.tags = clean_tags(tags);
        }
        if let Some(category) = patch.category {
            self.category = normalize_category(Some(category));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub category: Option<String>,
}

impl NewNote {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
}

impl NotePatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }
}

/// Splits comma-separated tag input, trimming entries and dropping blanks.
///
/// `"a, , b"` yields `["a", "b"]`.
pub fn parse_tags(input: &str) -> Vec<String> {
    clean_tags(input.split(','))
}

pub(crate) fn clean_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|tag| tag.as_ref().trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

pub(crate) fn normalize_category(category: Option<String>) -> String {
    match category {
        Some(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => default_category(),
    }
}

fn default_category() -> String {
    DEFAULT_NOTE_CATEGORY.to_string()
}

#[cfg(test)]
mod tests {
    use super::{normalize_category, parse_tags, DEFAULT_NOTE_CATEGORY};

    #[test]
    fn parse_tags_drops_blank_entries() {
        assert_eq!(parse_tags("a, , b"), vec!["a".to_string(), "b".to_string()]);
        assert!(parse_tags(" , ,").is_empty());
    }

    #[test]
    fn parse_tags_keeps_duplicates() {
        assert_eq!(parse_tags("x,x"), vec!["x".to_string(), "x".to_string()]);
    }

    #[test]
    fn blank_category_falls_back_to_default() {
        assert_eq!(normalize_category(Some("  ".to_string())), DEFAULT_NOTE_CATEGORY);
        assert_eq!(normalize_category(None), DEFAULT_NOTE_CATEGORY);
        assert_eq!(normalize_category(Some(" Lab ".to_string())), "Lab");
    }
}
