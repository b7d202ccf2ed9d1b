//! Delimiter characters that split source text into slides.
//!
//! A [`DelimiterConfiguration`] is a plain value: toggling produces a new
//! value (or flips one entry in place) and the caller decides when to
//! re-segment.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single split character and whether it is currently active.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Delimiter {
    /// The character that triggers a split.
    pub character: char,
    /// Whether the character currently splits text.
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl Delimiter {
    /// Create a delimiter entry.
    pub const fn new(character: char, is_enabled: bool) -> Self {
        Self { character, is_enabled }
    }

    /// Display label used by the settings screen.
    pub fn label(&self) -> String {
        if self.character == '\n' {
            "Line Break".to_string()
        } else {
            format!("「{}」", self.character)
        }
    }

    /// Display group this delimiter belongs to.
    pub const fn group(&self) -> DelimiterGroup {
        DelimiterGroup::of(self.character)
    }
}

// Identity is the character; the enabled flag is state, not identity.
impl PartialEq for Delimiter {
    fn eq(&self, other: &Self) -> bool {
        self.character == other.character
    }
}

impl Eq for Delimiter {}

impl std::hash::Hash for Delimiter {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.character.hash(state);
    }
}

/// Grouping used only for presenting delimiters in settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterGroup {
    /// Line break and the common sentence/clause separators.
    Basic,
    /// Exclamation, question, ellipsis, colon and semicolon marks.
    Punctuation,
    /// Closing brackets.
    Brackets,
}

impl DelimiterGroup {
    /// Returns all groups in display order.
    pub const fn all() -> &'static [Self] {
        &[Self::Basic, Self::Punctuation, Self::Brackets]
    }

    /// Returns the human-readable group heading.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Punctuation => "Punctuation",
            Self::Brackets => "Brackets",
        }
    }

    /// Classify a character for display.
    pub const fn of(character: char) -> Self {
        match character {
            '\n' | '。' | '、' | '.' | ',' => Self::Basic,
            '」' | '』' | '）' | ')' | '］' | ']' | '｝' | '}' => Self::Brackets,
            _ => Self::Punctuation,
        }
    }
}

/// Ordered, duplicate-free list of delimiters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<Delimiter>", into = "Vec<Delimiter>")]
pub struct DelimiterConfiguration {
    entries: Vec<Delimiter>,
}

impl DelimiterConfiguration {
    /// Build a configuration, keeping the first entry for any repeated character.
    pub fn from_entries(entries: impl IntoIterator<Item = Delimiter>) -> Self {
        let mut seen = BTreeSet::new();
        let entries = entries
            .into_iter()
            .filter(|d| seen.insert(d.character))
            .collect();
        Self { entries }
    }

    /// All entries in display order.
    pub fn entries(&self) -> &[Delimiter] {
        &self.entries
    }

    /// Look up the entry for a character.
    pub fn get(&self, character: char) -> Option<&Delimiter> {
        self.entries.iter().find(|d| d.character == character)
    }

    /// Characters of every enabled entry.
    pub fn active_characters(&self) -> BTreeSet<char> {
        self.entries
            .iter()
            .filter(|d| d.is_enabled)
            .map(|d| d.character)
            .collect()
    }

    /// Flip `is_enabled` for `character`.
    ///
    /// Returns `false` without changing anything when the character is not
    /// part of the configuration.
    pub fn toggle(&mut self, character: char) -> bool {
        match self.entries.iter_mut().find(|d| d.character == character) {
            Some(entry) => {
                entry.is_enabled = !entry.is_enabled;
                true
            }
            None => false,
        }
    }

    /// Copy of this configuration with `character` toggled.
    #[must_use]
    pub fn toggled(&self, character: char) -> Self {
        let mut next = self.clone();
        next.toggle(character);
        next
    }

    /// Set `is_enabled` for `character` explicitly. Unknown characters are ignored.
    pub fn set_enabled(&mut self, character: char, enabled: bool) -> bool {
        match self.entries.iter_mut().find(|d| d.character == character) {
            Some(entry) => {
                entry.is_enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Entries belonging to one display group, in order.
    pub fn group(&self, group: DelimiterGroup) -> impl Iterator<Item = &Delimiter> {
        self.entries.iter().filter(move |d| d.group() == group)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DelimiterConfiguration {
    fn default() -> Self {
        Self::from_entries([
            // Basic
            Delimiter::new('\n', true),
            Delimiter::new('。', true),
            Delimiter::new('、', false),
            Delimiter::new('.', true),
            Delimiter::new(',', false),
            // Punctuation
            Delimiter::new('！', false),
            Delimiter::new('!', false),
            Delimiter::new('？', false),
            Delimiter::new('?', false),
            Delimiter::new('…', false),
            Delimiter::new('：', false),
            Delimiter::new(':', false),
            Delimiter::new('；', false),
            Delimiter::new(';', false),
            // Brackets (split after the closing side)
            Delimiter::new('」', false),
            Delimiter::new('』', false),
            Delimiter::new('）', false),
            Delimiter::new(')', false),
            Delimiter::new('］', false),
            Delimiter::new(']', false),
            Delimiter::new('｝', false),
            Delimiter::new('}', false),
        ])
    }
}

// Two configurations are equal only if every entry also agrees on `is_enabled`.
impl PartialEq for DelimiterConfiguration {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|(a, b)| a.character == b.character && a.is_enabled == b.is_enabled)
    }
}

impl Eq for DelimiterConfiguration {}

impl From<Vec<Delimiter>> for DelimiterConfiguration {
    fn from(entries: Vec<Delimiter>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<DelimiterConfiguration> for Vec<Delimiter> {
    fn from(config: DelimiterConfiguration) -> Self {
        config.entries
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_default_active_characters() {
        let config = DelimiterConfiguration::default();
        let active: Vec<char> = config.active_characters().into_iter().collect();
        assert_eq!(active, vec!['\n', '.', '。']);
        assert_eq!(config.len(), 22);
    }

    #[test]
    fn test_default_groups_keep_display_order() {
        let config = DelimiterConfiguration::default();
        let basic: Vec<char> = config.group(DelimiterGroup::Basic).map(|d| d.character).collect();
        assert_eq!(basic, vec!['\n', '。', '、', '.', ',']);
        assert_eq!(config.group(DelimiterGroup::Punctuation).count(), 9);
        assert_eq!(config.group(DelimiterGroup::Brackets).count(), 8);
    }

    #[test]
    fn test_toggle_flips_only_matching_entry() {
        let mut config = DelimiterConfiguration::default();
        assert!(config.toggle(','));
        assert!(config.get(',').unwrap().is_enabled);
        assert!(config.toggle('.'));
        assert!(!config.get('.').unwrap().is_enabled);
        assert!(config.get('\n').unwrap().is_enabled);
    }

    #[test]
    fn test_toggle_unknown_character_is_noop() {
        let mut config = DelimiterConfiguration::default();
        let before = config.clone();
        assert!(!config.toggle('x'));
        assert_eq!(config.active_characters(), before.active_characters());
    }

    #[test]
    fn test_toggled_leaves_original_untouched() {
        let config = DelimiterConfiguration::default();
        let next = config.toggled('、');
        assert_ne!(config, next);
        assert!(!config.get('、').unwrap().is_enabled);
        assert!(next.get('、').unwrap().is_enabled);
    }

    #[test]
    fn test_duplicates_keep_first_entry() {
        let config = DelimiterConfiguration::from_entries([
            Delimiter::new('.', false),
            Delimiter::new(',', true),
            Delimiter::new('.', true),
        ]);
        assert_eq!(config.len(), 2);
        assert!(!config.get('.').unwrap().is_enabled);
    }

    #[test]
    fn test_deserialize_dedupes() {
        let json = r#"[
            {"character": "\n", "is_enabled": true},
            {"character": "\n", "is_enabled": false},
            {"character": "?"}
        ]"#;
        let config: DelimiterConfiguration = serde_json::from_str(json).unwrap();
        assert_eq!(config.len(), 2);
        assert!(config.get('\n').unwrap().is_enabled);
        assert!(config.get('?').unwrap().is_enabled);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Delimiter::new('\n', true).label(), "Line Break");
        assert_eq!(Delimiter::new('。', true).label(), "「。」");
    }
}
