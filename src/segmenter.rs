//! Text to slide segmentation.
//!
//! Splitting is a single pass over characters: every enabled delimiter is a
//! zero-width separator, fragments are trimmed and empty ones dropped. There
//! is no nesting and no escaping.

use crate::constants::text::PLACEHOLDER;
use crate::delimiter::DelimiterConfiguration;

/// Ordered, never-empty list of trimmed slides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideSequence {
    slides: Vec<String>,
}

impl SlideSequence {
    /// The single-slide sequence shown when there is nothing else to show.
    pub fn placeholder() -> Self {
        Self {
            slides: vec![PLACEHOLDER.to_string()],
        }
    }

    /// Number of slides. Always at least 1.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always `false`; present for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Slide at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.slides.get(index).map(String::as_str)
    }

    /// All slides in order.
    pub fn as_slice(&self) -> &[String] {
        &self.slides
    }

    /// Whether this is the placeholder sequence.
    pub fn is_placeholder(&self) -> bool {
        self.slides.len() == 1 && self.slides.first().is_some_and(|s| s == PLACEHOLDER)
    }
}

impl<'a> IntoIterator for &'a SlideSequence {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.slides.iter()
    }
}

/// Split `raw_text` into slides using the enabled delimiters of `config`.
///
/// Never fails: input that yields no content becomes the placeholder slide.
pub fn segment(raw_text: &str, config: &DelimiterConfiguration) -> SlideSequence {
    let text = raw_text.trim();
    let active = config.active_characters();

    let slides: Vec<String> = if active.is_empty() {
        std::iter::once(text)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        text.split(|c: char| active.contains(&c))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    };

    if slides.is_empty() {
        tracing::debug!("Segmentation produced no slides, using placeholder");
        SlideSequence::placeholder()
    } else {
        tracing::debug!("Segmented {} chars into {} slides", text.chars().count(), slides.len());
        SlideSequence { slides }
    }
}
