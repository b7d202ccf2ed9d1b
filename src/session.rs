//! Viewing session: source text, delimiter configuration, slides and cursor.
//!
//! Every mutation ends in an explicit recompute step. New text resets the
//! cursor; a configuration change only clamps it.

use crate::delimiter::DelimiterConfiguration;
use crate::navigator::{SlideNavigator, Step};
use crate::segmenter::{segment, SlideSequence};

/// What the presentation layer needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideView<'a> {
    /// Text of the visible slide.
    pub text: &'a str,
    /// Zero-based index of the visible slide.
    pub index: usize,
    /// Number of slides.
    pub total: usize,
}

impl SlideView<'_> {
    /// Page indicator in `n/N` form.
    pub fn page_label(&self) -> String {
        format!("{}/{}", self.index + 1, self.total)
    }
}

/// Owns everything needed to show one piece of text as slides.
#[derive(Debug, Clone)]
pub struct SlideSession {
    source: String,
    config: DelimiterConfiguration,
    slides: SlideSequence,
    navigator: SlideNavigator,
}

impl SlideSession {
    /// Session showing `text` with `config`.
    pub fn new(text: impl Into<String>, config: DelimiterConfiguration) -> Self {
        let source = text.into();
        let slides = segment(&source, &config);
        let navigator = SlideNavigator::new(&slides);
        Self {
            source,
            config,
            slides,
            navigator,
        }
    }

    /// Replace the source text and start from the first slide.
    pub fn open_text(&mut self, text: impl Into<String>) {
        self.source = text.into();
        self.slides = segment(&self.source, &self.config);
        self.navigator.rebind(&self.slides);
        self.navigator.reset();
        tracing::info!("Opened text as {} slides", self.slides.len());
    }

    /// Replace the delimiter configuration, keeping the cursor where possible.
    pub fn apply_configuration(&mut self, config: DelimiterConfiguration) {
        if config == self.config {
            return;
        }
        self.config = config;
        self.slides = segment(&self.source, &self.config);
        self.navigator.rebind(&self.slides);
        tracing::debug!(
            "Configuration changed: {} slides, index {}",
            self.slides.len(),
            self.navigator.current_index()
        );
    }

    /// Toggle one delimiter and recompute.
    pub fn toggle_delimiter(&mut self, character: char) {
        let next = self.config.toggled(character);
        self.apply_configuration(next);
    }

    /// Advance; see [`SlideNavigator::next`].
    pub fn next(&mut self) -> Step {
        self.navigator.next()
    }

    /// Go back; see [`SlideNavigator::previous`].
    pub fn previous(&mut self) -> Step {
        self.navigator.previous()
    }

    /// Jump to the first slide.
    pub fn reset(&mut self) {
        self.navigator.reset();
    }

    /// Current slide, index and total.
    pub fn view(&self) -> SlideView<'_> {
        let index = self.navigator.current_index();
        SlideView {
            text: self.slides.get(index).unwrap_or_default(),
            index,
            total: self.slides.len(),
        }
    }

    /// The active configuration.
    pub const fn configuration(&self) -> &DelimiterConfiguration {
        &self.config
    }

    /// The current slides.
    pub const fn slides(&self) -> &SlideSequence {
        &self.slides
    }

    /// The raw text the slides were built from.
    pub fn source(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_open_text_resets_cursor() {
        let mut session = SlideSession::new("a\nb\nc", DelimiterConfiguration::default());
        session.next();
        session.next();
        assert_eq!(session.view().index, 2);

        session.open_text("x\ny\nz\nw");
        let view = session.view();
        assert_eq!(view.index, 0);
        assert_eq!(view.total, 4);
        assert_eq!(view.text, "x");
    }

    #[test]
    fn test_configuration_change_clamps_cursor() {
        // Five slides on line breaks, two once line breaks are disabled.
        let text = "one\ntwo\nthree. four\nfive";
        let mut session = SlideSession::new(text, DelimiterConfiguration::default());
        assert_eq!(session.view().total, 5);
        for _ in 0..4 {
            session.next();
        }
        assert_eq!(session.view().index, 4);

        session.toggle_delimiter('\n');
        let view = session.view();
        assert_eq!(view.total, 2);
        assert_eq!(view.index, 1);
        assert_eq!(view.text, "four\nfive");
    }

    #[test]
    fn test_configuration_change_keeps_cursor_in_range() {
        let mut session = SlideSession::new("a\nb\nc,d", DelimiterConfiguration::default());
        session.next();
        session.toggle_delimiter(',');
        assert_eq!(session.view().index, 1);
        assert_eq!(session.view().total, 4);
    }

    #[test]
    fn test_noop_configuration_change_keeps_slides() {
        let mut session = SlideSession::new("a.b.c", DelimiterConfiguration::default());
        let before = session.slides().clone();
        session.toggle_delimiter('x');
        assert_eq!(session.slides(), &before);
    }

    #[test]
    fn test_empty_text_shows_placeholder() {
        let session = SlideSession::new("", DelimiterConfiguration::default());
        let view = session.view();
        assert_eq!(view.total, 1);
        assert_eq!(view.text, crate::constants::text::PLACEHOLDER);
        assert_eq!(view.page_label(), "1/1");
    }
}
