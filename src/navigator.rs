//! Bounded cursor over a slide sequence.
//!
//! Moving past the last slide does not wrap or error: it reports
//! [`Step::Finished`] and the host ends the viewing session. Moving before the
//! first slide simply stops.

use crate::segmenter::SlideSequence;

/// Outcome of a navigation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The cursor moved to the given index.
    Moved(usize),
    /// Already at the first slide; nothing changed.
    Stopped,
    /// Already at the last slide; the viewing session should end.
    Finished,
}

/// Cursor state for a slide sequence of known length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideNavigator {
    current: usize,
    len: usize,
}

impl SlideNavigator {
    /// Start at the first slide of `slides`.
    pub fn new(slides: &SlideSequence) -> Self {
        Self {
            current: 0,
            len: slides.len().max(1),
        }
    }

    /// Index of the visible slide.
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// Number of slides the cursor ranges over.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; a navigator covers at least one slide.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the cursor is on the last slide.
    pub const fn is_at_end(&self) -> bool {
        self.current + 1 >= self.len
    }

    /// Go back to the first slide. Used when new source text arrives.
    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Adopt a replacement sequence, clamping the cursor if it shrank.
    pub fn rebind(&mut self, slides: &SlideSequence) {
        self.len = slides.len().max(1);
        if self.current >= self.len {
            tracing::debug!("Clamping slide index {} into {} slides", self.current, self.len);
            self.current = self.len - 1;
        }
    }

    /// Advance one slide, or report [`Step::Finished`] on the last one.
    pub fn next(&mut self) -> Step {
        if self.is_at_end() {
            Step::Finished
        } else {
            self.current += 1;
            Step::Moved(self.current)
        }
    }

    /// Go back one slide, or report [`Step::Stopped`] on the first one.
    pub fn previous(&mut self) -> Step {
        if self.current == 0 {
            Step::Stopped
        } else {
            self.current -= 1;
            Step::Moved(self.current)
        }
    }
}
