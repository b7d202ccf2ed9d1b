//! Application constants.
//!
//! Centralizes fixed strings, ranges and timings.

/// Slide text constants.
pub mod text {
    /// Shown when segmentation leaves nothing to display.
    pub const PLACEHOLDER: &str =
        "How to use: Select text from the Services menu to display as slides.";

    /// Shown on the first launch when no text was supplied.
    pub const WELCOME: &str = "Space, j/k, →←\n\
        Select text and press p to open the clipboard as slides\n\
        Press q or reach the last slide to exit\n\
        Press , to open settings";
}

/// Display setting ranges and defaults.
pub mod display {
    /// Default font size in points.
    pub const DEFAULT_FONT_SIZE: f64 = 36.0;
    /// Smallest selectable font size.
    pub const MIN_FONT_SIZE: f64 = 24.0;
    /// Largest selectable font size.
    pub const MAX_FONT_SIZE: f64 = 150.0;
    /// Font size slider step.
    pub const FONT_SIZE_STEP: f64 = 1.0;

    /// Default fraction of the screen width used by slide text.
    pub const DEFAULT_TEXT_WIDTH: f64 = 0.7;
    /// Narrowest text column.
    pub const MIN_TEXT_WIDTH: f64 = 0.5;
    /// Widest text column.
    pub const MAX_TEXT_WIDTH: f64 = 0.95;
    /// Text width slider step.
    pub const TEXT_WIDTH_STEP: f64 = 0.05;

    /// Default line spacing multiplier.
    pub const DEFAULT_LINE_SPACING: f64 = 1.5;
    /// Tightest line spacing.
    pub const MIN_LINE_SPACING: f64 = 1.0;
    /// Loosest line spacing.
    pub const MAX_LINE_SPACING: f64 = 3.0;
    /// Line spacing slider step.
    pub const LINE_SPACING_STEP: f64 = 0.1;

    /// Default font family.
    pub const DEFAULT_FONT: &str = "Helvetica";

    /// Font families offered in the settings screen, sorted by name.
    pub const FONTS: &[&str] = &[
        "Arial",
        "Avenir",
        "Courier New",
        "Georgia",
        "Helvetica",
        "Helvetica Neue",
        "Hiragino Sans",
        "Menlo",
        "Times New Roman",
        "Verdana",
    ];
}

/// About information shown under the help keys.
pub mod about {
    /// Application name.
    pub const NAME: &str = "SlideText";
    /// Developer credit.
    pub const DEVELOPER: &str = "veadar";
    /// Project website.
    pub const WEBSITE: &str = "https://github.com/veadar/SlideText/";
}

/// UI timing and layout constants.
pub mod ui {
    /// Duration of the fade-in after a slide change, in milliseconds.
    pub const TRANSITION_MS: u64 = 200;

    /// How long the event loop waits for input before redrawing, in milliseconds.
    pub const EVENT_POLL_MS: u64 = 50;

    /// Padding around the slide text column.
    pub const SLIDE_PADDING: u16 = 2;
}

/// Async task constants.
pub mod async_tasks {
    /// Channel buffer size for background updates.
    pub const CHANNEL_BUFFER_SIZE: usize = 16;

    /// Default clipboard poll interval in milliseconds.
    pub const DEFAULT_POLL_MS: u64 = 500;
}
