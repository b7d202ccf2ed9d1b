//! `SlideText` - show selected text as full-screen terminal slides.
//!
//! Text is split into slides on configurable delimiter characters and shown
//! one slide at a time. The engine (`delimiter`, `segmenter`, `navigator`,
//! `session`) is pure and has no terminal dependencies; the remaining modules
//! host it in a ratatui front end.

pub mod app;
pub mod config;
pub mod constants;
pub mod delimiter;
pub mod error;
pub mod input;
pub mod logging;
pub mod navigator;
pub mod segmenter;
pub mod services;
pub mod session;
pub mod settings;
pub mod ui;

pub use delimiter::{Delimiter, DelimiterConfiguration, DelimiterGroup};
pub use error::{Error, Result};
pub use navigator::{SlideNavigator, Step};
pub use segmenter::{segment, SlideSequence};
pub use session::{SlideSession, SlideView};
