//! Persisted user settings.
//!
//! Display preferences and the delimiter configuration are stored together in
//! one JSON file. Fields missing from an older file take their defaults and
//! out-of-range numbers are clamped on load.

use fs_err as fs;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::display;
use crate::delimiter::DelimiterConfiguration;
use crate::error::{Error, Result};

/// Settings file name inside the application data directory.
pub const SETTINGS_FILE: &str = "settings.json";

/// Colour theme for the slide screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorTheme {
    /// Black on white.
    #[default]
    Light,
    /// White on black.
    Dark,
    /// Black on warm paper.
    Sepia,
    /// Black on pale blue.
    Ocean,
    /// Black on pale green.
    Forest,
    /// Black on pale orange.
    Sunset,
}

impl ColorTheme {
    /// Returns all themes in display order.
    pub const fn all() -> &'static [Self] {
        &[Self::Light, Self::Dark, Self::Sepia, Self::Ocean, Self::Forest, Self::Sunset]
    }

    /// Returns the human-readable name of this theme.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::Sepia => "Sepia",
            Self::Ocean => "Ocean",
            Self::Forest => "Forest",
            Self::Sunset => "Sunset",
        }
    }

    /// Cycle to the next theme.
    pub const fn next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Sepia,
            Self::Sepia => Self::Ocean,
            Self::Ocean => Self::Forest,
            Self::Forest => Self::Sunset,
            Self::Sunset => Self::Light,
        }
    }

    /// Cycle to the previous theme.
    pub const fn previous(self) -> Self {
        match self {
            Self::Light => Self::Sunset,
            Self::Dark => Self::Light,
            Self::Sepia => Self::Dark,
            Self::Ocean => Self::Sepia,
            Self::Forest => Self::Ocean,
            Self::Sunset => Self::Forest,
        }
    }

    /// Background colour.
    pub const fn background(self) -> Color {
        match self {
            Self::Light => Color::Rgb(255, 255, 255),
            Self::Dark => Color::Rgb(0, 0, 0),
            Self::Sepia => Color::Rgb(250, 242, 222),
            Self::Ocean => Color::Rgb(217, 242, 255),
            Self::Forest => Color::Rgb(230, 242, 230),
            Self::Sunset => Color::Rgb(255, 242, 230),
        }
    }

    /// Text colour.
    pub const fn foreground(self) -> Color {
        match self {
            Self::Dark => Color::Rgb(255, 255, 255),
            _ => Color::Rgb(0, 0, 0),
        }
    }
}

/// Everything the user can change in the settings screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Font size in points (kept for compatibility, terminals cannot scale glyphs).
    pub font_size: f64,
    /// Colour theme.
    pub color_theme: ColorTheme,
    /// Fraction of the screen width used by slide text.
    pub text_width: f64,
    /// Fade slides in after a change.
    pub use_animation: bool,
    /// Show the `n/N` page indicator.
    pub show_page_number: bool,
    /// Font family name.
    pub selected_font: String,
    /// Line spacing multiplier.
    pub line_spacing: f64,
    /// Wrap slide text to fit the screen.
    pub auto_resize_text: bool,
    /// Split characters.
    pub delimiters: DelimiterConfiguration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_size: display::DEFAULT_FONT_SIZE,
            color_theme: ColorTheme::default(),
            text_width: display::DEFAULT_TEXT_WIDTH,
            use_animation: true,
            show_page_number: true,
            selected_font: display::DEFAULT_FONT.to_string(),
            line_spacing: display::DEFAULT_LINE_SPACING,
            auto_resize_text: true,
            delimiters: DelimiterConfiguration::default(),
        }
    }
}

impl Settings {
    /// Clamp numeric fields into their allowed ranges.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.font_size = clamp_or(
            self.font_size,
            display::MIN_FONT_SIZE,
            display::MAX_FONT_SIZE,
            display::DEFAULT_FONT_SIZE,
        );
        self.text_width = clamp_or(
            self.text_width,
            display::MIN_TEXT_WIDTH,
            display::MAX_TEXT_WIDTH,
            display::DEFAULT_TEXT_WIDTH,
        );
        self.line_spacing = clamp_or(
            self.line_spacing,
            display::MIN_LINE_SPACING,
            display::MAX_LINE_SPACING,
            display::DEFAULT_LINE_SPACING,
        );
        if self.delimiters.is_empty() {
            self.delimiters = DelimiterConfiguration::default();
        }
        self
    }

    /// Step font size by `steps` slider increments.
    pub fn adjust_font_size(&mut self, steps: i32) {
        self.font_size = step(
            self.font_size,
            steps,
            display::FONT_SIZE_STEP,
            display::MIN_FONT_SIZE,
            display::MAX_FONT_SIZE,
        );
    }

    /// Move `steps` places through [`display::FONTS`], wrapping at both ends.
    ///
    /// A font name not in the list (hand-edited settings) counts as the default.
    pub fn cycle_font(&mut self, steps: i32) {
        let fonts = display::FONTS;
        if fonts.is_empty() {
            return;
        }
        let len = fonts.len();
        let current = fonts
            .iter()
            .position(|f| *f == self.selected_font)
            .or_else(|| fonts.iter().position(|f| *f == display::DEFAULT_FONT))
            .unwrap_or(0);
        let offset = usize::try_from(steps.unsigned_abs()).unwrap_or(0) % len;
        let next = if steps < 0 {
            (current + len - offset) % len
        } else {
            (current + offset) % len
        };
        if let Some(font) = fonts.get(next) {
            self.selected_font = (*font).to_string();
        }
    }

    /// Step text width by `steps` slider increments.
    pub fn adjust_text_width(&mut self, steps: i32) {
        self.text_width = step(
            self.text_width,
            steps,
            display::TEXT_WIDTH_STEP,
            display::MIN_TEXT_WIDTH,
            display::MAX_TEXT_WIDTH,
        );
    }

    /// Step line spacing by `steps` slider increments.
    pub fn adjust_line_spacing(&mut self, steps: i32) {
        self.line_spacing = step(
            self.line_spacing,
            steps,
            display::LINE_SPACING_STEP,
            display::MIN_LINE_SPACING,
            display::MAX_LINE_SPACING,
        );
    }

    /// Blank terminal rows to insert between text rows.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn blank_rows_between_lines(&self) -> usize {
        (self.line_spacing.round() as usize).saturating_sub(1)
    }
}

fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

// Snap to the step grid so repeated adjustments don't accumulate float error.
fn step(value: f64, steps: i32, increment: f64, min: f64, max: f64) -> f64 {
    let raw = increment.mul_add(f64::from(steps), value);
    ((raw / increment).round() * increment).clamp(min, max)
}

/// JSON-backed settings file.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Load settings from `path`; a missing file yields defaults.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let settings = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| Error::io(e, path.clone()))?;
            let parsed: Settings = serde_json::from_str(&raw)
                .map_err(|e| Error::parse(e.to_string(), path.clone()))?;
            tracing::info!("Loaded settings from {}", path.display());
            parsed.clamped()
        } else {
            tracing::info!("No settings at {}, using defaults", path.display());
            Settings::default()
        };
        Ok(Self { path, settings })
    }

    /// Store with default settings at `path`, ignoring whatever is on disk.
    pub fn with_defaults(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            settings: Settings::default(),
        }
    }

    /// Write the current settings as pretty JSON, creating parent directories.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| Error::io(e, parent.to_path_buf()))?;
            }
        }
        let json = serde_json::to_string_pretty(&self.settings)
            .map_err(|e| Error::parse(e.to_string(), self.path.clone()))?;
        fs::write(&self.path, json).map_err(|e| Error::io(e, self.path.clone()))?;
        tracing::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }

    /// Current settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Change settings with a closure and save the result.
    pub fn update<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Settings),
    {
        f(&mut self.settings);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic, clippy::float_cmp)]

    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::open(dir.path().join("nope.json")).unwrap();
        assert_eq!(store.settings(), &Settings::default());
    }

    #[test]
    fn test_update_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);

        let mut store = SettingsStore::open(&path).unwrap();
        store
            .update(|s| {
                s.color_theme = ColorTheme::Dark;
                s.show_page_number = false;
                s.delimiters.toggle(',');
            })
            .unwrap();

        let reopened = SettingsStore::open(&path).unwrap();
        assert_eq!(reopened.settings().color_theme, ColorTheme::Dark);
        assert!(!reopened.settings().show_page_number);
        assert!(reopened.settings().delimiters.get(',').unwrap().is_enabled);
    }

    #[test]
    fn test_partial_file_fills_defaults_and_clamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{"text_width": 2.0, "use_animation": false}"#).unwrap();

        let store = SettingsStore::open(&path).unwrap();
        let settings = store.settings();
        assert_eq!(settings.text_width, display::MAX_TEXT_WIDTH);
        assert!(!settings.use_animation);
        assert_eq!(settings.delimiters, DelimiterConfiguration::default());
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "{ not json").unwrap();

        match SettingsStore::open(&path) {
            Err(Error::Parse { file: Some(f), .. }) => assert_eq!(f, path),
            other => panic!("Expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_adjustments_stay_in_range() {
        let mut settings = Settings::default();
        settings.adjust_text_width(100);
        assert_eq!(settings.text_width, display::MAX_TEXT_WIDTH);
        settings.adjust_line_spacing(-100);
        assert_eq!(settings.line_spacing, display::MIN_LINE_SPACING);
        settings.adjust_font_size(3);
        assert_eq!(settings.font_size, 39.0);
    }

    #[test]
    fn test_font_cycle_wraps_and_recovers_unknown_names() {
        let mut settings = Settings::default();
        settings.cycle_font(-4);
        assert_eq!(settings.selected_font, "Arial");
        settings.cycle_font(-1);
        assert_eq!(settings.selected_font, "Verdana");
        settings.cycle_font(1);
        assert_eq!(settings.selected_font, "Arial");

        settings.selected_font = "Comic Sans".to_string();
        settings.cycle_font(1);
        assert_eq!(settings.selected_font, "Helvetica Neue");
    }

    #[test]
    fn test_blank_rows_follow_line_spacing() {
        let mut settings = Settings::default();
        assert_eq!(settings.blank_rows_between_lines(), 1);
        settings.line_spacing = 1.0;
        assert_eq!(settings.blank_rows_between_lines(), 0);
        settings.line_spacing = 3.0;
        assert_eq!(settings.blank_rows_between_lines(), 2);
    }

    #[test]
    fn test_theme_cycle_round_trips() {
        for theme in ColorTheme::all() {
            assert_eq!(theme.next().previous(), *theme);
        }
    }
}
