use crossterm::event::{KeyEvent, KeyEventKind, MouseEvent};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::constants::{async_tasks::CHANNEL_BUFFER_SIZE, text::WELCOME, ui::TRANSITION_MS};
use crate::delimiter::DelimiterGroup;
use crate::error::{Error, Result};
use crate::input::{
    slide_mouse_command, AppMode, GlobalHandler, InputContext, InputHandler, InputResult, SettingsCommand,
    SettingsHandler, SlideCommand, SlideHandler,
};
use crate::navigator::Step;
use crate::services::{ServicesProvider, SystemClipboard, TextSource};
use crate::session::SlideSession;
use crate::settings::{Settings, SettingsStore};

/// Messages from background tasks to the UI loop.
#[derive(Debug)]
pub enum AppUpdate {
    /// New text to open as slides.
    TextReceived(String),
    /// A background task gave up; shown as an error.
    Failed(String),
}

/// One selectable row of the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    Theme,
    Font,
    FontSize,
    LineSpacing,
    TextWidth,
    Animation,
    PageNumber,
    AutoResize,
    /// Enable/disable one split character.
    Delimiter(char),
}

impl SettingsRow {
    /// Rows in display order: display settings, then delimiters by group.
    pub fn rows(settings: &Settings) -> Vec<Self> {
        let mut rows = vec![
            Self::Theme,
            Self::Font,
            Self::FontSize,
            Self::LineSpacing,
            Self::TextWidth,
            Self::Animation,
            Self::PageNumber,
            Self::AutoResize,
        ];
        for group in DelimiterGroup::all() {
            rows.extend(settings.delimiters.group(*group).map(|d| Self::Delimiter(d.character)));
        }
        rows
    }
}

pub struct App {
    pub mode: AppMode,
    pub session: SlideSession,
    pub store: SettingsStore,
    pub settings_cursor: usize,
    pub show_help: bool,
    pub error_message: Option<String>,
    pub transition_started: Option<Instant>,
    should_quit: bool,
    pub async_task_tx: mpsc::Sender<AppUpdate>,
    async_task_rx: mpsc::Receiver<AppUpdate>,
    // Overrides the system clipboard for the `p` key when set
    paste_source: Option<Box<dyn TextSource>>,
}

impl App {
    pub fn new(config: &Config, store: SettingsStore, initial_text: Option<String>) -> Self {
        tracing::info!("Starting {} {}", config.app_name(), config.app_version());

        let delimiters = store.settings().delimiters.clone();
        let mut session = SlideSession::new(WELCOME, delimiters);
        let mut error_message = None;

        if let Some(text) = initial_text {
            if let Err(e) = ServicesProvider::new(&mut session).open_slide_text(&text) {
                error_message = Some(e.to_string());
            }
        }

        let (async_task_tx, async_task_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Self {
            mode: AppMode::Slides,
            session,
            store,
            settings_cursor: 0,
            show_help: false,
            error_message,
            transition_started: None,
            should_quit: false,
            async_task_tx,
            async_task_rx,
            paste_source: None,
        }
    }

    /// Use `source` instead of the system clipboard for the paste command.
    #[must_use]
    pub fn with_paste_source(mut self, source: Box<dyn TextSource>) -> Self {
        self.paste_source = Some(source);
        self
    }

    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn settings(&self) -> &Settings {
        self.store.settings()
    }

    /// Whether the fade-in after a slide change is still running.
    pub fn transition_active(&self, now: Instant) -> bool {
        self.settings().use_animation
            && self
                .transition_started
                .is_some_and(|t| now.duration_since(t) < Duration::from_millis(TRANSITION_MS))
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        let ctx = InputContext {
            mode: self.mode,
            show_help: self.show_help,
            has_error: self.error_message.is_some(),
        };

        let mut handler: Box<dyn InputHandler> = Box::new(GlobalHandler);
        let mut result = handler.handle(key, &ctx);
        if result == InputResult::Ignored && !ctx.show_help && !ctx.has_error {
            handler = match self.mode {
                AppMode::Slides => Box::new(SlideHandler),
                AppMode::Settings => Box::new(SettingsHandler),
            };
            result = handler.handle(key, &ctx);
        }
        tracing::debug!(handler = handler.name(), ?result, "Key {:?}", key.code);
        self.apply_input(result);
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        if self.mode != AppMode::Slides || self.show_help || self.error_message.is_some() {
            return;
        }
        if let Some(command) = slide_mouse_command(event) {
            self.apply_slide_command(command);
        }
    }

    fn apply_input(&mut self, result: InputResult) {
        match result {
            InputResult::Slide(command) => self.apply_slide_command(command),
            InputResult::Settings(command) => self.apply_settings_command(command),
            InputResult::Quit => {
                tracing::info!("Quit requested");
                self.quit();
            }
            InputResult::ModeChange(mode) => {
                self.mode = mode;
                if mode == AppMode::Settings {
                    self.settings_cursor = 0;
                }
            }
            InputResult::ToggleHelp => self.show_help = !self.show_help,
            InputResult::Dismiss => {
                self.show_help = false;
                self.error_message = None;
            }
            InputResult::Ignored => {}
        }
    }

    pub fn apply_slide_command(&mut self, command: SlideCommand) {
        match command {
            SlideCommand::Next => match self.session.next() {
                Step::Moved(_) => self.start_transition(),
                Step::Finished => {
                    tracing::info!("Reached the last slide, ending session");
                    self.quit();
                }
                Step::Stopped => {}
            },
            SlideCommand::Previous => {
                if let Step::Moved(_) = self.session.previous() {
                    self.start_transition();
                }
            }
            SlideCommand::First => {
                if self.session.view().index != 0 {
                    self.session.reset();
                    self.start_transition();
                }
            }
            SlideCommand::OpenClipboard => {
                let result = self
                    .paste_read()
                    .and_then(|text| text.ok_or(Error::EmptyText))
                    .and_then(|text| self.open_text(&text));
                if let Err(e) = result {
                    self.error_message = Some(e.to_string());
                }
            }
        }
    }

    fn apply_settings_command(&mut self, command: SettingsCommand) {
        let rows = SettingsRow::rows(self.settings());
        match command {
            SettingsCommand::Up => {
                self.settings_cursor = self.settings_cursor.saturating_sub(1);
                return;
            }
            SettingsCommand::Down => {
                self.settings_cursor = (self.settings_cursor + 1).min(rows.len().saturating_sub(1));
                return;
            }
            _ => {}
        }

        let Some(row) = rows.get(self.settings_cursor).copied() else {
            return;
        };
        let direction = match command {
            SettingsCommand::Decrease => -1,
            _ => 1,
        };
        let activate = command == SettingsCommand::Activate;

        let saved = self.store.update(|s| match row {
            SettingsRow::Theme => {
                s.color_theme = if direction < 0 { s.color_theme.previous() } else { s.color_theme.next() };
            }
            SettingsRow::Font => s.cycle_font(direction),
            SettingsRow::FontSize if !activate => s.adjust_font_size(direction),
            SettingsRow::LineSpacing if !activate => s.adjust_line_spacing(direction),
            SettingsRow::TextWidth if !activate => s.adjust_text_width(direction),
            SettingsRow::Animation => s.use_animation = !s.use_animation,
            SettingsRow::PageNumber => s.show_page_number = !s.show_page_number,
            SettingsRow::AutoResize => s.auto_resize_text = !s.auto_resize_text,
            SettingsRow::Delimiter(c) => {
                s.delimiters.toggle(c);
            }
            _ => {}
        });
        if let Err(e) = saved {
            tracing::warn!("Failed to save settings: {e}");
            self.error_message = Some(e.to_string());
        }

        // Recompute slides and clamp the cursor against the new delimiters.
        let delimiters = self.settings().delimiters.clone();
        self.session.apply_configuration(delimiters);
    }

    /// Hand `text` to the session as a new invocation.
    pub fn open_text(&mut self, text: &str) -> Result<()> {
        ServicesProvider::new(&mut self.session).open_slide_text(text)?;
        self.mode = AppMode::Slides;
        self.show_help = false;
        self.start_transition();
        Ok(())
    }

    fn paste_read(&mut self) -> Result<Option<String>> {
        match self.paste_source.as_mut() {
            Some(source) => source.read_text(),
            None => SystemClipboard::new()?.read_text(),
        }
    }

    fn start_transition(&mut self) {
        self.transition_started = Some(Instant::now());
    }

    /// Drain messages from background tasks.
    pub fn handle_updates(&mut self) {
        while let Ok(update) = self.async_task_rx.try_recv() {
            match update {
                AppUpdate::TextReceived(text) => {
                    if let Err(e) = self.open_text(&text) {
                        tracing::warn!("Ignoring clipboard text: {e}");
                    }
                }
                AppUpdate::Failed(message) => {
                    self.error_message = Some(message);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    struct FixedText(Option<String>);

    impl TextSource for FixedText {
        fn read_text(&mut self) -> Result<Option<String>> {
            Ok(self.0.clone())
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn app_with(text: &str) -> (App, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::with_defaults(dir.path().join("settings.json"));
        let app = App::new(&Config::default(), store, Some(text.to_string()));
        (app, dir)
    }

    #[test]
    fn test_reaching_end_quits() {
        let (mut app, _dir) = app_with("one\ntwo\nthree");
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.session.view().index, 2);
        assert!(!app.should_quit());

        app.handle_key(key(KeyCode::Char('j')));
        assert!(app.should_quit());
        assert_eq!(app.session.view().index, 2);
    }

    #[test]
    fn test_previous_at_start_does_not_quit() {
        let (mut app, _dir) = app_with("one\ntwo");
        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Char('k')));
        assert_eq!(app.session.view().index, 0);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_q_quits_on_first_slide() {
        let (mut app, _dir) = app_with("one\ntwo\nthree");
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn test_no_initial_text_shows_welcome() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::with_defaults(dir.path().join("settings.json"));
        let app = App::new(&Config::default(), store, None);
        assert_eq!(app.session.view().text, "Space, j/k, →←");
        assert!(app.error_message.is_none());
    }

    #[test]
    fn test_blank_initial_text_reports_error() {
        let (app, _dir) = app_with("   \n ");
        assert!(app.error_message.is_some());
        assert_eq!(app.session.source(), WELCOME);
    }

    #[test]
    fn test_toggling_delimiter_in_settings_clamps_and_saves() {
        let (mut app, dir) = app_with("a\nb\nc");
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.session.view().index, 2);

        app.handle_key(key(KeyCode::Char(',')));
        assert_eq!(app.mode, AppMode::Settings);

        let rows = SettingsRow::rows(app.settings());
        let line_break = rows.iter().position(|r| *r == SettingsRow::Delimiter('\n')).unwrap();
        for _ in 0..line_break {
            app.handle_key(key(KeyCode::Down));
        }
        app.handle_key(key(KeyCode::Enter));

        let view = app.session.view();
        assert_eq!((view.total, view.index), (1, 0));
        assert!(!app.settings().delimiters.get('\n').unwrap().is_enabled);
        assert!(dir.path().join("settings.json").exists());

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.mode, AppMode::Slides);
    }

    #[test]
    fn test_font_row_cycles_and_saves() {
        let (mut app, dir) = app_with("a");
        app.handle_key(key(KeyCode::Char(',')));

        let rows = SettingsRow::rows(app.settings());
        let font_row = rows.iter().position(|r| *r == SettingsRow::Font).unwrap();
        for _ in 0..font_row {
            app.handle_key(key(KeyCode::Down));
        }
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.settings().selected_font, "Helvetica Neue");

        let saved = SettingsStore::open(dir.path().join("settings.json")).unwrap();
        assert_eq!(saved.settings().selected_font, "Helvetica Neue");

        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.settings().selected_font, "Georgia");
    }

    #[test]
    fn test_settings_cursor_stays_in_bounds() {
        let (mut app, _dir) = app_with("a");
        app.handle_key(key(KeyCode::Char(',')));
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.settings_cursor, 0);
        let rows = SettingsRow::rows(app.settings()).len();
        for _ in 0..rows + 5 {
            app.handle_key(key(KeyCode::Down));
        }
        assert_eq!(app.settings_cursor, rows - 1);
    }

    #[test]
    fn test_paste_opens_new_slides() {
        let (app, _dir) = app_with("a\nb");
        let mut app = app.with_paste_source(Box::new(FixedText(Some("x.y".to_string()))));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Char('p')));
        let view = app.session.view();
        assert_eq!((view.index, view.total, view.text), (0, 2, "x"));
    }

    #[test]
    fn test_paste_of_empty_clipboard_shows_error() {
        let (app, _dir) = app_with("a\nb");
        let mut app = app.with_paste_source(Box::new(FixedText(None)));
        app.handle_key(key(KeyCode::Char('p')));
        assert!(app.error_message.is_some());
        assert_eq!(app.session.source(), "a\nb");

        // Overlay swallows navigation until dismissed.
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.session.view().index, 0);
        app.handle_key(key(KeyCode::Esc));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.session.view().index, 1);
    }

    #[tokio::test]
    async fn test_background_text_replaces_session() {
        let (mut app, _dir) = app_with("a\nb\nc");
        app.handle_key(key(KeyCode::Right));
        app.async_task_tx
            .send(AppUpdate::TextReceived("new。text".to_string()))
            .await
            .unwrap();
        app.handle_updates();
        let view = app.session.view();
        assert_eq!((view.index, view.total, view.text), (0, 2, "new"));
    }

    #[test]
    fn test_transition_respects_animation_setting() {
        let (mut app, _dir) = app_with("a\nb");
        app.handle_key(key(KeyCode::Right));
        let now = app.transition_started.unwrap();
        assert!(app.transition_active(now));
        assert!(!app.transition_active(now + Duration::from_millis(TRANSITION_MS)));

        app.store.update(|s| s.use_animation = false).unwrap();
        assert!(!app.transition_active(now));
    }
}
