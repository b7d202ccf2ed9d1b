//! Input handling abstractions.
//!
//! Keys are translated into commands by mode-specific handlers, so the key
//! map can be tested without a terminal or an `App`.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Commands understood by the slide screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideCommand {
    /// Advance one slide; on the last slide this ends the session.
    Next,
    /// Go back one slide.
    Previous,
    /// Jump to the first slide.
    First,
    /// Open the clipboard text as new slides.
    OpenClipboard,
}

/// Commands understood by the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsCommand {
    /// Move the selection up.
    Up,
    /// Move the selection down.
    Down,
    /// Decrease a value or cycle backwards.
    Decrease,
    /// Increase a value or cycle forwards.
    Increase,
    /// Toggle the selected row.
    Activate,
}

/// Result of processing an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// A slide screen command.
    Slide(SlideCommand),
    /// A settings screen command.
    Settings(SettingsCommand),
    /// The input was ignored (not applicable to this handler).
    Ignored,
    /// The application should quit.
    Quit,
    /// The mode should change.
    ModeChange(AppMode),
    /// Show or hide the key help.
    ToggleHelp,
    /// Dismiss the visible overlay.
    Dismiss,
}

/// Application screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Full-screen slides.
    #[default]
    Slides,
    /// Display and delimiter settings.
    Settings,
}

/// Context passed to input handlers.
///
/// This provides handlers with the information they need to process
/// input without directly accessing the full App state.
pub struct InputContext {
    /// Current application mode.
    pub mode: AppMode,
    /// Whether help is currently shown.
    pub show_help: bool,
    /// Whether there's an error message displayed.
    pub has_error: bool,
}

/// Trait for handling keyboard input.
///
/// Implementations of this trait handle input for specific modes
/// or input contexts.
pub trait InputHandler {
    /// Handle a key event.
    fn handle(&mut self, key: KeyEvent, ctx: &InputContext) -> InputResult;

    /// Get the name of this handler (for debugging).
    fn name(&self) -> &'static str;
}

/// Handler for global shortcuts (help, quit, overlays).
#[derive(Debug, Default)]
pub struct GlobalHandler;

impl InputHandler for GlobalHandler {
    fn handle(&mut self, key: KeyEvent, ctx: &InputContext) -> InputResult {
        if key.kind == KeyEventKind::Release {
            return InputResult::Ignored;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return InputResult::Quit;
        }

        // Overlays swallow everything until dismissed.
        if ctx.has_error || ctx.show_help {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => InputResult::Dismiss,
                KeyCode::Char('?') | KeyCode::F(1) if ctx.show_help => InputResult::Dismiss,
                KeyCode::Char('q') => InputResult::Quit,
                _ => InputResult::Ignored,
            };
        }

        match key.code {
            KeyCode::F(1) | KeyCode::Char('?') => InputResult::ToggleHelp,
            KeyCode::Char('q') => InputResult::Quit,
            _ => InputResult::Ignored,
        }
    }

    fn name(&self) -> &'static str {
        "GlobalHandler"
    }
}

/// Handler for the slide screen.
#[derive(Debug, Default)]
pub struct SlideHandler;

impl InputHandler for SlideHandler {
    fn handle(&mut self, key: KeyEvent, _ctx: &InputContext) -> InputResult {
        match key.code {
            KeyCode::Char(' ' | 'j') | KeyCode::Right => InputResult::Slide(SlideCommand::Next),
            KeyCode::Char('k') | KeyCode::Left => InputResult::Slide(SlideCommand::Previous),
            KeyCode::Home => InputResult::Slide(SlideCommand::First),
            KeyCode::Char('p') => InputResult::Slide(SlideCommand::OpenClipboard),
            KeyCode::Char(',') => InputResult::ModeChange(AppMode::Settings),
            _ => InputResult::Ignored,
        }
    }

    fn name(&self) -> &'static str {
        "SlideHandler"
    }
}

/// Handler for the settings screen.
#[derive(Debug, Default)]
pub struct SettingsHandler;

impl InputHandler for SettingsHandler {
    fn handle(&mut self, key: KeyEvent, _ctx: &InputContext) -> InputResult {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => InputResult::Settings(SettingsCommand::Up),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => InputResult::Settings(SettingsCommand::Down),
            KeyCode::Left | KeyCode::Char('h' | '-') => InputResult::Settings(SettingsCommand::Decrease),
            KeyCode::Right | KeyCode::Char('l' | '+') => InputResult::Settings(SettingsCommand::Increase),
            KeyCode::Enter | KeyCode::Char(' ') => InputResult::Settings(SettingsCommand::Activate),
            KeyCode::Esc | KeyCode::Char(',') => InputResult::ModeChange(AppMode::Slides),
            _ => InputResult::Ignored,
        }
    }

    fn name(&self) -> &'static str {
        "SettingsHandler"
    }
}

/// Map a mouse event on the slide screen; a left click acts as a tap.
pub fn slide_mouse_command(event: MouseEvent) -> Option<SlideCommand> {
    matches!(event.kind, MouseEventKind::Down(MouseButton::Left)).then_some(SlideCommand::Next)
}
