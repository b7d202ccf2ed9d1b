//! User interface components.
//!
//! Provides TUI widgets and drawing functions for the full-screen slide
//! view and the settings screen using ratatui.

mod settings;
mod slide;

pub use settings::{draw_settings, row_label};
pub use slide::{draw_slide, layout_lines, text_column, wrap_line};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::constants::about;
use crate::input::AppMode;

/// Render the full application UI to the terminal frame.
pub fn draw(f: &mut Frame, app: &App) {
    let area = f.size();

    match app.mode {
        AppMode::Slides => draw_slide(f, app, area),
        AppMode::Settings => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(area);
            draw_settings(f, app, chunks[0]);
            let hints = create_help_text(&[
                ("↑↓", "Select"),
                ("←→", "Adjust"),
                ("Space", "Toggle"),
                ("Esc", "Back"),
                ("q", "Quit"),
            ]);
            f.render_widget(Paragraph::new(Line::from(hints)).style(Style::default().fg(Color::Gray)), chunks[1]);
        }
    }

    // Error overlay is blocking
    if let Some(error) = &app.error_message {
        draw_error_message(f, error);
        return;
    }

    if app.show_help {
        draw_help_modal(f);
    }
}

/// Build styled help text spans from key-description pairs.
pub fn create_help_text<'a>(commands: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut text = vec![Span::raw(" ")]; // Start with padding

    for (i, (key, description)) in commands.iter().enumerate() {
        text.push(Span::styled(*key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
        text.push(Span::raw(format!(": {description}")));
        if i < commands.len() - 1 {
            text.push(Span::raw(" | "));
        }
    }

    text
}

/// Create a bordered block with a title, highlighted when focused.
pub fn create_titled_block(title: &str, is_focused: bool) -> Block<'_> {
    let title_style = if is_focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let border_style = if is_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// A `width` x `height` rectangle centred in `area`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

const HELP_KEYS: &[(&str, &str)] = &[
    ("Space / → / j / click", "Next slide (exits after the last)"),
    ("← / k", "Previous slide"),
    ("Home", "First slide"),
    ("p", "Open clipboard text"),
    (",", "Settings"),
    ("? / F1", "Toggle this help"),
    ("q", "Quit"),
];

fn about_lines() -> Vec<Line<'static>> {
    vec![
        Line::raw(""),
        Line::from(Span::styled(
            format!(" {} {}", about::NAME, env!("CARGO_PKG_VERSION")),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(format!(" Developer: {}", about::DEVELOPER)),
        Line::raw(format!(" Website: {}", about::WEBSITE)),
    ]
}

fn draw_help_modal(f: &mut Frame) {
    let mut lines: Vec<Line> = HELP_KEYS
        .iter()
        .map(|(key, description)| {
            Line::from(vec![
                Span::styled(format!(" {key:<24}"), Style::default().fg(Color::Yellow)),
                Span::raw(*description),
            ])
        })
        .collect();
    lines.extend(about_lines());

    #[allow(clippy::cast_possible_truncation)]
    let height = lines.len() as u16 + 2;
    let area = centered_rect(64, height, f.size());

    let block = create_titled_block("Keys", true).style(Style::default().bg(Color::Black).fg(Color::White));
    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

// Draw an error message overlay
fn draw_error_message(f: &mut Frame, message: &str) {
    let area = centered_rect(50, 6, f.size());

    let block = Block::default()
        .title(Span::styled("Error", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area); // Clear the area first
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1), // Space for a "Press Esc to dismiss" hint
        ])
        .margin(1) // Add a margin for the border
        .split(area);

    f.render_widget(text, inner_area[0]);

    let hint = Paragraph::new("Press Esc to dismiss")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(hint, inner_area[1]);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::config::Config;
    use crate::settings::SettingsStore;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buffer.get(x, y).symbol());
            }
            out.push('\n');
        }
        out
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn app_with(text: &str) -> (App, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::with_defaults(dir.path().join("settings.json"));
        (App::new(&Config::default(), store, Some(text.to_string())), dir)
    }

    #[test]
    fn test_slide_and_page_number_render() {
        let (app, _dir) = app_with("Hello slides\nSecond");
        let screen = render(&app);
        assert!(screen.contains("Hello slides"));
        assert!(screen.contains("1/2"));
        assert!(!screen.contains("Second"));
    }

    #[test]
    fn test_page_number_can_be_hidden() {
        let (mut app, _dir) = app_with("Hello\nSecond");
        app.store.update(|s| s.show_page_number = false).unwrap();
        assert!(!render(&app).contains("1/2"));
    }

    #[test]
    fn test_settings_screen_lists_delimiters() {
        let (mut app, _dir) = app_with("Hello");
        app.mode = AppMode::Settings;
        let screen = render(&app);
        assert!(screen.contains("Display Settings"));
        assert!(screen.contains("Theme"));
    }

    #[test]
    fn test_help_overlay_shows_keys_and_about() {
        let (mut app, _dir) = app_with("Hello");
        app.show_help = true;
        let screen = render(&app);
        assert!(screen.contains("Previous slide"));
        assert!(screen.contains("Developer: veadar"));
        assert!(screen.contains("github.com/veadar/SlideText"));
    }

    #[test]
    fn test_error_overlay_renders() {
        let (mut app, _dir) = app_with("Hello");
        app.error_message = Some("Clipboard error: boom".to_string());
        assert!(render(&app).contains("Press Esc to dismiss"));
    }

    #[test]
    fn test_centered_rect_shrinks_to_fit() {
        let rect = centered_rect(80, 10, Rect::new(0, 0, 40, 20));
        assert_eq!(rect, Rect::new(0, 5, 40, 10));
    }
}
