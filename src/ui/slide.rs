use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph},
    Frame,
};
use std::time::Instant;
use unicode_width::UnicodeWidthChar;

use crate::app::App;
use crate::constants::ui::SLIDE_PADDING;
use crate::settings::Settings;

/// Draw the visible slide, filling `area` with the theme background.
pub fn draw_slide(f: &mut Frame, app: &App, area: Rect) {
    let settings = app.settings();
    let theme = settings.color_theme;
    let base = Style::default().bg(theme.background()).fg(theme.foreground());

    f.render_widget(Block::default().style(base), area);

    let view = app.session.view();
    let column = text_column(area, settings.text_width);

    let lines = layout_lines(view.text, column.width, settings);
    let mut style = base;
    if app.transition_active(Instant::now()) {
        style = style.add_modifier(Modifier::DIM);
    }
    let body: Vec<Line> = lines.into_iter().map(Line::from).collect();
    f.render_widget(Paragraph::new(body).style(style), column);

    if settings.show_page_number {
        draw_page_number(f, &view.page_label(), area, base);
    }
}

/// The horizontally centred column slide text is confined to.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn text_column(area: Rect, text_width: f64) -> Rect {
    let inner_width = area.width.saturating_sub(SLIDE_PADDING * 2);
    let width = ((f64::from(inner_width) * text_width).floor() as u16).max(1).min(inner_width.max(1));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    Rect {
        x,
        y: area.y + SLIDE_PADDING.min(area.height),
        width,
        height: area.height.saturating_sub(SLIDE_PADDING * 2),
    }
}

/// Slide text as display rows: wrapped when auto-resize is on, with blank
/// rows inserted for line spacing.
pub fn layout_lines(text: &str, width: u16, settings: &Settings) -> Vec<String> {
    let gap = settings.blank_rows_between_lines();
    let rows: Vec<String> = text
        .lines()
        .flat_map(|line| {
            if settings.auto_resize_text {
                wrap_line(line, usize::from(width))
            } else {
                vec![line.to_string()]
            }
        })
        .collect();

    let mut out = Vec::with_capacity(rows.len() * (gap + 1));
    for (i, row) in rows.into_iter().enumerate() {
        if i > 0 {
            out.extend(std::iter::repeat(String::new()).take(gap));
        }
        out.push(row);
    }
    out
}

/// Greedy wrap by display width, breaking after whitespace when possible and
/// anywhere otherwise (CJK text has no spaces).
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![line.to_string()];
    }

    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    // Byte offset in `current` just past the last whitespace
    let mut last_break: Option<usize> = None;

    for c in line.chars() {
        let w = c.width().unwrap_or(0);
        if current_width + w > width && !current.is_empty() {
            match last_break {
                Some(at) if at < current.len() => {
                    let rest = current.split_off(at);
                    rows.push(current.trim_end().to_string());
                    current = rest;
                }
                _ => rows.push(std::mem::take(&mut current).trim_end().to_string()),
            }
            current_width = current.chars().filter_map(UnicodeWidthChar::width).sum();
            last_break = None;
            if current.is_empty() && c.is_whitespace() {
                continue;
            }
        }
        current.push(c);
        current_width += w;
        if c.is_whitespace() {
            last_break = Some(current.len());
        }
    }

    if !current.is_empty() || rows.is_empty() {
        rows.push(current.trim_end().to_string());
    }
    rows
}

#[allow(clippy::cast_possible_truncation)]
fn draw_page_number(f: &mut Frame, label: &str, area: Rect, style: Style) {
    let width = label.len() as u16 + 2;
    if area.width <= width || area.height < 2 {
        return;
    }
    let rect = Rect {
        x: area.right() - width - 1,
        y: area.bottom() - 2,
        width,
        height: 1,
    };
    f.render_widget(
        Paragraph::new(label).style(style.add_modifier(Modifier::REVERSED)).alignment(Alignment::Center),
        rect,
    );
}
