use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, SettingsRow};
use crate::delimiter::DelimiterGroup;
use crate::settings::Settings;

use super::create_titled_block;

/// Draw the settings screen: display options followed by delimiter toggles.
#[allow(clippy::cast_possible_truncation)]
pub fn draw_settings(f: &mut Frame, app: &App, area: Rect) {
    let settings = app.settings();
    let rows = SettingsRow::rows(settings);

    let mut lines = vec![section_heading("Display Settings")];
    let mut cursor_line = 0;
    let mut current_group = None;

    for (i, row) in rows.iter().enumerate() {
        if let SettingsRow::Delimiter(c) = row {
            let group = DelimiterGroup::of(*c);
            if current_group != Some(group) {
                if current_group.is_none() {
                    lines.push(Line::raw(""));
                    lines.push(section_heading("Text Splitting"));
                }
                lines.push(Line::from(Span::styled(
                    format!("  {}", group.name()),
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                current_group = Some(group);
            }
        }

        let selected = i == app.settings_cursor;
        if selected {
            cursor_line = lines.len();
        }
        lines.push(row_line(settings, *row, selected));
    }

    let block = create_titled_block("Settings", true);
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Keep the selected row on screen.
    let height = usize::from(inner.height.max(1));
    let scroll = cursor_line.saturating_sub(height - 1) as u16;
    f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

fn section_heading(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))
}

fn on_off(value: bool) -> String {
    let label = if value { "On" } else { "Off" };
    label.to_string()
}

/// Label and current value for one settings row.
pub fn row_label(settings: &Settings, row: SettingsRow) -> (String, String) {
    match row {
        SettingsRow::Theme => ("Theme".into(), settings.color_theme.name().into()),
        SettingsRow::Font => ("Font".into(), settings.selected_font.clone()),
        SettingsRow::FontSize => ("Font Size".into(), format!("{:.0}", settings.font_size)),
        SettingsRow::LineSpacing => ("Line Spacing".into(), format!("{:.1}", settings.line_spacing)),
        SettingsRow::TextWidth => ("Text Width".into(), format!("{:.0}%", settings.text_width * 100.0)),
        SettingsRow::Animation => ("Animation".into(), on_off(settings.use_animation)),
        SettingsRow::PageNumber => ("Page Number".into(), on_off(settings.show_page_number)),
        SettingsRow::AutoResize => ("Auto Resize Text".into(), on_off(settings.auto_resize_text)),
        SettingsRow::Delimiter(c) => {
            let delimiter = settings.delimiters.get(c);
            (
                delimiter.map_or_else(|| c.to_string(), crate::delimiter::Delimiter::label),
                on_off(delimiter.is_some_and(|d| d.is_enabled)),
            )
        }
    }
}

fn row_line(settings: &Settings, row: SettingsRow, selected: bool) -> Line<'static> {
    let (label, value) = row_label(settings, row);
    let marker = if selected { "> " } else { "  " };
    let style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let value_style = match value.as_str() {
        "On" => Style::default().fg(Color::Green),
        "Off" => Style::default().fg(Color::DarkGray),
        _ => Style::default().fg(Color::Cyan),
    };
    Line::from(vec![
        Span::styled(format!("{marker}  {label:<20}"), style),
        Span::styled(value, value_style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_labels() {
        let settings = Settings::default();
        let label = |row| {
            let (name, value) = row_label(&settings, row);
            format!("{name}={value}")
        };
        assert_eq!(label(SettingsRow::Font), "Font=Helvetica");
        assert_eq!(label(SettingsRow::TextWidth), "Text Width=70%");
        assert_eq!(label(SettingsRow::Delimiter('\n')), "Line Break=On");
        assert_eq!(label(SettingsRow::Delimiter(',')), "「,」=Off");
    }
}
