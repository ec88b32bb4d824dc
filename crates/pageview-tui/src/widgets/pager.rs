use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

/// Horizontal strip of full-width panels, drawn at the surface offset
pub struct PagerWidget;

impl PagerWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        frame.render_widget(Block::default().style(Style::default().bg(theme.bg0)), area);

        let offset = app.offset();
        let total = app.page_count();

        for panel in app.pager.panel_frames() {
            let screen_left = (panel.left - offset).round() as i64;
            let width = panel.width.round() as i64;
            let Some((start, visible)) = visible_span(screen_left, width, area.width) else {
                continue;
            };

            let label = app.panels.get(panel.index).map(String::as_str).unwrap_or("");
            let bg = theme.panel_color(label, panel.index);
            let rect = Rect::new(area.x + start, area.y, visible, area.height);
            frame.render_widget(Block::default().style(Style::default().bg(bg)), rect);

            // Text only appears once it fits entirely on screen
            let middle = area.height / 2;
            let style = Style::default().fg(theme.panel_fg).bg(bg);
            let counter = format!("{} / {}", panel.index + 1, total);
            let lines = [
                (label.to_string(), style.add_modifier(Modifier::BOLD), middle),
                (counter, style, middle.saturating_add(1)),
            ];
            for (text, style, row) in lines {
                if row >= area.height {
                    continue;
                }
                let text_width = text.width() as i64;
                let x = screen_left + (width - text_width) / 2;
                if x < start as i64 || x + text_width > (start + visible) as i64 {
                    continue;
                }
                let text_rect = Rect::new(
                    area.x + x as u16,
                    area.y + row,
                    text_width as u16,
                    1,
                );
                frame.render_widget(Paragraph::new(Span::styled(text, style)), text_rect);
            }
        }
    }
}

/// Columns of a panel that fall inside `[0, area_width)`, as `(start, width)`
fn visible_span(screen_left: i64, width: i64, area_width: u16) -> Option<(u16, u16)> {
    let start = screen_left.max(0);
    let end = (screen_left + width).min(area_width as i64);
    if start >= end {
        return None;
    }
    Some((start as u16, (end - start) as u16))
}
