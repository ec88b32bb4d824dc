use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let base = Style::default().bg(theme.bg2);

        let prev = if app.has_prev() { " ◀ " } else { "   " };
        let next = if app.has_next() { " ▶ " } else { "   " };

        let status_text = if let Some(msg) = &app.status_message {
            msg.clone()
        } else {
            format!(
                "Page {} / {} · {}",
                (app.current_page() + 1).min(app.page_count()),
                app.page_count(),
                app.current_label().unwrap_or("-")
            )
        };

        let mut flags = Vec::new();
        if app.is_dragging() {
            flags.push("DRAG");
        }
        if app.pager.is_animating() {
            flags.push("SNAP");
        }
        if !app.pager.scroll_enabled() {
            flags.push("LOCKED");
        }
        let flags_text = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(" "))
        };

        let help_hint = " q:quit h/l:page 1-9:jump s:lock ";
        let used = prev.width() + status_text.width() + flags_text.width() + next.width()
            + help_hint.width();
        let padding_len = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(prev, base.fg(theme.accent)),
            Span::styled(status_text, base.fg(theme.fg0)),
            Span::styled(flags_text, base.fg(theme.warning)),
            Span::styled(next, base.fg(theme.accent)),
            Span::styled(" ".repeat(padding_len), base),
            Span::styled(help_hint, base.fg(theme.grey2)),
        ]);

        let paragraph = Paragraph::new(line);
        frame.render_widget(paragraph, area);
    }
}
