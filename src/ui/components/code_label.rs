use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::ui::theme::Theme;

/// The line under the cells that shows the last reported code.
pub struct CodeLabel<'a> {
    pub text: &'a str,
    pub theme: &'a Theme,
}

impl<'a> CodeLabel<'a> {
    pub fn new(text: &'a str, theme: &'a Theme) -> Self {
        Self { text, theme }
    }
}

impl Widget for CodeLabel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        Paragraph::new(Line::from(Span::styled(
            self.text,
            Style::default().fg(colors.label()),
        )))
        .alignment(Alignment::Center)
        .render(area, buf);
    }
}

/// Key reference shown at the bottom of the screen.
pub struct KeyHints<'a> {
    pub theme: &'a Theme,
}

impl Widget for KeyHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let hints = [
            ("0-9", "enter"),
            ("Bksp", "back"),
            ("Enter", "next"),
            ("Ctrl-R", "reset"),
            ("Esc", "quit"),
        ];
        let mut spans = Vec::new();
        for (i, (key, action)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, Style::default().fg(colors.accent())));
            spans.push(Span::styled(format!(" {action}"), Style::default().fg(colors.hint())));
        }
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
