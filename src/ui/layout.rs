use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub header: Rect,
    pub row: Rect,
    pub label: Rect,
    pub footer: Rect,
}

impl AppLayout {
    /// Header on top, footer at the bottom, and the cell row with its label
    /// vertically centred in between.
    pub fn new(area: Rect, row_height: u16) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(row_height),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header: vertical[0],
            row: vertical[2],
            label: vertical[4],
            footer: vertical[6],
        }
    }
}
