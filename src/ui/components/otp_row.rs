use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Widget};

use crate::otp::{FieldGroup, FieldStyle, ShadowStyle};
use crate::ui::theme::Theme;

pub const CELL_WIDTH: u16 = 5;
pub const CELL_HEIGHT: u16 = 3;

/// Renders a [`FieldGroup`] as a centred row of boxed cells.
pub struct OtpRow<'a> {
    group: &'a FieldGroup,
    theme: &'a Theme,
}

impl<'a> OtpRow<'a> {
    pub fn new(group: &'a FieldGroup, theme: &'a Theme) -> Self {
        Self { group, theme }
    }

    /// Rows needed to draw the cells plus any shadow below them.
    pub fn height(group: &FieldGroup) -> u16 {
        let shadow = group
            .shadow()
            .map(|s| (s.offset.1.max(0) as u16).saturating_add(s.radius))
            .unwrap_or(0);
        CELL_HEIGHT.saturating_add(shadow)
    }
}

// Cell counts and spacing come straight from config and the command line,
// so all row geometry saturates at the u16 edge instead of overflowing.
fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

pub fn row_width(count: usize, spacing: u16) -> u16 {
    let count = to_u16(count);
    count
        .saturating_mul(CELL_WIDTH)
        .saturating_add(count.saturating_sub(1).saturating_mul(spacing))
}

/// Cell rectangles, horizontally centred in `area`. Cells that would fall
/// outside `area` are clipped to it (possibly down to an empty rect).
pub fn cell_rects(area: Rect, count: usize, spacing: u16) -> Vec<Rect> {
    let width = row_width(count, spacing);
    let left = area.x + area.width.saturating_sub(width) / 2;
    let step = CELL_WIDTH.saturating_add(spacing);
    (0..count)
        .map(|i| {
            let x = left.saturating_add(to_u16(i).saturating_mul(step));
            Rect::new(x, area.y, CELL_WIDTH, CELL_HEIGHT.min(area.height)).intersection(area)
        })
        .collect()
}

fn shadow_rect(cell: Rect, shadow: &ShadowStyle, bounds: Rect) -> Rect {
    let radius = shadow.radius as i32;
    let x = cell.x as i32 + shadow.offset.0 as i32 - radius;
    let y = cell.y as i32 + shadow.offset.1 as i32 - radius;
    let width = cell.width as i32 + 2 * radius;
    let height = cell.height as i32 + 2 * radius;

    let left = x.max(bounds.x as i32);
    let top = y.max(bounds.y as i32);
    let right = (x + width).min(bounds.right() as i32);
    let bottom = (y + height).min(bounds.bottom() as i32);
    if right <= left || bottom <= top {
        return Rect::default();
    }
    Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    )
}

fn border_for(style: &FieldStyle) -> (Borders, BorderType) {
    match style.border_width {
        0 => (Borders::NONE, BorderType::Plain),
        1 if style.corner_radius > 0 => (Borders::ALL, BorderType::Rounded),
        1 => (Borders::ALL, BorderType::Plain),
        _ => (Borders::ALL, BorderType::Thick),
    }
}

impl Widget for OtpRow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let style = self.group.style();
        let rects = cell_rects(area, self.group.len(), style.spacing);

        if let Some(shadow) = self.group.shadow() {
            if let Some(color) = shadow.blended_over(colors.bg()) {
                for rect in &rects {
                    let target = shadow_rect(*rect, shadow, area);
                    buf.set_style(target, Style::default().bg(color));
                }
            }
        }

        let (borders, border_type) = border_for(style);
        for (i, (cell, rect)) in self.group.cells().iter().zip(&rects).enumerate() {
            if rect.is_empty() {
                continue;
            }
            let focused = self.group.focused() == Some(i);
            let border_color = if focused {
                colors.cell_border_focused()
            } else if cell.is_empty() {
                colors.cell_border()
            } else {
                colors.cell_border_filled()
            };

            let block = Block::default()
                .borders(borders)
                .border_type(border_type)
                .border_style(Style::default().fg(border_color))
                .style(Style::default().bg(colors.cell_bg()));
            let inner = block.inner(*rect);
            block.render(*rect, buf);

            if inner.is_empty() {
                continue;
            }

            let (glyph, glyph_style) = match cell.display() {
                Some(ch) => (
                    ch.to_string(),
                    Style::default().fg(colors.cell_fg()).add_modifier(Modifier::BOLD),
                ),
                None if focused => ("_".to_string(), Style::default().fg(colors.accent())),
                None => (String::new(), Style::default()),
            };
            let x = inner.x + inner.width.saturating_sub(1) / 2;
            let y = inner.y + inner.height.saturating_sub(1) / 2;
            buf.set_string(x, y, &glyph, glyph_style);
        }
    }
}
