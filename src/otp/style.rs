use ratatui::style::Color;

/// Cosmetic layout of the cell row. Routing never reads any of this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldStyle {
    /// Blank columns between neighbouring cells.
    pub spacing: u16,
    /// Any non-zero radius draws rounded corners.
    pub corner_radius: u16,
    /// 0 = no border, 1 = plain, 2+ = thick.
    pub border_width: u16,
}

impl Default for FieldStyle {
    fn default() -> Self {
        Self {
            spacing: 2,
            corner_radius: 0,
            border_width: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowStyle {
    /// Column/row displacement of the shadow relative to each cell.
    pub offset: (i16, i16),
    pub color: Color,
    pub radius: u16,
    pub opacity: f32,
}

impl ShadowStyle {
    pub fn new(offset: (i16, i16), color: Color, radius: u16, opacity: f32) -> Self {
        Self {
            offset,
            color,
            radius,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    /// Mix the shadow colour over `bg` by the shadow's opacity. Non-RGB colours
    /// cannot be blended, so they are used as-is above half opacity.
    pub fn blended_over(&self, bg: Color) -> Option<Color> {
        match (self.color, bg) {
            (Color::Rgb(sr, sg, sb), Color::Rgb(br, bgr, bb)) => {
                let mix = |s: u8, b: u8| {
                    (s as f32 * self.opacity + b as f32 * (1.0 - self.opacity)).round() as u8
                };
                Some(Color::Rgb(mix(sr, br), mix(sg, bgr), mix(sb, bb)))
            }
            (color, _) if self.opacity >= 0.5 => Some(color),
            _ => None,
        }
    }
}
