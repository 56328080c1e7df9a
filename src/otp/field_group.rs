use std::ops::Range;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::otp::cell::{Cell, MaskPolicy};
use crate::otp::error::OtpError;
use crate::otp::style::{FieldStyle, ShadowStyle};

/// What happens to a multi-character replacement landing in one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PasteMode {
    /// Only the last character is kept.
    #[default]
    Trailing,
    /// Characters are written into consecutive cells.
    Spread,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldConfig {
    pub cell_count: usize,
    pub masking_enabled: bool,
    pub mask_char: char,
    pub paste_mode: PasteMode,
    pub style: FieldStyle,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            cell_count: 4,
            masking_enabled: false,
            mask_char: '*',
            paste_mode: PasteMode::Trailing,
            style: FieldStyle::default(),
        }
    }
}

impl FieldConfig {
    pub fn new(cell_count: usize) -> Self {
        Self {
            cell_count,
            ..Self::default()
        }
    }

    pub fn masked(mut self, mask_char: char) -> Self {
        self.masking_enabled = true;
        self.mask_char = mask_char;
        self
    }

    pub fn with_paste_mode(mut self, paste_mode: PasteMode) -> Self {
        self.paste_mode = paste_mode;
        self
    }

    pub fn validate(&self) -> Result<(), OtpError> {
        if self.cell_count < 1 {
            return Err(OtpError::InvalidConfiguration(
                "cell count must be at least 1".to_string(),
            ));
        }
        if self.mask_char.is_control() || self.mask_char.is_whitespace() {
            return Err(OtpError::InvalidConfiguration(format!(
                "mask character {:?} is not printable",
                self.mask_char
            )));
        }
        Ok(())
    }
}

/// Result of routing one edit (or backspace) through the group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// No cell has focus.
    Ignored,
    /// The replacement range does not lie within the focused cell's text.
    Rejected,
    /// `cell` was emptied and focus moved to `focus`.
    Cleared { cell: usize, focus: usize },
    /// An empty `cell` received a character and focus moved on to `focus`.
    Filled { cell: usize, focus: usize },
    /// `from` was already filled, so the character went to `to`, which now has focus.
    Pushed { from: usize, to: usize },
    /// A paste wrote cells `first..=last`; focus moved to `focus`.
    Spread { first: usize, last: usize, focus: usize },
    /// The last cell was reached. Focus was resigned and the callback fired.
    Completed { code: String },
}

type CompletionCallback = Box<dyn FnMut(&str)>;

/// A row of cells acting as one passcode input.
///
/// Focus is `Some(index)` while a cell accepts input and `None` once the code
/// is complete or after [`FieldGroup::reset`]. The completion callback runs
/// inside the edit call and cannot re-enter the group.
pub struct FieldGroup {
    cells: Vec<Cell>,
    mask: MaskPolicy,
    paste_mode: PasteMode,
    style: FieldStyle,
    shadow: Option<ShadowStyle>,
    focus: Option<usize>,
    on_complete: Option<CompletionCallback>,
}

impl FieldGroup {
    pub fn new(config: FieldConfig) -> Result<Self, OtpError> {
        config.validate()?;

        let count = config.cell_count;
        let cells = (0..count)
            .map(|i| Cell::new(i.checked_sub(1), (i + 1 < count).then_some(i + 1)))
            .collect();

        tracing::debug!(
            message = "otp.build",
            cells = count,
            masked = config.masking_enabled
        );

        Ok(Self {
            cells,
            mask: MaskPolicy::new(config.masking_enabled, config.mask_char),
            paste_mode: config.paste_mode,
            style: config.style,
            shadow: None,
            focus: Some(0),
            on_complete: None,
        })
    }

    pub fn on_complete<F>(&mut self, callback: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.on_complete = Some(Box::new(callback));
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when no cell holds a character.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn focused(&self) -> Option<usize> {
        self.focus
    }

    pub fn mask(&self) -> &MaskPolicy {
        &self.mask
    }

    pub fn paste_mode(&self) -> PasteMode {
        self.paste_mode
    }

    pub fn style(&self) -> &FieldStyle {
        &self.style
    }

    pub fn shadow(&self) -> Option<&ShadowStyle> {
        self.shadow.as_ref()
    }

    /// Raw characters of every cell in order. Masking never affects this.
    pub fn code(&self) -> String {
        self.cells.iter().filter_map(Cell::raw).collect()
    }

    /// True when every cell holds a character.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Empty every cell. Focus is dropped; call [`FieldGroup::focus`] to resume.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
        self.focus = None;
        tracing::debug!(message = "otp.reset", cells = self.cells.len());
    }

    /// Give focus to `index`. Returns false if there is no such cell.
    pub fn focus(&mut self, index: usize) -> bool {
        if index >= self.cells.len() {
            return false;
        }
        self.focus = Some(index);
        true
    }

    /// Return-key behaviour: hop to the next cell without editing.
    pub fn focus_next(&mut self) -> Option<usize> {
        let next = self.focus.and_then(|i| self.cells[i].next())?;
        self.focus = Some(next);
        Some(next)
    }

    pub fn apply_shadow_style(&mut self, offset: (i16, i16), color: Color, radius: u16, opacity: f32) {
        self.shadow = Some(ShadowStyle::new(offset, color, radius, opacity));
    }

    /// Backspace on the focused cell: empty it and step back one cell.
    pub fn delete_backward(&mut self) -> EditOutcome {
        let Some(index) = self.focus else {
            return EditOutcome::Ignored;
        };
        self.clear_cell(index)
    }

    /// Insert `text` at the end of the focused cell's text, the way a caret
    /// parked after the existing character would.
    pub fn insert(&mut self, text: &str) -> EditOutcome {
        let Some(index) = self.focus else {
            return EditOutcome::Ignored;
        };
        let end = self.cells[index].text().chars().count();
        self.edit(end..end, text)
    }

    /// Route a proposed replacement of `range` by `replacement`. Offsets are
    /// chars into the focused cell's content; the masked display always has the
    /// same length, but the raw character is what the range is applied to.
    pub fn edit(&mut self, range: Range<usize>, replacement: &str) -> EditOutcome {
        let Some(index) = self.focus else {
            tracing::debug!(message = "otp.edit", outcome = "ignored");
            return EditOutcome::Ignored;
        };

        let text = self.cells[index].raw_text();
        let text_len = text.chars().count();
        let overwrite = range.start == 0 && range.end == text_len;
        let Some(updated) = replace_chars(&text, range, replacement) else {
            tracing::debug!(message = "otp.edit", cell = index, outcome = "rejected");
            return EditOutcome::Rejected;
        };

        if updated.is_empty() {
            return self.clear_cell(index);
        }

        if self.paste_mode == PasteMode::Spread && replacement.chars().count() > 1 {
            let start = if overwrite || self.cells[index].is_empty() {
                Some(index)
            } else {
                self.cells[index].next()
            };
            return match start {
                Some(start) => self.spread(start, replacement),
                None => self.complete(),
            };
        }

        // `updated` is non-empty here; only its last character survives.
        let Some(last) = updated.chars().last() else {
            return EditOutcome::Ignored;
        };

        if self.cells[index].is_empty() {
            self.cells[index].set_value(Some(last), &self.mask);
            return match self.cells[index].next() {
                Some(next) => {
                    self.focus = Some(next);
                    tracing::debug!(message = "otp.edit", cell = index, outcome = "filled", focus = next);
                    EditOutcome::Filled { cell: index, focus: next }
                }
                None => self.complete(),
            };
        }

        match self.cells[index].next() {
            Some(next) => {
                self.cells[next].set_value(Some(last), &self.mask);
                // A character landing in the last cell finishes the code.
                if self.cells[next].next().is_none() {
                    return self.complete();
                }
                self.focus = Some(next);
                tracing::debug!(message = "otp.edit", cell = index, outcome = "pushed", focus = next);
                EditOutcome::Pushed { from: index, to: next }
            }
            None => self.complete(),
        }
    }

    fn clear_cell(&mut self, index: usize) -> EditOutcome {
        let focus = self.cells[index].delete_backward(index);
        self.focus = Some(focus);
        tracing::debug!(message = "otp.edit", cell = index, outcome = "cleared", focus);
        EditOutcome::Cleared { cell: index, focus }
    }

    fn spread(&mut self, start: usize, replacement: &str) -> EditOutcome {
        let mut last = start;
        let mut target = Some(start);
        for ch in replacement.chars() {
            let Some(i) = target else { break };
            self.cells[i].set_value(Some(ch), &self.mask);
            last = i;
            target = self.cells[i].next();
        }

        match self.cells[last].next() {
            Some(focus) => {
                self.focus = Some(focus);
                tracing::debug!(message = "otp.edit", cell = start, outcome = "spread", last, focus);
                EditOutcome::Spread { first: start, last, focus }
            }
            None => self.complete(),
        }
    }

    fn complete(&mut self) -> EditOutcome {
        self.focus = None;
        let code = self.code();
        // The code itself is a secret; only its length is logged.
        tracing::info!(message = "otp.complete", len = code.chars().count());
        if let Some(callback) = self.on_complete.as_mut() {
            callback(&code);
        }
        EditOutcome::Completed { code }
    }
}

/// Replace the chars in `range` of `text`. `None` if the range is out of bounds.
fn replace_chars(text: &str, range: Range<usize>, replacement: &str) -> Option<String> {
    let len = text.chars().count();
    if range.start > range.end || range.end > len {
        return None;
    }
    let mut out: String = text.chars().take(range.start).collect();
    out.push_str(replacement);
    out.extend(text.chars().skip(range.end));
    Some(out)
}
