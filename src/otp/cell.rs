/// How a cell's entered character is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaskPolicy {
    pub enabled: bool,
    pub mask_char: char,
}

impl MaskPolicy {
    pub fn new(enabled: bool, mask_char: char) -> Self {
        Self { enabled, mask_char }
    }

    pub fn display_for(&self, raw: Option<char>) -> Option<char> {
        match raw {
            Some(_) if self.enabled => Some(self.mask_char),
            other => other,
        }
    }
}

impl Default for MaskPolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            mask_char: '*',
        }
    }
}

/// One single-character slot of the passcode row.
///
/// Neighbours are indices into the owning group's cell list, so a cell never
/// owns (or keeps alive) another cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    raw: Option<char>,
    display: Option<char>,
    previous: Option<usize>,
    next: Option<usize>,
}

impl Cell {
    pub fn new(previous: Option<usize>, next: Option<usize>) -> Self {
        Self {
            raw: None,
            display: None,
            previous,
            next,
        }
    }

    /// The character actually entered, independent of masking.
    pub fn raw(&self) -> Option<char> {
        self.raw
    }

    /// The character shown to the user.
    pub fn display(&self) -> Option<char> {
        self.display
    }

    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    pub fn next(&self) -> Option<usize> {
        self.next
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_none()
    }

    /// Visible text of the cell, masked when masking is on.
    pub fn text(&self) -> String {
        self.display.map(String::from).unwrap_or_default()
    }

    /// The entered character as a string, empty when the cell is empty.
    pub fn raw_text(&self) -> String {
        self.raw.map(String::from).unwrap_or_default()
    }

    pub fn set_value(&mut self, raw: Option<char>, mask: &MaskPolicy) {
        self.raw = raw;
        self.display = mask.display_for(raw);
    }

    pub fn clear(&mut self) {
        self.raw = None;
        self.display = None;
    }

    /// Clears the cell and returns where focus should go: the previous cell,
    /// or `own_index` when this is the first cell.
    pub fn delete_backward(&mut self, own_index: usize) -> usize {
        self.clear();
        self.previous.unwrap_or(own_index)
    }
}
