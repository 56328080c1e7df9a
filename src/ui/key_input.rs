use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::otp::{EditOutcome, FieldGroup};

/// What a key or paste did to the field group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Edited(EditOutcome),
    /// Focus moved without editing (return key). `None` when there was nowhere to go.
    Focused(Option<usize>),
    Reset,
    Quit,
    /// Filtered out before reaching the group.
    Rejected,
}

/// Keep only the characters a numeric keypad could have produced.
pub fn numeric_only(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

pub fn handle_key(group: &mut FieldGroup, key: KeyEvent) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if ctrl => KeyAction::Quit,
        KeyCode::Char('r') if ctrl => {
            group.reset();
            group.focus(0);
            KeyAction::Reset
        }
        KeyCode::Char(ch) if !ctrl && ch.is_ascii_digit() => {
            KeyAction::Edited(group.insert(ch.encode_utf8(&mut [0; 4])))
        }
        KeyCode::Backspace => KeyAction::Edited(group.delete_backward()),
        KeyCode::Delete => {
            let Some(index) = group.focused() else {
                return KeyAction::Edited(EditOutcome::Ignored);
            };
            let len = group.cells()[index].text().chars().count();
            KeyAction::Edited(group.edit(0..len, ""))
        }
        KeyCode::Enter => KeyAction::Focused(group.focus_next()),
        _ => KeyAction::Rejected,
    }
}

pub fn handle_paste(group: &mut FieldGroup, text: &str) -> KeyAction {
    let digits = numeric_only(text);
    if digits.is_empty() {
        return KeyAction::Rejected;
    }
    KeyAction::Edited(group.insert(&digits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::otp::{FieldConfig, PasteMode};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn group(count: usize) -> FieldGroup {
        FieldGroup::new(FieldConfig::new(count)).unwrap()
    }

    #[test]
    fn digits_reach_the_group() {
        let mut g = group(4);
        let action = handle_key(&mut g, key(KeyCode::Char('3')));
        assert_eq!(action, KeyAction::Edited(EditOutcome::Filled { cell: 0, focus: 1 }));
        assert_eq!(g.code(), "3");
    }

    #[test]
    fn letters_are_rejected() {
        let mut g = group(4);
        assert_eq!(handle_key(&mut g, key(KeyCode::Char('a'))), KeyAction::Rejected);
        assert_eq!(handle_key(&mut g, key(KeyCode::Tab)), KeyAction::Rejected);
        assert_eq!(g.code(), "");
        assert_eq!(g.focused(), Some(0));
    }

    #[test]
    fn backspace_steps_back() {
        let mut g = group(4);
        handle_key(&mut g, key(KeyCode::Char('1')));
        let action = handle_key(&mut g, key(KeyCode::Backspace));
        assert_eq!(action, KeyAction::Edited(EditOutcome::Cleared { cell: 1, focus: 0 }));
        // The first digit survives; only the (already empty) second cell was cleared.
        assert_eq!(g.code(), "1");
    }

    #[test]
    fn delete_clears_focused_cell() {
        let mut g = group(4);
        handle_key(&mut g, key(KeyCode::Char('1')));
        handle_key(&mut g, key(KeyCode::Char('2')));
        g.focus(1);
        let action = handle_key(&mut g, key(KeyCode::Delete));
        assert_eq!(action, KeyAction::Edited(EditOutcome::Cleared { cell: 1, focus: 0 }));
        assert_eq!(g.code(), "1");
    }

    #[test]
    fn enter_moves_to_next_cell() {
        let mut g = group(2);
        assert_eq!(handle_key(&mut g, key(KeyCode::Enter)), KeyAction::Focused(Some(1)));
        assert_eq!(handle_key(&mut g, key(KeyCode::Enter)), KeyAction::Focused(None));
    }

    #[test]
    fn ctrl_r_resets_and_refocuses() {
        let mut g = group(3);
        handle_key(&mut g, key(KeyCode::Char('1')));
        handle_key(&mut g, key(KeyCode::Char('2')));
        assert_eq!(handle_key(&mut g, ctrl('r')), KeyAction::Reset);
        assert_eq!(g.code(), "");
        assert_eq!(g.focused(), Some(0));
    }

    #[test]
    fn esc_and_ctrl_c_quit() {
        let mut g = group(3);
        assert_eq!(handle_key(&mut g, key(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(handle_key(&mut g, ctrl('c')), KeyAction::Quit);
    }

    #[test]
    fn paste_is_filtered_to_digits() {
        let mut g = FieldGroup::new(FieldConfig::new(6).with_paste_mode(PasteMode::Spread)).unwrap();
        handle_paste(&mut g, "12-34 ab");
        assert_eq!(g.code(), "1234");
        assert_eq!(g.focused(), Some(4));
    }

    #[test]
    fn paste_without_digits_is_rejected() {
        let mut g = group(4);
        assert_eq!(handle_paste(&mut g, "abc"), KeyAction::Rejected);
        assert_eq!(g.focused(), Some(0));
    }

    #[test]
    fn numeric_only_strips_non_ascii_digits() {
        assert_eq!(numeric_only("4\u{0664}2 x"), "42");
    }
}
