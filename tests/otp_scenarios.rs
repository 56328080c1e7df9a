use std::cell::RefCell;
use std::rc::Rc;

use otpfield::otp::{EditOutcome, FieldConfig, FieldGroup, OtpError, PasteMode};

fn with_recorder(config: FieldConfig) -> (FieldGroup, Rc<RefCell<Vec<String>>>) {
    let mut group = FieldGroup::new(config).expect("valid config");
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    group.on_complete(move |code| sink.borrow_mut().push(code.to_string()));
    (group, seen)
}

#[test]
fn four_digits_unmasked() {
    let (mut group, seen) = with_recorder(FieldConfig::new(4));
    for digit in ["1", "2", "3", "4"] {
        group.insert(digit);
    }
    assert_eq!(group.code(), "1234");
    assert_eq!(*seen.borrow(), vec!["1234".to_string()]);
    assert_eq!(group.focused(), None);
}

#[test]
fn four_digits_masked_with_bullet() {
    let (mut group, _) = with_recorder(FieldConfig::new(4).masked('\u{2022}'));
    group.insert("9");
    assert_eq!(group.cells()[0].display(), Some('\u{2022}'));
    assert_eq!(group.code(), "9");

    for digit in ["8", "7", "6"] {
        group.insert(digit);
    }
    assert_eq!(group.code(), "9876");
    assert!(group.cells().iter().all(|c| c.display() == Some('\u{2022}')));
}

#[test]
fn focus_advances_one_cell_per_digit() {
    for count in 1..=8 {
        let mut group = FieldGroup::new(FieldConfig::new(count)).unwrap();
        for i in 0..count {
            assert_eq!(group.focused(), Some(i));
            group.insert(&((i % 10).to_string()));
        }
        let expected: String = (0..count).map(|i| char::from(b'0' + (i % 10) as u8)).collect();
        assert_eq!(group.code(), expected);
        assert!(group.is_complete());
    }
}

#[test]
fn correcting_a_digit_mid_entry() {
    let (mut group, seen) = with_recorder(FieldConfig::new(4));
    group.insert("1");
    group.insert("2");
    // Focus sits on the empty third cell; backspace walks back to the second.
    assert_eq!(group.delete_backward(), EditOutcome::Cleared { cell: 2, focus: 1 });
    assert_eq!(group.delete_backward(), EditOutcome::Cleared { cell: 1, focus: 0 });
    assert_eq!(group.code(), "1");

    // Typing into the filled first cell pushes into the second.
    assert_eq!(group.insert("5"), EditOutcome::Pushed { from: 0, to: 1 });
    group.insert("6");
    group.insert("7");
    assert_eq!(group.code(), "1567");
    assert_eq!(*seen.borrow(), vec!["1567".to_string()]);
}

#[test]
fn reset_after_failed_verification() {
    let (mut group, seen) = with_recorder(FieldConfig::new(3));
    for digit in ["4", "0", "4"] {
        group.insert(digit);
    }
    group.reset();
    assert_eq!(group.code(), "");
    assert_eq!(group.len(), 3);

    assert!(group.focus(0));
    for digit in ["2", "0", "0"] {
        group.insert(digit);
    }
    assert_eq!(*seen.borrow(), vec!["404".to_string(), "200".to_string()]);
}

#[test]
fn pasting_a_whole_code() {
    let (mut trailing, _) = with_recorder(FieldConfig::new(6));
    trailing.insert("123456");
    assert_eq!(trailing.code(), "6");

    let (mut spread, seen) =
        with_recorder(FieldConfig::new(6).with_paste_mode(PasteMode::Spread));
    spread.insert("123456");
    assert_eq!(spread.code(), "123456");
    assert_eq!(*seen.borrow(), vec!["123456".to_string()]);
}

#[test]
fn zero_cells_cannot_be_built() {
    assert!(matches!(
        FieldGroup::new(FieldConfig::new(0)),
        Err(OtpError::InvalidConfiguration(_))
    ));
}
