use std::collections::BTreeMap;

use bitword::prelude::*;
use inspector::*;

/// Remembers what was shown, in the way a widget would.
#[derive(Debug, Default)]
struct RecordingView {
    texts: BTreeMap<&'static str, String>,
    bits: BTreeMap<usize, BitState>,
    amount: Option<String>,
    writes: usize,
}

impl View for RecordingView {
    fn show_text(&mut self, field: Base, text: &str) -> Echo {
        self.writes += 1;
        self.texts.insert(field.name(), text.to_owned());
        None
    }

    fn show_bit(&mut self, index: usize, state: BitState) -> Echo {
        self.writes += 1;
        self.bits.insert(index, state);
        None
    }

    fn show_amount(&mut self, text: &str) -> Echo {
        self.amount = Some(text.to_owned());
        None
    }
}

/// Behaves like a toolkit which reports programmatic updates as if
/// the user had made them.
#[derive(Debug, Default)]
struct EchoingView {
    echoes: usize,
}

impl View for EchoingView {
    fn show_text(&mut self, field: Base, text: &str) -> Echo {
        self.echoes += 1;
        Some(InputEvent::TextEdited {
            field,
            // Deliberately different, so that an unsuppressed echo
            // would be noticed.
            text: format!("{text}1"),
        })
    }

    fn show_bit(&mut self, index: usize, _state: BitState) -> Echo {
        self.echoes += 1;
        Some(InputEvent::BitToggled { index })
    }

    fn show_amount(&mut self, _text: &str) -> Echo {
        self.echoes += 1;
        Some(InputEvent::ShiftAmountEdited {
            text: "99".to_string(),
        })
    }
}

fn edit(field: Base, text: &str) -> InputEvent {
    InputEvent::TextEdited {
        field,
        text: text.to_string(),
    }
}

fn op(op: Operation, amount: i64) -> InputEvent {
    InputEvent::OperationInvoked {
        op,
        amount: Some(amount),
    }
}

fn byte_inspector() -> Inspector {
    Inspector::new(&Settings {
        num_bytes: 1,
        signed_mode: false,
        shift_amount: 1,
    })
}

#[test]
fn starts_at_zero() {
    let insp = Inspector::default();
    assert_eq!(insp.value(), 0);
    assert_eq!(insp.width().bits(), 32);
    assert_eq!(insp.display_strings().hex, "0");
    assert_eq!(insp.display_strings().bin, "0");
    assert_eq!(insp.shift_amount_text(), "1");
    assert!(insp.bit_states()[31].active);
    assert!(!insp.bit_states()[32].active);
}

#[test]
fn shift_left_drops_top_bit() {
    let mut insp = byte_inspector();
    let mut view = NullView;
    assert_eq!(insp.dispatch(edit(Base::Hex, "FF"), &mut view), EventOutcome::Applied);
    assert_eq!(insp.dispatch(op(Operation::Shl, 1), &mut view), EventOutcome::Applied);
    assert_eq!(insp.value(), 0xFE);
    assert_eq!(insp.display_strings().hex, "FE");
}

#[test]
fn rotate_left_wraps_around() {
    let mut insp = byte_inspector();
    let mut view = NullView;
    insp.dispatch(edit(Base::Bin, "10000001"), &mut view);
    insp.dispatch(op(Operation::Rol, 1), &mut view);
    assert_eq!(insp.value(), 0b0000_0011);
    assert_eq!(insp.display_strings().bin, "11");
}

#[test]
fn sign_mode_reformats_decimal() {
    let mut insp = byte_inspector();
    let mut view = RecordingView::default();
    insp.dispatch(edit(Base::Dec, "200"), &mut view);
    assert_eq!(insp.value(), 200);
    assert_eq!(
        insp.dispatch(InputEvent::SignModeToggled { signed: true }, &mut view),
        EventOutcome::Applied
    );
    assert_eq!(insp.display_strings().dec, "-56");
    assert_eq!(view.texts["dec"], "-56");
    assert_eq!(insp.value(), 200);
}

#[test]
fn narrowing_truncates() {
    let mut insp = Inspector::new(&Settings {
        num_bytes: 2,
        ..Settings::default()
    });
    let mut view = RecordingView::default();
    insp.dispatch(edit(Base::Hex, "1FF"), &mut view);
    assert_eq!(insp.value(), 511);
    assert_eq!(
        insp.dispatch(InputEvent::WidthSelected { bytes: 1 }, &mut view),
        EventOutcome::Applied
    );
    assert_eq!(insp.value(), 0xFF);
    assert_eq!(view.texts["hex"], "FF");
    assert!(!view.bits[&8].active);
    assert!(!view.bits[&8].set);
}

#[test]
fn edited_field_keeps_its_text() {
    let mut insp = byte_inspector();
    let mut view = RecordingView::default();
    insp.dispatch(edit(Base::Hex, "00f"), &mut view);
    assert_eq!(insp.value(), 15);
    assert_eq!(insp.display_strings().hex, "00f");
    assert!(!view.texts.contains_key("hex"));
    assert_eq!(view.texts["dec"], "15");
    assert_eq!(view.texts["oct"], "17");
    assert_eq!(view.texts["bin"], "1111");
}

#[test]
fn entry_wider_than_word_is_masked() {
    let mut insp = byte_inspector();
    insp.dispatch(edit(Base::Hex, "1234"), &mut NullView);
    assert_eq!(insp.value(), 0x34);
    assert_eq!(insp.display_strings().dec, "52");
}

#[test]
fn empty_field_means_zero() {
    let mut insp = byte_inspector();
    let mut view = NullView;
    insp.dispatch(edit(Base::Hex, "AB"), &mut view);
    assert_eq!(
        insp.dispatch(edit(Base::Hex, ""), &mut view),
        EventOutcome::Applied
    );
    assert_eq!(insp.value(), 0);
    assert_eq!(insp.display_strings().hex, "");
    assert_eq!(insp.display_strings().dec, "0");
}

#[test]
fn invalid_text_is_rejected_and_state_kept() {
    let mut insp = byte_inspector();
    let mut view = RecordingView::default();
    insp.dispatch(edit(Base::Hex, "2A"), &mut view);
    let writes = view.writes;
    let outcome = insp.dispatch(edit(Base::Hex, "2AZ"), &mut view);
    assert_eq!(
        outcome,
        EventOutcome::Rejected(Rejection::InvalidText {
            field: Base::Hex,
            text: "2AZ".to_string()
        })
    );
    assert_eq!(insp.value(), 0x2A);
    assert_eq!(insp.display_strings().hex, "2A");
    assert_eq!(view.writes, writes, "a rejected edit should not update the view");

    let outcome = insp.dispatch(edit(Base::Dec, "-1"), &mut view);
    assert!(matches!(outcome, EventOutcome::Rejected(_)));
    assert_eq!(insp.value(), 0x2A);
}

#[test]
fn numeral_wider_than_64_bits_is_truncated() {
    let mut insp = byte_inspector();
    insp.dispatch(edit(Base::Dec, "7"), &mut NullView);
    // 10^23 is a multiple of 256, so the low byte of 10^23 - 1 is 0xFF.
    let outcome = insp.dispatch(edit(Base::Dec, "99999999999999999999999"), &mut NullView);
    assert_eq!(outcome, EventOutcome::Applied);
    assert_eq!(insp.value(), 0xFF);
    assert_eq!(insp.display_strings().hex, "FF");

    let outcome = insp.dispatch(edit(Base::Hex, "1FFFFFFFFFFFFFFFF"), &mut NullView);
    assert_eq!(outcome, EventOutcome::Applied);
    assert_eq!(insp.value(), 0xFF);

    insp.dispatch(InputEvent::SignModeToggled { signed: true }, &mut NullView);
    let outcome = insp.dispatch(edit(Base::Dec, "18446744073709551616"), &mut NullView);
    assert_eq!(outcome, EventOutcome::Applied);
    assert_eq!(insp.value(), 0);
    insp.dispatch(edit(Base::Dec, "-18446744073709551617"), &mut NullView);
    assert_eq!(insp.value(), 0xFF);
    assert_eq!(insp.display_strings().hex, "FF");
}

#[test]
fn signed_entry() {
    let mut insp = byte_inspector();
    let mut view = NullView;
    insp.dispatch(InputEvent::SignModeToggled { signed: true }, &mut view);
    insp.dispatch(edit(Base::Dec, "5"), &mut view);
    assert_eq!(
        insp.dispatch(edit(Base::Dec, "-"), &mut view),
        EventOutcome::Pending
    );
    assert_eq!(insp.value(), 5, "a lone minus sign should not change the value");
    assert_eq!(insp.display_strings().dec, "-");
    assert_eq!(
        insp.dispatch(edit(Base::Dec, "-1"), &mut view),
        EventOutcome::Applied
    );
    assert_eq!(insp.value(), 0xFF);
    assert_eq!(insp.display_strings().hex, "FF");
    assert_eq!(insp.display_strings().dec, "-1");
}

#[test]
fn signed_out_of_range_truncates() {
    let mut insp = byte_inspector();
    insp.dispatch(InputEvent::SignModeToggled { signed: true }, &mut NullView);
    insp.dispatch(edit(Base::Dec, "-129"), &mut NullView);
    assert_eq!(insp.value(), 0x7F);
}

#[test]
fn bit_toggling() {
    let mut insp = byte_inspector();
    let mut view = RecordingView::default();
    assert_eq!(
        insp.dispatch(InputEvent::BitToggled { index: 7 }, &mut view),
        EventOutcome::Applied
    );
    assert_eq!(insp.value(), 0x80);
    assert!(insp.bit_states()[7].set);
    assert!(view.bits[&7].set);
    assert_eq!(view.texts["hex"], "80");

    assert_eq!(
        insp.dispatch(InputEvent::BitToggled { index: 8 }, &mut view),
        EventOutcome::Ignored
    );
    assert_eq!(
        insp.dispatch(InputEvent::BitToggled { index: 64 }, &mut view),
        EventOutcome::Rejected(Rejection::BitOutOfRange(64))
    );
    assert_eq!(insp.value(), 0x80);
}

#[test]
fn bad_width_is_rejected() {
    let mut insp = byte_inspector();
    insp.dispatch(edit(Base::Hex, "AA"), &mut NullView);
    assert_eq!(
        insp.dispatch(InputEvent::WidthSelected { bytes: 9 }, &mut NullView),
        EventOutcome::Rejected(Rejection::BadWidth(BadWidth(9)))
    );
    assert_eq!(insp.width().bytes(), 1);
    assert_eq!(insp.value(), 0xAA);
}

#[test]
fn shift_amount_field() {
    let mut insp = byte_inspector();
    let mut view = NullView;
    insp.dispatch(edit(Base::Hex, "1"), &mut view);
    assert_eq!(
        insp.dispatch(
            InputEvent::ShiftAmountEdited {
                text: "3".to_string()
            },
            &mut view
        ),
        EventOutcome::Applied
    );
    insp.dispatch(
        InputEvent::OperationInvoked {
            op: Operation::Shl,
            amount: None,
        },
        &mut view,
    );
    assert_eq!(insp.value(), 8);

    // Blank while typing: the last good amount still applies.
    insp.dispatch(
        InputEvent::ShiftAmountEdited {
            text: String::new(),
        },
        &mut view,
    );
    assert_eq!(insp.shift_amount_text(), "");
    assert_eq!(insp.shift_amount(), 3);

    assert_eq!(
        insp.dispatch(
            InputEvent::ShiftAmountEdited {
                text: "-2".to_string()
            },
            &mut view
        ),
        EventOutcome::Rejected(Rejection::InvalidAmount("-2".to_string()))
    );
    assert_eq!(insp.shift_amount(), 3);
}

#[test]
fn huge_shift_amount_saturates() {
    let mut insp = byte_inspector();
    let mut view = NullView;
    insp.dispatch(edit(Base::Hex, "80"), &mut view);
    insp.dispatch(
        InputEvent::ShiftAmountEdited {
            text: "123456789012345678901234567890".to_string(),
        },
        &mut view,
    );
    assert_eq!(insp.shift_amount(), u32::MAX);
    insp.dispatch(
        InputEvent::OperationInvoked {
            op: Operation::Asr,
            amount: None,
        },
        &mut view,
    );
    assert_eq!(insp.value(), 0xFF);
    insp.dispatch(op(Operation::Lsr, i64::MAX), &mut view);
    assert_eq!(insp.value(), 0);
}

#[test]
fn negative_amount_is_a_no_op() {
    let mut insp = byte_inspector();
    let mut view = RecordingView::default();
    insp.dispatch(edit(Base::Hex, "F0"), &mut view);
    let writes = view.writes;
    for operation in [Operation::Shl, Operation::Lsr, Operation::Rol] {
        assert_eq!(
            insp.dispatch(op(operation, -1), &mut view),
            EventOutcome::Ignored
        );
    }
    assert_eq!(insp.value(), 0xF0);
    assert_eq!(view.writes, writes);
}

#[test]
fn every_operation_applies() {
    let cases = [
        (Operation::Shl, 2, 0xC4),
        (Operation::Lsr, 2, 0x2C),
        (Operation::Asr, 2, 0xEC),
        (Operation::Rol, 4, 0x1B),
        (Operation::Ror, 4, 0x1B),
        (Operation::Invert, 0, 0x4E),
        (Operation::Reverse, 0, 0x8D),
        (Operation::Clear, 0, 0x00),
    ];
    for (operation, amount, expected) in cases {
        let mut insp = byte_inspector();
        insp.dispatch(edit(Base::Hex, "B1"), &mut NullView);
        insp.dispatch(op(operation, amount), &mut NullView);
        assert_eq!(insp.value(), expected, "{operation} by {amount}");
    }
}

#[test]
fn echoes_are_suppressed() {
    let mut insp = byte_inspector();
    let mut view = EchoingView::default();
    assert_eq!(
        insp.dispatch(edit(Base::Hex, "5A"), &mut view),
        EventOutcome::Applied
    );
    // Three other text fields, plus 64 bits.
    assert_eq!(view.echoes, 3 + 64);
    assert_eq!(insp.value(), 0x5A);
    assert_eq!(insp.display_strings().dec, "90");
    assert_eq!(insp.display_strings().hex, "5A");

    // The latch is released afterwards, so user events still work.
    assert_eq!(
        insp.dispatch(InputEvent::BitToggled { index: 0 }, &mut view),
        EventOutcome::Applied
    );
    assert_eq!(insp.value(), 0x5B);
}

#[test]
fn refresh_shows_everything() {
    let mut insp = Inspector::new(&Settings {
        num_bytes: 2,
        signed_mode: true,
        shift_amount: 4,
    });
    let mut view = RecordingView::default();
    insp.refresh(&mut view);
    assert_eq!(view.texts.len(), 4);
    assert_eq!(view.bits.len(), 64);
    assert_eq!(view.amount.as_deref(), Some("4"));
    assert!(view.bits[&15].active);
    assert!(!view.bits[&16].active);

    let mut echoing = EchoingView::default();
    insp.refresh(&mut echoing);
    assert_eq!(insp.shift_amount(), 4);
    assert_eq!(insp.value(), 0);
}

#[test]
fn settings_snapshot() {
    let mut insp = byte_inspector();
    let mut view = NullView;
    insp.dispatch(InputEvent::WidthSelected { bytes: 6 }, &mut view);
    insp.dispatch(InputEvent::SignModeToggled { signed: true }, &mut view);
    insp.dispatch(
        InputEvent::ShiftAmountEdited {
            text: "7".to_string(),
        },
        &mut view,
    );
    assert_eq!(
        insp.settings(),
        Settings {
            num_bytes: 6,
            signed_mode: true,
            shift_amount: 7
        }
    );
}

#[test]
fn copy_supplies_displayed_text() {
    let mut insp = byte_inspector();
    insp.dispatch(edit(Base::Hex, "0c"), &mut NullView);
    let mut clipboard = MemoryClipboard::default();
    insp.copy_field(Base::Hex, &mut clipboard)
        .expect("memory clipboard cannot fail");
    assert_eq!(clipboard.contents(), Some("0c"));
    insp.copy_field(Base::Bin, &mut clipboard)
        .expect("memory clipboard cannot fail");
    assert_eq!(clipboard.contents(), Some("1100"));
}
