//! End-to-end widget interactions over the scripted backend.
//!
//! Each test scripts a raw byte stream (exactly what a terminal would
//! send), runs a widget to completion through the public API, and checks
//! the returned result and the terminal state afterwards.

use emberline::{
    ConfirmBox, EditBox, Key, KeyMap, Menu, MenuItem, MenuOptions, MenuOutcome, MessageBox,
    Screen, TestBackend,
};

fn scripted(cols: u16, rows: u16, input: &[u8]) -> Screen<TestBackend> {
    let mut backend = TestBackend::new(cols, rows);
    backend.feed(input);
    Screen::with_backend(backend, KeyMap::default()).expect("test backend opens")
}

// =============================================================================
// Menu
// =============================================================================

#[test]
fn menu_end_then_enter_selects_last_item() {
    let mut screen = scripted(80, 24, b"\x1b[F\r");
    let outcome = Menu::new(vec![
        MenuItem::label("a"),
        MenuItem::label("b"),
        MenuItem::label("c"),
    ])
    .display(&mut screen, &MenuOptions::default())
    .unwrap();
    assert_eq!(outcome, MenuOutcome::Selected(2));
}

#[test]
fn menu_escape_cancels_at_any_point() {
    for script in [b"\x1b".as_slice(), b"\x1b[B\x1b".as_slice()] {
        let mut screen = scripted(80, 24, script);
        let outcome = Menu::new(vec![
            MenuItem::label("a"),
            MenuItem::label("b"),
            MenuItem::label("c"),
        ])
        .display(&mut screen, &MenuOptions::default())
        .unwrap();
        assert_eq!(outcome, MenuOutcome::Cancelled);
    }
}

#[test]
fn menu_scrolls_one_line_at_a_time_through_a_long_list() {
    // Five DOWNs in a three-line window, then ENTER.
    let mut screen = scripted(80, 24, b"\x1b[B\x1b[B\x1b[B\x1b[B\x1b[B\r");
    let items: Vec<MenuItem> = (0..10).map(|i| MenuItem::label(format!("item-{i}"))).collect();
    let opts = MenuOptions {
        lines: Some(3),
        ..MenuOptions::default()
    };
    let outcome = Menu::new(items).display(&mut screen, &opts).unwrap();
    assert_eq!(outcome, MenuOutcome::Selected(5));
    // The last redraw must include the selected row.
    assert!(screen.backend_mut().output().contains("item-5"));
}

#[test]
fn menu_passthrough_reports_key_position() {
    let mut screen = scripted(80, 24, b"\x1bOP");
    let opts = MenuOptions {
        passthrough: vec![Key::Tab, Key::F(1)],
        ..MenuOptions::default()
    };
    let outcome = Menu::new(vec![MenuItem::label("x")])
        .display(&mut screen, &opts)
        .unwrap();
    assert_eq!(outcome, MenuOutcome::Passthrough(1));
}

#[test]
fn menu_with_caption_draws_its_own_border() {
    let mut screen = scripted(80, 24, b"\r");
    let opts = MenuOptions {
        caption: Some("Pick one"),
        footer: Some("esc"),
        item_width: Some(20),
        lines: Some(6),
        ..MenuOptions::default()
    };
    Menu::new(vec![MenuItem::label("only")])
        .display(&mut screen, &opts)
        .unwrap();
    let out = screen.backend_mut().output();
    assert!(out.contains(" Pick one "));
    assert!(out.contains('┌'));
}

// =============================================================================
// Dialogs
// =============================================================================

#[test]
fn confirm_left_then_enter_returns_zero() {
    let mut screen = scripted(80, 24, b"\x1b[D\r");
    let choice = ConfirmBox::new("go on?")
        .buttons(vec!["Yes", "No"])
        .selected(1)
        .show(&mut screen)
        .unwrap();
    assert_eq!(choice, 0);
}

#[test]
fn confirm_immediate_enter_returns_initial_selection() {
    let mut screen = scripted(80, 24, b"\r");
    let choice = ConfirmBox::new("go on?")
        .buttons(vec!["Yes", "No"])
        .selected(1)
        .show(&mut screen)
        .unwrap();
    assert_eq!(choice, 1);
}

#[test]
fn message_box_consumes_exactly_one_key() {
    let mut screen = scripted(80, 24, b"q\r");
    MessageBox::new("done").show(&mut screen).unwrap();
    // The ENTER is still queued for the next reader.
    assert_eq!(screen.key().unwrap(), Key::Enter);
}

// =============================================================================
// Edit box
// =============================================================================

#[test]
fn edit_box_full_session() {
    // Type over a default: END is a no-op at the end, two backspaces, a
    // replacement suffix, ENTER.
    let mut screen = scripted(80, 24, b"\x1b[F\x7f\x7fed\r");
    let value = EditBox::new("renamed").size(40).show(&mut screen).unwrap();
    assert_eq!(value.as_deref(), Some("renamed"));
}

#[test]
fn edit_box_escape_yields_no_value() {
    let mut screen = scripted(80, 24, b"typed\x1b");
    let value = EditBox::new("").show(&mut screen).unwrap();
    assert_eq!(value, None);
}

#[test]
fn edit_box_commit_trims_whitespace() {
    let mut screen = scripted(80, 24, b"  padded  \r");
    let value = EditBox::new("").show(&mut screen).unwrap();
    assert_eq!(value.as_deref(), Some("padded"));
}

#[test]
fn edit_box_wraps_across_rows() {
    // A size big enough to force a multi-row field on a narrow screen.
    let mut screen = scripted(30, 24, b"\r");
    let long_default = "abcdefghijklmnopqrstuvwxyz0123456789";
    let value = EditBox::new(long_default).size(60).show(&mut screen).unwrap();
    assert_eq!(value.as_deref(), Some(long_default));
    // The tail of the default must have been painted on a later row.
    assert!(screen.backend_mut().output().contains("23456789"));
}

// =============================================================================
// Decoder properties via the screen
// =============================================================================

#[test]
fn unrecognized_sequences_reach_callers_as_noop_keys() {
    let mut screen = scripted(80, 24, b"\x1b[Z");
    match screen.key().unwrap() {
        Key::Unknown(bytes) => assert_eq!(bytes, b"\x1b[Z".to_vec()),
        other => panic!("expected Unknown, got {other:?}"),
    }
}

#[test]
fn decoder_basics_through_the_screen() {
    let mut screen = scripted(80, 24, b"\x1b[A\x1b[15~\x1bq");
    assert_eq!(screen.key().unwrap(), Key::Up);
    assert_eq!(screen.key().unwrap(), Key::F(5));
    // ESC followed by an unrelated printable in the same burst is not a
    // known sequence; both bytes come back as one opaque event.
    match screen.key().unwrap() {
        Key::Unknown(bytes) => assert_eq!(bytes, b"\x1bq".to_vec()),
        other => panic!("expected Unknown, got {other:?}"),
    }
}
