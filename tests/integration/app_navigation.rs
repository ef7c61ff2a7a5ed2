// =====
// TESTS: 13
// =====
//
// App navigation integration tests.
// Key events in, rendered frames out, through the full UI pipeline.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use msgview::app::{App, Focus, handle_terminal_event};
use msgview::window::{Viewport, Window, WindowConfig};
use pretty_assertions::assert_eq;

use crate::helpers::{BODY_ROWS, conversation, render, test_app};

/// Ten minutes between messages: 144 per day.
const GAP_MS: i64 = 600_000;
const TOTAL: usize = 1000;
const LAST_BODY_ROW: usize = 27;
const FOOTER_ROW: usize = 29;

fn press(app: &mut App, code: KeyCode) {
    handle_terminal_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// One 1000-message conversation, opened and drawn once.
fn opened() -> App {
    let mut app = test_app(vec![conversation("Ana", TOTAL, GAP_MS)], WindowConfig::default());
    app.open_conversation(0);
    render(&mut app, 100, 30);
    app
}

// --- Opening ---

#[test]
fn opening_shows_newest_messages_at_bottom() {
    let mut app = test_app(vec![conversation("Ana", TOTAL, GAP_MS)], WindowConfig::default());
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.focus, Focus::Messages);

    let rows = render(&mut app, 100, 30);
    assert!(rows[0].contains("400 of 1000 loaded"), "{}", rows[0]);
    assert!(rows[LAST_BODY_ROW].ends_with("message 999"), "{}", rows[LAST_BODY_ROW]);
    assert!(app.pending.is_none());
    assert_eq!(app.viewport.scroll_top(), app.viewport.max_scroll_top());
}

#[test]
fn home_and_end_reset_the_window() {
    let mut app = opened();
    press(&mut app, KeyCode::Char('g'));
    let rows = render(&mut app, 100, 30);
    assert_eq!(app.controller.window(), Window::clamped(0, 400, TOTAL));
    assert!(rows[2].contains("Thursday, March 4, 2021"), "{}", rows[2]);
    assert_eq!(app.viewport.scroll_top(), 0);

    press(&mut app, KeyCode::End);
    render(&mut app, 100, 30);
    assert_eq!(app.controller.window(), Window::clamped(600, 1000, TOTAL));
    assert_eq!(app.viewport.scroll_top(), app.viewport.max_scroll_top());
}

// --- Scrolling ---

#[test]
fn loading_older_keeps_every_visible_row_in_place() {
    let mut app = opened();
    // Row 5 starts message 601; message 600 above it opens the window.
    app.viewport.scroll_to(5);
    let before = render(&mut app, 100, 30);

    app.check_proximity();
    assert!(app.pending.is_some());
    assert_eq!(app.controller.window(), Window::clamped(450, 850, TOTAL));

    let after = render(&mut app, 100, 30);
    assert!(app.pending.is_none());
    assert_eq!(after[BODY_ROWS], before[BODY_ROWS]);
    assert_eq!(app.viewport.top_record(), Some(601));

    // Far from the new top edge now.
    app.check_proximity();
    assert!(app.pending.is_none());
}

#[test]
fn loading_newer_with_trim_keeps_visible_rows_in_place() {
    let mut app = opened();
    press(&mut app, KeyCode::Char('g'));
    render(&mut app, 100, 30);
    let bottom = app.viewport.max_scroll_top();
    app.viewport.scroll_to(bottom);
    let before = render(&mut app, 100, 30);
    assert!(before[LAST_BODY_ROW].contains("600 newer messages below"), "{}", before[LAST_BODY_ROW]);

    app.check_proximity();
    assert_eq!(app.controller.window(), Window::clamped(150, 550, TOTAL));
    let after = render(&mut app, 100, 30);

    // Only the newer indicator gives way, to the first newly loaded message.
    assert_eq!(after[2..LAST_BODY_ROW], before[2..LAST_BODY_ROW]);
    assert!(after[LAST_BODY_ROW].contains("Ana"), "{}", after[LAST_BODY_ROW]);
}

#[test]
fn wheel_during_pending_load_moves_from_the_kept_position() {
    let mut app = opened();
    app.viewport.scroll_to(8);
    let expected = render(&mut app, 100, 30);

    app.viewport.scroll_to(5);
    app.check_proximity();
    assert!(app.pending.is_some());
    handle_terminal_event(
        &mut app,
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 60,
            row: 10,
            modifiers: KeyModifiers::NONE,
        }),
    );
    assert_eq!(app.viewport.scroll_top(), 5);

    let rows = render(&mut app, 100, 30);
    assert_eq!(rows[BODY_ROWS], expected[BODY_ROWS]);
}

#[test]
fn home_during_pending_load_still_goes_to_first_message() {
    let mut app = opened();
    app.viewport.scroll_to(5);
    app.check_proximity();
    assert!(app.pending.is_some());

    press(&mut app, KeyCode::Home);
    let rows = render(&mut app, 100, 30);
    assert_eq!(app.controller.window(), Window::clamped(0, 400, TOTAL));
    assert_eq!(app.viewport.scroll_top(), 0);
    assert!(rows[2].contains("Thursday, March 4, 2021"), "{}", rows[2]);
    assert!(!app.controller.in_flight());
}

#[test]
fn mouse_wheel_scrolls_three_rows() {
    let mut app = opened();
    let bottom = app.viewport.scroll_top();
    handle_terminal_event(
        &mut app,
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column: 60,
            row: 10,
            modifiers: KeyModifiers::NONE,
        }),
    );
    assert_eq!(app.viewport.scroll_top(), bottom - 3);
}

// --- Date navigation ---

#[test]
fn date_prompt_jumps_to_first_message_of_day() {
    let mut app = opened();
    press(&mut app, KeyCode::Char('d'));
    type_text(&mut app, "2021-03-06");
    let rows = render(&mut app, 100, 30);
    assert!(rows[FOOTER_ROW].contains("Jump to date (YYYY-MM-DD): 2021-03-06"));

    press(&mut app, KeyCode::Enter);
    render(&mut app, 100, 30);
    assert_eq!(app.controller.window(), Window::clamped(88, 488, TOTAL));
    assert_eq!(app.viewport.top_record(), Some(288));
}

#[test]
fn brackets_step_between_days() {
    let mut app = opened();
    app.jump_to_date_text("2021-03-06");
    render(&mut app, 100, 30);

    press(&mut app, KeyCode::Char(']'));
    render(&mut app, 100, 30);
    assert_eq!(app.viewport.top_record(), Some(432));
    assert_eq!(app.controller.window(), Window::clamped(232, 632, TOTAL));

    press(&mut app, KeyCode::Char('['));
    render(&mut app, 100, 30);
    assert_eq!(app.viewport.top_record(), Some(288));
}

#[test]
fn missing_or_malformed_dates_leave_a_notice() {
    let mut app = opened();
    let window = app.controller.window();

    press(&mut app, KeyCode::Char('d'));
    type_text(&mut app, "2020-01-01");
    press(&mut app, KeyCode::Enter);
    let rows = render(&mut app, 100, 30);
    assert!(rows[FOOTER_ROW].contains("No messages on 2020-01-01"), "{}", rows[FOOTER_ROW]);
    assert_eq!(app.controller.window(), window);

    press(&mut app, KeyCode::Char('d'));
    type_text(&mut app, "soon");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.notice.as_deref(), Some("Not a date: \"soon\" (use YYYY-MM-DD)"));
}

// --- Search ---

#[test]
fn search_replaces_source_and_escape_restores_it() {
    let mut app = opened();
    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "message 99");
    press(&mut app, KeyCode::Enter);
    let rows = render(&mut app, 120, 30);

    // "message 99" and "message 990".."message 999"
    assert_eq!(app.controller.source().len(), 11);
    assert!(rows[0].contains("11 matches for \"message 99\""), "{}", rows[0]);
    assert!(!rows[0].contains("loaded"));

    press(&mut app, KeyCode::Esc);
    render(&mut app, 100, 30);
    assert_eq!(app.controller.source().len(), TOTAL);
    assert_eq!(app.controller.window(), Window::clamped(600, 1000, TOTAL));
}

#[test]
fn search_without_matches_says_so() {
    let mut app = opened();
    app.apply_search("zzz");
    let rows = render(&mut app, 100, 30);
    assert!(rows.iter().any(|row| row.contains("No matching messages")));
}

// --- Layout ---

#[test]
fn narrow_terminal_switches_between_list_and_chat() {
    let mut app = test_app(
        vec![conversation("Ana", 20, GAP_MS), conversation("Book club", 5, GAP_MS)],
        WindowConfig::default(),
    );
    let rows = render(&mut app, 50, 20);
    assert!(rows[0].contains("Conversations"));
    assert!(rows.iter().any(|row| row.contains("Book club")));

    app.open_matching("book");
    assert_eq!(app.selected, Some(1));
    let rows = render(&mut app, 50, 20);
    assert!(!rows[0].contains("Conversations"));
    assert!(rows[0].contains("Book club"));
    assert!(rows.iter().any(|row| row.ends_with("message 4")));
}
