// =====
// TESTS: 9
// =====
//
// Load cycle integration tests.
// Drives the window controller against a pane with uneven record heights.

use std::sync::Arc;

use msgview::window::{
    Completion, CyclePhase, LoadIntent, Viewport, Window, WindowConfig, WindowController,
};
use pretty_assertions::assert_eq;

use crate::helpers::{Pane, varied_heights};

const TOTAL: usize = 1000;

fn source(total: usize) -> Arc<[u32]> {
    (0..u32::try_from(total).expect("small total")).collect::<Vec<_>>().into()
}

/// Controller showing the tail of a 1000-record source, cycle completed.
fn settled() -> (WindowController<u32>, Pane) {
    let mut controller = WindowController::new(WindowConfig::default());
    let mut pane = Pane::new(varied_heights(TOTAL), 40);
    let cont = controller.replace_source(source(TOTAL));
    pane.render(&controller);
    assert_eq!(controller.complete(cont, &mut pane), Completion::Applied);
    (controller, pane)
}

// --- Initial load ---

#[test]
fn initial_load_shows_tail_at_bottom() {
    let (controller, pane) = settled();
    assert_eq!(controller.window(), Window::clamped(600, 1000, TOTAL));
    assert_eq!(pane.metrics.scroll_top, pane.metrics.max_scroll_top());
    assert_eq!(controller.phase(), CyclePhase::Idle);
}

#[test]
fn short_source_is_shown_whole() {
    let mut controller = WindowController::new(WindowConfig::default());
    let mut pane = Pane::new(varied_heights(50), 40);
    let cont = controller.replace_source(source(50));
    pane.render(&controller);
    assert_eq!(controller.complete(cont, &mut pane), Completion::Applied);

    let view = controller.snapshot();
    assert_eq!(view.visible.len(), 50);
    assert!(!view.has_older);
    assert!(!view.has_newer);
    pane.scroll_to(0);
    assert_eq!(controller.on_proximity(&pane), None);
}

// --- Extension with anchoring ---

#[test]
fn extend_older_keeps_top_record_in_place() {
    let (mut controller, mut pane) = settled();
    pane.scroll_to(5);
    let before = pane.top_position().expect("rendered");

    let cont = controller.on_proximity(&pane).expect("near top");
    assert_eq!(controller.window(), Window::clamped(450, 850, TOTAL));
    pane.render(&controller);
    assert_eq!(controller.complete(cont, &mut pane), Completion::Applied);

    assert_eq!(pane.top_position(), Some(before));
    assert_eq!(controller.phase(), CyclePhase::Idle);
}

#[test]
fn extend_newer_with_trim_keeps_bottom_view() {
    let (mut controller, mut pane) = settled();
    let jump = controller.jump_to_index(500, &pane).expect("in range");
    pane.render(&controller);
    assert_eq!(controller.complete(jump, &mut pane), Completion::Applied);
    assert_eq!(controller.window(), Window::clamped(300, 700, TOTAL));
    assert_eq!(pane.top_position(), Some((500, 0)));

    let bottom = pane.metrics.max_scroll_top();
    pane.scroll_to(bottom);
    let before = pane.top_position().expect("rendered");

    let cont = controller.on_proximity(&pane).expect("near bottom");
    assert_eq!(controller.window(), Window::clamped(450, 850, TOTAL));
    pane.render(&controller);
    assert_eq!(controller.complete(cont, &mut pane), Completion::Applied);
    assert_eq!(pane.top_position(), Some(before));
}

// --- Debounce and staleness ---

#[test]
fn second_trigger_before_render_is_suppressed() {
    let (mut controller, mut pane) = settled();
    pane.scroll_to(0);

    let first = controller.on_proximity(&pane).expect("near top");
    let window = controller.window();
    assert_eq!(controller.on_proximity(&pane), None);
    assert_eq!(controller.request(LoadIntent::ExtendOlder, &pane), None);
    assert_eq!(controller.window(), window);

    pane.render(&controller);
    assert_eq!(controller.complete(first, &mut pane), Completion::Applied);
}

#[test]
fn replacing_source_makes_old_continuation_stale() {
    let (mut controller, mut pane) = settled();
    pane.scroll_to(0);
    let old = controller.on_proximity(&pane).expect("near top");

    let fresh = controller.replace_source(source(300));
    pane.render(&controller);
    assert_eq!(controller.complete(old, &mut pane), Completion::Stale);
    assert_eq!(controller.complete(fresh, &mut pane), Completion::Applied);
    assert_eq!(controller.window(), Window::clamped(0, 300, 300));
    assert!(fresh.generation() > old.generation());
}

// --- Jumps ---

#[test]
fn jump_that_cannot_be_located_is_reverted() {
    let (mut controller, mut pane) = settled();
    pane.scroll_to(100);

    let jump = controller.jump_to_index(100, &pane).expect("in range");
    assert_eq!(controller.window(), Window::clamped(0, 400, TOTAL));

    // The pane never laid out the new window.
    let Completion::Reverted(restore) = controller.complete(jump, &mut pane) else {
        panic!("expected a revert");
    };
    assert_eq!(controller.window(), Window::clamped(600, 1000, TOTAL));
    pane.scroll_to(0);
    pane.render(&controller);
    assert_eq!(controller.complete(restore, &mut pane), Completion::Applied);
    assert_eq!(pane.metrics.scroll_top, 100);
}

#[test]
fn jump_near_end_clamps_and_shows_target() {
    let (mut controller, mut pane) = settled();
    let jump = controller.jump_to_index(900, &pane).expect("in range");
    assert_eq!(controller.window(), Window::clamped(700, 1000, TOTAL));
    pane.render(&controller);
    assert_eq!(controller.complete(jump, &mut pane), Completion::Applied);
    assert_eq!(pane.top_position(), Some((900, 0)));

    assert_eq!(controller.jump_to_index(TOTAL, &pane), None);
}

// --- Invariants ---

#[test]
fn window_invariant_holds_across_scripted_session() {
    let (mut controller, mut pane) = settled();
    let config = *controller.config();
    let mut seed: u64 = 0x2545_f491;
    for _ in 0..300 {
        seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        let pick = (seed >> 33) % 6;
        let next = match pick {
            0 => {
                pane.scroll_to(0);
                controller.on_proximity(&pane)
            }
            1 => {
                let bottom = pane.metrics.max_scroll_top();
                pane.scroll_to(bottom);
                controller.on_proximity(&pane)
            }
            2 => controller.request(LoadIntent::ResetToHead, &pane),
            3 => controller.request(LoadIntent::ResetToTail, &pane),
            _ => {
                let index = usize::try_from((seed >> 17) % 1100).expect("small");
                controller.jump_to_index(index, &pane)
            }
        };

        let window = controller.window();
        assert!(window.start() <= window.end());
        assert!(window.end() <= TOTAL);
        assert!(window.len() <= config.max_window());

        if let Some(cont) = next {
            pane.render(&controller);
            let done = controller.complete(cont, &mut pane);
            assert_ne!(done, Completion::Stale);
        }
        assert_eq!(controller.phase(), CyclePhase::Idle);
    }
}
