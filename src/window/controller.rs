// msgview - A terminal viewer for very large chat-message archives
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::sync::Arc;

use super::anchor::{ScrollAnchor, Viewport};
use super::config::WindowConfig;
use super::policy::{self, LoadIntent};
use super::range::Window;
use super::trigger::ProximityTrigger;

/// Identity of the source a continuation was issued against. Bumped on every
/// [`WindowController::replace_source`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SourceGeneration(u64);

impl SourceGeneration {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Where a load cycle currently is.
///
/// `Idle -> Triggered -> MutationApplied -> AnchorCaptured? -> Rendered ->
/// Compensated -> Idle`. Between a mutation and its post-render completion
/// the controller rests in `MutationApplied` or `AnchorCaptured`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Idle,
    Triggered,
    MutationApplied,
    AnchorCaptured,
    Rendered,
    Compensated,
}

/// Scroll adjustment to perform once the new window has been laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAction {
    /// Keep the previously visible rows in place.
    Compensate(ScrollAnchor),
    ToTop,
    ToBottom,
    /// Rows were only appended below; nothing to move.
    Release,
    /// Bring `target` to the top of the viewport, or restore `previous` if
    /// it is not rendered.
    Locate { target: usize, previous: Window, previous_scroll_top: usize },
    Restore { scroll_top: usize },
}

/// Deferred post-render step of a load cycle.
///
/// The host keeps it until the viewport reflects the new window, then hands
/// it back through [`WindowController::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a continuation must be completed after the next render"]
pub struct Continuation {
    generation: SourceGeneration,
    cycle: u64,
    action: ScrollAction,
}

impl Continuation {
    #[must_use]
    pub fn generation(&self) -> SourceGeneration {
        self.generation
    }

    #[must_use]
    pub fn action(&self) -> &ScrollAction {
        &self.action
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// Issued for a superseded source or cycle; nothing was touched.
    Stale,
    /// The jump target was not rendered. The previous window is back in
    /// place and the returned continuation restores its scroll offset.
    Reverted(Continuation),
}

/// What the presentation layer renders.
#[derive(Debug, Clone, Copy)]
pub struct WindowView<'a, M> {
    pub visible: &'a [M],
    pub has_older: bool,
    pub has_newer: bool,
    pub window_start: usize,
    pub total_count: usize,
}

impl<M> WindowView<'_, M> {
    #[must_use]
    pub fn older_count(&self) -> usize {
        self.window_start
    }

    #[must_use]
    pub fn newer_count(&self) -> usize {
        self.total_count.saturating_sub(self.window_start + self.visible.len())
    }

    /// Whether only part of the source is materialized.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.has_older || self.has_newer
    }
}

/// Owns the window over one ordered source and runs load cycles against a
/// [`Viewport`].
pub struct WindowController<M> {
    config: WindowConfig,
    trigger: ProximityTrigger,
    source: Arc<[M]>,
    generation: SourceGeneration,
    window: Window,
    phase: CyclePhase,
    cycle: u64,
}

impl<M> WindowController<M> {
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            trigger: ProximityTrigger::new(config.proximity_margin()),
            source: Arc::from(Vec::new()),
            generation: SourceGeneration::default(),
            window: Window::empty(),
            phase: CyclePhase::Idle,
            cycle: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    #[must_use]
    pub fn source(&self) -> &Arc<[M]> {
        &self.source
    }

    #[must_use]
    pub fn generation(&self) -> SourceGeneration {
        self.generation
    }

    #[must_use]
    pub fn window(&self) -> Window {
        self.window
    }

    #[must_use]
    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.phase != CyclePhase::Idle
    }

    #[must_use]
    pub fn snapshot(&self) -> WindowView<'_, M> {
        let total = self.source.len();
        WindowView {
            visible: self.source.get(self.window.range()).unwrap_or(&[]),
            has_older: self.window.has_older(),
            has_newer: self.window.has_newer(total),
            window_start: self.window.start(),
            total_count: total,
        }
    }

    /// Swap in a new source and show its most recent records.
    ///
    /// Any in-flight cycle is abandoned; continuations issued before this
    /// call complete as [`Completion::Stale`].
    pub fn replace_source(&mut self, source: Arc<[M]>) -> Continuation {
        if self.in_flight() {
            tracing::trace!(phase = ?self.phase, "abandoning in-flight cycle for new source");
        }
        self.generation = self.generation.next();
        self.phase = CyclePhase::Idle;
        self.source = source;

        self.set_phase(CyclePhase::Triggered);
        let total = self.source.len();
        self.window = policy::apply(Window::empty(), LoadIntent::ResetToTail, total, &self.config);
        tracing::debug!(
            generation = self.generation.get(),
            window = %self.window,
            total,
            "source replaced"
        );
        self.set_phase(CyclePhase::MutationApplied);
        self.issue(ScrollAction::ToBottom)
    }

    /// Proximity callback. Runs an extension when the viewport is near an
    /// edge and no cycle is in flight.
    pub fn on_proximity(&mut self, viewport: &dyn Viewport) -> Option<Continuation> {
        if self.in_flight() {
            tracing::trace!(phase = ?self.phase, "proximity suppressed while in flight");
            return None;
        }
        let intent = self.trigger.evaluate(&viewport.metrics(), self.window, self.source.len())?;
        self.run(intent, viewport)
    }

    /// Run an explicit intent. Ignored while another cycle is in flight.
    pub fn request(&mut self, intent: LoadIntent, viewport: &dyn Viewport) -> Option<Continuation> {
        if self.in_flight() {
            tracing::debug!(intent = intent.label(), phase = ?self.phase, "request suppressed");
            return None;
        }
        self.run(intent, viewport)
    }

    /// Center the window on `index` and scroll that record into view.
    /// Out-of-range indices are ignored.
    pub fn jump_to_index(&mut self, index: usize, viewport: &dyn Viewport) -> Option<Continuation> {
        self.request(LoadIntent::JumpToIndex(index), viewport)
    }

    /// Abandon the in-flight cycle without touching the scroll offset. Its
    /// continuation completes as [`Completion::Stale`].
    pub fn cancel(&mut self) {
        self.cycle = self.cycle.wrapping_add(1);
        self.phase = CyclePhase::Idle;
    }

    /// Post-render step: apply the scroll adjustment of `continuation` now
    /// that `viewport` reflects the current window.
    pub fn complete(&mut self, continuation: Continuation, viewport: &mut dyn Viewport) -> Completion {
        if continuation.generation != self.generation
            || continuation.cycle != self.cycle
            || !self.in_flight()
        {
            tracing::trace!(
                issued = continuation.generation.get(),
                current = self.generation.get(),
                "stale continuation ignored"
            );
            return Completion::Stale;
        }

        self.set_phase(CyclePhase::Rendered);
        match continuation.action {
            ScrollAction::Compensate(anchor) => {
                let scroll_top = anchor.compensated(viewport);
                viewport.scroll_to(scroll_top);
            }
            ScrollAction::ToTop => viewport.scroll_to(0),
            ScrollAction::ToBottom => {
                let bottom = viewport.metrics().scroll_height;
                viewport.scroll_to(bottom);
            }
            ScrollAction::Release => {}
            ScrollAction::Restore { scroll_top } => viewport.scroll_to(scroll_top),
            ScrollAction::Locate { target, previous, previous_scroll_top } => {
                if let Some(row) = viewport.locate_record(target) {
                    viewport.scroll_to(row);
                } else {
                    tracing::debug!(index = target, restored = %previous, "jump target not rendered");
                    self.window = previous.clamp_to(self.source.len());
                    self.set_phase(CyclePhase::MutationApplied);
                    let next = self.issue(ScrollAction::Restore { scroll_top: previous_scroll_top });
                    return Completion::Reverted(next);
                }
            }
        }
        self.set_phase(CyclePhase::Compensated);
        self.set_phase(CyclePhase::Idle);
        Completion::Applied
    }

    fn run(&mut self, intent: LoadIntent, viewport: &dyn Viewport) -> Option<Continuation> {
        let total = self.source.len();
        if let LoadIntent::JumpToIndex(index) = intent
            && index >= total
        {
            tracing::debug!(index, total, "jump target out of range");
            return None;
        }

        let before = self.window;
        let after = policy::apply(before, intent, total, &self.config);
        if after == before && matches!(intent, LoadIntent::ExtendOlder | LoadIntent::ExtendNewer) {
            return None;
        }

        self.set_phase(CyclePhase::Triggered);
        let scroll_top = viewport.metrics().scroll_top;
        self.window = after;
        self.set_phase(CyclePhase::MutationApplied);
        tracing::debug!(intent = intent.label(), from = %before, to = %after, total, "window mutated");

        let action = match intent {
            LoadIntent::ExtendOlder | LoadIntent::ExtendNewer => {
                if policy::shifts_content_above(intent, before, after) {
                    // The viewport still shows `before`; its geometry is the
                    // pre-mutation measurement.
                    let pin = pin_record(viewport, before, after);
                    let anchor = ScrollAnchor::capture(viewport, pin);
                    self.set_phase(CyclePhase::AnchorCaptured);
                    ScrollAction::Compensate(anchor)
                } else {
                    ScrollAction::Release
                }
            }
            LoadIntent::ResetToTail => ScrollAction::ToBottom,
            LoadIntent::ResetToHead => ScrollAction::ToTop,
            LoadIntent::JumpToIndex(target) => {
                ScrollAction::Locate { target, previous: before, previous_scroll_top: scroll_top }
            }
        };
        Some(self.issue(action))
    }

    fn issue(&mut self, action: ScrollAction) -> Continuation {
        self.cycle = self.cycle.wrapping_add(1);
        Continuation { generation: self.generation, cycle: self.cycle, action }
    }

    fn set_phase(&mut self, phase: CyclePhase) {
        tracing::trace!(from = ?self.phase, to = ?phase, "cycle phase");
        self.phase = phase;
    }
}

/// Record to hold in place across `before -> after`: the one at the top of
/// the viewport, moved into the part of the overlap that renders the same in
/// both windows.
fn pin_record(viewport: &dyn Viewport, before: Window, after: Window) -> Option<usize> {
    let settled = before.settled_overlap(&after)?;
    let top = viewport.top_record().unwrap_or(settled.start());
    Some(top.clamp(settled.start(), settled.end() - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::trigger::ViewportMetrics;
    use pretty_assertions::assert_eq;

    /// One row per record, every record rendered.
    struct Flat {
        window: Window,
        metrics: ViewportMetrics,
    }

    impl Flat {
        fn new(client_height: usize) -> Self {
            Self {
                window: Window::empty(),
                metrics: ViewportMetrics { client_height, ..ViewportMetrics::default() },
            }
        }

        fn render(&mut self, controller: &WindowController<u32>) {
            self.window = controller.window();
            self.metrics.scroll_height = self.window.len();
            self.metrics.scroll_top = self.metrics.scroll_top.min(self.metrics.max_scroll_top());
        }
    }

    impl Viewport for Flat {
        fn metrics(&self) -> ViewportMetrics {
            self.metrics
        }

        fn locate_record(&self, index: usize) -> Option<usize> {
            self.window.contains(index).then(|| index - self.window.start())
        }

        fn top_record(&self) -> Option<usize> {
            let index = self.window.start() + self.metrics.scroll_top;
            self.window.contains(index).then_some(index)
        }

        fn scroll_to(&mut self, scroll_top: usize) {
            self.metrics.scroll_top = scroll_top.min(self.metrics.max_scroll_top());
        }
    }

    fn controller(total: u32) -> WindowController<u32> {
        let config = WindowConfig::new(40, 15, 2).expect("valid config");
        let mut controller = WindowController::new(config);
        let _ = controller.replace_source((0..total).collect::<Vec<_>>().into());
        controller
    }

    #[test]
    fn replace_source_starts_at_tail_cycle() {
        let c = controller(100);
        assert_eq!((c.window().start(), c.window().end()), (60, 100));
        assert_eq!(c.phase(), CyclePhase::MutationApplied);
        assert!(c.in_flight());
    }

    #[test]
    fn reset_cycle_scrolls_to_bottom_and_goes_idle() {
        let config = WindowConfig::new(40, 15, 2).expect("valid config");
        let mut c = WindowController::new(config);
        let mut pane = Flat::new(10);
        let cont = c.replace_source((0..100).collect::<Vec<u32>>().into());
        pane.render(&c);

        assert_eq!(c.complete(cont, &mut pane), Completion::Applied);
        assert_eq!(c.phase(), CyclePhase::Idle);
        assert_eq!(pane.metrics.scroll_top, 30);
    }

    #[test]
    fn snapshot_reports_boundaries() {
        let c = controller(100);
        let view = c.snapshot();
        assert_eq!(view.visible.first(), Some(&60));
        assert_eq!(view.visible.len(), 40);
        assert!(view.has_older);
        assert!(!view.has_newer);
        assert_eq!(view.older_count(), 60);
        assert_eq!(view.newer_count(), 0);
        assert!(view.is_partial());
    }

    #[test]
    fn completing_twice_is_stale() {
        let config = WindowConfig::new(40, 15, 2).expect("valid config");
        let mut c = WindowController::new(config);
        let mut pane = Flat::new(10);
        let cont = c.replace_source((0..100).collect::<Vec<u32>>().into());
        pane.render(&c);
        assert_eq!(c.complete(cont, &mut pane), Completion::Applied);
        assert_eq!(c.complete(cont, &mut pane), Completion::Stale);
    }

    #[test]
    fn boundary_extension_starts_no_cycle() {
        let config = WindowConfig::new(40, 15, 2).expect("valid config");
        let mut c = WindowController::new(config);
        let mut pane = Flat::new(10);
        let cont = c.replace_source((0..100).collect::<Vec<u32>>().into());
        pane.render(&c);
        let _ = c.complete(cont, &mut pane);

        assert_eq!(c.request(LoadIntent::ExtendNewer, &pane), None);
        assert_eq!(c.phase(), CyclePhase::Idle);
    }

    #[test]
    fn extension_pins_top_record_with_a_kept_predecessor() {
        let config = WindowConfig::new(40, 15, 2).expect("valid config");
        let mut c = WindowController::new(config);
        let mut pane = Flat::new(10);
        let cont = c.replace_source((0..100).collect::<Vec<u32>>().into());
        pane.render(&c);
        let _ = c.complete(cont, &mut pane);

        // Record 60 opens the old window; its neighbour above arrives with
        // the extension, so 61 is held instead.
        pane.scroll_to(0);
        let cont = c.on_proximity(&pane).expect("near top");
        let pinned = match *cont.action() {
            ScrollAction::Compensate(anchor) => anchor.pinned,
            _ => None,
        };
        assert_eq!(pinned.map(|pin| pin.record), Some(61));

        pane.render(&c);
        assert_eq!(c.complete(cont, &mut pane), Completion::Applied);
        assert_eq!(pane.top_record(), Some(60));
    }

    #[test]
    fn cancel_invalidates_outstanding_continuation() {
        let mut c = controller(100);
        let mut pane = Flat::new(10);
        pane.render(&c);
        c.cancel();
        assert_eq!(c.phase(), CyclePhase::Idle);

        let cont = c.request(LoadIntent::ResetToHead, &pane).expect("idle after cancel");
        c.cancel();
        assert_eq!(c.complete(cont, &mut pane), Completion::Stale);
    }

    #[test]
    fn empty_source_is_harmless() {
        let config = WindowConfig::default();
        let mut c: WindowController<u32> = WindowController::new(config);
        let mut pane = Flat::new(10);
        let cont = c.replace_source(Vec::new().into());
        pane.render(&c);
        assert_eq!(c.complete(cont, &mut pane), Completion::Applied);
        assert!(c.snapshot().visible.is_empty());
        assert_eq!(c.jump_to_index(0, &pane), None);
        assert_eq!(c.on_proximity(&pane), None);
    }
}
