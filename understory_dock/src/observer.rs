// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle and progress notifications sent to the host.
//!
//! Hosts implement [`DockObserver`] and override only the notifications they
//! care about; every method has an empty default. Closures taking a
//! [`DockEvent`] implement the trait too, and [`EventRecorder`] collects
//! events for later inspection.
//!
//! ```
//! use understory_dock::{DockEvent, DockObserver, PanelState};
//!
//! let mut seen = Vec::new();
//! let mut observer = |event: DockEvent| seen.push(event);
//! observer.view_state_changed(PanelState::TransitioningUp, PanelState::Expanded);
//! assert_eq!(
//!     seen,
//!     [DockEvent::StateChanged {
//!         from: PanelState::TransitioningUp,
//!         to: PanelState::Expanded
//!     }]
//! );
//! ```

use alloc::vec::Vec;

use crate::state::PanelState;

/// A single notification, as delivered to closure observers and
/// [`EventRecorder`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DockEvent {
    /// See [`DockObserver::view_is_going_to_appear`].
    IsGoingToAppear {
        /// State before presenting.
        from: PanelState,
        /// State being presented.
        to: PanelState,
    },
    /// See [`DockObserver::view_appeared`].
    Appeared {
        /// State before presenting.
        from: PanelState,
        /// State presented.
        to: PanelState,
    },
    /// See [`DockObserver::view_will_start_transition`].
    WillStartTransition {
        /// State the transition starts from.
        current: PanelState,
        /// State being entered.
        to: PanelState,
    },
    /// See [`DockObserver::view_state_will_change_to`].
    StateWillChange {
        /// Current state.
        from: PanelState,
        /// State about to be reached.
        to: PanelState,
    },
    /// See [`DockObserver::view_state_changed`].
    StateChanged {
        /// Previous state.
        from: PanelState,
        /// New state.
        to: PanelState,
    },
    /// See [`DockObserver::view_going_to_disappear`].
    GoingToDisappear(PanelState),
    /// See [`DockObserver::view_disappeared`].
    Disappeared(PanelState),
    /// See [`DockObserver::progress_changed`].
    ProgressChanged(f64),
    /// See [`DockObserver::dismiss_progress_changed`].
    DismissProgressChanged(f64),
}

/// Receives lifecycle and progress notifications from a
/// [`DockDirector`](crate::DockDirector).
///
/// Notifications are delivered synchronously, on the thread that fed the
/// triggering input, before the triggering call returns.
pub trait DockObserver {
    /// The panel is about to be presented from a state other than docked.
    fn view_is_going_to_appear(&mut self, from: PanelState, to: PanelState) {
        let _ = (from, to);
    }

    /// The panel was presented from a state other than docked.
    fn view_appeared(&mut self, from: PanelState, to: PanelState) {
        let _ = (from, to);
    }

    /// A transition is starting, either from a drag crossing its threshold
    /// or from a programmatic state change.
    fn view_will_start_transition(&mut self, current: PanelState, to: PanelState) {
        let _ = (current, to);
    }

    /// The state is about to change; the host typically starts its
    /// animation here.
    fn view_state_will_change_to(&mut self, from: PanelState, to: PanelState) {
        let _ = (from, to);
    }

    /// The state has changed.
    fn view_state_changed(&mut self, from: PanelState, to: PanelState) {
        let _ = (from, to);
    }

    /// The panel is about to be dismissed.
    fn view_going_to_disappear(&mut self, state: PanelState) {
        let _ = state;
    }

    /// The panel has been dismissed; hosts usually tear down their view here.
    fn view_disappeared(&mut self, state: PanelState) {
        let _ = state;
    }

    /// Vertical progress: `0` docked, `1` expanded.
    fn progress_changed(&mut self, scale: f64) {
        let _ = scale;
    }

    /// Swipe progress: `0` dismissed, `1` docked.
    fn dismiss_progress_changed(&mut self, scale: f64) {
        let _ = scale;
    }
}

/// Observer that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl DockObserver for NoopObserver {}

impl<F> DockObserver for F
where
    F: FnMut(DockEvent),
{
    fn view_is_going_to_appear(&mut self, from: PanelState, to: PanelState) {
        self(DockEvent::IsGoingToAppear { from, to });
    }

    fn view_appeared(&mut self, from: PanelState, to: PanelState) {
        self(DockEvent::Appeared { from, to });
    }

    fn view_will_start_transition(&mut self, current: PanelState, to: PanelState) {
        self(DockEvent::WillStartTransition { current, to });
    }

    fn view_state_will_change_to(&mut self, from: PanelState, to: PanelState) {
        self(DockEvent::StateWillChange { from, to });
    }

    fn view_state_changed(&mut self, from: PanelState, to: PanelState) {
        self(DockEvent::StateChanged { from, to });
    }

    fn view_going_to_disappear(&mut self, state: PanelState) {
        self(DockEvent::GoingToDisappear(state));
    }

    fn view_disappeared(&mut self, state: PanelState) {
        self(DockEvent::Disappeared(state));
    }

    fn progress_changed(&mut self, scale: f64) {
        self(DockEvent::ProgressChanged(scale));
    }

    fn dismiss_progress_changed(&mut self, scale: f64) {
        self(DockEvent::DismissProgressChanged(scale));
    }
}

/// Records every notification in order.
#[derive(Clone, Debug, Default)]
pub struct EventRecorder {
    events: Vec<DockEvent>,
}

impl EventRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Events recorded so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[DockEvent] {
        &self.events
    }

    /// Removes and returns all recorded events.
    pub fn take(&mut self) -> Vec<DockEvent> {
        core::mem::take(&mut self.events)
    }

    /// Lifecycle events only, skipping progress updates.
    pub fn lifecycle(&self) -> impl Iterator<Item = &DockEvent> + '_ {
        self.events.iter().filter(|e| {
            !matches!(
                e,
                DockEvent::ProgressChanged(_) | DockEvent::DismissProgressChanged(_)
            )
        })
    }

    fn push(&mut self, event: DockEvent) {
        self.events.push(event);
    }
}

impl DockObserver for EventRecorder {
    fn view_is_going_to_appear(&mut self, from: PanelState, to: PanelState) {
        self.push(DockEvent::IsGoingToAppear { from, to });
    }

    fn view_appeared(&mut self, from: PanelState, to: PanelState) {
        self.push(DockEvent::Appeared { from, to });
    }

    fn view_will_start_transition(&mut self, current: PanelState, to: PanelState) {
        self.push(DockEvent::WillStartTransition { current, to });
    }

    fn view_state_will_change_to(&mut self, from: PanelState, to: PanelState) {
        self.push(DockEvent::StateWillChange { from, to });
    }

    fn view_state_changed(&mut self, from: PanelState, to: PanelState) {
        self.push(DockEvent::StateChanged { from, to });
    }

    fn view_going_to_disappear(&mut self, state: PanelState) {
        self.push(DockEvent::GoingToDisappear(state));
    }

    fn view_disappeared(&mut self, state: PanelState) {
        self.push(DockEvent::Disappeared(state));
    }

    fn progress_changed(&mut self, scale: f64) {
        self.push(DockEvent::ProgressChanged(scale));
    }

    fn dismiss_progress_changed(&mut self, scale: f64) {
        self.push(DockEvent::DismissProgressChanged(scale));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_keeps_order_and_take_drains() {
        let mut recorder = EventRecorder::new();
        recorder.view_will_start_transition(PanelState::Docked, PanelState::TransitioningUp);
        recorder.progress_changed(0.5);
        recorder.view_state_changed(PanelState::TransitioningUp, PanelState::Expanded);

        assert_eq!(recorder.events().len(), 3);
        assert_eq!(recorder.lifecycle().count(), 2);

        let drained = recorder.take();
        assert_eq!(drained[1], DockEvent::ProgressChanged(0.5));
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn noop_observer_accepts_everything() {
        let mut observer = NoopObserver;
        observer.view_disappeared(PanelState::Dismissed);
        observer.dismiss_progress_changed(0.0);
    }

    #[test]
    fn closures_receive_events() {
        let mut count = 0;
        {
            let mut observer = |_: DockEvent| count += 1;
            observer.view_going_to_disappear(PanelState::Dismissed);
            observer.view_disappeared(PanelState::Dismissed);
        }
        assert_eq!(count, 2);
    }
}
