// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition director: the host-facing surface of a docking panel.
//!
//! The director owns a [`DockStateMachine`] and a [`DockObserver`]. Hosts
//! forward pointer input and issue commands; the director returns geometry to
//! render and calls the observer in a fixed order:
//!
//! - drag crossing its threshold: `view_will_start_transition`;
//! - live update: `progress_changed` or `dismiss_progress_changed`;
//! - release: progress, `view_state_will_change_to`,
//!   `view_going_to_disappear` (dismissals only), `view_state_changed`,
//!   `view_disappeared` (dismissals only);
//! - programmatic change: `view_will_start_transition`,
//!   `view_state_will_change_to`, progress, `view_state_changed`.
//!
//! Everything happens synchronously inside the triggering call. Animating to
//! the returned [`Settle`] is the host's job.
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Point, Size};
//! use understory_dock::{DockConfig, DockDirector, EventRecorder, PanelState};
//!
//! let mut panel = DockDirector::new(
//!     DockConfig::default(),
//!     Size::new(400.0, 800.0),
//!     EventRecorder::new(),
//! )
//! .unwrap();
//!
//! panel.present(true);
//! assert_eq!(panel.state(), PanelState::Expanded);
//!
//! panel.change_state_to(PanelState::Docked, Duration::from_millis(300)).unwrap();
//! assert_eq!(panel.state(), PanelState::Docked);
//!
//! // Changing to the current state is refused.
//! assert!(panel.change_state_to(PanelState::Docked, Duration::ZERO).is_err());
//! ```

use core::fmt;
use core::time::Duration;

use kurbo::{Point, Size};

use crate::config::{ConfigError, DockConfig};
use crate::geometry::{DockLayout, Geometry};
use crate::machine::{DockStateMachine, Press, Release, Settled};
use crate::observer::DockObserver;
use crate::session::{PointerEvent, PointerPhase, PointerSample};
use crate::state::{Axis, PanelState, SwipeDirection};

/// Animation duration presets for [`DockDirector::change_state_to`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationTime {
    /// 0.3 seconds, for a back button docking the panel.
    BackButtonTapped,
    /// 0.4 seconds.
    Present,
}

impl From<AnimationTime> for Duration {
    fn from(time: AnimationTime) -> Self {
        match time {
            AnimationTime::BackButtonTapped => Self::from_millis(300),
            AnimationTime::Present => Self::from_millis(400),
        }
    }
}

const PRESENT_DURATION: Duration = Duration::from_millis(500);
const VERTICAL_RELEASE_DURATION: Duration = Duration::from_millis(300);
const SWIPE_RELEASE_DURATION: Duration = Duration::from_millis(200);
const SWIPE_DISMISS_DURATION: Duration = Duration::from_millis(500);

/// A stable target for the host to animate to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settle {
    /// State reached.
    pub state: PanelState,
    /// Final geometry.
    pub geometry: Geometry,
    /// Suggested animation duration; zero means apply immediately.
    pub duration: Duration,
}

/// Error returned when a programmatic transition is refused.
///
/// A refused request never changes state or notifies the observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionError {
    /// No host surface is attached.
    NotAttached,
    /// Only `Docked` to `Expanded` and `Expanded` to `Docked` are supported.
    Unsupported {
        /// Current state.
        from: PanelState,
        /// Requested state.
        to: PanelState,
    },
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAttached => f.write_str("no host surface is attached"),
            Self::Unsupported { from, to } => {
                write!(f, "cannot change state from {from:?} to {to:?}")
            }
        }
    }
}

impl core::error::Error for TransitionError {}

/// Host-facing controller for one docking panel.
#[derive(Debug)]
pub struct DockDirector<O> {
    machine: DockStateMachine,
    observer: O,
    attached: bool,
}

impl<O: DockObserver> DockDirector<O> {
    /// Creates a director for a container of the given size.
    ///
    /// The panel starts [`PanelState::Dismissed`] and attached.
    pub fn new(config: DockConfig, container: Size, observer: O) -> Result<Self, ConfigError> {
        let layout = DockLayout::new(config, container)?;
        Ok(Self {
            machine: DockStateMachine::new(layout),
            observer,
            attached: true,
        })
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> PanelState {
        self.machine.state()
    }

    /// The geometry most recently produced.
    #[must_use]
    pub fn geometry(&self) -> Geometry {
        self.machine.geometry()
    }

    /// The layout in use.
    #[must_use]
    pub fn layout(&self) -> &DockLayout {
        self.machine.layout()
    }

    /// The underlying state machine.
    #[must_use]
    pub fn machine(&self) -> &DockStateMachine {
        &self.machine
    }

    /// The observer.
    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The observer, mutably.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Consumes the director and returns its observer.
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Whether a host surface is attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Marks a host surface as attached.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Detaches the host surface, cancelling any live gesture first.
    ///
    /// While detached, commands are refused and pointer input is ignored.
    pub fn detach(&mut self) -> Option<Settle> {
        let settle = self.cancel();
        self.attached = false;
        settle
    }

    /// Rebuilds the layout for a new container size.
    ///
    /// A live gesture is cancelled. On error the old layout is kept.
    pub fn set_container(&mut self, container: Size) -> Result<Option<Settle>, ConfigError> {
        let layout = DockLayout::new(*self.layout().config(), container)?;
        let settled = self.machine.set_layout(layout);
        Ok(settled.map(|settled| self.notify_settled(settled)))
    }

    /// Presents the panel expanded from any state.
    ///
    /// Returns `None` without notifying if no host surface is attached.
    pub fn present(&mut self, animated: bool) -> Option<Settle> {
        if !self.attached {
            return None;
        }
        let from = self.state();
        let to = PanelState::Expanded;
        #[cfg(feature = "tracing")]
        tracing::debug!(?from, animated, "presenting docking panel");

        if from == PanelState::Docked {
            self.observer.view_state_will_change_to(from, to);
        } else {
            self.observer.view_is_going_to_appear(from, to);
        }
        let geometry = self.machine.force_state(to);
        self.observer.progress_changed(geometry.scale);
        if from == PanelState::Docked {
            self.observer.view_state_changed(from, to);
        } else {
            self.observer.view_appeared(from, to);
        }
        Some(Settle {
            state: to,
            geometry,
            duration: if animated {
                PRESENT_DURATION
            } else {
                Duration::ZERO
            },
        })
    }

    /// Programmatically docks an expanded panel or expands a docked one.
    ///
    /// Any other request, including one for the current state, is refused
    /// without changing state or notifying.
    pub fn change_state_to(
        &mut self,
        to: PanelState,
        duration: impl Into<Duration>,
    ) -> Result<Settle, TransitionError> {
        if !self.attached {
            return Err(TransitionError::NotAttached);
        }
        let from = self.state();
        if !matches!(
            (from, to),
            (PanelState::Expanded, PanelState::Docked) | (PanelState::Docked, PanelState::Expanded)
        ) {
            #[cfg(feature = "tracing")]
            tracing::debug!(?from, ?to, "refusing programmatic state change");
            return Err(TransitionError::Unsupported { from, to });
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?from, ?to, "programmatic state change");

        self.observer.view_will_start_transition(from, to);
        self.observer.view_state_will_change_to(from, to);
        let geometry = self.machine.force_state(to);
        self.observer.progress_changed(geometry.scale);
        self.observer.view_state_changed(from, to);
        Ok(Settle {
            state: to,
            geometry,
            duration: duration.into(),
        })
    }

    /// Expands a docked panel when it is tapped. Taps in other states are
    /// ignored.
    pub fn on_tap(&mut self) -> Option<Settle> {
        if self.state() == PanelState::Docked {
            self.present(true)
        } else {
            None
        }
    }

    /// Dismisses a docked panel with a discrete swipe gesture.
    ///
    /// This is the recognizer path, separate from drag-driven swipes.
    pub fn on_swipe(&mut self, direction: SwipeDirection) -> Option<Settle> {
        if !self.attached || self.state() != PanelState::Docked {
            return None;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?direction, "swipe dismissed docking panel");

        self.observer.view_going_to_disappear(PanelState::Dismissed);
        let geometry = self.machine.force_dismissed(direction);
        self.observer.dismiss_progress_changed(0.0);
        self.observer.view_disappeared(PanelState::Dismissed);
        Some(Settle {
            state: PanelState::Dismissed,
            geometry,
            duration: SWIPE_DISMISS_DURATION,
        })
    }

    /// Routes a tagged pointer event to the matching handler.
    pub fn on_pointer(&mut self, event: PointerEvent) -> Option<Geometry> {
        let PointerSample { position, time } = event.sample;
        match event.phase {
            PointerPhase::Began => self.on_pointer_down(position, time),
            PointerPhase::Moved => self.on_pointer_move(position, time),
            PointerPhase::Ended => self.on_pointer_up(position, time).map(|s| s.geometry),
        }
    }

    /// Handles a press.
    ///
    /// Returns geometry only when the press settled a panel that was not
    /// resting in a draggable state.
    pub fn on_pointer_down(&mut self, position: Point, time: Duration) -> Option<Geometry> {
        if !self.accepts_pointer_input() {
            return None;
        }
        match self.machine.pointer_down(PointerSample::new(position, time)) {
            Press::Started | Press::Ignored => None,
            Press::Settled(settled) => Some(self.notify_settled(settled).geometry),
        }
    }

    /// Handles a drag sample, returning geometry when the host should
    /// re-render.
    pub fn on_pointer_move(&mut self, position: Point, time: Duration) -> Option<Geometry> {
        if !self.accepts_pointer_input() {
            return None;
        }
        let step = self.machine.pointer_move(PointerSample::new(position, time));
        if let Some((current, to)) = step.transition {
            #[cfg(feature = "tracing")]
            tracing::debug!(?current, ?to, "gesture transition started");
            self.observer.view_will_start_transition(current, to);
        }
        let geometry = step.geometry?;
        self.notify_progress(geometry);
        Some(geometry)
    }

    /// Handles a release, committing a live gesture to a stable state.
    pub fn on_pointer_up(&mut self, position: Point, time: Duration) -> Option<Settle> {
        if !self.accepts_pointer_input() {
            return None;
        }
        let Release {
            from,
            to,
            resolution: _resolution,
            geometry,
        } = self.machine.pointer_up(PointerSample::new(position, time))?;
        #[cfg(feature = "tracing")]
        tracing::debug!(?from, ?to, reason = ?_resolution.reason, "gesture committed");

        self.notify_progress(geometry);
        self.observer.view_state_will_change_to(from, to);
        if to == PanelState::Dismissed {
            self.observer.view_going_to_disappear(to);
        }
        self.observer.view_state_changed(from, to);
        if to == PanelState::Dismissed {
            self.observer.view_disappeared(to);
        }
        let duration = match geometry.axis {
            Axis::Vertical => VERTICAL_RELEASE_DURATION,
            Axis::Horizontal(_) => SWIPE_RELEASE_DURATION,
        };
        Some(Settle {
            state: to,
            geometry,
            duration,
        })
    }

    /// Abandons the open gesture without applying the release rules.
    ///
    /// A live panel snaps to the nearer of docked and expanded.
    pub fn cancel(&mut self) -> Option<Settle> {
        let settled = self.machine.cancel()?;
        Some(self.notify_settled(settled))
    }

    /// Cancels a gesture whose last sample is older than the configured
    /// [`stale_session_timeout`](DockConfig::stale_session_timeout).
    ///
    /// Hosts that want a watchdog call this periodically with the current
    /// time; it does nothing when the timeout is unset.
    pub fn expire_stale_session(&mut self, now: Duration) -> Option<Settle> {
        let settled = self.machine.expire_stale_session(now)?;
        #[cfg(feature = "tracing")]
        tracing::warn!(from = ?settled.from, "expired stale gesture session");
        Some(self.notify_settled(settled))
    }

    fn accepts_pointer_input(&self) -> bool {
        let accepts = self.attached && self.layout().config().is_docking_allowed;
        #[cfg(feature = "tracing")]
        if !accepts {
            tracing::trace!("ignoring pointer input");
        }
        accepts
    }

    fn notify_progress(&mut self, geometry: Geometry) {
        match geometry.axis {
            Axis::Vertical => self.observer.progress_changed(geometry.scale),
            Axis::Horizontal(_) => self.observer.dismiss_progress_changed(1.0 - geometry.scale),
        }
    }

    fn notify_settled(&mut self, settled: Settled) -> Settle {
        let Settled { from, to, geometry } = settled;
        #[cfg(feature = "tracing")]
        tracing::debug!(?from, ?to, "docking panel settled");
        self.observer.progress_changed(geometry.scale);
        if from != to {
            self.observer.view_state_will_change_to(from, to);
            self.observer.view_state_changed(from, to);
        }
        Settle {
            state: to,
            geometry,
            duration: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::observer::{DockEvent, EventRecorder};

    fn director() -> DockDirector<EventRecorder> {
        DockDirector::new(
            DockConfig::default(),
            Size::new(400.0, 800.0),
            EventRecorder::new(),
        )
        .unwrap()
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn present_from_dismissed_fires_appear_pair() {
        let mut d = director();
        let settle = d.present(true).unwrap();
        assert_eq!(settle.state, PanelState::Expanded);
        assert_eq!(settle.duration, PRESENT_DURATION);
        assert_eq!(
            d.observer().events(),
            [
                DockEvent::IsGoingToAppear {
                    from: PanelState::Dismissed,
                    to: PanelState::Expanded
                },
                DockEvent::ProgressChanged(1.0),
                DockEvent::Appeared {
                    from: PanelState::Dismissed,
                    to: PanelState::Expanded
                },
            ]
        );
    }

    #[test]
    fn present_from_docked_fires_state_change_pair() {
        let mut d = director();
        d.present(false);
        d.change_state_to(PanelState::Docked, AnimationTime::BackButtonTapped)
            .unwrap();
        d.observer_mut().take();

        let settle = d.present(false).unwrap();
        assert_eq!(settle.duration, Duration::ZERO);
        assert_eq!(
            d.observer().events(),
            [
                DockEvent::StateWillChange {
                    from: PanelState::Docked,
                    to: PanelState::Expanded
                },
                DockEvent::ProgressChanged(1.0),
                DockEvent::StateChanged {
                    from: PanelState::Docked,
                    to: PanelState::Expanded
                },
            ]
        );
    }

    #[test]
    fn present_requires_attached_host() {
        let mut d = director();
        d.detach();
        assert_eq!(d.present(true), None);
        assert!(d.observer().events().is_empty());
        assert_eq!(d.state(), PanelState::Dismissed);
    }

    #[test]
    fn change_state_to_fires_hooks_in_order() {
        let mut d = director();
        d.present(false);
        d.observer_mut().take();

        let settle = d
            .change_state_to(PanelState::Docked, AnimationTime::BackButtonTapped)
            .unwrap();
        assert_eq!(settle.duration, Duration::from_millis(300));
        assert_eq!(settle.geometry.rect, d.layout().docked_rect());
        assert_eq!(
            d.observer().events(),
            [
                DockEvent::WillStartTransition {
                    current: PanelState::Expanded,
                    to: PanelState::Docked
                },
                DockEvent::StateWillChange {
                    from: PanelState::Expanded,
                    to: PanelState::Docked
                },
                DockEvent::ProgressChanged(0.0),
                DockEvent::StateChanged {
                    from: PanelState::Expanded,
                    to: PanelState::Docked
                },
            ]
        );
    }

    #[test]
    fn change_state_to_current_state_is_refused_silently() {
        let mut d = director();
        d.present(false);
        d.observer_mut().take();

        let err = d
            .change_state_to(PanelState::Expanded, Duration::ZERO)
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::Unsupported {
                from: PanelState::Expanded,
                to: PanelState::Expanded
            }
        );
        assert!(d.observer().events().is_empty());
        assert_eq!(d.state(), PanelState::Expanded);
    }

    #[test]
    fn change_state_to_dismissed_is_unsupported() {
        let mut d = director();
        d.present(false);
        assert!(matches!(
            d.change_state_to(PanelState::Dismissed, Duration::ZERO),
            Err(TransitionError::Unsupported { .. })
        ));
    }

    #[test]
    fn change_state_to_while_detached_fails() {
        let mut d = director();
        d.present(false);
        d.detach();
        assert_eq!(
            d.change_state_to(PanelState::Docked, Duration::ZERO),
            Err(TransitionError::NotAttached)
        );
        d.attach();
        assert!(d.change_state_to(PanelState::Docked, Duration::ZERO).is_ok());
    }

    #[test]
    fn tap_only_expands_docked_panel() {
        let mut d = director();
        assert_eq!(d.on_tap(), None);
        d.present(false);
        assert_eq!(d.on_tap(), None);
        d.change_state_to(PanelState::Docked, Duration::ZERO).unwrap();
        d.observer_mut().take();

        let settle = d.on_tap().unwrap();
        assert_eq!(settle.state, PanelState::Expanded);
        assert!(
            !d.observer()
                .events()
                .iter()
                .any(|e| matches!(e, DockEvent::WillStartTransition { .. }))
        );
    }

    #[test]
    fn discrete_swipe_dismisses_docked_panel() {
        let mut d = director();
        d.present(false);
        d.change_state_to(PanelState::Docked, Duration::ZERO).unwrap();
        d.observer_mut().take();

        let settle = d.on_swipe(SwipeDirection::Left).unwrap();
        assert_eq!(settle.state, PanelState::Dismissed);
        assert_eq!(settle.geometry.rect.x1, 0.0);
        assert_eq!(
            d.observer_mut().take(),
            vec![
                DockEvent::GoingToDisappear(PanelState::Dismissed),
                DockEvent::DismissProgressChanged(0.0),
                DockEvent::Disappeared(PanelState::Dismissed),
            ]
        );
        assert_eq!(d.on_swipe(SwipeDirection::Right), None);
    }

    #[test]
    fn pointer_input_ignored_when_docking_disallowed() {
        let config = DockConfig::default().with_docking_allowed(false);
        let mut d = DockDirector::new(config, Size::new(400.0, 800.0), EventRecorder::new())
            .unwrap();
        d.present(false);
        d.observer_mut().take();

        assert_eq!(d.on_pointer_down(Point::new(200.0, 50.0), ms(0)), None);
        assert_eq!(d.on_pointer_move(Point::new(200.0, 400.0), ms(10)), None);
        assert_eq!(d.on_pointer_up(Point::new(200.0, 400.0), ms(20)), None);
        assert!(d.machine().session().is_none());
        assert!(d.observer().events().is_empty());
    }

    #[test]
    fn swipe_progress_reports_docked_as_one() {
        let mut d = director();
        d.present(false);
        d.change_state_to(PanelState::Docked, Duration::ZERO).unwrap();
        d.observer_mut().take();

        d.on_pointer_down(Point::new(300.0, 700.0), ms(0));
        d.on_pointer_move(Point::new(270.0, 700.0), ms(100));
        let geometry = d.on_pointer_move(Point::new(150.0, 700.0), ms(200)).unwrap();
        assert_eq!(geometry.scale, 0.5);
        assert_eq!(
            d.observer().events().last(),
            Some(&DockEvent::DismissProgressChanged(0.5))
        );

        // Slowly back to the press point: stays docked.
        d.on_pointer_move(Point::new(299.0, 700.0), ms(5_000));
        let settle = d.on_pointer_up(Point::new(299.0, 700.0), ms(10_000)).unwrap();
        assert_eq!(settle.state, PanelState::Docked);
        assert_eq!(settle.duration, SWIPE_RELEASE_DURATION);
        assert!(
            d.observer()
                .events()
                .contains(&DockEvent::DismissProgressChanged(1.0))
        );
    }

    #[test]
    fn on_pointer_dispatches_by_phase() {
        let mut d = director();
        d.present(false);
        assert_eq!(
            d.on_pointer(PointerEvent::began(Point::new(200.0, 50.0), ms(0))),
            None
        );
        assert_eq!(
            d.on_pointer(PointerEvent::moved(Point::new(200.0, 200.0), ms(10))),
            None
        );
        assert_eq!(d.state(), PanelState::TransitioningDown);
        let end = d
            .on_pointer(PointerEvent::ended(Point::new(200.0, 600.0), ms(20)))
            .unwrap();
        assert_eq!(end.rect, d.layout().docked_rect());
        assert_eq!(d.state(), PanelState::Docked);
    }

    #[test]
    fn set_container_rebuilds_layout() {
        let mut d = director();
        d.present(false);
        assert_eq!(d.set_container(Size::new(800.0, 600.0)), Ok(None));
        assert_eq!(d.geometry().rect, kurbo::Rect::new(0.0, 0.0, 800.0, 600.0));
        assert!(d.set_container(Size::new(-1.0, 600.0)).is_err());
        assert_eq!(d.layout().container(), Size::new(800.0, 600.0));
    }

    #[test]
    fn error_messages_are_descriptive() {
        use alloc::string::ToString;

        let err = TransitionError::Unsupported {
            from: PanelState::Docked,
            to: PanelState::Docked,
        };
        assert_eq!(
            err.to_string(),
            "cannot change state from Docked to Docked"
        );
        assert_eq!(
            TransitionError::NotAttached.to_string(),
            "no host surface is attached"
        );
    }
}
