// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The docking state machine: authoritative state, the open gesture session,
//! and the geometry last handed to the host.
//!
//! The machine never notifies anyone; it reports what happened through its
//! return values and leaves sequencing of notifications to
//! [`DockDirector`](crate::DockDirector).
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Point, Size};
//! use understory_dock::{DockConfig, DockLayout, DockStateMachine, PanelState, PointerSample};
//!
//! let layout = DockLayout::new(DockConfig::default(), Size::new(400.0, 800.0)).unwrap();
//! let mut machine = DockStateMachine::new(layout);
//! machine.force_state(PanelState::Docked);
//!
//! let t = |ms| Duration::from_millis(ms);
//! let start = layout.docked_rect().center();
//! machine.pointer_down(PointerSample::new(start, t(0)));
//! let step = machine.pointer_move(PointerSample::new(Point::new(start.x, start.y - 100.0), t(100)));
//! assert_eq!(step.transition, Some((PanelState::Docked, PanelState::TransitioningUp)));
//!
//! let release = machine.pointer_up(PointerSample::new(Point::new(start.x, start.y - 300.0), t(150))).unwrap();
//! assert_eq!(release.to, PanelState::Expanded);
//! assert_eq!(machine.state(), PanelState::Expanded);
//! ```

use kurbo::Point;

use crate::commit::{
    Resolution, minimum_pan_length, resolve_horizontal_commit, resolve_vertical_commit,
    swipe_scale, vertical_scale,
};
use crate::geometry::{DockLayout, Geometry};
use crate::session::{GestureSession, PointerSample};
use crate::state::{Axis, PanelState, SwipeDirection};

/// What a press did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Press {
    /// A session opened; later moves may drive a transition.
    Started,
    /// The press was outside the hot zone; no session is open.
    Ignored,
    /// The panel was not resting in a draggable state, so it snapped to the
    /// nearer of docked and expanded instead of opening a session.
    Settled(Settled),
}

/// A snap to a stable state outside the release rules.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settled {
    /// State before the snap.
    pub from: PanelState,
    /// Stable state reached.
    pub to: PanelState,
    /// Resting geometry of `to`.
    pub geometry: Geometry,
}

/// What a drag sample did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Step {
    /// Set when this sample moved the machine between states.
    pub transition: Option<(PanelState, PanelState)>,
    /// New geometry to render, if any.
    pub geometry: Option<Geometry>,
}

/// The outcome of releasing a live gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Release {
    /// The live state released from.
    pub from: PanelState,
    /// The stable state committed to.
    pub to: PanelState,
    /// How the release was decided.
    pub resolution: Resolution,
    /// Final geometry to animate to.
    pub geometry: Geometry,
}

/// Authoritative docking state plus the open gesture session.
#[derive(Clone, Debug)]
pub struct DockStateMachine {
    layout: DockLayout,
    state: PanelState,
    session: Option<GestureSession>,
    geometry: Geometry,
}

impl DockStateMachine {
    /// Creates a machine in [`PanelState::Dismissed`].
    ///
    /// The initial geometry is the expanded region, matching a host view
    /// that starts out filling its container.
    #[must_use]
    pub fn new(layout: DockLayout) -> Self {
        Self {
            layout,
            state: PanelState::Dismissed,
            session: None,
            geometry: expanded_geometry(&layout),
        }
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// The open gesture session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// The geometry most recently produced.
    #[must_use]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// The layout in use.
    #[must_use]
    pub fn layout(&self) -> &DockLayout {
        &self.layout
    }

    /// Handles a press.
    ///
    /// Any previous session is replaced. A press on a live or dismissed panel
    /// settles it instead of opening a session.
    pub fn pointer_down(&mut self, sample: PointerSample) -> Press {
        match self.state {
            PanelState::Expanded | PanelState::Docked => {
                if self.layout.is_in_hot_zone(self.state, sample.position) {
                    self.session = Some(GestureSession::begin(sample));
                    Press::Started
                } else {
                    self.session = None;
                    Press::Ignored
                }
            }
            _ => Press::Settled(self.settle()),
        }
    }

    /// Handles a drag sample.
    ///
    /// Without an open session this does nothing.
    pub fn pointer_move(&mut self, sample: PointerSample) -> Step {
        let Some(session) = self.session.as_mut() else {
            return Step::default();
        };
        session.touch(sample.time);
        let point = sample.position;

        match self.state {
            PanelState::TransitioningUp | PanelState::TransitioningDown => {
                if !session.should_consider_vertical_sample() {
                    return Step::default();
                }
                let session = *session;
                let scale = vertical_scale(&self.layout, self.state, &session, point);
                let geometry = self.layout.interpolate(scale, Axis::Vertical);
                self.geometry = geometry;
                Step {
                    transition: None,
                    geometry: Some(geometry),
                }
            }
            PanelState::TransitioningLeft | PanelState::TransitioningRight => {
                let mut direction = match self.state {
                    PanelState::TransitioningLeft => SwipeDirection::Left,
                    _ => SwipeDirection::Right,
                };
                let mut transition = None;
                if session.horizontal_delta(point, direction) < 0.0 {
                    // The finger reversed past the press point.
                    let from = self.state;
                    direction = direction.reversed();
                    self.state = direction.transitioning_state();
                    transition = Some((from, self.state));
                }
                let session = *session;
                let scale = swipe_scale(&self.layout, direction, &session, point);
                let geometry = self.layout.interpolate(scale, Axis::Horizontal(direction));
                self.geometry = geometry;
                Step {
                    transition,
                    geometry: Some(geometry),
                }
            }
            PanelState::Docked | PanelState::Expanded => {
                let session = *session;
                match self.detect_transition(&session, point) {
                    Some(to) => {
                        let from = self.state;
                        debug_assert!(from.can_transition_to(to));
                        if let Some(session) = self.session.as_mut() {
                            session.commit_transition();
                        }
                        self.state = to;
                        Step {
                            transition: Some((from, to)),
                            geometry: None,
                        }
                    }
                    None => Step::default(),
                }
            }
            PanelState::Dismissed => {
                self.session = None;
                Step::default()
            }
        }
    }

    fn detect_transition(&self, session: &GestureSession, point: Point) -> Option<PanelState> {
        if session.is_transition_committed() {
            return None;
        }
        let minimum = minimum_pan_length(&self.layout, self.state, Some(session));
        let start = session.start_point();
        match self.state {
            PanelState::Docked => {
                let deadzone = self.layout.config().axis_lock_deadzone;
                if start.y - point.y > minimum {
                    Some(PanelState::TransitioningUp)
                } else if point.y > self.layout.docked_rect().y0 {
                    if start.x - point.x > deadzone {
                        Some(PanelState::TransitioningLeft)
                    } else if point.x - start.x > deadzone {
                        Some(PanelState::TransitioningRight)
                    } else {
                        None
                    }
                } else {
                    None
                }
            }
            PanelState::Expanded if point.y - start.y > minimum => {
                Some(PanelState::TransitioningDown)
            }
            _ => None,
        }
    }

    /// Handles a release.
    ///
    /// Returns `None` when no session was open or the session never started a
    /// transition. The session is closed either way.
    pub fn pointer_up(&mut self, sample: PointerSample) -> Option<Release> {
        let session = self.session.take()?;
        if !session.is_transition_committed() || self.state.is_stable() {
            return None;
        }
        let from = self.state;
        let (resolution, geometry) = match from.axis()? {
            Axis::Vertical => {
                let resolution = resolve_vertical_commit(&self.layout, from, &session, sample);
                let geometry = self.layout.resting_geometry(resolution.state)?;
                (resolution, geometry)
            }
            Axis::Horizontal(direction) => {
                let resolution =
                    resolve_horizontal_commit(&self.layout, direction, &session, sample);
                let scale = if resolution.state == PanelState::Dismissed {
                    1.0
                } else {
                    0.0
                };
                let geometry = self.layout.interpolate(scale, Axis::Horizontal(direction));
                (resolution, geometry)
            }
        };
        debug_assert!(from.can_transition_to(resolution.state));
        self.state = resolution.state;
        self.geometry = geometry;
        self.check_invariants();
        Some(Release {
            from,
            to: resolution.state,
            resolution,
            geometry,
        })
    }

    /// Abandons the open session without applying the release rules.
    ///
    /// A live panel settles to the nearer of docked and expanded. Returns
    /// `None` if nothing changed state.
    pub fn cancel(&mut self) -> Option<Settled> {
        let session = self.session.take();
        if session.is_some() && self.state.is_live() {
            Some(self.settle())
        } else {
            None
        }
    }

    /// Cancels the open session if no sample has arrived within the
    /// configured [`stale_session_timeout`](crate::DockConfig::stale_session_timeout).
    pub fn expire_stale_session(&mut self, now: core::time::Duration) -> Option<Settled> {
        let timeout = self.layout.config().stale_session_timeout?;
        let stale = self.session.as_ref()?.is_stale(now, timeout);
        if stale { self.cancel() } else { None }
    }

    /// Moves to a stable state with its resting geometry, dropping any
    /// session.
    ///
    /// Used for programmatic changes. `Dismissed` keeps the current geometry;
    /// use [`Self::force_dismissed`] to move it off screen.
    pub fn force_state(&mut self, state: PanelState) -> Geometry {
        debug_assert!(state.is_stable(), "cannot force a live state");
        let state = state.origin();
        self.session = None;
        self.state = state;
        if let Some(geometry) = self.layout.resting_geometry(state) {
            self.geometry = geometry;
        }
        self.geometry
    }

    /// Dismisses the panel off screen in `direction`, dropping any session.
    pub fn force_dismissed(&mut self, direction: SwipeDirection) -> Geometry {
        self.session = None;
        self.state = PanelState::Dismissed;
        self.geometry = self.layout.dismissed_geometry(direction);
        self.geometry
    }

    /// Replaces the layout, for example after the container was resized.
    ///
    /// A live gesture is cancelled first. A resting panel has its geometry
    /// recomputed for the new layout.
    pub fn set_layout(&mut self, layout: DockLayout) -> Option<Settled> {
        let settled = self.cancel();
        self.session = None;
        self.layout = layout;
        match self.layout.resting_geometry(self.state) {
            Some(geometry) => self.geometry = geometry,
            None if self.state == PanelState::Dismissed => {
                if let Axis::Horizontal(direction) = self.geometry.axis {
                    self.geometry = self.layout.dismissed_geometry(direction);
                }
            }
            None => {}
        }
        settled.map(|s| Settled {
            geometry: self.geometry,
            ..s
        })
    }

    fn settle(&mut self) -> Settled {
        let from = self.state;
        let to = self.layout.nearest_stable_state(self.geometry.rect);
        self.session = None;
        self.state = to;
        self.geometry = self
            .layout
            .resting_geometry(to)
            .unwrap_or_else(|| expanded_geometry(&self.layout));
        self.check_invariants();
        Settled {
            from,
            to,
            geometry: self.geometry,
        }
    }

    fn check_invariants(&self) {
        debug_assert!(
            self.state.is_stable() || self.session.is_some(),
            "live state {:?} without a gesture session",
            self.state
        );
    }
}

fn expanded_geometry(layout: &DockLayout) -> Geometry {
    Geometry {
        rect: layout.expanded_rect(),
        scale: 1.0,
        axis: Axis::Vertical,
    }
}
