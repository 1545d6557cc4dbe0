// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan lengths, live scales, and the release rules that resolve a live state
//! to a stable one.
//!
//! Everything here is a pure function of the layout, the session and the
//! release sample, so the same inputs always resolve to the same state.
//!
//! Vertical releases use three tiers, checked in order:
//!
//! 1. **Flick**: speed above [`flick_speed_threshold`] commits to the far
//!    state in the direction of travel.
//! 2. **Cancel**: travel below [`minimum_pan_fraction`] of the pan length
//!    returns to the state the gesture started from.
//! 3. **Position**: the interpolated width decides, compared against the
//!    threshold width.
//!
//! Horizontal releases dismiss on a flick and otherwise snap by position.
//!
//! [`flick_speed_threshold`]: crate::DockConfig::flick_speed_threshold
//! [`minimum_pan_fraction`]: crate::DockConfig::minimum_pan_fraction

use crate::geometry::{DockLayout, clamp_scale};
use crate::session::{GestureSession, PointerSample};
use crate::state::{PanelState, SwipeDirection};

/// Which rule decided a release.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommitReason {
    /// Released faster than the flick threshold.
    Flick,
    /// Released before travelling far enough; treated as a cancelled drag.
    Cancelled,
    /// Decided by where the panel was released.
    Position,
}

/// The stable state a release resolves to, and why.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Resolution {
    /// Stable state to settle in.
    pub state: PanelState,
    /// Rule that chose it.
    pub reason: CommitReason,
}

/// Vertical pan length for `state`.
///
/// Dragging down from expanded measures from the press to the docked tile's
/// top edge. Dragging up from docked, or having no session, uses the
/// configured [`default_pan_length`](crate::DockConfig::default_pan_length).
/// The result is at least `1.0`.
#[must_use]
pub fn pan_length(layout: &DockLayout, state: PanelState, session: Option<&GestureSession>) -> f64 {
    let length = match (state, session) {
        (PanelState::Expanded | PanelState::TransitioningDown, Some(session)) => {
            layout.docked_rect().y0 - session.start_point().y
        }
        _ => layout.config().default_pan_length,
    };
    length.max(1.0)
}

/// Travel a vertical drag must exceed before it becomes a transition.
#[must_use]
pub fn minimum_pan_length(
    layout: &DockLayout,
    state: PanelState,
    session: Option<&GestureSession>,
) -> f64 {
    layout.config().minimum_pan_fraction * pan_length(layout, state, session)
}

/// Horizontal pan length for a swipe: the distance from the press to the
/// edge being swiped toward, at least `1.0`.
#[must_use]
pub fn swipe_pan_length(
    layout: &DockLayout,
    direction: SwipeDirection,
    session: Option<&GestureSession>,
) -> f64 {
    let length = match (direction, session) {
        (SwipeDirection::Left, Some(session)) => session.start_point().x,
        (SwipeDirection::Right, Some(session)) => {
            layout.container().width - session.start_point().x
        }
        (_, None) => layout.container().width - 100.0,
    };
    length.max(1.0)
}

/// Scale in `[0, 1]` for a vertical drag to `point`.
///
/// `0` is docked and `1` is expanded.
#[must_use]
pub fn vertical_scale(
    layout: &DockLayout,
    state: PanelState,
    session: &GestureSession,
    point: kurbo::Point,
) -> f64 {
    let pan = pan_length(layout, state, Some(session));
    let mut travel = session.vertical_delta(point).min(pan - 1.0);
    if state == PanelState::TransitioningUp {
        travel += pan;
    }
    clamp_scale((pan - travel) / pan)
}

/// Scale in `[0, 1]` for a swipe to `point`.
///
/// `0` is docked and `1` is fully off screen.
#[must_use]
pub fn swipe_scale(
    layout: &DockLayout,
    direction: SwipeDirection,
    session: &GestureSession,
    point: kurbo::Point,
) -> f64 {
    let travel = session.horizontal_delta(point, direction);
    clamp_scale(travel / swipe_pan_length(layout, direction, Some(session)))
}

/// Resolves a vertical release.
///
/// `state` should be [`PanelState::TransitioningUp`] or
/// [`PanelState::TransitioningDown`]; any other state resolves to its own
/// origin with [`CommitReason::Cancelled`].
#[must_use]
pub fn resolve_vertical_commit(
    layout: &DockLayout,
    state: PanelState,
    session: &GestureSession,
    release: PointerSample,
) -> Resolution {
    let far = match state {
        PanelState::TransitioningDown => PanelState::Docked,
        PanelState::TransitioningUp => PanelState::Expanded,
        _ => {
            return Resolution {
                state: state.origin(),
                reason: CommitReason::Cancelled,
            };
        }
    };

    let config = layout.config();
    let distance = session.vertical_delta(release.position).abs().max(1.0);
    if session.speed(distance, release.time) > config.flick_speed_threshold {
        return Resolution {
            state: far,
            reason: CommitReason::Flick,
        };
    }
    if distance < minimum_pan_length(layout, state, Some(session)) {
        return Resolution {
            state: state.origin(),
            reason: CommitReason::Cancelled,
        };
    }
    let released = layout.vertical_rect(vertical_scale(layout, state, session, release.position));
    let state = if released.width() > layout.threshold_size().width {
        PanelState::Expanded
    } else {
        PanelState::Docked
    };
    Resolution {
        state,
        reason: CommitReason::Position,
    }
}

/// Resolves a horizontal release in `direction`.
///
/// The two directions use different position rules: a left swipe stays
/// docked while the release point is right of half the left pan length,
/// while a right swipe stays docked while the release point is left of the
/// midpoint between the docked origin and the container's trailing edge.
#[must_use]
pub fn resolve_horizontal_commit(
    layout: &DockLayout,
    direction: SwipeDirection,
    session: &GestureSession,
    release: PointerSample,
) -> Resolution {
    let travel = session.horizontal_delta(release.position, direction);
    if session.speed(travel, release.time) > layout.config().flick_speed_threshold {
        return Resolution {
            state: PanelState::Dismissed,
            reason: CommitReason::Flick,
        };
    }

    let x = release.position.x;
    let stays_docked = match direction {
        SwipeDirection::Left => x > swipe_pan_length(layout, direction, Some(session)) / 2.0,
        SwipeDirection::Right => {
            let docked_x = layout.docked_rect().x0;
            x < docked_x + (layout.container().width - docked_x) * 0.5
        }
    };
    Resolution {
        state: if stays_docked {
            PanelState::Docked
        } else {
            PanelState::Dismissed
        },
        reason: CommitReason::Position,
    }
}
