// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture session: bookkeeping for one press-to-release pointer interaction.
//!
//! ## Usage
//!
//! 1) Open a session with [`GestureSession::begin`] when a press lands in a
//!    hot zone.
//! 2) On each move, measure travel with [`GestureSession::vertical_delta`] or
//!    [`GestureSession::horizontal_delta`].
//! 3) On release, compute [`GestureSession::speed`] for the flick rules.
//!
//! Timestamps are supplied by the host and only their differences matter.
//!
//! ```
//! use core::time::Duration;
//! use kurbo::Point;
//! use understory_dock::{GestureSession, PointerSample};
//!
//! let session = GestureSession::begin(PointerSample::new(Point::new(10.0, 100.0), Duration::ZERO));
//! assert_eq!(session.vertical_delta(Point::new(10.0, 60.0)), -40.0);
//! assert_eq!(session.speed(40.0, Duration::from_millis(250)), 160.0);
//! ```

use core::time::Duration;

use kurbo::Point;

use crate::state::SwipeDirection;

/// Phase of a pointer sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// Press.
    Began,
    /// Drag.
    Moved,
    /// Release.
    Ended,
}

/// A single pointer position with its host-supplied timestamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Position in container coordinates.
    pub position: Point,
    /// Time since an arbitrary, monotonic epoch.
    pub time: Duration,
}

impl PointerSample {
    /// Creates a sample.
    #[must_use]
    pub fn new(position: Point, time: Duration) -> Self {
        Self { position, time }
    }
}

/// A pointer sample tagged with its phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Press, drag or release.
    pub phase: PointerPhase,
    /// Where and when.
    pub sample: PointerSample,
}

impl PointerEvent {
    /// A press at `position`.
    #[must_use]
    pub fn began(position: Point, time: Duration) -> Self {
        Self {
            phase: PointerPhase::Began,
            sample: PointerSample::new(position, time),
        }
    }

    /// A drag to `position`.
    #[must_use]
    pub fn moved(position: Point, time: Duration) -> Self {
        Self {
            phase: PointerPhase::Moved,
            sample: PointerSample::new(position, time),
        }
    }

    /// A release at `position`.
    #[must_use]
    pub fn ended(position: Point, time: Duration) -> Self {
        Self {
            phase: PointerPhase::Ended,
            sample: PointerSample::new(position, time),
        }
    }
}

/// One in-progress pointer interaction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSession {
    start: PointerSample,
    last_time: Duration,
    transition_committed: bool,
    consider_next_vertical_sample: bool,
}

impl GestureSession {
    /// Opens a session at `sample`.
    #[must_use]
    pub fn begin(sample: PointerSample) -> Self {
        Self {
            start: sample,
            last_time: sample.time,
            transition_committed: false,
            consider_next_vertical_sample: true,
        }
    }

    /// Where the press landed.
    #[must_use]
    pub fn start_point(&self) -> Point {
        self.start.position
    }

    /// When the press landed.
    #[must_use]
    pub fn start_time(&self) -> Duration {
        self.start.time
    }

    /// Timestamp of the most recent sample seen by this session.
    #[must_use]
    pub fn last_time(&self) -> Duration {
        self.last_time
    }

    /// Records that a sample arrived at `time`.
    pub fn touch(&mut self, time: Duration) {
        self.last_time = self.last_time.max(time);
    }

    /// Whether this session has already entered a live state.
    ///
    /// Once set, the axis is locked for the rest of the session.
    #[must_use]
    pub fn is_transition_committed(&self) -> bool {
        self.transition_committed
    }

    /// Marks that this session has entered a live state.
    pub fn commit_transition(&mut self) {
        self.transition_committed = true;
    }

    /// Signed vertical travel from the start point; negative is upward.
    #[must_use]
    pub fn vertical_delta(&self, point: Point) -> f64 {
        point.y - self.start.position.y
    }

    /// Horizontal travel from the start point, positive in `direction`.
    #[must_use]
    pub fn horizontal_delta(&self, point: Point, direction: SwipeDirection) -> f64 {
        match direction {
            SwipeDirection::Left => self.start.position.x - point.x,
            SwipeDirection::Right => point.x - self.start.position.x,
        }
    }

    /// Elapsed time from the press to `now`, saturating at zero.
    #[must_use]
    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.start.time)
    }

    /// Average speed over the session: `distance` divided by elapsed seconds.
    ///
    /// Returns `0.0` when no time has elapsed.
    #[must_use]
    pub fn speed(&self, distance: f64, now: Duration) -> f64 {
        let seconds = self.elapsed(now).as_secs_f64();
        if seconds > 0.0 { distance / seconds } else { 0.0 }
    }

    /// Returns `true` for every other vertical sample, starting with the
    /// first.
    ///
    /// Halving the frame update rate during vertical drags reduces jitter.
    pub fn should_consider_vertical_sample(&mut self) -> bool {
        let consider = self.consider_next_vertical_sample;
        self.consider_next_vertical_sample = !consider;
        consider
    }

    /// Whether no sample has arrived for longer than `timeout` before `now`.
    #[must_use]
    pub fn is_stale(&self, now: Duration, timeout: Duration) -> bool {
        now.saturating_sub(self.last_time) > timeout
    }
}

/// Speed of a session, or `0.0` when no session is open.
#[must_use]
pub fn session_speed(session: Option<&GestureSession>, distance: f64, now: Duration) -> f64 {
    session.map_or(0.0, |s| s.speed(distance, now))
}
