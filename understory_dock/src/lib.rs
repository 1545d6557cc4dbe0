// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dock --heading-base-level=0

//! Understory Dock: headless interaction core for a dockable media panel.
//!
//! A docking panel lives in one of three resting states: expanded to fill its
//! container, docked as a small tile near the bottom trailing corner, or
//! dismissed. Pointer drags move it between them through four live
//! transitioning states, and a release commits to a resting state using a
//! flick rule, a minimum-travel rule, and a position rule.
//!
//! This crate owns only the decisions and the geometry. It never renders,
//! animates, or reads a clock: hosts feed pointer samples with their own
//! timestamps, apply the rectangles they get back, and animate toward the
//! returned [`Settle`] targets however they like.
//!
//! - [`DockConfig`]: tunable constants, validated up front.
//! - [`DockLayout`]: docked and expanded rectangles, hot zones, interpolation.
//! - [`GestureSession`]: one press-to-release interaction.
//! - [`commit`]: pan lengths, scales, and the release rules.
//! - [`DockStateMachine`]: authoritative state plus the open session.
//! - [`DockDirector`]: host-facing commands and ordered [`DockObserver`]
//!   notifications.
//!
//! ## Example
//!
//! ```rust
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
//! panel.present(false);
//!
//! // Grab the top banner and drag down quickly.
//! let ms = Duration::from_millis;
//! panel.on_pointer_down(Point::new(200.0, 40.0), ms(0));
//! panel.on_pointer_move(Point::new(200.0, 200.0), ms(30));
//! assert_eq!(panel.state(), PanelState::TransitioningDown);
//! panel.on_pointer_move(Point::new(200.0, 300.0), ms(60));
//!
//! let settle = panel.on_pointer_up(Point::new(200.0, 320.0), ms(80)).unwrap();
//! assert_eq!(settle.state, PanelState::Docked);
//! assert_eq!(settle.geometry.rect, panel.layout().docked_rect());
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: forwards to `kurbo/libm` for `no_std` builds.
//! - `tracing`: emit `tracing` events for transitions, commits, and ignored
//!   input.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod commit;
mod config;
mod director;
mod geometry;
mod machine;
mod observer;
mod session;
mod state;

pub use commit::{CommitReason, Resolution};
pub use config::{ConfigError, DockConfig};
pub use director::{AnimationTime, DockDirector, Settle, TransitionError};
pub use geometry::{DockLayout, Geometry, clamp_scale};
pub use machine::{DockStateMachine, Press, Release, Settled, Step};
pub use observer::{DockEvent, DockObserver, EventRecorder, NoopObserver};
pub use session::{GestureSession, PointerEvent, PointerPhase, PointerSample, session_speed};
pub use state::{Axis, PanelState, SwipeDirection};
