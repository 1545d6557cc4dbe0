// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panel states and the legal transition table.

/// The authoritative state of a docking panel.
///
/// `Expanded`, `Docked` and `Dismissed` are *stable*: no pointer session is
/// driving the panel. The four `Transitioning*` states are *live*: a session
/// is open and geometry follows the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PanelState {
    /// Full container bounds, minus padding.
    Expanded,
    /// Small tile anchored to the bottom-trailing corner.
    Docked,
    /// Off screen.
    #[default]
    Dismissed,
    /// Dragging from docked toward expanded.
    TransitioningUp,
    /// Dragging from expanded toward docked.
    TransitioningDown,
    /// Swiping the docked tile off the leading edge.
    TransitioningLeft,
    /// Swiping the docked tile off the trailing edge.
    TransitioningRight,
}

impl PanelState {
    /// Returns `true` for `Expanded`, `Docked` and `Dismissed`.
    #[must_use]
    pub const fn is_stable(self) -> bool {
        matches!(self, Self::Expanded | Self::Docked | Self::Dismissed)
    }

    /// Returns `true` while a gesture is driving the panel.
    #[must_use]
    pub const fn is_live(self) -> bool {
        !self.is_stable()
    }

    /// The axis a live state moves along, or `None` for stable states.
    #[must_use]
    pub const fn axis(self) -> Option<Axis> {
        match self {
            Self::TransitioningUp | Self::TransitioningDown => Some(Axis::Vertical),
            Self::TransitioningLeft => Some(Axis::Horizontal(SwipeDirection::Left)),
            Self::TransitioningRight => Some(Axis::Horizontal(SwipeDirection::Right)),
            Self::Expanded | Self::Docked | Self::Dismissed => None,
        }
    }

    /// The stable state a live gesture started from.
    ///
    /// Stable states return themselves.
    #[must_use]
    pub const fn origin(self) -> Self {
        match self {
            Self::TransitioningUp
            | Self::TransitioningLeft
            | Self::TransitioningRight
            | Self::Docked => Self::Docked,
            Self::TransitioningDown | Self::Expanded => Self::Expanded,
            Self::Dismissed => Self::Dismissed,
        }
    }

    /// Whether the gesture-driven table permits moving from `self` to `to`.
    ///
    /// Programmatic requests follow their own rules in
    /// [`DockDirector`](crate::DockDirector).
    #[must_use]
    pub const fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Docked, Self::TransitioningUp)
                | (Self::Docked, Self::TransitioningLeft)
                | (Self::Docked, Self::TransitioningRight)
                | (Self::Expanded, Self::TransitioningDown)
                | (Self::TransitioningUp, Self::Expanded)
                | (Self::TransitioningUp, Self::Docked)
                | (Self::TransitioningDown, Self::Expanded)
                | (Self::TransitioningDown, Self::Docked)
                | (Self::TransitioningLeft, Self::Docked)
                | (Self::TransitioningLeft, Self::Dismissed)
                | (Self::TransitioningLeft, Self::TransitioningRight)
                | (Self::TransitioningRight, Self::Docked)
                | (Self::TransitioningRight, Self::Dismissed)
                | (Self::TransitioningRight, Self::TransitioningLeft)
        )
    }
}

/// Horizontal direction of a swipe-to-dismiss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    /// Toward the leading (left) edge.
    Left,
    /// Toward the trailing (right) edge.
    Right,
}

impl SwipeDirection {
    /// The live state a swipe in this direction drives.
    #[must_use]
    pub const fn transitioning_state(self) -> PanelState {
        match self {
            Self::Left => PanelState::TransitioningLeft,
            Self::Right => PanelState::TransitioningRight,
        }
    }

    /// The other direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// The axis along which geometry is interpolated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Docked (scale 0) to expanded (scale 1).
    Vertical,
    /// Docked (scale 0) to fully off screen in the given direction (scale 1).
    Horizontal(SwipeDirection),
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [PanelState; 7] = [
        PanelState::Expanded,
        PanelState::Docked,
        PanelState::Dismissed,
        PanelState::TransitioningUp,
        PanelState::TransitioningDown,
        PanelState::TransitioningLeft,
        PanelState::TransitioningRight,
    ];

    #[test]
    fn stable_and_live_partition_states() {
        let stable = ALL.iter().filter(|s| s.is_stable()).count();
        let live = ALL.iter().filter(|s| s.is_live()).count();
        assert_eq!(stable, 3);
        assert_eq!(live, 4);
    }

    #[test]
    fn initial_state_is_dismissed() {
        assert_eq!(PanelState::default(), PanelState::Dismissed);
    }

    #[test]
    fn live_states_have_an_axis_and_stable_ones_do_not() {
        for state in ALL {
            assert_eq!(state.axis().is_some(), state.is_live(), "{state:?}");
        }
    }

    #[test]
    fn stable_states_never_jump_directly_to_each_other() {
        for from in ALL.iter().filter(|s| s.is_stable()) {
            for to in ALL.iter().filter(|s| s.is_stable()) {
                assert!(!from.can_transition_to(*to), "{from:?} -> {to:?}");
            }
        }
    }

    #[test]
    fn vertical_and_horizontal_live_states_never_mix() {
        let vertical = [PanelState::TransitioningUp, PanelState::TransitioningDown];
        let horizontal = [PanelState::TransitioningLeft, PanelState::TransitioningRight];
        for v in vertical {
            for h in horizontal {
                assert!(!v.can_transition_to(h));
                assert!(!h.can_transition_to(v));
            }
        }
    }

    #[test]
    fn swipes_only_start_from_docked() {
        for from in ALL {
            let allowed = from.can_transition_to(PanelState::TransitioningLeft);
            let expected = matches!(
                from,
                PanelState::Docked | PanelState::TransitioningRight
            );
            assert_eq!(allowed, expected, "{from:?}");
        }
    }

    #[test]
    fn origin_maps_live_states_back() {
        assert_eq!(PanelState::TransitioningUp.origin(), PanelState::Docked);
        assert_eq!(PanelState::TransitioningDown.origin(), PanelState::Expanded);
        assert_eq!(PanelState::TransitioningRight.origin(), PanelState::Docked);
        assert_eq!(PanelState::Dismissed.origin(), PanelState::Dismissed);
    }
}
