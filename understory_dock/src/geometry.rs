// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout extremes and interpolation between them.
//!
//! All functions here are pure. A [`DockLayout`] pairs a [`DockConfig`] with a
//! container size and derives:
//!
//! - the docked tile ([`DockLayout::docked_rect`]),
//! - the expanded region ([`DockLayout::expanded_rect`]),
//! - intermediate rectangles for a scale in `[0, 1]` along either axis.
//!
//! Out-of-range scales are clamped and NaN is treated as `0.0`.

use kurbo::{Point, Rect, Size};

use crate::config::{ConfigError, DockConfig};
use crate::state::{Axis, PanelState, SwipeDirection};

/// A rectangle to render plus its normalized position between two extremes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Target frame in container coordinates.
    pub rect: Rect,
    /// Normalized progress in `[0, 1]`.
    ///
    /// On [`Axis::Vertical`], `0` is docked and `1` is expanded. On
    /// [`Axis::Horizontal`], `0` is docked and `1` is fully off screen.
    pub scale: f64,
    /// Axis the scale is measured along.
    pub axis: Axis,
}

impl Geometry {
    /// Suggested panel opacity: fully opaque on the vertical axis, fading
    /// out as a swipe carries the tile off screen.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        match self.axis {
            Axis::Vertical => 1.0,
            Axis::Horizontal(_) => 1.0 - self.scale,
        }
    }
}

/// Clamp a scale into `[0, 1]`, mapping NaN to `0`.
#[must_use]
pub fn clamp_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        0.0
    } else {
        scale.clamp(0.0, 1.0)
    }
}

// `a * (1 - t) + b * t` is exact at both endpoints.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Geometry model for one configuration and container size.
///
/// A layout is immutable; when the container changes, build a new one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DockLayout {
    config: DockConfig,
    container: Size,
}

impl DockLayout {
    /// Builds a layout, validating the configuration against the container.
    pub fn new(config: DockConfig, container: Size) -> Result<Self, ConfigError> {
        if !(container.width.is_finite()
            && container.height.is_finite()
            && container.width > 0.0
            && container.height > 0.0)
        {
            return Err(ConfigError::InvalidContainer {
                width: container.width,
                height: container.height,
            });
        }
        config.validate()?;
        let layout = Self { config, container };
        let docked = layout.docked_rect();
        let expanded = layout.expanded_rect();
        if expanded.height() <= 0.0
            || docked.x0 < expanded.x0
            || docked.y0 < expanded.y0
            || docked.height() > expanded.height()
        {
            return Err(ConfigError::DockedTileDoesNotFit);
        }
        Ok(layout)
    }

    /// The configuration this layout was built from.
    #[must_use]
    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    /// The container size this layout was built for.
    #[must_use]
    pub fn container(&self) -> Size {
        self.container
    }

    /// Size of the docked tile.
    #[must_use]
    pub fn docked_size(&self) -> Size {
        let width = self.container.width / self.config.docked_width_ratio;
        Size::new(width, width / self.config.top_view_aspect_ratio)
    }

    /// The docked tile, anchored to the bottom-trailing corner of the
    /// expanded region with the configured clearances.
    #[must_use]
    pub fn docked_rect(&self) -> Rect {
        let size = self.docked_size();
        let bottom = self.container.height - self.config.bottom_padding;
        let origin = Point::new(
            self.container.width - size.width - self.config.docked_clearance_from_trailing,
            bottom - size.height - self.config.docked_clearance_from_bottom,
        );
        Rect::from_origin_size(origin, size)
    }

    /// Full container bounds minus top and bottom padding.
    #[must_use]
    pub fn expanded_rect(&self) -> Rect {
        Rect::new(
            0.0,
            self.config.top_padding,
            self.container.width,
            self.container.height - self.config.bottom_padding,
        )
    }

    /// Size a released panel must exceed to snap to expanded.
    #[must_use]
    pub fn threshold_size(&self) -> Size {
        self.expanded_rect().size() * self.config.transition_threshold_fraction
    }

    /// Draggable banner at the top of the expanded panel.
    ///
    /// It spans the expanded width and is as tall as the top view at that
    /// width.
    #[must_use]
    pub fn top_banner_rect(&self) -> Rect {
        let expanded = self.expanded_rect();
        let height = expanded.width() / self.config.top_view_aspect_ratio;
        Rect::new(
            expanded.x0,
            expanded.y0,
            expanded.x1,
            (expanded.y0 + height).min(expanded.y1),
        )
    }

    /// Whether `point` may start a drag while the panel is in `state`.
    ///
    /// Only stable `Expanded` and `Docked` panels have a hot zone.
    #[must_use]
    pub fn is_in_hot_zone(&self, state: PanelState, point: Point) -> bool {
        match state {
            PanelState::Expanded => point.y < self.top_banner_rect().y1,
            PanelState::Docked => {
                let docked = self.docked_rect();
                point.x > docked.x0 && point.y > docked.y0
            }
            _ => false,
        }
    }

    /// Rectangle for a vertical transition at `scale`.
    ///
    /// Width and height interpolate linearly between docked and expanded
    /// sizes, anchored to the bottom-trailing corner. A further shrink of
    /// `(1 - scale)` times the docked tile's clearances makes the panel peel
    /// away from the corner; the result never drops below the docked size.
    #[must_use]
    pub fn vertical_rect(&self, scale: f64) -> Rect {
        let s = clamp_scale(scale);
        let docked = self.docked_rect();
        let expanded = self.expanded_rect();

        let mut width = lerp(docked.width(), expanded.width(), s);
        let mut height = lerp(docked.height(), expanded.height(), s);
        let x = (expanded.x1 - width).clamp(expanded.x0, docked.x0);
        let y = (expanded.y1 - height).clamp(expanded.y0, docked.y0);

        width = (width - (expanded.x1 - docked.x1) * (1.0 - s)).max(docked.width());
        height = (height - (expanded.y1 - docked.y1) * (1.0 - s)).max(docked.height());

        Rect::from_origin_size((x, y), (width, height))
    }

    /// Rectangle for a swipe-to-dismiss at `scale`.
    ///
    /// Only the horizontal origin moves: from the docked origin to `-width`
    /// for a left swipe, or to the container width for a right swipe.
    #[must_use]
    pub fn swipe_rect(&self, direction: SwipeDirection, scale: f64) -> Rect {
        let s = clamp_scale(scale);
        let docked = self.docked_rect();
        let x = match direction {
            SwipeDirection::Left => lerp(docked.x0, -docked.width(), s).min(docked.x0),
            SwipeDirection::Right => lerp(docked.x0, self.container.width, s).max(docked.x0),
        };
        docked.with_origin((x, docked.y0))
    }

    /// The docked tile moved fully off screen in `direction`.
    #[must_use]
    pub fn dismissed_rect(&self, direction: SwipeDirection) -> Rect {
        self.swipe_rect(direction, 1.0)
    }

    /// Interpolated geometry for `scale` along `axis`.
    #[must_use]
    pub fn interpolate(&self, scale: f64, axis: Axis) -> Geometry {
        let scale = clamp_scale(scale);
        let rect = match axis {
            Axis::Vertical => self.vertical_rect(scale),
            Axis::Horizontal(direction) => self.swipe_rect(direction, scale),
        };
        Geometry { rect, scale, axis }
    }

    /// Resting geometry for `Expanded` or `Docked`.
    ///
    /// Other states have no single resting geometry and return `None`.
    #[must_use]
    pub fn resting_geometry(&self, state: PanelState) -> Option<Geometry> {
        match state {
            PanelState::Expanded => Some(Geometry {
                rect: self.expanded_rect(),
                scale: 1.0,
                axis: Axis::Vertical,
            }),
            PanelState::Docked => Some(Geometry {
                rect: self.docked_rect(),
                scale: 0.0,
                axis: Axis::Vertical,
            }),
            _ => None,
        }
    }

    /// Geometry of a panel dismissed by swiping in `direction`.
    #[must_use]
    pub fn dismissed_geometry(&self, direction: SwipeDirection) -> Geometry {
        self.interpolate(1.0, Axis::Horizontal(direction))
    }

    /// The stable state nearest to a panel currently occupying `rect`.
    ///
    /// Panels shorter than the threshold height settle docked; others settle
    /// expanded.
    #[must_use]
    pub fn nearest_stable_state(&self, rect: Rect) -> PanelState {
        if rect.height() < self.threshold_size().height {
            PanelState::Docked
        } else {
            PanelState::Expanded
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> DockLayout {
        DockLayout::new(DockConfig::default(), Size::new(400.0, 800.0)).unwrap()
    }

    #[test]
    fn docked_size_follows_width_ratio_and_aspect() {
        let size = layout().docked_size();
        assert_eq!(size, Size::new(200.0, 112.5));
    }

    #[test]
    fn docked_rect_sits_inside_clearances() {
        let docked = layout().docked_rect();
        assert_eq!(docked.x1, 400.0 - 15.0);
        assert_eq!(docked.y1, 800.0 - 50.0);
    }

    #[test]
    fn expanded_rect_honors_padding() {
        let config = DockConfig::default()
            .with_top_padding(44.0)
            .with_bottom_padding(34.0);
        let layout = DockLayout::new(config, Size::new(400.0, 800.0)).unwrap();
        assert_eq!(layout.expanded_rect(), Rect::new(0.0, 44.0, 400.0, 766.0));
        assert_eq!(layout.docked_rect().y1, 766.0 - 50.0);
    }

    #[test]
    fn vertical_endpoints_are_exact() {
        let layout = layout();
        assert_eq!(layout.vertical_rect(0.0), layout.docked_rect());
        assert_eq!(layout.vertical_rect(1.0), layout.expanded_rect());
    }

    #[test]
    fn vertical_scale_is_clamped() {
        let layout = layout();
        assert_eq!(layout.vertical_rect(-3.0), layout.docked_rect());
        assert_eq!(layout.vertical_rect(7.5), layout.expanded_rect());
        assert_eq!(layout.vertical_rect(f64::NAN), layout.docked_rect());
    }

    #[test]
    fn vertical_midpoint_lies_between_extremes() {
        let layout = layout();
        let mid = layout.vertical_rect(0.5);
        let docked = layout.docked_rect();
        let expanded = layout.expanded_rect();
        assert!(mid.width() > docked.width() && mid.width() < expanded.width());
        assert!(mid.height() > docked.height() && mid.height() < expanded.height());
        assert!(mid.x0 >= expanded.x0 && mid.x0 <= docked.x0);
        assert!(mid.y0 >= expanded.y0 && mid.y0 <= docked.y0);
    }

    #[test]
    fn swipe_left_moves_only_x_toward_negative_width() {
        let layout = layout();
        let docked = layout.docked_rect();
        let gone = layout.swipe_rect(SwipeDirection::Left, 1.0);
        assert_eq!(gone.x0, -docked.width());
        assert_eq!(gone.y0, docked.y0);
        assert_eq!(gone.size(), docked.size());
        assert_eq!(layout.swipe_rect(SwipeDirection::Left, 0.0), docked);
    }

    #[test]
    fn swipe_right_moves_toward_container_width() {
        let layout = layout();
        let gone = layout.dismissed_rect(SwipeDirection::Right);
        assert_eq!(gone.x0, 400.0);
        let half = layout.swipe_rect(SwipeDirection::Right, 0.5);
        assert!(half.x0 > layout.docked_rect().x0 && half.x0 < 400.0);
    }

    #[test]
    fn swipe_opacity_fades_with_scale() {
        let geometry = layout().interpolate(0.25, Axis::Horizontal(SwipeDirection::Left));
        assert_eq!(geometry.opacity(), 0.75);
        let vertical = layout().interpolate(0.25, Axis::Vertical);
        assert_eq!(vertical.opacity(), 1.0);
    }

    #[test]
    fn hot_zones_depend_on_state() {
        let layout = layout();
        // Banner is 400 / (16/9) = 225 tall.
        assert!(layout.is_in_hot_zone(PanelState::Expanded, Point::new(10.0, 200.0)));
        assert!(!layout.is_in_hot_zone(PanelState::Expanded, Point::new(10.0, 300.0)));
        let docked = layout.docked_rect();
        assert!(layout.is_in_hot_zone(PanelState::Docked, docked.center()));
        assert!(!layout.is_in_hot_zone(PanelState::Docked, Point::new(10.0, 10.0)));
        assert!(!layout.is_in_hot_zone(PanelState::Dismissed, docked.center()));
    }

    #[test]
    fn nearest_stable_state_uses_threshold_height() {
        let layout = layout();
        assert_eq!(
            layout.nearest_stable_state(layout.docked_rect()),
            PanelState::Docked
        );
        assert_eq!(
            layout.nearest_stable_state(layout.expanded_rect()),
            PanelState::Expanded
        );
    }

    #[test]
    fn invalid_container_is_rejected() {
        let err = DockLayout::new(DockConfig::default(), Size::new(0.0, 800.0)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidContainer { .. }));
    }

    #[test]
    fn oversized_tile_is_rejected() {
        let config = DockConfig::default().with_docked_clearance(0.0, 300.0);
        let err = DockLayout::new(config, Size::new(400.0, 800.0)).unwrap_err();
        assert_eq!(err, ConfigError::DockedTileDoesNotFit);
    }
}
