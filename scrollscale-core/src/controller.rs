//! The scale controller: candidate computation, clamping, veto, commit.
//!
//! The controller is assembled from the current configuration and state
//! for each change request. Where the scale value lives is decided once
//! per session by the [`ScaleStore`] variant; everything else is identical
//! across both ownership modes.

use crate::bounds::{
    clamp_scale, merge_windows, window_from_container, window_from_pixels, PixelBounds,
    ScaleBounds,
};
use crate::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Natural, unscaled dimensions of the element. Unknown until probed from
/// rendered geometry or set explicitly, and kept until explicitly replaced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OriginalSize {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl OriginalSize {
    pub fn known(&self) -> Option<(f64, f64)> {
        Some((self.width?, self.height?))
    }
}

impl From<Size> for OriginalSize {
    fn from(size: Size) -> Self {
        Self {
            width: Some(size.width),
            height: Some(size.height),
        }
    }
}

/// Where the current scale value lives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleStore {
    /// Self-owned: accepted changes are persisted here.
    Internal(f64),
    /// Caller-owned: the value is supplied each cycle and commits are
    /// no-ops; the caller feeds accepted values back in on the next cycle.
    External(f64),
}

impl ScaleStore {
    pub fn current(&self) -> f64 {
        match *self {
            ScaleStore::Internal(scale) | ScaleStore::External(scale) => scale,
        }
    }

    fn commit(&mut self, next: f64) {
        if let ScaleStore::Internal(scale) = self {
            *scale = next;
        }
    }
}

/// Immutable snapshot of one attempted change, handed to the veto callback
/// before anything is committed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleChange {
    pub scale: f64,
    pub width: f64,
    pub height: f64,
    pub prev_width: f64,
    pub prev_height: f64,
    /// Zoom anchor as a fraction of the previous rendered size; (0.5, 0.5)
    /// for programmatic changes.
    pub position: Point,
}

/// What drives a scale change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleRequest {
    /// Signed gesture delta, wheel-shaped: positive zooms out.
    Gesture { delta: f64 },
    /// Absolute target scale, e.g. a programmatic set.
    Explicit(f64),
}

/// Bounding rectangles probed from the host right before a change. Either
/// may be absent; absent geometry simply stops constraining.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Geometry {
    pub element: Option<Rect>,
    pub container: Option<Rect>,
}

pub struct ScaleController {
    pub store: ScaleStore,
    pub original: OriginalSize,
    /// Sensitivity multiplier for gesture deltas.
    pub speed: f64,
    pub scale_bounds: ScaleBounds,
    pub pixel_bounds: PixelBounds,
}

impl Default for ScaleController {
    fn default() -> Self {
        Self {
            store: ScaleStore::Internal(1.0),
            original: OriginalSize::default(),
            speed: 1.0,
            scale_bounds: ScaleBounds::default(),
            pixel_bounds: PixelBounds::default(),
        }
    }
}

impl ScaleController {
    pub fn scale(&self) -> f64 {
        self.store.current()
    }

    pub fn width(&self) -> Option<f64> {
        self.original.known().map(|(w, _)| w * self.scale())
    }

    pub fn height(&self) -> Option<f64> {
        self.original.known().map(|(_, h)| h * self.scale())
    }

    /// Resolve the effective scale window from the probed geometry and the
    /// configured bounds.
    pub fn effective_window(&self, geometry: &Geometry) -> (f64, f64) {
        let pixels = window_from_pixels(&self.pixel_bounds, self.original.width, self.original.height);
        let container = window_from_container(
            geometry.element.as_ref(),
            geometry.container.as_ref(),
            self.original.width,
            self.original.height,
        );
        merge_windows(pixels, container, self.scale_bounds.window())
    }

    /// Run one change request through the window, the veto callback, and
    /// the store. Returns the accepted change, or `None` when the request
    /// was dropped (malformed candidate, unknown natural size) or vetoed.
    pub fn set_scale(
        &mut self,
        geometry: &Geometry,
        request: ScaleRequest,
        anchor: Option<Point>,
        veto: Option<&dyn Fn(&ScaleChange) -> bool>,
    ) -> Option<ScaleChange> {
        let (min, max) = self.effective_window(geometry);
        let current = self.scale();

        let candidate = match request {
            ScaleRequest::Explicit(scale) => scale,
            ScaleRequest::Gesture { delta } => current - delta / (100.0 / self.speed),
        };
        let next = clamp_scale(candidate, min, max);
        if candidate.is_nan() || next.is_nan() {
            log::debug!("scale change dropped: candidate {candidate} is not a number");
            return None;
        }

        // Size math waits for the natural size; until then nothing to
        // resize and nothing to report.
        let (original_width, original_height) = self.original.known()?;
        let prev_width = original_width * current;
        let prev_height = original_height * current;

        let position = match anchor {
            Some(anchor) => Point::new(anchor.x / prev_width, anchor.y / prev_height),
            None => Point::new(0.5, 0.5),
        };

        let change = ScaleChange {
            scale: next,
            width: original_width * next,
            height: original_height * next,
            prev_width,
            prev_height,
            position,
        };

        if let Some(veto) = veto {
            if !veto(&change) {
                log::debug!("scale change to {next} rejected by callback");
                return None;
            }
        }

        self.store.commit(next);
        Some(change)
    }

    /// Establish the natural size: explicitly, or by un-scaling the
    /// currently rendered size. With neither available the size stays
    /// unknown and nothing changes.
    pub fn update_original_size(&mut self, size: Option<Size>, rendered: Option<Size>) {
        if let Some(size) = size {
            self.original = size.into();
            return;
        }
        if let Some(rendered) = rendered {
            let scale = self.scale();
            self.original = OriginalSize {
                width: Some(rendered.width / scale),
                height: Some(rendered.height / scale),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn controller_with_size(width: f64, height: f64) -> ScaleController {
        ScaleController {
            original: OriginalSize {
                width: Some(width),
                height: Some(height),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_wheel_delta_scales_element() {
        // Natural size 200x100, no bounds, scale 1; wheel delta -100 at
        // speed 1 doubles the scale.
        let mut controller = controller_with_size(200.0, 100.0);
        let change = controller
            .set_scale(
                &Geometry::default(),
                ScaleRequest::Gesture { delta: -100.0 },
                None,
                None,
            )
            .unwrap();
        assert_eq!(change.scale, 2.0);
        assert_eq!((change.width, change.height), (400.0, 200.0));
        assert_eq!((change.prev_width, change.prev_height), (200.0, 100.0));
        assert_eq!(controller.scale(), 2.0);
    }

    #[test]
    fn test_candidate_clamps_to_window_max() {
        let mut controller = controller_with_size(100.0, 100.0);
        controller.scale_bounds = ScaleBounds {
            min: Some(0.5),
            max: Some(3.0),
        };
        let change = controller
            .set_scale(
                &Geometry::default(),
                ScaleRequest::Explicit(5.0),
                None,
                None,
            )
            .unwrap();
        assert_eq!(change.scale, 3.0);
        assert_eq!(controller.scale(), 3.0);
    }

    #[test]
    fn test_speed_divides_the_delta_step() {
        let mut controller = controller_with_size(100.0, 100.0);
        controller.speed = 2.0;
        let change = controller
            .set_scale(
                &Geometry::default(),
                ScaleRequest::Gesture { delta: -50.0 },
                None,
                None,
            )
            .unwrap();
        assert_eq!(change.scale, 2.0);
    }

    #[test]
    fn test_nan_candidate_aborts_without_commit_or_callback() {
        let mut controller = controller_with_size(100.0, 100.0);
        let called = Cell::new(false);
        let veto = |_: &ScaleChange| {
            called.set(true);
            true
        };
        let result = controller.set_scale(
            &Geometry::default(),
            ScaleRequest::Gesture { delta: f64::NAN },
            None,
            Some(&veto),
        );
        assert!(result.is_none());
        assert!(!called.get());
        assert_eq!(controller.scale(), 1.0);
    }

    #[test]
    fn test_unknown_original_size_skips_change() {
        let mut controller = ScaleController::default();
        let result = controller.set_scale(
            &Geometry::default(),
            ScaleRequest::Explicit(2.0),
            None,
            None,
        );
        assert!(result.is_none());
        assert_eq!(controller.scale(), 1.0);
    }

    #[test]
    fn test_veto_blocks_commit_but_reports_would_be_values() {
        let mut controller = controller_with_size(200.0, 100.0);
        let seen = Cell::new(None);
        let veto = |change: &ScaleChange| {
            seen.set(Some((change.scale, change.width, change.height)));
            false
        };
        let result = controller.set_scale(
            &Geometry::default(),
            ScaleRequest::Explicit(2.0),
            None,
            Some(&veto),
        );
        assert!(result.is_none());
        assert_eq!(controller.scale(), 1.0);
        assert_eq!(seen.get(), Some((2.0, 400.0, 200.0)));
    }

    #[test]
    fn test_external_store_never_mutates() {
        let mut controller = controller_with_size(100.0, 100.0);
        controller.store = ScaleStore::External(1.0);
        let change = controller
            .set_scale(
                &Geometry::default(),
                ScaleRequest::Explicit(2.0),
                None,
                None,
            )
            .unwrap();
        // The accepted value is returned but the store stays untouched.
        assert_eq!(change.scale, 2.0);
        assert_eq!(controller.scale(), 1.0);
    }

    #[test]
    fn test_anchor_is_relative_to_previous_rendered_size() {
        let mut controller = controller_with_size(200.0, 100.0);
        let change = controller
            .set_scale(
                &Geometry::default(),
                ScaleRequest::Explicit(2.0),
                Some(Point::new(50.0, 25.0)),
                None,
            )
            .unwrap();
        assert_eq!(change.position, Point::new(0.25, 0.25));
    }

    #[test]
    fn test_missing_anchor_defaults_to_center() {
        let mut controller = controller_with_size(200.0, 100.0);
        let change = controller
            .set_scale(
                &Geometry::default(),
                ScaleRequest::Explicit(2.0),
                None,
                None,
            )
            .unwrap();
        assert_eq!(change.position, Point::new(0.5, 0.5));
    }

    #[test]
    fn test_container_geometry_limits_the_scale() {
        let mut controller = controller_with_size(200.0, 100.0);
        let geometry = Geometry {
            element: Some(Rect::new(0.0, 0.0, 200.0, 100.0)),
            container: Some(Rect::new(0.0, 0.0, 400.0, 300.0)),
        };
        // Container allows min(300/100, 400/200) = 2x.
        assert_eq!(controller.effective_window(&geometry), (0.0, 2.0));
        let change = controller
            .set_scale(&geometry, ScaleRequest::Explicit(10.0), None, None)
            .unwrap();
        assert_eq!(change.scale, 2.0);
    }

    #[test]
    fn test_update_original_size_probe_recovers_unscaled_size() {
        let mut controller = ScaleController {
            store: ScaleStore::Internal(2.0),
            ..Default::default()
        };
        controller.update_original_size(None, Some(Size::new(400.0, 200.0)));
        assert_eq!(controller.original.known(), Some((200.0, 100.0)));
    }

    #[test]
    fn test_update_original_size_probe_is_idempotent() {
        let mut controller = ScaleController::default();
        controller.update_original_size(None, Some(Size::new(300.0, 150.0)));
        let first = controller.original;
        controller.update_original_size(None, Some(Size::new(300.0, 150.0)));
        assert_eq!(controller.original, first);
    }

    #[test]
    fn test_update_original_size_explicit_wins_over_probe() {
        let mut controller = ScaleController::default();
        controller.update_original_size(Some(Size::new(64.0, 64.0)), Some(Size::new(300.0, 150.0)));
        assert_eq!(controller.original.known(), Some((64.0, 64.0)));
    }

    #[test]
    fn test_update_original_size_without_geometry_is_a_no_op() {
        let mut controller = ScaleController::default();
        controller.update_original_size(None, None);
        assert_eq!(controller.original.known(), None);
    }

    #[test]
    fn test_rendered_width_and_height_follow_scale() {
        let mut controller = controller_with_size(200.0, 100.0);
        assert_eq!(controller.width(), Some(200.0));
        controller
            .set_scale(
                &Geometry::default(),
                ScaleRequest::Explicit(1.5),
                None,
                None,
            )
            .unwrap();
        assert_eq!(controller.width(), Some(300.0));
        assert_eq!(controller.height(), Some(150.0));
    }
}
