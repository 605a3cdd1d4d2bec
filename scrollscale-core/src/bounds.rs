//! Scale bound windows and their priority merge.
//!
//! Three independent sources can constrain the scale factor: the container
//! the element must stay inside, absolute pixel limits on the rendered
//! size, and an explicitly configured min/max. Each source yields a
//! [`ScaleWindow`]; [`merge_windows`] folds them into the one effective
//! range the controller clamps against.
//!
//! `None` always means "unbounded on this side". A source that is missing
//! an input (no geometry yet, zero dimension) yields a fully unbounded
//! window rather than an accidental zero constraint.

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Admissible scale range from a single constraint source.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScaleWindow {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ScaleWindow {
    pub const UNBOUNDED: ScaleWindow = ScaleWindow {
        min: None,
        max: None,
    };

    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }
}

/// Explicit scale-factor limits supplied by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ScaleBounds {
    pub fn window(&self) -> ScaleWindow {
        ScaleWindow::new(self.min, self.max)
    }
}

/// Absolute limits on the rendered size, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelBounds {
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
    pub max_width: Option<f64>,
    pub max_height: Option<f64>,
}

/// Window keeping the element inside its container: scale 0 up to whatever
/// still fits between the element's offset and the container's far edges.
pub fn window_from_container(
    element: Option<&Rect>,
    container: Option<&Rect>,
    width: Option<f64>,
    height: Option<f64>,
) -> ScaleWindow {
    let (Some(element), Some(container)) = (element, container) else {
        return ScaleWindow::UNBOUNDED;
    };
    let (Some(width), Some(height)) = (width, height) else {
        return ScaleWindow::UNBOUNDED;
    };
    if width == 0.0 || height == 0.0 {
        return ScaleWindow::UNBOUNDED;
    }

    let offset = element.offset_within(container);
    let max = ((container.height - offset.y) / height).min((container.width - offset.x) / width);

    ScaleWindow::new(Some(0.0), Some(max))
}

/// Window derived from pixel limits. Each limit divided by its dimension is
/// a candidate; the min side keeps the smaller candidate and the max side
/// the larger one, with unset candidates ignored rather than treated as 0.
pub fn window_from_pixels(
    bounds: &PixelBounds,
    width: Option<f64>,
    height: Option<f64>,
) -> ScaleWindow {
    let (Some(width), Some(height)) = (width, height) else {
        return ScaleWindow::UNBOUNDED;
    };
    if width == 0.0 || height == 0.0 {
        return ScaleWindow::UNBOUNDED;
    }

    let min_height = bounds.min_height.map(|limit| limit / height);
    let min_width = bounds.min_width.map(|limit| limit / width);
    let max_height = bounds.max_height.map(|limit| limit / height);
    let max_width = bounds.max_width.map(|limit| limit / width);

    ScaleWindow::new(
        combine(min_height, min_width, f64::min),
        combine(max_height, max_width, f64::max),
    )
}

fn combine(a: Option<f64>, b: Option<f64>, pick: fn(f64, f64) -> f64) -> Option<f64> {
    match (a, b) {
        (None, None) => None,
        (Some(v), None) | (None, Some(v)) => Some(v),
        (Some(a), Some(b)) => Some(pick(a, b)),
    }
}

/// Fold the three source windows into the effective `(min, max)` pair.
/// Effective min is the largest of the mins (`None` = 0); effective max is
/// the smallest of the usable maxes (`None` = unbounded).
pub fn merge_windows(
    pixels: ScaleWindow,
    container: ScaleWindow,
    explicit: ScaleWindow,
) -> (f64, f64) {
    let min = pixels
        .min
        .unwrap_or(0.0)
        .max(container.min.unwrap_or(0.0))
        .max(explicit.min.unwrap_or(0.0));

    let max = usable_max(pixels.max)
        .min(usable_max(container.max))
        .min(usable_max(explicit.max));
    let max = if max == 0.0 { f64::INFINITY } else { max };

    (min, max)
}

// A max of 0, NaN, or -inf cannot act as an upper bound; treat it as absent.
fn usable_max(bound: Option<f64>) -> f64 {
    match bound {
        Some(v) if v != 0.0 && !v.is_nan() && v != f64::NEG_INFINITY => v,
        _ => f64::INFINITY,
    }
}

/// Clamp with the upper bound applied last, so an inverted window (min
/// above max, from conflicting sources) resolves to its max instead of
/// panicking the way `f64::clamp` would.
pub fn clamp_scale(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}
