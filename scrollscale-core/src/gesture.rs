//! Pinch gesture interpretation.
//!
//! A two-finger gesture is tracked as the distance between the touch
//! points. Each move turns the distance ratio into a signed delta shaped
//! like a wheel delta (positive = zoom out), so the controller treats both
//! input kinds identically.

use crate::geometry::Point;

/// Touch deltas are far smaller than wheel deltas per event; this factor
/// brings a pinch step into the range the wheel path produces.
pub const TOUCH_DELTA_MULTIPLIER: f64 = 4.0;

/// Distance ratios at or below this are treated as noise, e.g. a finger
/// briefly lifting mid-gesture, rather than a real pinch step.
pub const PINCH_NOISE_RATIO: f64 = 0.5;

/// Euclidean distance between the two touch points.
pub fn pinch_distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Midpoint of the two touch points, the anchor of a pinch zoom.
pub fn pinch_midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Live two-finger gesture: the distance observed on the previous event.
///
/// Created when a second finger lands, fed each move, discarded when the
/// touch count drops below two.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchSession {
    distance: f64,
}

impl PinchSession {
    pub fn begin(distance: f64) -> Self {
        Self { distance }
    }

    /// Feed the distance from the next two-finger move and return the
    /// wheel-shaped delta, or `None` when the move is suppressed (no
    /// motion, or the ratio collapsed past [`PINCH_NOISE_RATIO`]).
    ///
    /// The stored distance advances on every move, suppressed or not, so
    /// the next ratio is always measured against the latest geometry.
    pub fn advance(&mut self, current: f64) -> Option<f64> {
        let previous = self.distance;
        let ratio = current / previous;
        // Fingers moving apart means zoom in, which is a negative delta
        // downstream, same as wheel-up.
        let sign = if current <= previous { 1.0 } else { -1.0 };
        self.distance = current;

        if current == previous || ratio <= PINCH_NOISE_RATIO {
            log::trace!("pinch move suppressed (ratio {ratio})");
            return None;
        }
        Some(ratio * sign * TOUCH_DELTA_MULTIPLIER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinch_distance_is_euclidean() {
        let d = pinch_distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert_eq!(d, 5.0);
    }

    #[test]
    fn test_pinch_midpoint() {
        let m = pinch_midpoint(Point::new(10.0, 20.0), Point::new(30.0, 60.0));
        assert_eq!(m, Point::new(20.0, 40.0));
    }

    #[test]
    fn test_spread_emits_negative_delta() {
        let mut session = PinchSession::begin(100.0);
        // Fingers spread to 1.5x: zoom in.
        let delta = session.advance(150.0).unwrap();
        assert_eq!(delta, 1.5 * -1.0 * TOUCH_DELTA_MULTIPLIER);
    }

    #[test]
    fn test_contract_emits_positive_delta() {
        let mut session = PinchSession::begin(100.0);
        let delta = session.advance(90.0).unwrap();
        assert_eq!(delta, 0.9 * TOUCH_DELTA_MULTIPLIER);
    }

    #[test]
    fn test_no_motion_is_suppressed() {
        let mut session = PinchSession::begin(100.0);
        assert_eq!(session.advance(100.0), None);
    }

    #[test]
    fn test_collapse_below_noise_ratio_is_suppressed() {
        let mut session = PinchSession::begin(100.0);
        assert_eq!(session.advance(30.0), None);
    }

    #[test]
    fn test_boundary_ratio_is_suppressed() {
        let mut session = PinchSession::begin(100.0);
        assert_eq!(session.advance(50.0), None);
    }

    #[test]
    fn test_distance_advances_even_when_suppressed() {
        let mut session = PinchSession::begin(100.0);
        assert_eq!(session.advance(30.0), None);
        // Next ratio is measured against 30, not 100.
        let delta = session.advance(27.0).unwrap();
        assert_eq!(delta, 0.9 * TOUCH_DELTA_MULTIPLIER);
    }
}
