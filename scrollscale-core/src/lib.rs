//! Gesture-to-scale math for wheel and pinch zooming.
//!
//! Everything in this crate is pure: the host supplies bounding rectangles
//! and raw input deltas, and gets back resolved bound windows, clamped
//! scale values, and change records. No DOM types, no framework types, so
//! the whole pipeline is testable off the browser.

pub mod bounds;
pub mod controller;
pub mod geometry;
pub mod gesture;

pub use bounds::{
    clamp_scale, merge_windows, window_from_container, window_from_pixels, PixelBounds,
    ScaleBounds, ScaleWindow,
};
pub use controller::{
    Geometry, OriginalSize, ScaleChange, ScaleController, ScaleRequest, ScaleStore,
};
pub use geometry::{Point, Rect, Size};
pub use gesture::{
    pinch_distance, pinch_midpoint, PinchSession, PINCH_NOISE_RATIO, TOUCH_DELTA_MULTIPLIER,
};
