//! Wheel-scroll and pinch-to-zoom scaling for Leptos elements.
//!
//! The math lives in `scrollscale-core`; this crate binds it to the DOM:
//! [`scale::use_scroll_scale`] drives one element's scale from wheel and
//! two-finger gestures under container, pixel, and explicit scale bounds.

pub mod components;
pub mod dom;
pub mod scale;

pub use dom::ElementBounds;
pub use scale::{use_scroll_scale, OnScaleChange, ScaleEvent, ScrollScale, ScrollScaleOptions};
pub use scrollscale_core::{
    OriginalSize, PixelBounds, Point, ScaleBounds, ScaleChange, Size,
};
