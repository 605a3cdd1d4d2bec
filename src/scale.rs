//! The `use_scroll_scale` hook: wheel and pinch zooming for one element.
//!
//! The hook owns the gesture listeners, the pinch session, and (unless the
//! caller supplies the scale) the scale value itself. All math lives in
//! `scrollscale-core`; this module feeds it geometry probed from the DOM
//! and writes the results back into signals.

use std::rc::Rc;

use leptos::html::{Div, ElementType};
use leptos::prelude::*;
use scrollscale_core::{
    pinch_distance, pinch_midpoint, Geometry, OriginalSize, PinchSession, PixelBounds, Point,
    ScaleBounds, ScaleChange, ScaleController, ScaleRequest, ScaleStore, Size,
};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, TouchEvent, WheelEvent};

use crate::dom::{
    client_point, container_rect, element_rect, page_point, rendered_size, touch_pair,
    ElementBounds, GestureListeners,
};

/// The platform event behind a change attempt, handed to the veto callback
/// next to the change record.
#[derive(Clone, Debug)]
pub enum ScaleEvent {
    Wheel(WheelEvent),
    Touch(TouchEvent),
    /// Programmatic call with no triggering event.
    Manual,
}

/// Veto callback: observe the proposed change, return `false` to reject it.
pub type OnScaleChange = Rc<dyn Fn(ScaleEvent, &ScaleChange) -> bool>;

pub struct ScrollScaleOptions<C = Div>
where
    C: ElementType,
    C::Output: JsCast + Clone + 'static,
{
    /// Element the gesture listeners attach to. Falls back to the scaled
    /// element itself, so a larger hit area is opt-in.
    pub catcher: Option<NodeRef<C>>,
    /// Externally-owned scale. `Some` turns the hook into a pure
    /// calculator that never stores the value; accepted changes are
    /// reported through `on_change` and must be fed back via this signal.
    pub scale: Option<Signal<f64>>,
    /// Sensitivity multiplier for gesture deltas.
    pub speed: f64,
    /// Gestures still swallow their default action, but change nothing.
    pub disabled: Signal<bool>,
    pub scale_bounds: Signal<ScaleBounds>,
    pub element_bounds: Option<ElementBounds>,
    pub pixel_bounds: Signal<PixelBounds>,
    pub on_change: Option<OnScaleChange>,
}

impl<C> Default for ScrollScaleOptions<C>
where
    C: ElementType,
    C::Output: JsCast + Clone + 'static,
{
    fn default() -> Self {
        Self {
            catcher: None,
            scale: None,
            speed: 1.0,
            disabled: RwSignal::new(false).into(),
            scale_bounds: RwSignal::new(ScaleBounds::default()).into(),
            element_bounds: None,
            pixel_bounds: RwSignal::new(PixelBounds::default()).into(),
            on_change: None,
        }
    }
}

/// Everything the caller reads back from the hook.
#[derive(Clone)]
pub struct ScrollScale {
    pub scale: Signal<f64>,
    /// Inline style pinning the rendered size; empty until the natural
    /// size is known.
    pub style: Signal<String>,
    pub width: Signal<Option<f64>>,
    pub height: Signal<Option<f64>>,
    /// Resolved lower edge of the effective scale window.
    pub min_scale: Signal<f64>,
    /// Resolved upper edge of the effective scale window.
    pub max_scale: Signal<f64>,
    pub original_size: Signal<OriginalSize>,
    manual_set: Rc<dyn Fn(f64)>,
    update_size: Rc<dyn Fn(Option<Size>)>,
}

impl ScrollScale {
    /// Set the scale directly, bypassing gesture math but not the bounds
    /// window or the veto callback.
    pub fn manual_set_scale(&self, scale: f64) {
        (self.manual_set)(scale);
    }

    /// Replace the natural size, or re-probe it from the rendered
    /// geometry when called without one.
    pub fn update_original_size(&self, size: Option<Size>) {
        (self.update_size)(size);
    }
}

fn node_element<E>(node: NodeRef<E>) -> Option<HtmlElement>
where
    E: ElementType,
    E::Output: JsCast + Clone + 'static,
{
    node.get_untracked().map(|el| el.unchecked_into())
}

fn style_attr(width: f64, height: f64) -> String {
    format!("height: {height}px; width: {width}px;")
}

pub fn use_scroll_scale<E, C>(element: NodeRef<E>, options: ScrollScaleOptions<C>) -> ScrollScale
where
    E: ElementType + 'static,
    E::Output: JsCast + Clone + 'static,
    C: ElementType + 'static,
    C::Output: JsCast + Clone + 'static,
{
    let ScrollScaleOptions {
        catcher,
        scale: scale_prop,
        speed,
        disabled,
        scale_bounds,
        element_bounds,
        pixel_bounds,
        on_change,
    } = options;

    let external = scale_prop.is_some();
    let scale_state = RwSignal::new(1.0f64);
    let scale: Signal<f64> = scale_prop.unwrap_or_else(|| scale_state.into());

    let original_size = RwSignal::new(OriginalSize::default());
    let pinch: RwSignal<Option<PinchSession>> = RwSignal::new(None);
    let window = RwSignal::new((0.0f64, f64::INFINITY));

    let make_controller = move || ScaleController {
        store: if external {
            ScaleStore::External(scale.get_untracked())
        } else {
            ScaleStore::Internal(scale.get_untracked())
        },
        original: original_size.get_untracked(),
        speed,
        scale_bounds: scale_bounds.get_untracked(),
        pixel_bounds: pixel_bounds.get_untracked(),
    };

    let probe_geometry = move || {
        let el = node_element(element);
        Geometry {
            element: element_rect(el.as_ref()),
            container: container_rect(el.as_ref(), element_bounds.as_ref()),
        }
    };

    // One change request, from any input path: clamp, consult the veto
    // callback, commit (self-owned mode only), refresh the window surface.
    let apply = {
        let probe_geometry = probe_geometry.clone();
        move |event: ScaleEvent, request: ScaleRequest, anchor: Option<Point>| {
            let mut controller = make_controller();
            let geometry = probe_geometry();
            let accepted = match &on_change {
                Some(callback) => {
                    let veto = |change: &ScaleChange| callback(event.clone(), change);
                    controller.set_scale(&geometry, request, anchor, Some(&veto))
                }
                None => controller.set_scale(&geometry, request, anchor, None),
            };
            if accepted.is_some() && !external {
                scale_state.set(controller.scale());
            }
            window.set(controller.effective_window(&geometry));
        }
    };

    let update_original = {
        let probe_geometry = probe_geometry.clone();
        move |size: Option<Size>| {
            let mut controller = make_controller();
            let rendered = rendered_size(node_element(element).as_ref());
            controller.update_original_size(size, rendered);
            original_size.set(controller.original);
            window.set(controller.effective_window(&probe_geometry()));
        }
    };

    let on_wheel = {
        let apply = apply.clone();
        move |ev: WheelEvent| {
            ev.prevent_default();
            if disabled.get_untracked() {
                return;
            }
            let Some(el) = node_element(element) else {
                return;
            };
            let rect = el.get_bounding_client_rect();
            let anchor = Point::new(
                ev.client_x() as f64 - rect.left(),
                ev.client_y() as f64 - rect.top(),
            );
            let delta = ev.delta_y();
            apply(ScaleEvent::Wheel(ev), ScaleRequest::Gesture { delta }, Some(anchor));
        }
    };

    let on_touch_start = move |ev: TouchEvent| {
        if let Some((a, b)) = touch_pair(&ev.touches()) {
            ev.prevent_default();
            let distance = pinch_distance(page_point(&a), page_point(&b));
            pinch.set(Some(PinchSession::begin(distance)));
        }
    };

    let on_touch_move = {
        let apply = apply.clone();
        move |ev: TouchEvent| {
            let Some((a, b)) = touch_pair(&ev.touches()) else {
                return;
            };
            ev.prevent_default();
            if disabled.get_untracked() {
                return;
            }
            let Some(mut session) = pinch.get_untracked() else {
                return;
            };
            let delta = session.advance(pinch_distance(page_point(&a), page_point(&b)));
            pinch.set(Some(session));
            let Some(delta) = delta else {
                return;
            };
            let Some(el) = node_element(element) else {
                return;
            };
            let rect = el.get_bounding_client_rect();
            let mid = pinch_midpoint(client_point(&a), client_point(&b));
            let anchor = Point::new(mid.x - rect.left(), mid.y - rect.top());
            apply(ScaleEvent::Touch(ev), ScaleRequest::Gesture { delta }, Some(anchor));
        }
    };

    let on_touch_end = move |ev: TouchEvent| {
        if ev.touches().length() < 2 {
            pinch.set(None);
        }
    };

    // Gesture listeners follow the catcher element: detach from the old
    // target, attach to the new one, release on teardown.
    let listeners = StoredValue::new_local(None::<GestureListeners>);
    Effect::new(move || {
        let target: Option<HtmlElement> = catcher
            .and_then(|node| node.get().map(|el| el.unchecked_into()))
            .or_else(|| element.get().map(|el| el.unchecked_into()));
        listeners.set_value(None);
        if let Some(target) = target {
            listeners.set_value(Some(GestureListeners::attach(
                target,
                on_wheel.clone(),
                on_touch_start.clone(),
                on_touch_move.clone(),
                on_touch_end.clone(),
            )));
        }
    });
    on_cleanup(move || listeners.set_value(None));

    // Recover the natural size once the element shows up, unless it was
    // already established.
    {
        let update_original = update_original.clone();
        Effect::new(move || {
            if element.get().is_none() {
                return;
            }
            if original_size.get_untracked().known().is_none() {
                update_original(None);
            }
        });
    }

    // Keep the resolved window fresh when bounds configuration, natural
    // size, or scale change.
    {
        let probe_geometry = probe_geometry.clone();
        Effect::new(move || {
            scale_bounds.track();
            pixel_bounds.track();
            original_size.track();
            scale.track();
            let controller = make_controller();
            window.set(controller.effective_window(&probe_geometry()));
        });
    }

    let style = Signal::derive(move || match original_size.get().known() {
        Some((w, h)) => {
            let s = scale.get();
            style_attr(w * s, h * s)
        }
        None => String::new(),
    });
    let width = Signal::derive(move || {
        original_size.get().known().map(|(w, _)| w * scale.get())
    });
    let height = Signal::derive(move || {
        original_size.get().known().map(|(_, h)| h * scale.get())
    });
    let min_scale = Signal::derive(move || window.get().0);
    let max_scale = Signal::derive(move || window.get().1);

    ScrollScale {
        scale,
        style,
        width,
        height,
        min_scale,
        max_scale,
        original_size: original_size.into(),
        manual_set: Rc::new({
            let apply = apply.clone();
            move |scale| apply(ScaleEvent::Manual, ScaleRequest::Explicit(scale), None)
        }),
        update_size: Rc::new(update_original),
    }
}
