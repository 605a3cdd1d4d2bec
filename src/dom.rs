//! Browser-side plumbing: bounding-box probing, container resolution, and
//! the gesture listener registration the hook owns as a scoped resource.

use scrollscale_core::{Point, Rect, Size};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Element, HtmlElement, Touch, TouchEvent, TouchList, WheelEvent};

/// Which box the element is kept inside.
#[derive(Clone, Debug)]
pub enum ElementBounds {
    /// The element's parent element.
    Parent,
    /// The document root element.
    Document,
    /// A specific element.
    Element(Element),
}

fn to_rect(rect: &web_sys::DomRect) -> Rect {
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

/// Bounding box of the element, if it is mounted.
pub fn element_rect(element: Option<&HtmlElement>) -> Option<Rect> {
    element.map(|el| to_rect(&el.get_bounding_client_rect()))
}

/// Currently rendered size of the element.
pub fn rendered_size(element: Option<&HtmlElement>) -> Option<Size> {
    element_rect(element).map(|rect| Size::new(rect.width, rect.height))
}

/// Bounding box of the configured container, probed fresh on every use so
/// layout changes are always picked up.
pub fn container_rect(
    element: Option<&HtmlElement>,
    bounds: Option<&ElementBounds>,
) -> Option<Rect> {
    let target: Element = match bounds? {
        ElementBounds::Parent => element?.parent_element()?,
        ElementBounds::Document => web_sys::window()?.document()?.document_element()?,
        ElementBounds::Element(el) => el.clone(),
    };
    Some(to_rect(&target.get_bounding_client_rect()))
}

/// The two active touches of a pinch, if exactly two fingers are down.
pub fn touch_pair(touches: &TouchList) -> Option<(Touch, Touch)> {
    if touches.length() != 2 {
        return None;
    }
    Some((touches.get(0)?, touches.get(1)?))
}

/// Page coordinates, used for pinch distances.
pub fn page_point(touch: &Touch) -> Point {
    Point::new(touch.page_x() as f64, touch.page_y() as f64)
}

/// Client coordinates, used for the zoom anchor.
pub fn client_point(touch: &Touch) -> Point {
    Point::new(touch.client_x() as f64, touch.client_y() as f64)
}

/// Wheel and touch listeners registered on a catcher element.
///
/// Listeners are registered non-passive so the handlers can suppress the
/// default scroll/zoom action, and every one of them is removed again when
/// the value is dropped, whether the hook is re-attaching to a new target
/// or being cleaned up.
pub struct GestureListeners {
    target: HtmlElement,
    wheel: Closure<dyn FnMut(WheelEvent)>,
    touch_start: Closure<dyn FnMut(TouchEvent)>,
    touch_move: Closure<dyn FnMut(TouchEvent)>,
    touch_end: Closure<dyn FnMut(TouchEvent)>,
}

impl GestureListeners {
    pub fn attach(
        target: HtmlElement,
        on_wheel: impl FnMut(WheelEvent) + 'static,
        on_touch_start: impl FnMut(TouchEvent) + 'static,
        on_touch_move: impl FnMut(TouchEvent) + 'static,
        on_touch_end: impl FnMut(TouchEvent) + 'static,
    ) -> Self {
        let listeners = Self {
            target,
            wheel: Closure::wrap(Box::new(on_wheel) as Box<dyn FnMut(_)>),
            touch_start: Closure::wrap(Box::new(on_touch_start) as Box<dyn FnMut(_)>),
            touch_move: Closure::wrap(Box::new(on_touch_move) as Box<dyn FnMut(_)>),
            touch_end: Closure::wrap(Box::new(on_touch_end) as Box<dyn FnMut(_)>),
        };

        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        for (name, callback) in listeners.callbacks() {
            let _ = listeners
                .target
                .add_event_listener_with_callback_and_add_event_listener_options(
                    name,
                    callback,
                    &options,
                );
        }
        log::debug!("gesture listeners attached");
        listeners
    }

    fn callbacks(&self) -> [(&'static str, &js_sys::Function); 5] {
        [
            ("wheel", self.wheel.as_ref().unchecked_ref()),
            ("touchstart", self.touch_start.as_ref().unchecked_ref()),
            ("touchmove", self.touch_move.as_ref().unchecked_ref()),
            ("touchend", self.touch_end.as_ref().unchecked_ref()),
            ("touchcancel", self.touch_end.as_ref().unchecked_ref()),
        ]
    }
}

impl Drop for GestureListeners {
    fn drop(&mut self) {
        for (name, callback) in self.callbacks() {
            let _ = self
                .target
                .remove_event_listener_with_callback(name, callback);
        }
        log::debug!("gesture listeners detached");
    }
}
