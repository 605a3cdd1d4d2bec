use std::rc::Rc;

use leptos::prelude::*;
use scrollscale_core::{PixelBounds, ScaleBounds};

use crate::dom::ElementBounds;
use crate::scale::{use_scroll_scale, OnScaleChange, ScrollScaleOptions};

#[component]
pub fn App() -> impl IntoView {
    view! {
        <div class="app">
            <h1>"scrollscale"</h1>
            <p>"Scroll or pinch inside the stage to zoom the card."</p>
            <ZoomStage />
        </div>
    }
}

#[component]
fn ZoomStage() -> impl IntoView {
    let stage_ref = NodeRef::<leptos::html::Div>::new();
    let card_ref = NodeRef::<leptos::html::Div>::new();

    let locked = RwSignal::new(false);
    let scale_bounds = RwSignal::new(ScaleBounds {
        min: Some(0.25),
        max: Some(8.0),
    });
    let pixel_bounds = RwSignal::new(PixelBounds {
        min_width: Some(40.0),
        ..Default::default()
    });

    let log_change: OnScaleChange = Rc::new(|_, change| {
        log::debug!(
            "scale -> {:.3} ({:.0}x{:.0})",
            change.scale,
            change.width,
            change.height
        );
        true
    });
    let options: ScrollScaleOptions = ScrollScaleOptions {
        catcher: Some(stage_ref),
        disabled: locked.into(),
        scale_bounds: scale_bounds.into(),
        element_bounds: Some(ElementBounds::Parent),
        pixel_bounds: pixel_bounds.into(),
        on_change: Some(log_change),
        ..Default::default()
    };
    let zoom = use_scroll_scale(card_ref, options);

    let readout = {
        let zoom = zoom.clone();
        move || {
            format!(
                "scale {:.2} (window {:.2} .. {:.2})",
                zoom.scale.get(),
                zoom.min_scale.get(),
                zoom.max_scale.get()
            )
        }
    };
    let reset = {
        let zoom = zoom.clone();
        move |_| zoom.manual_set_scale(1.0)
    };
    let reprobe = {
        let zoom = zoom.clone();
        move |_| zoom.update_original_size(None)
    };
    let style = zoom.style;

    view! {
        <div class="zoom-demo">
            <div class="toolbar">
                <span>{readout}</span>
                <button on:click=reset>"Reset"</button>
                <button on:click=reprobe>"Re-probe size"</button>
                <label>
                    <input
                        type="checkbox"
                        on:change=move |_| locked.update(|v| *v = !*v)
                    />
                    "Lock"
                </label>
            </div>
            <div
                node_ref=stage_ref
                class="stage"
                style="position: relative; overflow: hidden; width: 640px; height: 480px; border: 1px solid #666;"
            >
                <div
                    node_ref=card_ref
                    class="card"
                    style=move || format!("background: #4a7; width: 200px; height: 100px; {}", style.get())
                >
                    "zoom me"
                </div>
            </div>
        </div>
    }
}
