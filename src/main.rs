use leptos::prelude::*;
use scrollscale::components::app::App;

fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("could not initialize logger");
    log::info!("scrollscale demo starting");
    leptos::mount::mount_to_body(|| view! { <App /> });
}
