pub mod domain;
pub mod shared;

use crate::shared::config::InventoryConfig;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsCast;

#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    // Read after logger init so a malformed config is reported
    let config = InventoryConfig::load_from_document();
    log::set_max_level(config.log_level().to_level_filter());
    domain::a001_inventory::bindings::install(config);

    run_when_dom_ready(domain::a001_inventory::bindings::init_mobile_inventory);
}

/// Runs `f` on `DOMContentLoaded`, or right away if the document is parsed
fn run_when_dom_ready(f: fn()) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.ready_state() != "loading" {
        f();
        return;
    }

    let closure = Closure::once(move || f());
    if document
        .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref())
        .is_err()
    {
        log::error!("Failed to wait for DOMContentLoaded");
    }
    closure.forget();
}
