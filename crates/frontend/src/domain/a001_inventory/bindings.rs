//! Global functions called from the server-rendered inventory markup,
//! e.g. `onclick="adjustStock(42)"`.

use super::controller::InventoryPageController;
use super::model::GlooTransport;
use super::web_page::WebInventoryPage;
use crate::shared::config::InventoryConfig;
use contracts::domain::a001_inventory::ProductId;
use contracts::enums::NotificationKind;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

pub type WebController = InventoryPageController<WebInventoryPage, GlooTransport>;

thread_local! {
    static CONTROLLER: RefCell<Option<Rc<WebController>>> = const { RefCell::new(None) };
}

fn build_controller(config: InventoryConfig) -> Rc<WebController> {
    Rc::new(InventoryPageController::new(
        Rc::new(WebInventoryPage::new()),
        GlooTransport,
        config,
    ))
}

/// Creates the page controller with `config`; called once at start-up
pub fn install(config: InventoryConfig) -> Rc<WebController> {
    CONTROLLER.with(|slot| {
        let ctrl = build_controller(config);
        *slot.borrow_mut() = Some(Rc::clone(&ctrl));
        ctrl
    })
}

/// Page controller; reads the page config if `install` has not run
pub fn controller() -> Rc<WebController> {
    CONTROLLER.with(|slot| {
        slot.borrow_mut()
            .get_or_insert_with(|| build_controller(InventoryConfig::load_from_document()))
            .clone()
    })
}

/// Markup passes ids both as numbers and as strings
fn product_id_from_js(value: &JsValue) -> Option<ProductId> {
    // Strings are kept verbatim, blanks included
    if let Some(text) = value.as_string() {
        return Some(ProductId::new(text));
    }
    let number = value.as_f64()?;
    if number.is_finite() && number.fract() == 0.0 {
        Some(ProductId::new(format!("{}", number as i64)))
    } else {
        Some(ProductId::new(number.to_string()))
    }
}

fn with_product_id(value: JsValue, action: &str, f: impl FnOnce(ProductId)) {
    match product_id_from_js(&value) {
        Some(id) => f(id),
        None => log::error!("{}: invalid product id {:?}", action, value),
    }
}

#[wasm_bindgen(js_name = submitAddStock)]
pub fn submit_add_stock() {
    let ctrl = controller();
    spawn_local(async move {
        ctrl.submit_add_stock().await;
    });
}

#[wasm_bindgen(js_name = adjustStock)]
pub fn adjust_stock(product_id: JsValue) {
    with_product_id(product_id, "adjustStock", |id| {
        if let Err(e) = controller().adjust_stock(&id) {
            log::error!("Error: adjustStock({}): {}", id, e);
        }
    });
}

#[wasm_bindgen(js_name = viewHistory)]
pub fn view_history(product_id: JsValue) {
    with_product_id(product_id, "viewHistory", |id| controller().view_history(&id));
}

#[wasm_bindgen(js_name = reorderProduct)]
pub fn reorder_product(product_id: JsValue) {
    with_product_id(product_id, "reorderProduct", |id| {
        let ctrl = controller();
        spawn_local(async move {
            ctrl.reorder_product(&id).await;
        });
    });
}

#[wasm_bindgen(js_name = exportInventory)]
pub fn export_inventory() {
    controller().export_inventory();
}

#[wasm_bindgen(js_name = submitAdjustStock)]
pub fn submit_adjust_stock() {
    let ctrl = controller();
    spawn_local(async move {
        ctrl.submit_adjust_stock().await;
    });
}

#[wasm_bindgen(js_name = preventZoom)]
pub fn prevent_zoom() {
    controller().prevent_zoom();
}

#[wasm_bindgen(js_name = initTouchFriendlyStockAdjustment)]
pub fn init_touch_friendly_stock_adjustment() {
    controller().init_touch_friendly_stock_adjustment();
}

#[wasm_bindgen(js_name = openStockAdjustmentModal)]
pub fn open_stock_adjustment_modal(product_id: JsValue) {
    with_product_id(product_id, "openStockAdjustmentModal", |id| {
        if let Err(e) = controller().open_stock_adjustment_modal(&id) {
            log::error!("Error: openStockAdjustmentModal({}): {}", id, e);
        }
    });
}

#[wasm_bindgen(js_name = initResponsiveFormSubmission)]
pub fn init_responsive_form_submission() {
    controller().init_responsive_form_submission();
}

#[wasm_bindgen(js_name = showMobileNotification)]
pub fn show_mobile_notification(message: String, kind: Option<String>) {
    let kind = kind
        .as_deref()
        .map(NotificationKind::from_code)
        .unwrap_or_default();
    controller().show_mobile_notification(&message, kind);
}

#[wasm_bindgen(js_name = addMobileStyles)]
pub fn add_mobile_styles() {
    controller().add_mobile_styles();
}

#[wasm_bindgen(js_name = initMobileInventory)]
pub fn init_mobile_inventory() {
    controller().init_mobile_inventory();
}
