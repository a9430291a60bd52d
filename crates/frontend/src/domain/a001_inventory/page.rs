use crate::shared::error::ActionError;
use contracts::domain::a001_inventory::{FormFields, ProductId};
use contracts::enums::NotificationKind;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

pub const ADD_STOCK_FORM_ID: &str = "addStockForm";
pub const ADJUST_STOCK_FORM_ID: &str = "adjustStockForm";
pub const ADJUST_STOCK_MODAL_ID: &str = "adjustStockModal";
pub const ADJUST_PRODUCT_ID_INPUT_ID: &str = "adjustProductId";
pub const ADJUST_TRIGGER_SELECTOR: &str = "[data-adjust-stock]";
pub const PRODUCT_ID_ATTR: &str = "data-product-id";
pub const AJAX_FORM_SELECTOR: &str = "form[data-ajax-submit]";
pub const MOBILE_STYLES_ID: &str = "mobile-inventory-styles";

pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Form the controller reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormRef {
    /// Form looked up by element id
    ById(&'static str),
    /// n-th `form[data-ajax-submit]` bound by `bind_ajax_forms`
    Ajax(usize),
}

/// Inputs that receive a product id before the adjust modal opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductIdField {
    /// `input[name="product_id"]` inside `#adjustStockForm`
    AdjustForm,
    /// `#adjustProductId`
    AdjustInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    TouchStart,
    Click,
}

pub type NotificationId = u64;

/// Called with the trigger kind and the element's product id;
/// returns whether the event's default action must be suppressed.
pub type AdjustTriggerHandler = Rc<dyn Fn(TriggerKind, Option<ProductId>) -> bool>;

pub type AjaxSubmitHandler = Rc<dyn Fn(FormRef)>;

/// Every browser effect the inventory controller performs.
///
/// The web implementation is [`super::WebInventoryPage`]; tests use an
/// in-memory fake.
pub trait InventoryPage {
    /// `content` of `<meta name="{meta_name}">`
    fn csrf_token(&self, meta_name: &str) -> Option<String>;

    fn read_form(&self, form: FormRef) -> Result<FormFields, ActionError>;

    /// `action` attribute of the form
    fn form_action(&self, form: FormRef) -> Option<String>;

    /// Disables or re-enables the form's submit controls
    fn set_form_busy(&self, form: FormRef, busy: bool);

    /// Writes the id into the field; `false` when the field is absent
    fn set_product_id(&self, field: ProductIdField, product_id: &ProductId) -> bool;

    /// Shows `#adjustStockModal`. Showing an already open modal is a no-op.
    fn show_adjust_modal(&self) -> Result<(), ActionError>;

    /// Blocking user-facing message
    fn alert(&self, message: &str);

    fn reload(&self);

    fn navigate(&self, path: &str);

    /// Rewrites the viewport meta tag; `false` when the page has none
    fn set_viewport(&self, content: &str) -> bool;

    /// Adds a `<style id=..>` block unless one with that id exists
    fn inject_stylesheet(&self, id: &str, css: &str) -> bool;

    fn append_notification(&self, message: &str, kind: NotificationKind) -> NotificationId;

    fn hide_notification(&self, id: NotificationId);

    fn remove_notification(&self, id: NotificationId);

    /// Binds `touchstart` and `click` on every adjust trigger; returns how many
    fn bind_adjust_triggers(&self, handler: AdjustTriggerHandler) -> usize;

    /// Intercepts `submit` on every AJAX form; returns how many
    fn bind_ajax_forms(&self, handler: AjaxSubmitHandler) -> usize;

    fn sleep(&self, ms: u32) -> LocalTask;

    fn spawn(&self, task: LocalTask);
}
