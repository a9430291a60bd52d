use super::page::{
    AdjustTriggerHandler, AjaxSubmitHandler, FormRef, InventoryPage, LocalTask, NotificationId,
    ProductIdField, TriggerKind, ADJUST_PRODUCT_ID_INPUT_ID, ADJUST_STOCK_FORM_ID,
    ADJUST_STOCK_MODAL_ID, ADJUST_TRIGGER_SELECTOR, AJAX_FORM_SELECTOR, PRODUCT_ID_ATTR,
};
use super::ui::notification::MobileNotification;
use crate::shared::error::ActionError;
use contracts::domain::a001_inventory::form_fields::FIELD_PRODUCT_ID;
use contracts::domain::a001_inventory::{FormFields, ProductId};
use contracts::enums::NotificationKind;
use gloo_timers::future::TimeoutFuture;
use js_sys::{Array, Function, Reflect};
use leptos::prelude::*;
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, FormData, HtmlFormElement, HtmlInputElement};

const SUBMIT_CONTROLS: &str = "button[type=\"submit\"], input[type=\"submit\"]";

struct MountedNotification {
    hidden: RwSignal<bool>,
    // Unmounts the toast when dropped
    _handle: Box<dyn Any>,
}

/// [`InventoryPage`] over the live document
#[derive(Default)]
pub struct WebInventoryPage {
    ajax_forms: RefCell<Vec<HtmlFormElement>>,
    notifications: RefCell<HashMap<NotificationId, MountedNotification>>,
    next_notification: Cell<NotificationId>,
}

impl WebInventoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    fn document(&self) -> Option<Document> {
        web_sys::window()?.document()
    }

    fn form_element(&self, form: FormRef) -> Result<HtmlFormElement, ActionError> {
        match form {
            FormRef::ById(id) => self
                .document()
                .and_then(|d| d.get_element_by_id(id))
                .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
                .ok_or_else(|| ActionError::missing(format!("form#{}", id))),
            FormRef::Ajax(index) => self
                .ajax_forms
                .borrow()
                .get(index)
                .cloned()
                .ok_or_else(|| ActionError::missing(format!("ajax form #{}", index))),
        }
    }

    fn product_id_input(&self, field: ProductIdField) -> Option<HtmlInputElement> {
        let document = self.document()?;
        let element = match field {
            ProductIdField::AdjustForm => document
                .get_element_by_id(ADJUST_STOCK_FORM_ID)?
                .query_selector(&format!("input[name=\"{}\"]", FIELD_PRODUCT_ID))
                .ok()??,
            ProductIdField::AdjustInput => document.get_element_by_id(ADJUST_PRODUCT_ID_INPUT_ID)?,
        };
        element.dyn_into::<HtmlInputElement>().ok()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Some(list) = self
            .document()
            .and_then(|d| d.query_selector_all(selector).ok())
        else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

/// `bootstrap.Modal.getOrCreateInstance(el).show()`
fn show_bootstrap_modal(element: &Element) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let bootstrap = Reflect::get(&window, &JsValue::from_str("bootstrap"))?;
    let modal = Reflect::get(&bootstrap, &JsValue::from_str("Modal"))?;
    let get_or_create: Function =
        Reflect::get(&modal, &JsValue::from_str("getOrCreateInstance"))?.dyn_into()?;
    let instance = get_or_create.call1(&modal, element)?;
    let show: Function = Reflect::get(&instance, &JsValue::from_str("show"))?.dyn_into()?;
    show.call0(&instance)?;
    Ok(())
}

fn read_form_data(form: &HtmlFormElement) -> Result<FormFields, ActionError> {
    let data = FormData::new_with_form(form).map_err(ActionError::js)?;
    let entries = js_sys::try_iter(&data)
        .map_err(ActionError::js)?
        .ok_or_else(|| ActionError::Decode("FormData is not iterable".to_string()))?;

    let mut fields = FormFields::new();
    for entry in entries {
        let pair: Array = entry.map_err(ActionError::js)?.dyn_into().map_err(ActionError::js)?;
        // File inputs have no string value
        if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            fields.push(name, value);
        }
    }
    Ok(fields)
}

fn listen(element: &Element, event: &str, callback: impl FnMut(Event) + 'static) {
    let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Event)>);
    if element
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn!("Failed to bind {} listener", event);
    }
    // Listeners live as long as the page
    closure.forget();
}

impl InventoryPage for WebInventoryPage {
    fn csrf_token(&self, meta_name: &str) -> Option<String> {
        self.document()?
            .query_selector(&format!("meta[name=\"{}\"]", meta_name))
            .ok()??
            .get_attribute("content")
    }

    fn read_form(&self, form: FormRef) -> Result<FormFields, ActionError> {
        read_form_data(&self.form_element(form)?)
    }

    fn form_action(&self, form: FormRef) -> Option<String> {
        self.form_element(form).ok()?.get_attribute("action")
    }

    fn set_form_busy(&self, form: FormRef, busy: bool) {
        let Ok(form) = self.form_element(form) else {
            return;
        };
        let _ = form.set_attribute("aria-busy", if busy { "true" } else { "false" });
        let Ok(controls) = form.query_selector_all(SUBMIT_CONTROLS) else {
            return;
        };
        for control in (0..controls.length())
            .filter_map(|i| controls.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
        {
            let _ = if busy {
                control.set_attribute("disabled", "")
            } else {
                control.remove_attribute("disabled")
            };
        }
    }

    fn set_product_id(&self, field: ProductIdField, product_id: &ProductId) -> bool {
        match self.product_id_input(field) {
            Some(input) => {
                input.set_value(product_id.as_str());
                true
            }
            None => false,
        }
    }

    fn show_adjust_modal(&self) -> Result<(), ActionError> {
        let modal = self
            .document()
            .and_then(|d| d.get_element_by_id(ADJUST_STOCK_MODAL_ID))
            .ok_or_else(|| ActionError::missing(format!("#{}", ADJUST_STOCK_MODAL_ID)))?;
        show_bootstrap_modal(&modal).map_err(ActionError::js)
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn reload(&self) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().reload() {
                log::error!("Reload failed: {:?}", e);
            }
        }
    }

    fn navigate(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(path) {
                log::error!("Navigation to {} failed: {:?}", path, e);
            }
        }
    }

    fn set_viewport(&self, content: &str) -> bool {
        let meta = self
            .document()
            .and_then(|d| d.query_selector("meta[name=\"viewport\"]").ok().flatten());
        match meta {
            Some(meta) => meta.set_attribute("content", content).is_ok(),
            None => false,
        }
    }

    fn inject_stylesheet(&self, id: &str, css: &str) -> bool {
        let Some(document) = self.document() else {
            return false;
        };
        if document.get_element_by_id(id).is_some() {
            return false;
        }
        let (Some(head), Ok(style)) = (document.head(), document.create_element("style")) else {
            return false;
        };
        style.set_id(id);
        style.set_text_content(Some(css));
        head.append_child(&style).is_ok()
    }

    fn append_notification(&self, message: &str, kind: NotificationKind) -> NotificationId {
        let id = self.next_notification.get() + 1;
        self.next_notification.set(id);

        let Some(body) = self.document().and_then(|d| d.body()) else {
            log::warn!("No <body> for notification: {}", message);
            return id;
        };

        let hidden = RwSignal::new(false);
        let message = message.to_string();
        let handle = leptos::mount::mount_to(body, move || {
            view! { <MobileNotification message=message kind=kind hidden=hidden /> }
        });

        self.notifications.borrow_mut().insert(
            id,
            MountedNotification {
                hidden,
                _handle: Box::new(handle),
            },
        );
        id
    }

    fn hide_notification(&self, id: NotificationId) {
        if let Some(entry) = self.notifications.borrow().get(&id) {
            entry.hidden.set(true);
        }
    }

    fn remove_notification(&self, id: NotificationId) {
        let removed = self.notifications.borrow_mut().remove(&id);
        if let Some(entry) = removed {
            let hidden = entry.hidden;
            drop(entry);
            hidden.dispose();
        }
    }

    fn bind_adjust_triggers(&self, handler: AdjustTriggerHandler) -> usize {
        let triggers = self.query_all(ADJUST_TRIGGER_SELECTOR);
        for element in &triggers {
            for kind in [TriggerKind::TouchStart, TriggerKind::Click] {
                let handler = handler.clone();
                let target = element.clone();
                let event_name = match kind {
                    TriggerKind::TouchStart => "touchstart",
                    TriggerKind::Click => "click",
                };
                listen(element, event_name, move |event: Event| {
                    // Read at event time, the attribute may change after binding
                    let product_id = target.get_attribute(PRODUCT_ID_ATTR).map(ProductId::new);
                    if handler(kind, product_id) {
                        event.prevent_default();
                    }
                });
            }
        }
        triggers.len()
    }

    fn bind_ajax_forms(&self, handler: AjaxSubmitHandler) -> usize {
        let forms: Vec<HtmlFormElement> = self
            .query_all(AJAX_FORM_SELECTOR)
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlFormElement>().ok())
            .collect();

        let mut registry = self.ajax_forms.borrow_mut();
        for form in &forms {
            let form_ref = FormRef::Ajax(registry.len());
            registry.push(form.clone());
            let handler = handler.clone();
            listen(form, "submit", move |event: Event| {
                event.prevent_default();
                handler(form_ref);
            });
        }
        forms.len()
    }

    fn sleep(&self, ms: u32) -> LocalTask {
        Box::pin(TimeoutFuture::new(ms))
    }

    fn spawn(&self, task: LocalTask) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
