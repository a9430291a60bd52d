//! Touch and small-screen support for the inventory page

use super::controller::{ActionKey, ActionOutcome, InventoryPageController};
use super::model::InventoryTransport;
use super::page::{
    FormRef, InventoryPage, NotificationId, ProductIdField, TriggerKind, MOBILE_STYLES_ID,
};
use super::ui::styles::MOBILE_STYLES;
use crate::shared::api_utils::{OutboundRequest, RequestBody, REQUESTED_WITH_HEADER, REQUESTED_WITH_XHR};
use crate::shared::error::ActionError;
use contracts::domain::a001_inventory::{ApiEnvelope, ProductId};
use contracts::enums::NotificationKind;
use std::rc::Rc;

pub const AJAX_SUCCESS: &str = "Stock updated successfully";
pub const AJAX_FAILURE_FALLBACK: &str = "Error updating stock";
pub const AJAX_NETWORK_ERROR: &str = "Network error. Please try again.";

impl<P, T> InventoryPageController<P, T>
where
    P: InventoryPage + 'static,
    T: InventoryTransport + 'static,
{
    /// Disables pinch-zoom so iOS does not zoom on input focus
    pub fn prevent_zoom(&self) -> bool {
        self.page.set_viewport(&self.config.viewport_content)
    }

    /// Binds every `[data-adjust-stock]` element for touch and pointer input
    pub fn init_touch_friendly_stock_adjustment(self: &Rc<Self>) -> usize {
        let this = Rc::downgrade(self);
        self.page.bind_adjust_triggers(Rc::new(move |kind: TriggerKind, product_id: Option<ProductId>| {
            if let Some(this) = this.upgrade() {
                this.on_adjust_trigger(kind, product_id);
            }
            kind == TriggerKind::TouchStart
        }))
    }

    /// `touchstart` and `click` land here; both open the same modal, so a
    /// device that fires both ends in the same state as one that fires once.
    pub fn on_adjust_trigger(&self, kind: TriggerKind, product_id: Option<ProductId>) {
        let Some(product_id) = product_id else {
            log::warn!("{:?} on adjust trigger without data-product-id", kind);
            return;
        };
        if let Err(e) = self.open_stock_adjustment_modal(&product_id) {
            log::error!("Error: cannot open stock adjustment: {}", e);
        }
    }

    /// Writes `product_id` into `#adjustProductId` (when present) and shows the modal
    pub fn open_stock_adjustment_modal(&self, product_id: &ProductId) -> Result<(), ActionError> {
        if !self
            .page
            .set_product_id(ProductIdField::AdjustInput, product_id)
        {
            log::debug!("No #adjustProductId on page, opening modal without it");
        }
        self.page.show_adjust_modal()
    }

    /// Intercepts every `form[data-ajax-submit]` and submits it in the background
    pub fn init_responsive_form_submission(self: &Rc<Self>) -> usize {
        let this = Rc::downgrade(self);
        self.page.bind_ajax_forms(Rc::new(move |form: FormRef| {
            let Some(this) = this.upgrade() else {
                return;
            };
            let task_owner = Rc::clone(&this);
            this.page.spawn(Box::pin(async move {
                task_owner.submit_ajax_form(form).await;
            }));
        }))
    }

    /// Background submit of a progressive-enhancement form, reported by toast
    pub async fn submit_ajax_form(&self, form: FormRef) -> ActionOutcome {
        let Some(_guard) = self.begin(ActionKey::AjaxForm(form), Some(form)) else {
            return ActionOutcome::Skipped;
        };

        let result = match self.page.read_form(form) {
            Ok(fields) => match self.page.form_action(form).filter(|a| !a.trim().is_empty()) {
                Some(url) => {
                    let request = OutboundRequest::post(url, RequestBody::Form(fields))
                        .header(REQUESTED_WITH_HEADER, REQUESTED_WITH_XHR);
                    log::debug!("POST {} (ajax form)", request.url);
                    self.transport.post(request).await
                }
                None => Err(ActionError::missing("form action")),
            },
            Err(e) => Err(e),
        };

        self.report_by_notification(result)
    }

    fn report_by_notification(&self, result: Result<ApiEnvelope, ActionError>) -> ActionOutcome {
        match result {
            Ok(envelope) if envelope.success => {
                self.show_mobile_notification(AJAX_SUCCESS, NotificationKind::Success);
                self.page.reload();
                ActionOutcome::Succeeded
            }
            Ok(envelope) => {
                let message = envelope.message_or(AJAX_FAILURE_FALLBACK).to_string();
                self.show_mobile_notification(&message, NotificationKind::Error);
                ActionOutcome::Rejected(message)
            }
            Err(e) => {
                log::error!("Error: ajax form submit failed: {}", e);
                self.show_mobile_notification(AJAX_NETWORK_ERROR, NotificationKind::Error);
                ActionOutcome::Failed(e)
            }
        }
    }

    /// Shows a toast that fades after the visible window and is then removed.
    ///
    /// Returns immediately; the lifecycle runs as a spawned task.
    pub fn show_mobile_notification(&self, message: &str, kind: NotificationKind) -> NotificationId {
        let id = self.page.append_notification(message, kind);
        let page = Rc::clone(&self.page);
        let visible_ms = self.config.notification_visible_ms;
        let fade_ms = self.config.notification_fade_ms;

        self.page.spawn(Box::pin(async move {
            page.sleep(visible_ms).await;
            page.hide_notification(id);
            page.sleep(fade_ms).await;
            page.remove_notification(id);
        }));
        id
    }

    /// Injects the notification stylesheet; later calls are no-ops
    pub fn add_mobile_styles(&self) -> bool {
        if self.styles_injected.replace(true) {
            return false;
        }
        self.page.inject_stylesheet(MOBILE_STYLES_ID, MOBILE_STYLES)
    }

    pub fn init_mobile_inventory(self: &Rc<Self>) {
        self.prevent_zoom();
        let triggers = self.init_touch_friendly_stock_adjustment();
        let forms = self.init_responsive_form_submission();
        self.add_mobile_styles();
        log::info!(
            "Mobile inventory ready: {} adjust triggers, {} ajax forms",
            triggers,
            forms
        );
    }
}
