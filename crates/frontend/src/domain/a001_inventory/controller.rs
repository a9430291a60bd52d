use super::model::InventoryTransport;
use super::page::{FormRef, InventoryPage, ProductIdField, ADD_STOCK_FORM_ID, ADJUST_STOCK_FORM_ID};
use crate::shared::api_utils::{
    OutboundRequest, RequestBody, CONTENT_TYPE_HEADER, CONTENT_TYPE_JSON, CSRF_HEADER,
};
use crate::shared::config::InventoryConfig;
use crate::shared::error::ActionError;
use contracts::domain::a001_inventory::form_fields::FIELD_PRODUCT_ID;
use contracts::domain::a001_inventory::{ApiEnvelope, InventoryRoute, ProductId, RouteKind};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

pub const ADD_STOCK_SUCCESS_FALLBACK: &str = "Stock added successfully";
pub const ADD_STOCK_NETWORK_ERROR: &str = "An error occurred while adding stock";
pub const ADJUST_STOCK_SUCCESS: &str = "Stock adjusted successfully";
pub const ADJUST_STOCK_NETWORK_ERROR: &str = "An error occurred while adjusting stock";
pub const REORDER_SUCCESS: &str = "Reorder request sent successfully";
pub const REORDER_FAILURE_PREFIX: &str = "Failed to send reorder request: ";
pub const REORDER_NETWORK_ERROR: &str = "An error occurred while processing the reorder request";
pub const ERROR_PREFIX: &str = "Error: ";
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// How a request flow ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Succeeded,
    /// Envelope with `success: false`; carries the text shown to the user
    Rejected(String),
    Failed(ActionError),
    /// Same action already in flight
    Skipped,
}

/// In-flight key of a mutating action
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum ActionKey {
    AddStock,
    AdjustStock,
    Reorder(ProductId),
    AjaxForm(FormRef),
}

/// Texts of an alert-reported flow
pub(crate) struct AlertTexts {
    /// `None` shows the server message
    pub success: Option<&'static str>,
    pub failure_prefix: &'static str,
    pub network: &'static str,
    pub reload_on_success: bool,
}

/// Mediates between the inventory page controls and the backend.
///
/// Owns no inventory data: every mutation is a request/response round trip
/// and a successful one reloads the page.
pub struct InventoryPageController<P, T> {
    pub(crate) page: Rc<P>,
    pub(crate) transport: T,
    pub(crate) config: InventoryConfig,
    pub(crate) in_flight: RefCell<HashSet<ActionKey>>,
    pub(crate) styles_injected: Cell<bool>,
}

/// Releases an in-flight key and re-enables its form when dropped
pub(crate) struct InFlightGuard<'a, P: InventoryPage> {
    in_flight: &'a RefCell<HashSet<ActionKey>>,
    page: &'a P,
    key: ActionKey,
    form: Option<FormRef>,
}

impl<P: InventoryPage> Drop for InFlightGuard<'_, P> {
    fn drop(&mut self) {
        self.in_flight.borrow_mut().remove(&self.key);
        if let Some(form) = self.form {
            self.page.set_form_busy(form, false);
        }
    }
}

impl<P, T> InventoryPageController<P, T>
where
    P: InventoryPage + 'static,
    T: InventoryTransport + 'static,
{
    pub fn new(page: Rc<P>, transport: T, config: InventoryConfig) -> Self {
        Self {
            page,
            transport,
            config,
            in_flight: RefCell::new(HashSet::new()),
            styles_injected: Cell::new(false),
        }
    }

    /// POSTs `#addStockForm` to the add-stock endpoint
    pub async fn submit_add_stock(&self) -> ActionOutcome {
        let form = FormRef::ById(ADD_STOCK_FORM_ID);
        let Some(_guard) = self.begin(ActionKey::AddStock, Some(form)) else {
            return ActionOutcome::Skipped;
        };

        let result = match self.page.read_form(form) {
            Ok(fields) => {
                self.post(InventoryRoute::AddStock, RequestBody::Form(fields), false)
                    .await
            }
            Err(e) => Err(e),
        };

        self.report_by_alert(
            "add stock",
            result,
            AlertTexts {
                success: None,
                failure_prefix: ERROR_PREFIX,
                network: ADD_STOCK_NETWORK_ERROR,
                reload_on_success: true,
            },
        )
    }

    /// Pre-fills the adjust form with `product_id` and opens the modal
    pub fn adjust_stock(&self, product_id: &ProductId) -> Result<(), ActionError> {
        if !self
            .page
            .set_product_id(ProductIdField::AdjustForm, product_id)
        {
            return Err(ActionError::missing(format!(
                "#{} input[name=\"{}\"]",
                ADJUST_STOCK_FORM_ID, FIELD_PRODUCT_ID
            )));
        }
        self.page.show_adjust_modal()
    }

    pub fn view_history(&self, product_id: &ProductId) {
        self.navigate_to(InventoryRoute::History(product_id.clone()));
    }

    /// Asks the server to create a purchase order for the product
    pub async fn reorder_product(&self, product_id: &ProductId) -> ActionOutcome {
        let Some(_guard) = self.begin(ActionKey::Reorder(product_id.clone()), None) else {
            return ActionOutcome::Skipped;
        };

        let result = self
            .post(
                InventoryRoute::Reorder(product_id.clone()),
                RequestBody::Empty,
                true,
            )
            .await;

        self.report_by_alert(
            "reorder",
            result,
            AlertTexts {
                success: Some(REORDER_SUCCESS),
                failure_prefix: REORDER_FAILURE_PREFIX,
                network: REORDER_NETWORK_ERROR,
                reload_on_success: false,
            },
        )
    }

    /// The browser handles the CSV download
    pub fn export_inventory(&self) {
        self.navigate_to(InventoryRoute::Export);
    }

    fn navigate_to(&self, route: InventoryRoute) {
        if route.kind() != RouteKind::Navigate {
            log::error!("Error: {:?} is not a page route", route);
            return;
        }
        self.page.navigate(&route.path(&self.config.route_base));
    }

    /// POSTs `#adjustStockForm` to the adjust endpoint of its `product_id`
    pub async fn submit_adjust_stock(&self) -> ActionOutcome {
        let form = FormRef::ById(ADJUST_STOCK_FORM_ID);
        let Some(_guard) = self.begin(ActionKey::AdjustStock, Some(form)) else {
            return ActionOutcome::Skipped;
        };

        let result = match self.page.read_form(form) {
            Ok(fields) => match ProductId::parse(fields.get(FIELD_PRODUCT_ID)) {
                Some(id) => {
                    self.post(InventoryRoute::AdjustStock(id), RequestBody::Form(fields), false)
                        .await
                }
                None => Err(ActionError::MissingProductId),
            },
            Err(e) => Err(e),
        };

        self.report_by_alert(
            "adjust stock",
            result,
            AlertTexts {
                success: Some(ADJUST_STOCK_SUCCESS),
                failure_prefix: ERROR_PREFIX,
                network: ADJUST_STOCK_NETWORK_ERROR,
                reload_on_success: true,
            },
        )
    }

    /// Marks `key` in flight and its form busy; `None` when it already is.
    ///
    /// Without the guard, concurrent submits of one form overlap, so the
    /// form's busy state is left alone.
    pub(crate) fn begin(&self, key: ActionKey, form: Option<FormRef>) -> Option<InFlightGuard<'_, P>> {
        let form = if self.config.guard_double_submit {
            if !self.in_flight.borrow_mut().insert(key.clone()) {
                log::warn!("{:?} already in flight, ignoring repeated submit", key);
                return None;
            }
            form
        } else {
            None
        };
        if let Some(form) = form {
            self.page.set_form_busy(form, true);
        }
        Some(InFlightGuard {
            in_flight: &self.in_flight,
            page: self.page.as_ref(),
            key,
            form,
        })
    }

    async fn post(
        &self,
        route: InventoryRoute,
        body: RequestBody,
        json: bool,
    ) -> Result<ApiEnvelope, ActionError> {
        if route.kind() != RouteKind::Post {
            return Err(ActionError::Transport(format!(
                "{:?} is a page route, not an endpoint",
                route
            )));
        }
        let token = self
            .page
            .csrf_token(&self.config.csrf_meta_name)
            .ok_or(ActionError::MissingCsrfToken)?;

        let mut request = OutboundRequest::post(route.path(&self.config.route_base), body);
        if json {
            request = request.header(CONTENT_TYPE_HEADER, CONTENT_TYPE_JSON);
        }
        request = request.header(CSRF_HEADER, token);

        log::debug!("POST {}", request.url);
        self.transport.post(request).await
    }

    pub(crate) fn report_by_alert(
        &self,
        action: &str,
        result: Result<ApiEnvelope, ActionError>,
        texts: AlertTexts,
    ) -> ActionOutcome {
        match result {
            Ok(envelope) if envelope.success => {
                let fixed: Option<&str> = texts.success;
                let message = fixed
                    .or_else(|| envelope.message())
                    .unwrap_or(ADD_STOCK_SUCCESS_FALLBACK);
                self.page.alert(message);
                if texts.reload_on_success {
                    self.page.reload();
                }
                ActionOutcome::Succeeded
            }
            Ok(envelope) => {
                let message = format!(
                    "{}{}",
                    texts.failure_prefix,
                    envelope.message_or(UNKNOWN_ERROR)
                );
                self.page.alert(&message);
                ActionOutcome::Rejected(message)
            }
            Err(e) => {
                log::error!("Error: {} failed: {}", action, e);
                self.page.alert(texts.network);
                ActionOutcome::Failed(e)
            }
        }
    }
}
