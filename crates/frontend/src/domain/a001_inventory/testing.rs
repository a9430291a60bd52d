//! In-memory page and transport for controller tests

use super::controller::InventoryPageController;
use super::model::InventoryTransport;
use super::page::{
    AdjustTriggerHandler, AjaxSubmitHandler, FormRef, InventoryPage, LocalTask, NotificationId,
    ProductIdField, TriggerKind,
};
use crate::shared::api_utils::OutboundRequest;
use crate::shared::config::InventoryConfig;
use crate::shared::error::ActionError;
use async_trait::async_trait;
use contracts::domain::a001_inventory::{ApiEnvelope, FormFields, ProductId};
use contracts::enums::NotificationKind;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    Alert(String),
    Reload,
    Navigated(String),
    ProductIdSet(ProductIdField, String),
    ModalShown,
    ViewportSet(String),
    StylesheetInjected(String),
    NotificationAppended(NotificationId, String, NotificationKind),
    NotificationHidden(NotificationId),
    NotificationRemoved(NotificationId),
    Slept(u32),
}

pub struct FakePage {
    events: RefCell<Vec<PageEvent>>,
    busy: RefCell<Vec<(FormRef, bool)>>,
    csrf: RefCell<Option<String>>,
    forms: RefCell<HashMap<FormRef, FormFields>>,
    actions: RefCell<HashMap<FormRef, String>>,
    missing_fields: RefCell<HashSet<ProductIdField>>,
    has_viewport: Cell<bool>,
    stylesheets: RefCell<HashSet<String>>,
    modal_open: Cell<bool>,
    modal_instances: Cell<usize>,
    next_notification: Cell<NotificationId>,
    notifications: RefCell<HashMap<NotificationId, bool>>,
    adjust_triggers: RefCell<Vec<Option<ProductId>>>,
    adjust_handler: RefCell<Option<AdjustTriggerHandler>>,
    ajax_form_count: Cell<usize>,
    ajax_handler: RefCell<Option<AjaxSubmitHandler>>,
    tasks: RefCell<Vec<LocalTask>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            busy: RefCell::new(Vec::new()),
            csrf: RefCell::new(Some("csrf-abc".to_string())),
            forms: RefCell::new(HashMap::new()),
            actions: RefCell::new(HashMap::new()),
            missing_fields: RefCell::new(HashSet::new()),
            has_viewport: Cell::new(true),
            stylesheets: RefCell::new(HashSet::new()),
            modal_open: Cell::new(false),
            modal_instances: Cell::new(0),
            next_notification: Cell::new(1),
            notifications: RefCell::new(HashMap::new()),
            adjust_triggers: RefCell::new(Vec::new()),
            adjust_handler: RefCell::new(None),
            ajax_form_count: Cell::new(0),
            ajax_handler: RefCell::new(None),
            tasks: RefCell::new(Vec::new()),
        }
    }

    fn record(&self, event: PageEvent) {
        self.events.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<PageEvent> {
        self.events.borrow().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                PageEvent::Alert(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn reload_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, PageEvent::Reload))
            .count()
    }

    pub fn notifications(&self) -> Vec<(String, NotificationKind)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                PageEvent::NotificationAppended(_, m, k) => Some((m.clone(), *k)),
                _ => None,
            })
            .collect()
    }

    /// `Some(hidden)` while the toast is in the document
    pub fn notification_state(&self, id: NotificationId) -> Option<bool> {
        self.notifications.borrow().get(&id).copied()
    }

    pub fn busy_changes(&self) -> Vec<(FormRef, bool)> {
        self.busy.borrow().clone()
    }

    pub fn set_csrf(&self, token: Option<&str>) {
        *self.csrf.borrow_mut() = token.map(str::to_string);
    }

    pub fn set_form(&self, form: FormRef, fields: FormFields) {
        self.forms.borrow_mut().insert(form, fields);
    }

    pub fn remove_field(&self, field: ProductIdField) {
        self.missing_fields.borrow_mut().insert(field);
    }

    pub fn set_has_viewport(&self, present: bool) {
        self.has_viewport.set(present);
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open.get()
    }

    pub fn modal_instances(&self) -> usize {
        self.modal_instances.get()
    }

    pub fn add_adjust_trigger(&self, product_id: Option<ProductId>) {
        self.adjust_triggers.borrow_mut().push(product_id);
    }

    /// Dispatches an event on the n-th trigger; returns whether default was prevented
    pub fn fire_adjust_trigger(&self, index: usize, kind: TriggerKind) -> bool {
        let handler = self.adjust_handler.borrow().clone();
        let product_id = self.adjust_triggers.borrow().get(index).cloned().flatten();
        match handler {
            Some(handler) => handler(kind, product_id),
            None => false,
        }
    }

    pub fn has_adjust_handler(&self) -> bool {
        self.adjust_handler.borrow().is_some()
    }

    pub fn add_ajax_form(&self, action: Option<&str>, fields: FormFields) -> FormRef {
        let form = FormRef::Ajax(self.ajax_form_count.get());
        self.ajax_form_count.set(self.ajax_form_count.get() + 1);
        self.forms.borrow_mut().insert(form, fields);
        if let Some(action) = action {
            self.actions.borrow_mut().insert(form, action.to_string());
        }
        form
    }

    pub fn submit_ajax_form(&self, form: FormRef) {
        let handler = self.ajax_handler.borrow().clone();
        if let Some(handler) = handler {
            handler(form);
        }
    }

    pub fn has_ajax_handler(&self) -> bool {
        self.ajax_handler.borrow().is_some()
    }

    /// Runs spawned tasks, including ones they spawn, to completion
    pub async fn run_tasks(&self) {
        loop {
            let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
            if tasks.is_empty() {
                break;
            }
            for task in tasks {
                task.await;
            }
        }
    }
}

impl InventoryPage for FakePage {
    fn csrf_token(&self, _meta_name: &str) -> Option<String> {
        self.csrf.borrow().clone()
    }

    fn read_form(&self, form: FormRef) -> Result<FormFields, ActionError> {
        self.forms
            .borrow()
            .get(&form)
            .cloned()
            .ok_or_else(|| ActionError::missing(format!("{:?}", form)))
    }

    fn form_action(&self, form: FormRef) -> Option<String> {
        self.actions.borrow().get(&form).cloned()
    }

    fn set_form_busy(&self, form: FormRef, busy: bool) {
        self.busy.borrow_mut().push((form, busy));
    }

    fn set_product_id(&self, field: ProductIdField, product_id: &ProductId) -> bool {
        if self.missing_fields.borrow().contains(&field) {
            return false;
        }
        self.record(PageEvent::ProductIdSet(field, product_id.to_string()));
        true
    }

    fn show_adjust_modal(&self) -> Result<(), ActionError> {
        if !self.modal_open.replace(true) {
            self.modal_instances.set(self.modal_instances.get() + 1);
        }
        self.record(PageEvent::ModalShown);
        Ok(())
    }

    fn alert(&self, message: &str) {
        self.record(PageEvent::Alert(message.to_string()));
    }

    fn reload(&self) {
        self.record(PageEvent::Reload);
    }

    fn navigate(&self, path: &str) {
        self.record(PageEvent::Navigated(path.to_string()));
    }

    fn set_viewport(&self, content: &str) -> bool {
        if !self.has_viewport.get() {
            return false;
        }
        self.record(PageEvent::ViewportSet(content.to_string()));
        true
    }

    fn inject_stylesheet(&self, id: &str, _css: &str) -> bool {
        if !self.stylesheets.borrow_mut().insert(id.to_string()) {
            return false;
        }
        self.record(PageEvent::StylesheetInjected(id.to_string()));
        true
    }

    fn append_notification(&self, message: &str, kind: NotificationKind) -> NotificationId {
        let id = self.next_notification.get();
        self.next_notification.set(id + 1);
        self.notifications.borrow_mut().insert(id, false);
        self.record(PageEvent::NotificationAppended(id, message.to_string(), kind));
        id
    }

    fn hide_notification(&self, id: NotificationId) {
        if let Some(hidden) = self.notifications.borrow_mut().get_mut(&id) {
            *hidden = true;
        }
        self.record(PageEvent::NotificationHidden(id));
    }

    fn remove_notification(&self, id: NotificationId) {
        self.notifications.borrow_mut().remove(&id);
        self.record(PageEvent::NotificationRemoved(id));
    }

    fn bind_adjust_triggers(&self, handler: AdjustTriggerHandler) -> usize {
        *self.adjust_handler.borrow_mut() = Some(handler);
        self.adjust_triggers.borrow().len()
    }

    fn bind_ajax_forms(&self, handler: AjaxSubmitHandler) -> usize {
        *self.ajax_handler.borrow_mut() = Some(handler);
        self.ajax_form_count.get()
    }

    fn sleep(&self, ms: u32) -> LocalTask {
        self.record(PageEvent::Slept(ms));
        Box::pin(async {})
    }

    fn spawn(&self, task: LocalTask) {
        self.tasks.borrow_mut().push(task);
    }
}

/// Replies from a queue, or the same reply forever
pub struct FakeTransport {
    replies: RefCell<VecDeque<Result<ApiEnvelope, ActionError>>>,
    repeat: Option<Result<ApiEnvelope, ActionError>>,
    sent: RefCell<Vec<OutboundRequest>>,
}

impl FakeTransport {
    pub fn new(replies: Vec<Result<ApiEnvelope, ActionError>>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            repeat: None,
            sent: RefCell::new(Vec::new()),
        }
    }

    pub fn replying(reply: Result<ApiEnvelope, ActionError>) -> Self {
        Self {
            replies: RefCell::new(VecDeque::new()),
            repeat: Some(reply),
            sent: RefCell::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<OutboundRequest> {
        self.sent.borrow().clone()
    }
}

#[async_trait(?Send)]
impl InventoryTransport for FakeTransport {
    async fn post(&self, request: OutboundRequest) -> Result<ApiEnvelope, ActionError> {
        self.sent.borrow_mut().push(request);
        // Leave the request pending for one poll, like a real fetch
        tokio::task::yield_now().await;

        let queued = self.replies.borrow_mut().pop_front();
        queued
            .or_else(|| self.repeat.clone())
            .unwrap_or_else(|| Err(ActionError::Transport("no reply queued".to_string())))
    }
}

pub fn controller(
    transport: FakeTransport,
) -> (Rc<FakePage>, InventoryPageController<FakePage, FakeTransport>) {
    let page = Rc::new(FakePage::new());
    let ctrl = InventoryPageController::new(Rc::clone(&page), transport, InventoryConfig::default());
    (page, ctrl)
}
