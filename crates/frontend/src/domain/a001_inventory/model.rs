use crate::shared::api_utils::{OutboundRequest, RequestBody};
use crate::shared::error::ActionError;
use async_trait::async_trait;
use contracts::domain::a001_inventory::{ApiEnvelope, FormFields};
use gloo_net::http::Request;
use web_sys::FormData;

/// Sends inventory requests and decodes the envelope
#[async_trait(?Send)]
pub trait InventoryTransport {
    async fn post(&self, request: OutboundRequest) -> Result<ApiEnvelope, ActionError>;
}

/// Browser `fetch` through gloo-net
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl InventoryTransport for GlooTransport {
    async fn post(&self, request: OutboundRequest) -> Result<ApiEnvelope, ActionError> {
        let mut builder = Request::post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let prepared = match &request.body {
            RequestBody::Form(fields) => builder.body(to_form_data(fields)?)?,
            RequestBody::Empty => builder.build()?,
        };

        let response = prepared.send().await?;
        log::debug!("POST {} -> {}", request.url, response.status());

        // Error statuses carry an envelope too
        response.json::<ApiEnvelope>().await.map_err(ActionError::from)
    }
}

fn to_form_data(fields: &FormFields) -> Result<FormData, ActionError> {
    let form_data = FormData::new().map_err(ActionError::js)?;
    for (name, value) in fields.iter() {
        form_data
            .append_with_str(name, value)
            .map_err(ActionError::js)?;
    }
    Ok(form_data)
}
