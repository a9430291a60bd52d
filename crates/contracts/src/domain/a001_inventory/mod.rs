//! Wire contracts of the `/inventory/*` endpoints

pub mod envelope;
pub mod form_fields;
pub mod product_id;
pub mod routes;

// Re-exports
pub use envelope::ApiEnvelope;
pub use form_fields::FormFields;
pub use product_id::ProductId;
pub use routes::{InventoryRoute, RouteKind};
