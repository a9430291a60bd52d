use super::product_id::ProductId;

pub const DEFAULT_ROUTE_BASE: &str = "/inventory";

/// How the browser reaches a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Background `POST` answered with an `ApiEnvelope`
    Post,
    /// Full page navigation
    Navigate,
}

/// Inventory endpoints used by the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryRoute {
    AddStock,
    AdjustStock(ProductId),
    Reorder(ProductId),
    History(ProductId),
    Export,
}

impl InventoryRoute {
    pub fn kind(&self) -> RouteKind {
        match self {
            InventoryRoute::AddStock
            | InventoryRoute::AdjustStock(_)
            | InventoryRoute::Reorder(_) => RouteKind::Post,
            InventoryRoute::History(_) | InventoryRoute::Export => RouteKind::Navigate,
        }
    }

    /// Path under `base`, e.g. `/inventory/history/42`
    pub fn path(&self, base: &str) -> String {
        let base = base.trim_end_matches('/');
        match self {
            InventoryRoute::AddStock => format!("{}/add-stock", base),
            InventoryRoute::AdjustStock(id) => format!("{}/adjust-stock/{}", base, id.path_segment()),
            InventoryRoute::Reorder(id) => format!("{}/reorder/{}", base, id.path_segment()),
            InventoryRoute::History(id) => format!("{}/history/{}", base, id.path_segment()),
            InventoryRoute::Export => format!("{}/export", base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let id = ProductId::from(42);
        assert_eq!(InventoryRoute::AddStock.path(DEFAULT_ROUTE_BASE), "/inventory/add-stock");
        assert_eq!(
            InventoryRoute::AdjustStock(id.clone()).path(DEFAULT_ROUTE_BASE),
            "/inventory/adjust-stock/42"
        );
        assert_eq!(
            InventoryRoute::Reorder(id.clone()).path(DEFAULT_ROUTE_BASE),
            "/inventory/reorder/42"
        );
        assert_eq!(
            InventoryRoute::History(id).path(DEFAULT_ROUTE_BASE),
            "/inventory/history/42"
        );
        assert_eq!(InventoryRoute::Export.path(DEFAULT_ROUTE_BASE), "/inventory/export");
    }

    #[test]
    fn test_custom_base_trailing_slash() {
        assert_eq!(InventoryRoute::Export.path("/shop/inventory/"), "/shop/inventory/export");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(InventoryRoute::AddStock.kind(), RouteKind::Post);
        assert_eq!(InventoryRoute::Export.kind(), RouteKind::Navigate);
        assert_eq!(
            InventoryRoute::History(ProductId::from(1)).kind(),
            RouteKind::Navigate
        );
    }
}
