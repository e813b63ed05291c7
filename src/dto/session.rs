use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::ordering::{Cart, CatalogEntry, CheckoutTotals, CombinedSummary};

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionCreated {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PendingSelection {
    pub product_id: Uuid,
    pub quantity: u32,
}

/// The customer's whole screen: menu, pending picks, cart and totals.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionView {
    pub session_id: Uuid,
    pub store_open: bool,
    pub catalog: Vec<CatalogEntry>,
    pub pending: Vec<PendingSelection>,
    pub cart: Cart,
    pub totals: CheckoutTotals,
    pub combined: CombinedSummary,
    /// Whether the floating cart indicator should be shown.
    pub show_cart_indicator: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SelectionRequest {
    pub product_id: Uuid,
    /// Positive to add, negative to take away.
    pub delta: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SelectionChanged {
    pub product_id: Uuid,
    pub pending_quantity: u32,
    pub combined: CombinedSummary,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdjustCartRequest {
    pub delta: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub cart: Cart,
    pub totals: CheckoutTotals,
    /// Pending selections that could not be merged because the product is gone.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<Uuid>,
}
