use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Shown for menu items saved without an image.
pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/400x400/eee/999?text=Produto";

/// A menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    /// Display position in the catalog. Not necessarily contiguous.
    pub order: i32,
    pub category: Option<String>,
}

/// Storefront configuration edited from the admin panel.
///
/// Fields missing from a stored document fall back to the defaults, so a
/// partially written settings row still yields a usable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct StoreSettings {
    pub name: String,
    pub whatsapp: String,
    pub is_open: bool,
    pub logo_url: String,
    pub banner_url: String,
    pub banner_message: String,
    /// Zero means "to be calculated" when the order is handed off, not free delivery.
    pub delivery_fee: Decimal,
}

impl Default for StoreSettings {
    fn default() -> Self {
        // A fresh store starts closed until the owner fills in its details.
        Self {
            name: String::new(),
            whatsapp: String::new(),
            is_open: false,
            logo_url: String::new(),
            banner_url: String::new(),
            banner_message: String::new(),
            delivery_fee: Decimal::ZERO,
        }
    }
}
