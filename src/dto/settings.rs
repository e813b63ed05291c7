use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Product, StoreSettings};

/// Full replacement of the editable settings. Open/closed has its own endpoint.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSettingsRequest {
    pub name: String,
    pub whatsapp: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub banner_url: String,
    #[serde(default)]
    pub banner_message: String,
    pub delivery_fee: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StoreStatusRequest {
    pub is_open: bool,
}

/// Everything the customer landing page needs in one call.
#[derive(Debug, Serialize, ToSchema)]
pub struct Storefront {
    pub settings: StoreSettings,
    pub products: Vec<Product>,
}
