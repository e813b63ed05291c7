use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    audit::try_log_audit,
    dto::products::{CreateProductRequest, ProductList, ReorderProductsRequest, UpdateProductRequest},
    error::{AppError, AppResult},
    middleware::auth::AdminUser,
    models::{PLACEHOLDER_IMAGE, Product},
    response::{ApiResponse, Meta},
    state::AppState,
    storage::{NewProduct, ProductPatch},
};

const DRIVE_FILE_MARKER: &str = "/file/d/";
const DRIVE_DIRECT_PREFIX: &str = "https://drive.google.com/uc?export=view&id=";

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let product = state
        .storage
        .get_product(id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn create_product(
    state: &AppState,
    admin: &AdminUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let name = validate_name(&payload.name)?;
    validate_price(payload.price)?;

    let product = state
        .storage
        .create_product(NewProduct {
            name,
            description: payload.description.trim().to_string(),
            price: payload.price,
            image: normalize_image(&payload.image),
            category: payload.category.filter(|c| !c.trim().is_empty()),
            order: payload.order,
        })
        .await?;

    tracing::info!(product_id = %product.id, order = product.order, "menu item created");
    try_log_audit(
        &state.storage,
        Some(&admin.email),
        "product_create",
        Some("menu_items"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Product created",
        product,
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    admin: &AdminUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let name = payload.name.as_deref().map(validate_name).transpose()?;
    if let Some(price) = payload.price {
        validate_price(price)?;
    }

    let patch = ProductPatch {
        name,
        description: payload.description.map(|d| d.trim().to_string()),
        price: payload.price,
        image: payload.image.as_deref().map(normalize_image),
        category: payload.category.map(|c| c.trim().to_string()),
    };

    let product = state
        .storage
        .update_product(id, patch)
        .await?
        .ok_or(AppError::NotFound)?;

    try_log_audit(
        &state.storage,
        Some(&admin.email),
        "product_update",
        Some("menu_items"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await;

    Ok(ApiResponse::success("Updated", product, Some(Meta::empty())))
}

pub async fn delete_product(
    state: &AppState,
    admin: &AdminUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if !state.storage.delete_product(id).await? {
        return Err(AppError::NotFound);
    }

    try_log_audit(
        &state.storage,
        Some(&admin.email),
        "product_delete",
        Some("menu_items"),
        Some(serde_json::json!({ "product_id": id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn reorder_products(
    state: &AppState,
    admin: &AdminUser,
    payload: ReorderProductsRequest,
) -> AppResult<ApiResponse<ProductList>> {
    if payload.ids.is_empty() {
        return Err(AppError::BadRequest("ids must not be empty".into()));
    }

    let items = state.storage.reorder_products(&payload.ids).await?;

    try_log_audit(
        &state.storage,
        Some(&admin.email),
        "product_reorder",
        Some("menu_items"),
        Some(serde_json::json!({ "ids": payload.ids })),
    )
    .await;

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Reordered", ProductList { items }, Some(meta)))
}

fn validate_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }
    Ok(name.to_string())
}

fn validate_price(price: Decimal) -> AppResult<()> {
    if price.is_sign_negative() {
        return Err(AppError::BadRequest("price must not be negative".into()));
    }
    Ok(())
}

/// Turn what the owner pasted into something an `<img>` can load.
///
/// Google Drive share links (`.../file/d/<ID>/view`) become direct-view links,
/// an empty value becomes the placeholder, anything else is kept as given.
pub fn normalize_image(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return PLACEHOLDER_IMAGE.to_string();
    }

    if let Some((_, rest)) = raw.split_once(DRIVE_FILE_MARKER) {
        let file_id: String = rest
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .collect();
        if !file_id.is_empty() {
            return format!("{DRIVE_DIRECT_PREFIX}{file_id}");
        }
    }

    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_share_links_become_direct_links() {
        assert_eq!(
            normalize_image("https://drive.google.com/file/d/1AbC_d-9/view?usp=sharing"),
            "https://drive.google.com/uc?export=view&id=1AbC_d-9"
        );
    }

    #[test]
    fn direct_and_plain_urls_are_kept() {
        let direct = "https://drive.google.com/uc?export=view&id=xyz";
        assert_eq!(normalize_image(direct), direct);
        assert_eq!(
            normalize_image(" https://cdn.example.com/soup.jpg "),
            "https://cdn.example.com/soup.jpg"
        );
    }

    #[test]
    fn empty_image_uses_placeholder() {
        assert_eq!(normalize_image("   "), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn negative_prices_and_blank_names_are_rejected() {
        assert!(validate_price(Decimal::new(-1, 2)).is_err());
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_name("  ").is_err());
        assert_eq!(validate_name(" Soup ").ok().as_deref(), Some("Soup"));
    }
}
