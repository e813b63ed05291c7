use crate::{
    dto::{products::ProductList, settings::Storefront},
    error::AppResult,
    models::StoreSettings,
    ordering::Catalog,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Current settings and catalog, read fresh for one request.
pub async fn snapshot(state: &AppState) -> AppResult<(StoreSettings, Catalog)> {
    let settings = state.storage.load_settings().await?;
    let catalog = Catalog::new(state.storage.list_products().await?);
    Ok((settings, catalog))
}

pub async fn storefront(state: &AppState) -> AppResult<ApiResponse<Storefront>> {
    let (settings, catalog) = snapshot(state).await?;
    let meta = Meta::store(settings.is_open);
    Ok(ApiResponse::success(
        "Storefront",
        Storefront {
            settings,
            products: catalog.into_products(),
        },
        Some(meta),
    ))
}

pub async fn list_catalog(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let catalog = Catalog::new(state.storage.list_products().await?);
    let meta = Meta::total(catalog.len());
    Ok(ApiResponse::success(
        "Catalog",
        ProductList {
            items: catalog.into_products(),
        },
        Some(meta),
    ))
}
