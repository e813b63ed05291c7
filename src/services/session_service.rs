use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    dto::session::{
        AdjustCartRequest, CartView, PendingSelection, SelectionChanged, SelectionRequest,
        SessionCreated, SessionView,
    },
    error::{AppError, AppResult},
    ordering::{
        Cart, CustomerDetails, SubmittedOrder, combined_summary, compute_totals, ensure_open,
        merge_into_cart, submit,
    },
    response::{ApiResponse, Meta},
    services::storefront_service::snapshot,
    state::AppState,
};

pub async fn create_session(state: &AppState) -> ApiResponse<SessionCreated> {
    let session_id = state.sessions.create().await;
    tracing::debug!(%session_id, "customer session created");
    ApiResponse::success("Session created", SessionCreated { session_id }, None)
}

pub async fn session_view(state: &AppState, id: Uuid) -> AppResult<ApiResponse<SessionView>> {
    let (settings, catalog) = snapshot(state).await?;

    let view = state
        .sessions
        .with_session(id, |session| {
            let combined = combined_summary(
                &session.cart,
                &session.selection,
                &catalog,
                settings.delivery_fee,
            );
            SessionView {
                session_id: session.id,
                store_open: settings.is_open,
                catalog: catalog.entries(&session.selection),
                pending: session
                    .selection
                    .iter()
                    .map(|(product_id, quantity)| PendingSelection {
                        product_id,
                        quantity,
                    })
                    .collect(),
                cart: session.cart.clone(),
                totals: compute_totals(&session.cart, settings.delivery_fee),
                combined,
                show_cart_indicator: combined.is_visible(),
            }
        })
        .await?;

    Ok(ApiResponse::success("Session", view, Some(Meta::store(settings.is_open))))
}

pub async fn change_selection(
    state: &AppState,
    id: Uuid,
    payload: SelectionRequest,
) -> AppResult<ApiResponse<SelectionChanged>> {
    let (settings, catalog) = snapshot(state).await?;
    ensure_open(&settings)?;
    // Taking away a product that left the catalog is still allowed.
    if payload.delta > 0 && catalog.find(payload.product_id).is_none() {
        return Err(AppError::BadRequest("product not found".to_string()));
    }

    let changed = state
        .sessions
        .with_session(id, |session| {
            let pending_quantity =
                session
                    .selection
                    .increment(&settings, payload.product_id, payload.delta)?;
            Ok::<_, AppError>(SelectionChanged {
                product_id: payload.product_id,
                pending_quantity,
                combined: combined_summary(
                    &session.cart,
                    &session.selection,
                    &catalog,
                    settings.delivery_fee,
                ),
            })
        })
        .await??;

    Ok(ApiResponse::success("OK", changed, Some(Meta::store(settings.is_open))))
}

/// Fold pending selections into the cart, as when the customer opens it.
pub async fn open_cart(state: &AppState, id: Uuid) -> AppResult<ApiResponse<CartView>> {
    let (settings, catalog) = snapshot(state).await?;

    let view = state
        .sessions
        .with_session(id, |session| {
            let report = merge_into_cart(&mut session.selection, &mut session.cart, &catalog);
            if !report.skipped.is_empty() {
                tracing::warn!(
                    session_id = %session.id,
                    skipped = ?report.skipped,
                    "pending selections no longer in catalog were dropped"
                );
            }
            cart_view(&session.cart, settings.delivery_fee, report.skipped)
        })
        .await?;

    Ok(ApiResponse::success("Cart", view, Some(Meta::store(settings.is_open))))
}

/// Close the cart view. Only the selection buffer is reset; the cart is kept.
pub async fn close_cart(state: &AppState, id: Uuid) -> AppResult<ApiResponse<CartView>> {
    let settings = state.storage.load_settings().await?;

    let view = state
        .sessions
        .with_session(id, |session| {
            session.selection.clear();
            cart_view(&session.cart, settings.delivery_fee, Vec::new())
        })
        .await?;

    Ok(ApiResponse::success("Cart closed", view, Some(Meta::store(settings.is_open))))
}

pub async fn adjust_cart_item(
    state: &AppState,
    id: Uuid,
    product_id: Uuid,
    payload: AdjustCartRequest,
) -> AppResult<ApiResponse<CartView>> {
    let settings = state.storage.load_settings().await?;

    let view = state
        .sessions
        .with_session(id, |session| {
            session
                .cart
                .adjust_quantity(&settings, product_id, payload.delta)?;
            Ok::<_, AppError>(cart_view(&session.cart, settings.delivery_fee, Vec::new()))
        })
        .await??;

    Ok(ApiResponse::success("OK", view, Some(Meta::store(settings.is_open))))
}

/// Remove a line from the cart. Allowed even while the store is closed.
pub async fn remove_cart_item(
    state: &AppState,
    id: Uuid,
    product_id: Uuid,
) -> AppResult<ApiResponse<CartView>> {
    let settings = state.storage.load_settings().await?;

    let view = state
        .sessions
        .with_session(id, |session| {
            session.cart.remove_item(product_id);
            cart_view(&session.cart, settings.delivery_fee, Vec::new())
        })
        .await?;

    Ok(ApiResponse::success(
        "Removed from cart",
        view,
        Some(Meta::store(settings.is_open)),
    ))
}

/// Validate the customer's details and compose the hand-off link.
///
/// The cart is cleared only after a successful compose; any rejection leaves
/// the session exactly as it was.
pub async fn checkout(
    state: &AppState,
    id: Uuid,
    details: CustomerDetails,
) -> AppResult<ApiResponse<SubmittedOrder>> {
    let settings = state.storage.load_settings().await?;

    let order = state
        .sessions
        .with_session(id, |session| {
            let order = submit(&settings, details, &session.cart)?;
            session.cart.clear();
            session.selection.clear();
            Ok::<_, AppError>(order)
        })
        .await??;

    tracing::info!(
        session_id = %id,
        items = order.totals.item_count,
        total = %order.totals.total,
        "order composed for hand-off"
    );

    Ok(ApiResponse::success("Order ready", order, Some(Meta::empty())))
}

fn cart_view(cart: &Cart, delivery_fee: Decimal, skipped: Vec<Uuid>) -> CartView {
    CartView {
        cart: cart.clone(),
        totals: compute_totals(cart, delivery_fee),
        skipped,
    }
}
