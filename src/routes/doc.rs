use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse},
        products::{CreateProductRequest, ProductList, ReorderProductsRequest, UpdateProductRequest},
        session::{
            AdjustCartRequest, CartView, PendingSelection, SelectionChanged, SelectionRequest,
            SessionCreated, SessionView,
        },
        settings::{StoreStatusRequest, Storefront, UpdateSettingsRequest},
    },
    models::{Product, StoreSettings},
    ordering::{
        Cart, CartItem, CatalogEntry, CheckoutTotals, CombinedSummary, CustomerDetails,
        RequiredField, SubmittedOrder,
    },
    response::{ApiResponse, Meta},
    routes::{admin, auth, health, sessions, storefront},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        storefront::storefront,
        storefront::list_catalog,
        storefront::get_product,
        sessions::create_session,
        sessions::get_session,
        sessions::change_selection,
        sessions::open_cart,
        sessions::close_cart,
        sessions::adjust_cart_item,
        sessions::remove_cart_item,
        sessions::checkout,
        auth::login,
        admin::get_settings,
        admin::update_settings,
        admin::set_store_status,
        admin::list_products,
        admin::create_product,
        admin::update_product,
        admin::delete_product,
        admin::reorder_products
    ),
    components(
        schemas(
            Product,
            StoreSettings,
            Storefront,
            ProductList,
            CatalogEntry,
            Cart,
            CartItem,
            CheckoutTotals,
            CombinedSummary,
            CustomerDetails,
            RequiredField,
            SubmittedOrder,
            SessionCreated,
            SessionView,
            PendingSelection,
            SelectionRequest,
            SelectionChanged,
            AdjustCartRequest,
            CartView,
            LoginRequest,
            LoginResponse,
            CreateProductRequest,
            UpdateProductRequest,
            ReorderProductsRequest,
            UpdateSettingsRequest,
            StoreStatusRequest,
            health::HealthData,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<StoreSettings>,
            ApiResponse<SessionView>,
            ApiResponse<CartView>,
            ApiResponse<SubmittedOrder>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Storefront", description = "Public menu and store status"),
        (name = "Sessions", description = "Customer selections, cart and checkout"),
        (name = "Auth", description = "Store owner authentication"),
        (name = "Admin", description = "Menu and settings management"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
