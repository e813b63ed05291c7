pub mod auth_service;
pub mod product_service;
pub mod session_service;
pub mod settings_service;
pub mod storefront_service;
