pub mod auth;
pub mod products;
pub mod session;
pub mod settings;
