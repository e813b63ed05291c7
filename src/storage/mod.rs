//! Catalog and settings persistence.
//!
//! A Postgres database is used when one is configured and reachable. Otherwise
//! the store keeps everything in process memory, seeded with a demo menu, so
//! the storefront stays usable without a backend.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    error::AppResult,
    models::{Product, StoreSettings},
};

pub use memory::MemoryStore;

/// Validated input for a new menu item.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub category: Option<String>,
    /// Explicit position; `None` appends after the last item.
    pub order: Option<i32>,
}

/// Fields to overwrite on an existing item. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image: Option<String>,
    pub category: Option<String>,
}

impl ProductPatch {
    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(image) = self.image {
            product.image = image;
        }
        if let Some(category) = self.category {
            product.category = Some(category).filter(|c| !c.is_empty());
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub actor: Option<String>,
    pub action: &'static str,
    pub resource: Option<&'static str>,
    pub metadata: Option<Value>,
}

#[derive(Clone)]
pub enum Storage {
    Postgres(DatabaseConnection),
    Memory(Arc<RwLock<MemoryStore>>),
}

impl Storage {
    /// Open the configured database, falling back to memory on any failure.
    pub async fn connect(config: &AppConfig) -> Self {
        let Some(url) = config.database_url.as_deref() else {
            tracing::warn!("DATABASE_URL not set, running in demo mode with in-memory storage");
            return Self::memory(config.seed_demo_menu);
        };

        match Self::open_postgres(url).await {
            Ok(conn) => {
                tracing::info!("connected to postgres storage");
                Self::Postgres(conn)
            }
            Err(err) => {
                tracing::warn!(error = %err, "database unavailable, falling back to in-memory storage");
                Self::memory(config.seed_demo_menu)
            }
        }
    }

    async fn open_postgres(url: &str) -> anyhow::Result<DatabaseConnection> {
        let conn = create_orm_conn(url).await?;
        run_migrations(&conn).await?;
        Ok(conn)
    }

    pub fn memory(seed_demo_menu: bool) -> Self {
        let store = if seed_demo_menu {
            MemoryStore::with_demo_menu()
        } else {
            MemoryStore::default()
        };
        Self::Memory(Arc::new(RwLock::new(store)))
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    /// All products, in display order.
    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        match self {
            Self::Postgres(conn) => postgres::list_products(conn).await,
            Self::Memory(store) => Ok(store.read().await.list_products()),
        }
    }

    pub async fn get_product(&self, id: Uuid) -> AppResult<Option<Product>> {
        match self {
            Self::Postgres(conn) => postgres::get_product(conn, id).await,
            Self::Memory(store) => Ok(store.read().await.get_product(id)),
        }
    }

    pub async fn create_product(&self, new: NewProduct) -> AppResult<Product> {
        match self {
            Self::Postgres(conn) => postgres::create_product(conn, new).await,
            Self::Memory(store) => Ok(store.write().await.create_product(new)),
        }
    }

    pub async fn update_product(
        &self,
        id: Uuid,
        patch: ProductPatch,
    ) -> AppResult<Option<Product>> {
        match self {
            Self::Postgres(conn) => postgres::update_product(conn, id, patch).await,
            Self::Memory(store) => Ok(store.write().await.update_product(id, patch)),
        }
    }

    /// Returns `false` when no such product existed.
    pub async fn delete_product(&self, id: Uuid) -> AppResult<bool> {
        match self {
            Self::Postgres(conn) => postgres::delete_product(conn, id).await,
            Self::Memory(store) => Ok(store.write().await.delete_product(id)),
        }
    }

    /// Renumber the catalog so `ids` come first, in that sequence.
    pub async fn reorder_products(&self, ids: &[Uuid]) -> AppResult<Vec<Product>> {
        match self {
            Self::Postgres(conn) => postgres::reorder_products(conn, ids).await,
            Self::Memory(store) => Ok(store.write().await.reorder_products(ids)),
        }
    }

    pub async fn load_settings(&self) -> AppResult<StoreSettings> {
        match self {
            Self::Postgres(conn) => postgres::load_settings(conn).await,
            Self::Memory(store) => Ok(store.read().await.settings().clone()),
        }
    }

    pub async fn save_settings(&self, settings: &StoreSettings) -> AppResult<()> {
        match self {
            Self::Postgres(conn) => postgres::save_settings(conn, settings).await,
            Self::Memory(store) => {
                store.write().await.set_settings(settings.clone());
                Ok(())
            }
        }
    }

    pub async fn record_audit(&self, entry: AuditEntry) -> AppResult<()> {
        match self {
            Self::Postgres(conn) => postgres::record_audit(conn, entry).await,
            Self::Memory(_) => {
                let metadata = entry.metadata.unwrap_or(Value::Null);
                tracing::info!(
                    target: "audit",
                    actor = entry.actor.as_deref().unwrap_or("-"),
                    action = entry.action,
                    resource = entry.resource.unwrap_or("-"),
                    metadata = %metadata,
                    "audit"
                );
                Ok(())
            }
        }
    }
}

/// Position for an appended item: one past the highest current position.
pub(crate) fn next_order(products: &[Product]) -> i32 {
    products
        .iter()
        .map(|product| product.order)
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

/// Assign positions `1..=n` with the listed ids first, in the given sequence.
///
/// Unknown and repeated ids are ignored. Products not listed follow, keeping
/// their current relative order.
pub(crate) fn resequence(mut products: Vec<Product>, ids: &[Uuid]) -> Vec<Product> {
    products.sort_by_key(|product| product.order);

    let mut ordered = Vec::with_capacity(products.len());
    for id in ids {
        if let Some(index) = products.iter().position(|product| product.id == *id) {
            ordered.push(products.remove(index));
        }
    }
    ordered.extend(products);

    for (position, product) in ordered.iter_mut().enumerate() {
        product.order = i32::try_from(position + 1).unwrap_or(i32::MAX);
    }
    ordered
}
