use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Product;

use super::selection::SelectionBuffer;

/// Read-only, display-ordered snapshot of the products on sale.
///
/// The catalog collaborator may replace its list at any time; callers build a
/// fresh snapshot per request and every lookup is best-effort.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

/// One row of the customer-facing menu.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogEntry {
    pub product: Product,
    /// Units staged in the selection buffer, 0 when nothing is pending.
    pub pending_quantity: u32,
}

impl Catalog {
    pub fn new(mut products: Vec<Product>) -> Self {
        // Stable, so equal positions keep the order the collaborator gave us.
        products.sort_by_key(|product| product.order);
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, id: Uuid) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// The menu as the customer sees it, with pending selections attached.
    pub fn entries(&self, buffer: &SelectionBuffer) -> Vec<CatalogEntry> {
        self.products
            .iter()
            .map(|product| CatalogEntry {
                product: product.clone(),
                pending_quantity: buffer.pending_quantity(product.id),
            })
            .collect()
    }

    pub fn into_products(self) -> Vec<Product> {
        self.products
    }
}


#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::test_support::{open_store, product};
    use super::*;

    #[test]
    fn sorts_by_order_and_keeps_ties_stable() {
        let first = product("Soup", Decimal::ONE, 2);
        let second = product("Bread", Decimal::ONE, 1);
        let third = product("Juice", Decimal::ONE, 2);
        let catalog = Catalog::new(vec![first.clone(), second.clone(), third.clone()]);

        let names: Vec<_> = catalog.products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Bread", "Soup", "Juice"]);
    }

    #[test]
    fn entries_report_pending_quantities() {
        let soup = product("Soup", Decimal::TEN, 1);
        let bread = product("Bread", Decimal::ONE, 2);
        let catalog = Catalog::new(vec![soup.clone(), bread.clone()]);
        let mut buffer = SelectionBuffer::default();
        buffer
            .increment(&open_store(Decimal::ZERO), soup.id, 2)
            .expect("store is open");

        let entries = catalog.entries(&buffer);
        assert_eq!(entries[0].pending_quantity, 2);
        assert_eq!(entries[1].pending_quantity, 0);
    }

    #[test]
    fn find_misses_are_none() {
        let catalog = Catalog::new(vec![product("Soup", Decimal::TEN, 1)]);
        assert!(catalog.find(Uuid::new_v4()).is_none());
    }
}
