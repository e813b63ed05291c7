use rust_decimal::Decimal;
use uuid::Uuid;

use super::{NewProduct, ProductPatch, next_order, resequence};
use crate::models::{PLACEHOLDER_IMAGE, Product, StoreSettings};

/// Process-local catalog and settings. Lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: Vec<Product>,
    settings: StoreSettings,
}

impl MemoryStore {
    pub fn with_demo_menu() -> Self {
        let menu = [
            (
                "Mocotó 700ml",
                "Rice, farofa and pirão. Serves two.",
                Decimal::new(3500, 2),
                "Soups",
            ),
            (
                "Feijoada Completa",
                "Black bean stew with pork, rice, collards and orange.",
                Decimal::new(4290, 2),
                "Mains",
            ),
            (
                "Pastel de Queijo",
                "Fried pastry filled with melted cheese.",
                Decimal::new(850, 2),
                "Snacks",
            ),
            (
                "Guaraná Lata",
                "350ml can.",
                Decimal::new(600, 2),
                "Drinks",
            ),
        ];

        let products = menu
            .into_iter()
            .zip(1..)
            .map(|((name, description, price, category), order)| Product {
                id: Uuid::new_v4(),
                name: name.to_string(),
                description: description.to_string(),
                price,
                image: PLACEHOLDER_IMAGE.to_string(),
                order,
                category: Some(category.to_string()),
            })
            .collect();

        Self {
            products,
            settings: StoreSettings {
                name: "Demo Bistro".to_string(),
                ..StoreSettings::default()
            },
        }
    }

    pub fn list_products(&self) -> Vec<Product> {
        let mut products = self.products.clone();
        products.sort_by_key(|product| product.order);
        products
    }

    pub fn get_product(&self, id: Uuid) -> Option<Product> {
        self.products.iter().find(|p| p.id == id).cloned()
    }

    pub fn create_product(&mut self, new: NewProduct) -> Product {
        let order = new.order.unwrap_or_else(|| next_order(&self.products));
        let product = Product {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
            price: new.price,
            image: new.image,
            order,
            category: new.category,
        };
        self.products.push(product.clone());
        product
    }

    pub fn update_product(&mut self, id: Uuid, patch: ProductPatch) -> Option<Product> {
        let product = self.products.iter_mut().find(|p| p.id == id)?;
        patch.apply(product);
        Some(product.clone())
    }

    pub fn delete_product(&mut self, id: Uuid) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        self.products.len() != before
    }

    pub fn reorder_products(&mut self, ids: &[Uuid]) -> Vec<Product> {
        self.products = resequence(std::mem::take(&mut self.products), ids);
        self.products.clone()
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: StoreSettings) {
        self.settings = settings;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: String::new(),
            price: Decimal::ONE,
            image: String::new(),
            category: None,
            order: None,
        }
    }

    #[test]
    fn demo_menu_starts_closed_and_ordered() {
        let store = MemoryStore::with_demo_menu();
        assert!(!store.settings().is_open);

        let orders: Vec<_> = store.list_products().iter().map(|p| p.order).collect();
        assert_eq!(orders, [1, 2, 3, 4]);
    }

    #[test]
    fn created_products_are_appended() {
        let mut store = MemoryStore::default();
        let first = store.create_product(new_product("first"));
        let second = store.create_product(new_product("second"));

        assert_eq!(first.order, 1);
        assert_eq!(second.order, 2);
    }

    #[test]
    fn delete_reports_missing_items() {
        let mut store = MemoryStore::default();
        let product = store.create_product(new_product("soup"));

        assert!(store.delete_product(product.id));
        assert!(!store.delete_product(product.id));
        assert!(store.get_product(product.id).is_none());
    }
}
