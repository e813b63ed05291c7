use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Product, StoreSettings};

use super::{
    OrderingError,
    gate::ensure_open,
    money::{apply_delta, line_total},
};

/// A product committed to the order, with its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn id(&self) -> Uuid {
        self.product.id
    }

    pub fn line_total(&self) -> Decimal {
        line_total(self.product.price, self.quantity)
    }
}

/// The committed, pre-checkout order.
///
/// At most one item per product id, every quantity at least 1, iterated in
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, product_id: Uuid) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == product_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Move an item's quantity by `delta`, removing it when it reaches zero.
    ///
    /// Returns `None` when the product is not in the cart (a no-op), otherwise
    /// the new quantity, where `Some(0)` means the item was removed.
    pub fn adjust_quantity(
        &mut self,
        settings: &StoreSettings,
        product_id: Uuid,
        delta: i64,
    ) -> Result<Option<u32>, OrderingError> {
        ensure_open(settings)?;

        let Some(index) = self.position(product_id) else {
            return Ok(None);
        };
        let next = apply_delta(self.items[index].quantity, delta);
        if next == 0 {
            self.items.remove(index);
        } else {
            self.items[index].quantity = next;
        }
        Ok(Some(next))
    }

    /// Drop an item whatever the store status, so a customer can always empty
    /// their cart.
    pub fn remove_item(&mut self, product_id: Uuid) -> Option<CartItem> {
        let index = self.position(product_id)?;
        Some(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Add `quantity` units of `product`, on top of whatever is already there.
    pub(crate) fn add_quantity(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.position(product.id) {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity = item.quantity.saturating_add(quantity);
            }
            None => self.items.push(CartItem {
                product: product.clone(),
                quantity,
            }),
        }
    }

    fn position(&self, product_id: Uuid) -> Option<usize> {
        self.items.iter().position(|item| item.id() == product_id)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::ordering::catalog::test_support::{open_store, product};

    fn cart_with(product: &Product, quantity: u32) -> Cart {
        let mut cart = Cart::new();
        cart.add_quantity(product, quantity);
        cart
    }

    #[test]
    fn decrementing_the_last_unit_removes_the_item() {
        let settings = open_store(Decimal::ZERO);
        let soup = product("Soup", Decimal::TEN, 1);
        let mut cart = cart_with(&soup, 1);

        assert_eq!(cart.adjust_quantity(&settings, soup.id, -1), Ok(Some(0)));
        assert!(cart.is_empty());
    }

    #[test]
    fn large_decrements_never_go_negative() {
        let settings = open_store(Decimal::ZERO);
        let soup = product("Soup", Decimal::TEN, 1);
        let mut cart = cart_with(&soup, 3);

        assert_eq!(cart.adjust_quantity(&settings, soup.id, -10), Ok(Some(0)));
        assert!(cart.get(soup.id).is_none());
    }

    #[test]
    fn adjusting_keeps_item_position() {
        let settings = open_store(Decimal::ZERO);
        let soup = product("Soup", Decimal::TEN, 1);
        let bread = product("Bread", Decimal::ONE, 2);
        let mut cart = cart_with(&soup, 1);
        cart.add_quantity(&bread, 1);

        cart.adjust_quantity(&settings, soup.id, 2).expect("open");
        assert_eq!(cart.items()[0].id(), soup.id);
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn adjusting_a_missing_item_is_a_no_op() {
        let settings = open_store(Decimal::ZERO);
        let soup = product("Soup", Decimal::TEN, 1);
        let mut cart = cart_with(&soup, 2);
        let before = cart.clone();

        assert_eq!(cart.adjust_quantity(&settings, Uuid::new_v4(), 1), Ok(None));
        assert_eq!(cart, before);
    }

    #[test]
    fn closed_store_blocks_adjust_but_not_remove() {
        let mut settings = open_store(Decimal::ZERO);
        settings.is_open = false;
        let soup = product("Soup", Decimal::TEN, 1);
        let mut cart = cart_with(&soup, 2);

        assert_eq!(
            cart.adjust_quantity(&settings, soup.id, 1),
            Err(OrderingError::StoreClosed)
        );
        assert_eq!(cart.get(soup.id).map(|item| item.quantity), Some(2));

        assert!(cart.remove_item(soup.id).is_some());
        assert!(cart.is_empty());
    }

    #[test]
    fn subtotal_and_count_follow_quantities() {
        let soup = product("Soup", Decimal::new(1050, 2), 1);
        let bread = product("Bread", Decimal::new(199, 2), 2);
        let mut cart = cart_with(&soup, 2);
        cart.add_quantity(&bread, 3);

        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.subtotal(), Decimal::new(2697, 2));
    }
}
