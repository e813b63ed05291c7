use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::{cart::Cart, catalog::Catalog, selection::SelectionBuffer};

/// Totals shown in the checkout view. Derived on every read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct CheckoutTotals {
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
    pub item_count: u64,
}

impl CheckoutTotals {
    /// A zero fee is settled later over chat rather than waived.
    pub fn delivery_fee_to_be_calculated(&self) -> bool {
        self.delivery_fee.is_zero()
    }
}

pub fn compute_totals(cart: &Cart, delivery_fee: Decimal) -> CheckoutTotals {
    let subtotal = cart.subtotal();
    CheckoutTotals {
        subtotal,
        delivery_fee,
        total: subtotal + delivery_fee,
        item_count: cart.item_count(),
    }
}

/// Cart plus not-yet-merged selections, for the floating cart indicator.
///
/// Read-only; the checkout view always uses [`compute_totals`] on the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct CombinedSummary {
    pub item_count: u64,
    pub total: Decimal,
}

impl CombinedSummary {
    /// The indicator only shows once something has been picked.
    pub fn is_visible(&self) -> bool {
        self.item_count > 0
    }
}

pub fn combined_summary(
    cart: &Cart,
    buffer: &SelectionBuffer,
    catalog: &Catalog,
    delivery_fee: Decimal,
) -> CombinedSummary {
    CombinedSummary {
        item_count: cart.item_count() + buffer.total_pending_count(),
        total: cart.subtotal() + buffer.total_pending_value(catalog) + delivery_fee,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::{
        catalog::test_support::{open_store, product},
        merge::merge_into_cart,
    };

    #[test]
    fn totals_for_a_single_line() {
        let soup = product("Soup", Decimal::new(1000, 2), 1);
        let mut cart = Cart::new();
        cart.add_quantity(&soup, 2);

        let totals = compute_totals(&cart, Decimal::new(500, 2));

        assert_eq!(totals.subtotal, Decimal::new(2000, 2));
        assert_eq!(totals.delivery_fee, Decimal::new(500, 2));
        assert_eq!(totals.total, Decimal::new(2500, 2));
        assert_eq!(totals.item_count, 2);
    }

    #[test]
    fn total_is_subtotal_plus_fee_without_rounding() {
        let third = product("Third", Decimal::new(3333, 4), 1);
        let mut cart = Cart::new();
        cart.add_quantity(&third, 7);

        for fee in [Decimal::ZERO, Decimal::new(1, 3), Decimal::new(799, 2)] {
            let totals = compute_totals(&cart, fee);
            assert_eq!(totals.subtotal, Decimal::new(23331, 4));
            assert_eq!(totals.total, totals.subtotal + fee);
        }
    }

    #[test]
    fn zero_fee_is_flagged_as_pending() {
        let totals = compute_totals(&Cart::new(), Decimal::ZERO);
        assert!(totals.delivery_fee_to_be_calculated());
        assert!(!compute_totals(&Cart::new(), Decimal::ONE).delivery_fee_to_be_calculated());
    }

    #[test]
    fn combined_view_matches_checkout_after_merge() {
        let settings = open_store(Decimal::new(500, 2));
        let soup = product("Soup", Decimal::TEN, 1);
        let bread = product("Bread", Decimal::TWO, 2);
        let catalog = Catalog::new(vec![soup.clone(), bread.clone()]);
        let mut cart = Cart::new();
        cart.add_quantity(&soup, 1);
        let mut buffer = SelectionBuffer::new();
        buffer.increment(&settings, bread.id, 3).expect("open");

        let before = combined_summary(&cart, &buffer, &catalog, settings.delivery_fee);
        assert_eq!(before.item_count, 4);
        assert_eq!(before.total, Decimal::new(2100, 2));
        assert!(before.is_visible());

        merge_into_cart(&mut buffer, &mut cart, &catalog);
        let after = combined_summary(&cart, &buffer, &catalog, settings.delivery_fee);
        let totals = compute_totals(&cart, settings.delivery_fee);
        assert_eq!(after.item_count, totals.item_count);
        assert_eq!(after.total, totals.total);
    }
}
