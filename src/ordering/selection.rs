use std::collections::BTreeMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::StoreSettings;

use super::{
    OrderingError,
    catalog::Catalog,
    gate::ensure_open,
    money::{apply_delta, line_total},
};

/// Quantities picked on the menu that have not been committed to the cart yet.
///
/// Invariant: every stored quantity is at least 1. Dropping to zero removes the
/// entry, so "has a pending selection" is the same as "is present".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionBuffer {
    entries: BTreeMap<Uuid, u32>,
}

impl SelectionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the pending quantity of `product_id` by `delta`, floored at zero.
    ///
    /// Returns the new pending quantity. When the store is closed nothing is
    /// touched and [`OrderingError::StoreClosed`] is returned.
    pub fn increment(
        &mut self,
        settings: &StoreSettings,
        product_id: Uuid,
        delta: i64,
    ) -> Result<u32, OrderingError> {
        ensure_open(settings)?;

        let next = apply_delta(self.pending_quantity(product_id), delta);
        if next == 0 {
            self.entries.remove(&product_id);
        } else {
            self.entries.insert(product_id, next);
        }
        Ok(next)
    }

    pub fn pending_quantity(&self, product_id: Uuid) -> u32 {
        self.entries.get(&product_id).copied().unwrap_or(0)
    }

    pub fn total_pending_count(&self) -> u64 {
        self.entries.values().map(|&qty| u64::from(qty)).sum()
    }

    /// Value of everything pending, priced from the current catalog.
    ///
    /// Ids that vanished from the catalog contribute nothing.
    pub fn total_pending_value(&self, catalog: &Catalog) -> Decimal {
        self.entries
            .iter()
            .filter_map(|(&id, &qty)| catalog.find(id).map(|p| line_total(p.price, qty)))
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Uuid, u32)> + '_ {
        self.entries.iter().map(|(&id, &qty)| (id, qty))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drain every entry in one step, leaving the buffer empty.
    pub(crate) fn take(&mut self) -> BTreeMap<Uuid, u32> {
        std::mem::take(&mut self.entries)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::ordering::catalog::test_support::{open_store, product};

    fn expected_after(deltas: &[i64]) -> i64 {
        deltas.iter().fold(0_i64, |acc, &delta| {
            acc.saturating_add(delta).clamp(0, i64::from(u32::MAX))
        })
    }

    #[test]
    fn increments_accumulate_and_clamp_at_zero() {
        let settings = open_store(Decimal::ZERO);
        let sequences: [&[i64]; 8] = [
            &[2, -5, 3, 1, -1],
            &[-1, -1, -1],
            &[5, -1_000_000, 2],
            &[i64::MIN, 4, i64::MIN, 1],
            &[i64::MAX, 1, -1],
            &[i64::MAX, i64::MIN, 7],
            &[i64::from(u32::MAX), 10, -3],
            &[0, 0, 3, -3, 0],
        ];

        for deltas in sequences {
            let id = Uuid::new_v4();
            let mut buffer = SelectionBuffer::new();
            for (step, &delta) in deltas.iter().enumerate() {
                let qty = buffer.increment(&settings, id, delta).expect("open");
                assert_eq!(
                    i64::from(qty),
                    expected_after(&deltas[..=step]),
                    "deltas {deltas:?} at step {step}"
                );
                assert!(buffer.iter().all(|(_, qty)| qty > 0));
                assert_eq!(buffer.pending_quantity(id) == 0, buffer.is_empty());
            }
        }
    }

    #[test]
    fn interleaved_products_each_follow_their_own_deltas() {
        let settings = open_store(Decimal::ZERO);
        let ids = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let mut buffer = SelectionBuffer::new();
        let mut applied: [Vec<i64>; 3] = Default::default();

        // Deterministic pseudo-random walk, biased toward small steps.
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        for _ in 0..300 {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            let slot = (seed >> 33) as usize % ids.len();
            let delta = match (seed >> 40) % 10 {
                0 => i64::MIN,
                1 => i64::MAX,
                n => n as i64 - 5,
            };
            applied[slot].push(delta);
            buffer.increment(&settings, ids[slot], delta).expect("open");

            for (id, deltas) in ids.iter().zip(&applied) {
                assert_eq!(
                    i64::from(buffer.pending_quantity(*id)),
                    expected_after(deltas)
                );
            }
            assert!(buffer.iter().all(|(_, qty)| qty > 0));
        }
    }

    #[test]
    fn reaching_zero_removes_the_entry() {
        let settings = open_store(Decimal::ZERO);
        let id = Uuid::new_v4();
        let mut buffer = SelectionBuffer::new();
        buffer.increment(&settings, id, 1).expect("open");
        buffer.increment(&settings, id, -1).expect("open");

        assert!(buffer.is_empty());
        assert_eq!(buffer.pending_quantity(id), 0);
    }

    #[test]
    fn closed_store_rejects_without_mutating() {
        let mut settings = open_store(Decimal::ZERO);
        let id = Uuid::new_v4();
        let mut buffer = SelectionBuffer::new();
        buffer.increment(&settings, id, 2).expect("open");

        settings.is_open = false;
        let before = buffer.clone();
        assert_eq!(
            buffer.increment(&settings, id, 1),
            Err(OrderingError::StoreClosed)
        );
        assert_eq!(buffer, before);
    }

    #[test]
    fn pending_totals_skip_unknown_products() {
        let settings = open_store(Decimal::ZERO);
        let soup = product("Soup", Decimal::new(1250, 2), 1);
        let catalog = Catalog::new(vec![soup.clone()]);
        let mut buffer = SelectionBuffer::new();
        buffer.increment(&settings, soup.id, 2).expect("open");
        buffer.increment(&settings, Uuid::new_v4(), 4).expect("open");

        assert_eq!(buffer.total_pending_count(), 6);
        assert_eq!(buffer.total_pending_value(&catalog), Decimal::new(2500, 2));
    }

    #[test]
    fn take_leaves_the_buffer_empty() {
        let settings = open_store(Decimal::ZERO);
        let mut buffer = SelectionBuffer::new();
        buffer.increment(&settings, Uuid::new_v4(), 2).expect("open");
        let drained = buffer.take();

        assert_eq!(drained.len(), 1);
        assert!(buffer.is_empty());
    }
}
