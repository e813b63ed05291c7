use uuid::Uuid;

use super::{cart::Cart, catalog::Catalog, selection::SelectionBuffer};

/// What happened to each buffered entry during a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub merged: Vec<Uuid>,
    /// Ids that no longer resolve against the catalog and were dropped.
    pub skipped: Vec<Uuid>,
}

impl MergeReport {
    pub fn is_noop(&self) -> bool {
        self.merged.is_empty() && self.skipped.is_empty()
    }
}

/// Fold every pending selection into the cart and empty the buffer.
///
/// Quantities are additive: a product already in the cart ends up with its
/// cart quantity plus its buffered quantity. Products missing from `catalog`
/// are skipped. The buffer is drained in one step before anything is applied,
/// so it is empty afterwards whatever it held. An empty buffer leaves the cart
/// untouched.
pub fn merge_into_cart(
    buffer: &mut SelectionBuffer,
    cart: &mut Cart,
    catalog: &Catalog,
) -> MergeReport {
    let mut report = MergeReport::default();

    for (product_id, quantity) in buffer.take() {
        if quantity == 0 {
            continue;
        }
        match catalog.find(product_id) {
            Some(product) => {
                cart.add_quantity(product, quantity);
                report.merged.push(product_id);
            }
            None => report.skipped.push(product_id),
        }
    }

    report
}
