//! Cart-to-order core.
//!
//! Customer selections are staged in a [`SelectionBuffer`], folded into a
//! [`Cart`] by [`merge_into_cart`], totalled by [`compute_totals`] and finally
//! serialized into a hand-off message by [`submit`]. Everything in here is
//! synchronous and free of I/O; the service layer owns the state and calls in.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod gate;
pub mod merge;
pub mod money;
pub mod order;
pub mod selection;

use thiserror::Error;

pub use cart::{Cart, CartItem};
pub use catalog::{Catalog, CatalogEntry};
pub use checkout::{CheckoutTotals, CombinedSummary, combined_summary, compute_totals};
pub use gate::ensure_open;
pub use merge::{MergeReport, merge_into_cart};
pub use order::{
    CustomerDetails, OrderDraft, PaymentMethod, RequiredField, SubmittedOrder, build_handoff_url,
    compose_message, submit, validate,
};
pub use selection::SelectionBuffer;

/// Reasons the core refuses a transition. None of them are faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderingError {
    #[error("the store is closed")]
    StoreClosed,

    #[error("please fill in the following fields: {}", RequiredField::join(.0))]
    MissingFields(Vec<RequiredField>),

    #[error("the cart is empty")]
    EmptyCart,
}
