use crate::models::StoreSettings;

use super::OrderingError;

/// Refuse any cart or selection mutation while the store is closed.
///
/// Checked on every call against the current settings snapshot.
pub fn ensure_open(settings: &StoreSettings) -> Result<(), OrderingError> {
    if settings.is_open {
        Ok(())
    } else {
        Err(OrderingError::StoreClosed)
    }
}
