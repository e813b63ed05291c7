use serde_json::Value;

use crate::{
    error::AppResult,
    storage::{AuditEntry, Storage},
};

pub async fn log_audit(
    storage: &Storage,
    actor: Option<&str>,
    action: &'static str,
    resource: Option<&'static str>,
    metadata: Option<Value>,
) -> AppResult<()> {
    storage
        .record_audit(AuditEntry {
            actor: actor.map(str::to_string),
            action,
            resource,
            metadata,
        })
        .await
}

/// Record an audit entry; a failure is logged and otherwise ignored.
pub async fn try_log_audit(
    storage: &Storage,
    actor: Option<&str>,
    action: &'static str,
    resource: Option<&'static str>,
    metadata: Option<Value>,
) {
    if let Err(err) = log_audit(storage, actor, action, resource, metadata).await {
        tracing::warn!(error = %err, action, "audit log failed");
    }
}
