use idsboard_common::{ActionLog, Persisted};
use tracing::*;

use crate::store::DocumentStore;

/// Appends an audit entry after a successful mutating request.
///
/// Best-effort: a failed write is logged and otherwise ignored, it never
/// changes the outcome of the request that triggered it.
pub async fn record_action(store: &DocumentStore, entry: ActionLog) {
    match store.insert(ActionLog::KIND.collection(), &entry).await {
        Ok(id) => debug!(%id, action = %entry.action, "Action logged"),
        Err(error) => warn!(%error, action = %entry.action, "Failed to write action log entry"),
    }
}
