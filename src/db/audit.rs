use super::DocumentStore;
use crate::models::audit::AuditEntry;

/// Audit entries of one document, oldest first.
pub async fn fetch_audit_trail(store: &DocumentStore, document_id: &str) -> Vec<AuditEntry> {
    store
        .read()
        .await
        .audit
        .iter()
        .filter(|entry| entry.document_id == document_id)
        .cloned()
        .collect()
}
