use chrono::{DateTime, Utc};

use super::{DocumentStore, StoreError};
use crate::models::acknowledgements::{AcceptanceStatus, Acknowledgement};
use crate::models::audit::AuditAction;
use crate::models::users::User;

/// Records that `user` accepted the document. A second acceptance by the same
/// user returns the first one unchanged.
pub async fn acknowledge_document(
    store: &DocumentStore,
    document_id: &str,
    user: &User,
    signature: &str,
    now: DateTime<Utc>,
) -> Result<Acknowledgement, StoreError> {
    let mut state = store.write().await;
    if state.position(document_id).is_none() {
        return Err(StoreError::DocumentNotFound(document_id.to_string()));
    }

    if let Some(existing) = state
        .acknowledgements
        .iter()
        .find(|ack| ack.document_id == document_id && ack.user_id == user.id)
    {
        tracing::debug!(document_id, user_id = %user.id, "document already acknowledged");
        return Ok(existing.clone());
    }

    let acknowledgement = Acknowledgement {
        document_id: document_id.to_string(),
        user_id: user.id.clone(),
        user_name: user.name.clone(),
        acknowledged_at: now,
        signature: signature.to_string(),
    };
    state.acknowledgements.push(acknowledgement.clone());
    state.record(document_id, AuditAction::Acknowledged, &user.name, now, None);

    tracing::info!(document_id, user_id = %user.id, "document acknowledged");
    Ok(acknowledgement)
}

/// Acceptances in the order they were given, and every directory user who
/// has not accepted yet, in directory order.
pub async fn acceptance_status(store: &DocumentStore, document_id: &str) -> Result<AcceptanceStatus, StoreError> {
    let state = store.read().await;
    let idx = state
        .position(document_id)
        .ok_or_else(|| StoreError::DocumentNotFound(document_id.to_string()))?;

    let accepted: Vec<Acknowledgement> = state
        .acknowledgements
        .iter()
        .filter(|ack| ack.document_id == document_id)
        .cloned()
        .collect();
    let pending = store
        .directory()
        .users()
        .iter()
        .filter(|u| !accepted.iter().any(|ack| ack.user_id == u.id))
        .cloned()
        .collect();

    Ok(AcceptanceStatus {
        document_id: document_id.to_string(),
        title: state.documents[idx].title.clone(),
        accepted,
        pending,
    })
}

pub async fn record_reminder(
    store: &DocumentStore,
    document_id: &str,
    actor: &User,
    recipients: usize,
    now: DateTime<Utc>,
) -> Result<(), StoreError> {
    let mut state = store.write().await;
    if state.position(document_id).is_none() {
        return Err(StoreError::DocumentNotFound(document_id.to_string()));
    }
    state.record(
        document_id,
        AuditAction::AcknowledgementReminded,
        &actor.name,
        now,
        Some(format!("{} reminded", recipients)),
    );
    Ok(())
}
