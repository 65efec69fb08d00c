use chrono::{DateTime, Utc};

use super::{DocumentStore, StoreError};
use crate::core::{generate_id, split_tags};
use crate::models::audit::AuditAction;
use crate::models::documents::{ApprovalStatus, Document, DocumentPatch, NewDocument};
use crate::models::users::User;

pub async fn fetch_document(store: &DocumentStore, document_id: &str) -> Result<Document, StoreError> {
    let state = store.read().await;
    state
        .position(document_id)
        .map(|idx| state.documents[idx].clone())
        .ok_or_else(|| StoreError::DocumentNotFound(document_id.to_string()))
}

/// Fetches a document for display and records that `viewer` opened it.
pub async fn view_document(
    store: &DocumentStore,
    document_id: &str,
    viewer: &User,
    now: DateTime<Utc>,
) -> Result<Document, StoreError> {
    let mut state = store.write().await;
    let idx = state
        .position(document_id)
        .ok_or_else(|| StoreError::DocumentNotFound(document_id.to_string()))?;
    let document = state.documents[idx].clone();
    state.record(document_id, AuditAction::Viewed, &viewer.name, now, None);
    Ok(document)
}

/// Completes each upload with defaults and puts the batch in front of the
/// existing documents, keeping the batch's own order.
pub async fn insert_documents(
    store: &DocumentStore,
    uploads: Vec<NewDocument>,
    uploader: &User,
    now: DateTime<Utc>,
) -> Result<Vec<Document>, StoreError> {
    let mut state = store.write().await;

    let mut created: Vec<Document> = Vec::with_capacity(uploads.len());
    for upload in uploads {
        let id = upload.id.filter(|id| !id.trim().is_empty()).unwrap_or_else(generate_id);
        if state.position(&id).is_some() || created.iter().any(|d| d.id == id) {
            return Err(StoreError::DuplicateDocument(id));
        }

        let mut tags: Vec<String> = Vec::new();
        for tag in upload.tags.iter().flat_map(|t| split_tags(t)) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        created.push(Document {
            id,
            title: upload.title.trim().to_string(),
            description: upload.description,
            doc_type: upload.doc_type,
            department: upload.department.trim().to_string(),
            file_type: upload.file_type.to_lowercase(),
            file_size: upload.file_size,
            tags,
            collaborators: upload.collaborators,
            uploaded_by: upload.uploaded_by.unwrap_or_else(|| uploader.name.clone()),
            uploaded_at: upload.uploaded_at.unwrap_or(now),
            last_modified: upload.last_modified.unwrap_or(now),
            approval_status: upload.approval_status.unwrap_or_default(),
            approved_by: None,
            approved_at: None,
            rejection_feedback: None,
            access_type: upload.access_type,
            security_level: upload.security_level,
            expiry_date: upload.expiry_date,
            notify_all_after_approval: upload.notify_all_after_approval,
        });
    }

    for document in &created {
        state.record(&document.id, AuditAction::Uploaded, &uploader.name, now, None);
    }

    let previous = std::mem::take(&mut state.documents);
    state.documents = created.iter().cloned().chain(previous).collect();

    tracing::info!(count = created.len(), uploader = %uploader.name, "documents uploaded");
    Ok(created)
}

fn decide(
    document: &mut Document,
    status: ApprovalStatus,
    actor: &User,
    feedback: Option<&str>,
    now: DateTime<Utc>,
) {
    if !document.is_pending() {
        tracing::debug!(
            document_id = %document.id,
            from = ?document.approval_status,
            to = ?status,
            "re-deciding a document that was already decided"
        );
    }
    document.approval_status = status;
    document.approved_by = Some(actor.name.clone());
    document.approved_at = Some(now);
    if let Some(feedback) = feedback {
        document.rejection_feedback = Some(feedback.trim().to_string());
    }
}

pub async fn approve_document(
    store: &DocumentStore,
    document_id: &str,
    actor: &User,
    now: DateTime<Utc>,
) -> Result<Document, StoreError> {
    let (mut approved, _) = approve_documents(store, &[document_id.to_string()], actor, now).await;
    approved
        .pop()
        .ok_or_else(|| StoreError::DocumentNotFound(document_id.to_string()))
}

pub async fn reject_document(
    store: &DocumentStore,
    document_id: &str,
    actor: &User,
    feedback: &str,
    now: DateTime<Utc>,
) -> Result<Document, StoreError> {
    let (mut rejected, _) =
        reject_documents(store, &[document_id.to_string()], actor, feedback, now).await;
    rejected
        .pop()
        .ok_or_else(|| StoreError::DocumentNotFound(document_id.to_string()))
}

/// Approves every listed document that exists. Returns the approved documents
/// and the ids that matched nothing.
pub async fn approve_documents(
    store: &DocumentStore,
    document_ids: &[String],
    actor: &User,
    now: DateTime<Utc>,
) -> (Vec<Document>, Vec<String>) {
    decide_many(store, document_ids, ApprovalStatus::Approved, actor, None, now).await
}

pub async fn reject_documents(
    store: &DocumentStore,
    document_ids: &[String],
    actor: &User,
    feedback: &str,
    now: DateTime<Utc>,
) -> (Vec<Document>, Vec<String>) {
    decide_many(store, document_ids, ApprovalStatus::Rejected, actor, Some(feedback), now).await
}

async fn decide_many(
    store: &DocumentStore,
    document_ids: &[String],
    status: ApprovalStatus,
    actor: &User,
    feedback: Option<&str>,
    now: DateTime<Utc>,
) -> (Vec<Document>, Vec<String>) {
    let action = match status {
        ApprovalStatus::Rejected => AuditAction::Rejected,
        _ => AuditAction::Approved,
    };

    let mut state = store.write().await;
    let mut decided = Vec::new();
    let mut missing = Vec::new();

    for id in dedup(document_ids) {
        match state.position(id) {
            Some(idx) => {
                decide(&mut state.documents[idx], status, actor, feedback, now);
                decided.push(state.documents[idx].clone());
                state.record(id, action, &actor.name, now, feedback.map(str::to_string));
            }
            None => missing.push(id.clone()),
        }
    }

    tracing::info!(
        decided = decided.len(),
        missing = missing.len(),
        status = ?status,
        actor = %actor.name,
        "approval decision applied"
    );
    (decided, missing)
}

/// Looks up documents for a notification and records the action on each.
pub async fn mark_notified(
    store: &DocumentStore,
    document_ids: &[String],
    action: AuditAction,
    actor: &User,
    now: DateTime<Utc>,
) -> (Vec<Document>, Vec<String>) {
    let mut state = store.write().await;
    let mut found = Vec::new();
    let mut missing = Vec::new();

    for id in dedup(document_ids) {
        match state.position(id) {
            Some(idx) => {
                found.push(state.documents[idx].clone());
                state.record(id, action, &actor.name, now, None);
            }
            None => missing.push(id.clone()),
        }
    }
    (found, missing)
}

pub async fn delete_document(
    store: &DocumentStore,
    document_id: &str,
    actor: &User,
    now: DateTime<Utc>,
) -> Result<Document, StoreError> {
    let mut state = store.write().await;
    let idx = state
        .position(document_id)
        .ok_or_else(|| StoreError::DocumentNotFound(document_id.to_string()))?;
    let removed = state.documents.remove(idx);
    state.acknowledgements.retain(|ack| ack.document_id != document_id);
    state.record(document_id, AuditAction::Deleted, &actor.name, now, Some(removed.title.clone()));

    tracing::info!(document_id, actor = %actor.name, "document deleted");
    Ok(removed)
}

pub async fn update_metadata(
    store: &DocumentStore,
    document_id: &str,
    patch: DocumentPatch,
    actor: &User,
    now: DateTime<Utc>,
) -> Result<Document, StoreError> {
    if let Some(unknown) = patch
        .add_collaborators
        .iter()
        .find(|id| store.directory().find_user(id).is_none())
    {
        return Err(StoreError::UnknownCollaborator(unknown.clone()));
    }

    let mut state = store.write().await;
    let idx = state
        .position(document_id)
        .ok_or_else(|| StoreError::DocumentNotFound(document_id.to_string()))?;
    let document = &mut state.documents[idx];

    if let Some(title) = patch.title {
        document.title = title.trim().to_string();
    }
    if let Some(description) = patch.description {
        document.description = description;
    }
    if let Some(doc_type) = patch.doc_type {
        document.doc_type = doc_type;
    }
    if let Some(department) = patch.department {
        document.department = department.trim().to_string();
    }
    if let Some(access_type) = patch.access_type {
        document.access_type = access_type;
    }
    if let Some(security_level) = patch.security_level {
        document.security_level = security_level;
    }
    if let Some(expiry_date) = patch.expiry_date {
        document.expiry_date = expiry_date;
    }
    if let Some(notify) = patch.notify_all_after_approval {
        document.notify_all_after_approval = notify;
    }

    document.tags.retain(|tag| !patch.remove_tags.contains(tag));
    if let Some(raw) = patch.add_tags.as_deref() {
        for tag in split_tags(raw) {
            if !document.tags.contains(&tag) {
                document.tags.push(tag);
            }
        }
    }

    document
        .collaborators
        .retain(|id| !patch.remove_collaborators.contains(id));
    for id in patch.add_collaborators {
        if !document.collaborators.contains(&id) {
            document.collaborators.push(id);
        }
    }

    document.last_modified = now;
    let updated = document.clone();
    state.record(document_id, AuditAction::Edited, &actor.name, now, None);
    Ok(updated)
}

// Keeps first occurrences so a repeated id is decided once.
fn dedup(ids: &[String]) -> Vec<&String> {
    let mut seen: Vec<&String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}
