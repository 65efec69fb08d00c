use actix_web::{post, web, HttpResponse, Responder};
use chrono::Utc;
use tracing::instrument;
use validator::Validate;

use crate::{
    core::{AppError, AppSuccessResponse, CurrentUser, Notifier},
    db::{documents, DocumentStore},
    models::{
        audit::AuditAction,
        documents::{
            BulkOutcome, BulkRejectRequest, BulkRequest, Document, DocumentDetail, NotificationOutcome,
            RejectRequest,
        },
    },
};

#[instrument(name = "Approve Document", skip(store, notifier, user), fields(user_id = %user.id))]
#[post("/{document_id}/approve")]
pub async fn approve_document(
    store: web::Data<DocumentStore>,
    notifier: web::Data<Notifier>,
    user: CurrentUser,
    document_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let now = Utc::now();
    let document = documents::approve_document(store.get_ref(), &document_id, &user, now).await?;
    if document.notify_all_after_approval {
        notifier.broadcast_approval(&[&document]);
    }

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        message: format!("\"{}\" has been approved", document.title),
        data: DocumentDetail::project(&document, &user, now),
        pagination: None,
    }))
}

#[instrument(name = "Reject Document", skip(store, notifier, user, request), fields(user_id = %user.id))]
#[post("/{document_id}/reject")]
pub async fn reject_document(
    store: web::Data<DocumentStore>,
    notifier: web::Data<Notifier>,
    user: CurrentUser,
    document_id: web::Path<String>,
    request: web::Json<RejectRequest>,
) -> Result<impl Responder, AppError> {
    request.validate()?;

    let now = Utc::now();
    let document =
        documents::reject_document(store.get_ref(), &document_id, &user, &request.feedback, now).await?;
    notifier.notify_rejection(&document, &user, &request.feedback);

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        message: format!("\"{}\" has been rejected", document.title),
        data: DocumentDetail::project(&document, &user, now),
        pagination: None,
    }))
}

#[instrument(name = "Bulk Approve Documents", skip(store, notifier, user, request), fields(user_id = %user.id))]
#[post("/bulk/approve")]
pub async fn bulk_approve(
    store: web::Data<DocumentStore>,
    notifier: web::Data<Notifier>,
    user: CurrentUser,
    request: web::Json<BulkRequest>,
) -> Result<impl Responder, AppError> {
    request.validate()?;

    let (approved, missing_ids) =
        documents::approve_documents(store.get_ref(), &request.document_ids, &user, Utc::now()).await;
    let flagged: Vec<&Document> = approved.iter().filter(|d| d.notify_all_after_approval).collect();
    let notified = notifier.broadcast_approval(&flagged);

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        message: format!("{} document(s) approved", approved.len()),
        data: BulkOutcome {
            affected: approved.len(),
            notified,
            missing_ids,
        },
        pagination: None,
    }))
}

#[instrument(name = "Bulk Reject Documents", skip(store, notifier, user, request), fields(user_id = %user.id))]
#[post("/bulk/reject")]
pub async fn bulk_reject(
    store: web::Data<DocumentStore>,
    notifier: web::Data<Notifier>,
    user: CurrentUser,
    request: web::Json<BulkRejectRequest>,
) -> Result<impl Responder, AppError> {
    request.validate()?;

    let (rejected, missing_ids) = documents::reject_documents(
        store.get_ref(),
        &request.document_ids,
        &user,
        &request.feedback,
        Utc::now(),
    )
    .await;
    for document in &rejected {
        notifier.notify_rejection(document, &user, &request.feedback);
    }

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        message: format!("{} document(s) rejected", rejected.len()),
        data: BulkOutcome {
            affected: rejected.len(),
            notified: rejected.len(),
            missing_ids,
        },
        pagination: None,
    }))
}

async fn send_approval_requests(
    store: &DocumentStore,
    notifier: &Notifier,
    user: &CurrentUser,
    document_ids: &[String],
    resend: bool,
) -> NotificationOutcome {
    let action = if resend {
        AuditAction::NotificationResent
    } else {
        AuditAction::ApprovalRequested
    };
    let (found, missing_ids) = documents::mark_notified(store, document_ids, action, user, Utc::now()).await;
    let recipients = notifier.request_approval(&found, store.directory().users(), resend);

    NotificationOutcome {
        documents: found.len(),
        recipients,
        missing_ids,
    }
}

#[instrument(name = "Request Approval", skip(store, notifier, user, request), fields(user_id = %user.id))]
#[post("/bulk/request-approval")]
pub async fn request_approval(
    store: web::Data<DocumentStore>,
    notifier: web::Data<Notifier>,
    user: CurrentUser,
    request: web::Json<BulkRequest>,
) -> Result<impl Responder, AppError> {
    request.validate()?;

    let outcome = send_approval_requests(&store, &notifier, &user, &request.document_ids, false).await;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        message: format!("Approval requested for {} document(s)", outcome.documents),
        data: outcome,
        pagination: None,
    }))
}

#[instrument(name = "Resend Notification", skip(store, notifier, user, request), fields(user_id = %user.id))]
#[post("/bulk/resend-notification")]
pub async fn resend_notification(
    store: web::Data<DocumentStore>,
    notifier: web::Data<Notifier>,
    user: CurrentUser,
    request: web::Json<BulkRequest>,
) -> Result<impl Responder, AppError> {
    request.validate()?;

    let outcome = send_approval_requests(&store, &notifier, &user, &request.document_ids, true).await;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        message: format!("Notification resent for {} document(s)", outcome.documents),
        data: outcome,
        pagination: None,
    }))
}
