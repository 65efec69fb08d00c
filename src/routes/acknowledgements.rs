use actix_web::{get, post, web, HttpResponse, Responder};
use chrono::Utc;
use tracing::instrument;
use validator::Validate;

use crate::{
    core::{AppError, AppSuccessResponse, CurrentUser, Notifier},
    db::{acknowledgements, DocumentStore},
    models::acknowledgements::{AcknowledgeRequest, ReminderOutcome},
};

#[instrument(name = "Acknowledge Document", skip(store, user, request), fields(user_id = %user.id))]
#[post("/{document_id}/acknowledge")]
pub async fn acknowledge_document(
    store: web::Data<DocumentStore>,
    user: CurrentUser,
    document_id: web::Path<String>,
    request: web::Json<AcknowledgeRequest>,
) -> Result<impl Responder, AppError> {
    request.validate()?;

    let acknowledgement =
        acknowledgements::acknowledge_document(store.get_ref(), &document_id, &user, &request.signature, Utc::now())
            .await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        message: "Document acknowledged".to_string(),
        data: acknowledgement,
        pagination: None,
    }))
}

#[instrument(name = "Get Acceptance Status", skip(store))]
#[get("/{document_id}/acknowledgements")]
pub async fn get_acceptance_status(
    store: web::Data<DocumentStore>,
    document_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let status = acknowledgements::acceptance_status(store.get_ref(), &document_id).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        message: format!("{} accepted, {} pending", status.accepted.len(), status.pending.len()),
        data: status,
        pagination: None,
    }))
}

#[instrument(name = "Remind Pending Acknowledgements", skip(store, notifier, user), fields(user_id = %user.id))]
#[post("/{document_id}/acknowledgements/remind")]
pub async fn remind_pending(
    store: web::Data<DocumentStore>,
    notifier: web::Data<Notifier>,
    user: CurrentUser,
    document_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let status = acknowledgements::acceptance_status(store.get_ref(), &document_id).await?;
    let recipients = notifier.remind_acknowledgement(&status.document_id, &status.title, &status.pending);
    acknowledgements::record_reminder(store.get_ref(), &document_id, &user, recipients.len(), Utc::now()).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        message: format!("Reminder sent to {} pending users", recipients.len()),
        data: ReminderOutcome {
            document_id: status.document_id,
            recipients,
        },
        pagination: None,
    }))
}
