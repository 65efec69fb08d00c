use actix_web::{delete, get, patch, web, HttpResponse, Responder};
use chrono::Utc;
use tracing::instrument;
use validator::Validate;

use crate::{
    core::{AppError, AppSuccessResponse, CurrentUser},
    db::{audit, documents, DocumentStore},
    models::{
        documents::{DocumentDetail, DocumentPatch},
        pagination::PaginationQuery,
        search::{DocumentQuery, SearchFilters, SuggestionQuery},
        users::User,
    },
    search::{
        listing::build_listing,
        pipeline::{visible_documents, PipelineRequest},
        stats::compute_stats,
        suggestions::suggest,
    },
};

fn pipeline_request<'a>(viewer: &'a User, query: &'a DocumentQuery, filters: &'a SearchFilters) -> PipelineRequest<'a> {
    PipelineRequest {
        viewer,
        bulk_mode: query.bulk_mode,
        query: &query.q,
        filters,
        sort_by: query.sort_by,
        sort_order: query.sort_order,
    }
}

#[instrument(name = "List Documents", skip(store, user), fields(user_id = %user.id, role = %user.role))]
#[get("")]
pub async fn list_documents(
    store: web::Data<DocumentStore>,
    user: CurrentUser,
    query: web::Query<DocumentQuery>,
    pagination: web::Query<PaginationQuery>,
) -> Result<impl Responder, AppError> {
    let mut pagination = pagination.into_inner();
    pagination.validate();

    let filters = query.filters();
    let request = pipeline_request(&user, &query, &filters);
    let now = Utc::now();

    let (listing, pagination_meta) = store
        .with_snapshot(|docs, departments| build_listing(docs, departments, &request, &pagination, now))
        .await;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        message: "Documents retrieved successfully".to_string(),
        data: listing,
        pagination: pagination_meta,
    }))
}

#[instrument(name = "Document Statistics", skip(store, user), fields(user_id = %user.id))]
#[get("/stats")]
pub async fn get_document_stats(
    store: web::Data<DocumentStore>,
    user: CurrentUser,
    query: web::Query<DocumentQuery>,
) -> Result<impl Responder, AppError> {
    let filters = query.filters();
    let request = pipeline_request(&user, &query, &filters);
    let now = Utc::now();

    let stats = store
        .with_snapshot(|docs, _| compute_stats(&visible_documents(docs, &request), &user, now))
        .await;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        message: "Statistics retrieved successfully".to_string(),
        data: stats,
        pagination: None,
    }))
}

#[instrument(name = "Search Suggestions", skip(store))]
#[get("/suggestions")]
pub async fn get_suggestions(
    store: web::Data<DocumentStore>,
    query: web::Query<SuggestionQuery>,
) -> Result<impl Responder, AppError> {
    let suggestions = store
        .with_snapshot(|docs, departments| suggest(docs, departments, &query.q))
        .await;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        message: "Suggestions retrieved successfully".to_string(),
        data: suggestions,
        pagination: None,
    }))
}

#[instrument(name = "View Document", skip(store, user), fields(user_id = %user.id))]
#[get("/{document_id}")]
pub async fn view_document(
    store: web::Data<DocumentStore>,
    user: CurrentUser,
    document_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let now = Utc::now();
    let document = documents::view_document(store.get_ref(), &document_id, &user, now).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        message: "Document retrieved successfully".to_string(),
        data: DocumentDetail::project(&document, &user, now),
        pagination: None,
    }))
}

#[instrument(name = "Edit Document Metadata", skip(store, user, patch), fields(user_id = %user.id))]
#[patch("/{document_id}")]
pub async fn update_document(
    store: web::Data<DocumentStore>,
    user: CurrentUser,
    document_id: web::Path<String>,
    patch: web::Json<DocumentPatch>,
) -> Result<impl Responder, AppError> {
    patch.validate()?;

    let now = Utc::now();
    let document =
        documents::update_metadata(store.get_ref(), &document_id, patch.into_inner(), &user, now).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        message: "Document updated successfully".to_string(),
        data: DocumentDetail::project(&document, &user, now),
        pagination: None,
    }))
}

#[instrument(name = "Delete Document", skip(store, user), fields(user_id = %user.id))]
#[delete("/{document_id}")]
pub async fn delete_document(
    store: web::Data<DocumentStore>,
    user: CurrentUser,
    document_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let removed = documents::delete_document(store.get_ref(), &document_id, &user, Utc::now()).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        message: format!("\"{}\" was deleted", removed.title),
        data: removed.id,
        pagination: None,
    }))
}

/// Entries outlive the document, so a deleted document still has a trail.
#[instrument(name = "Document Audit Trail", skip(store))]
#[get("/{document_id}/audit")]
pub async fn get_audit_trail(
    store: web::Data<DocumentStore>,
    document_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let entries = audit::fetch_audit_trail(store.get_ref(), &document_id).await;
    if entries.is_empty() {
        documents::fetch_document(store.get_ref(), &document_id).await?;
    }

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        message: "Audit trail retrieved successfully".to_string(),
        data: entries,
        pagination: None,
    }))
}
