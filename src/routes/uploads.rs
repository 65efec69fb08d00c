use actix_multipart::{Field, Multipart};
use actix_web::{post, web, HttpResponse, Responder};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use futures_util::TryStreamExt;
use tracing::instrument;
use validator::Validate;

use crate::{
    core::{config::UploadConfig, file_type_from_name, AppError, AppErrorType, AppSuccessResponse, CurrentUser},
    db::{documents, DocumentStore},
    models::documents::{DocumentCard, NewDocument, UploadBatch},
};

#[instrument(name = "Upload Documents", skip(store, user, batch), fields(user_id = %user.id))]
#[post("")]
pub async fn upload_documents(
    store: web::Data<DocumentStore>,
    user: CurrentUser,
    batch: web::Json<UploadBatch>,
) -> Result<impl Responder, AppError> {
    batch.validate()?;
    for upload in &batch.documents {
        upload.validate()?;
    }

    let now = Utc::now();
    let created = documents::insert_documents(store.get_ref(), batch.into_inner().documents, &user, now).await?;
    let data: Vec<DocumentCard> = created
        .iter()
        .map(|doc| DocumentCard::project(doc, &user, now))
        .collect();

    Ok(HttpResponse::Created().json(AppSuccessResponse {
        success: true,
        message: format!("{} document(s) uploaded", data.len()),
        data,
        pagination: None,
    }))
}

#[instrument(name = "Upload File", skip(store, limits, user, payload), fields(user_id = %user.id))]
#[post("/upload")]
pub async fn upload_file(
    store: web::Data<DocumentStore>,
    limits: web::Data<UploadConfig>,
    user: CurrentUser,
    mut payload: Multipart,
) -> Result<impl Responder, AppError> {
    let mut upload = NewDocument::default();
    let mut received_file = false;

    while let Some(mut field) = payload.try_next().await.map_err(|e| {
        tracing::error!("Failed to read multipart field: {:?}", e);
        AppError {
            message: Some("Invalid file upload format".to_string()),
            cause: Some(e.to_string()),
            error_type: AppErrorType::PayloadValidationError,
        }
    })? {
        let content_disposition = field.content_disposition();
        let field_name = content_disposition.get_name().unwrap_or("").to_string();
        let filename = content_disposition.get_filename().map(str::to_string);

        match field_name.as_str() {
            "file" => {
                let filename = filename.ok_or_else(|| AppError::validation_error("Filename is required"))?;
                upload.file_size = measure_file(&mut field, limits.max_file_size_bytes).await? as u64;
                upload.file_type = file_type_from_name(&filename);
                if upload.title.trim().is_empty() {
                    upload.title = filename;
                }
                received_file = true;
            }
            "title" => upload.title = read_text(&mut field, &field_name).await?,
            "description" => upload.description = read_text(&mut field, &field_name).await?,
            "type" => upload.doc_type = read_text(&mut field, &field_name).await?,
            "department" => upload.department = read_text(&mut field, &field_name).await?,
            "tags" => upload.tags = vec![read_text(&mut field, &field_name).await?],
            "access_type" => {
                upload.access_type = read_text(&mut field, &field_name)
                    .await?
                    .parse()
                    .map_err(AppError::validation_error)?;
            }
            "security_level" => {
                let raw = read_text(&mut field, &field_name).await?;
                upload.security_level = match raw.trim() {
                    "" => None,
                    level => Some(level.parse().map_err(AppError::validation_error)?),
                };
            }
            "expiry_date" => {
                let raw = read_text(&mut field, &field_name).await?;
                upload.expiry_date = parse_expiry(&raw)?;
            }
            "notify_all_after_approval" => {
                let raw = read_text(&mut field, &field_name).await?;
                upload.notify_all_after_approval = matches!(raw.trim(), "true" | "on" | "1");
            }
            _ => {
                // Skip unknown fields
                while field.try_next().await.map_err(|e| AppError::validation_error(e.to_string()))?.is_some() {}
            }
        }
    }

    if !received_file {
        return Err(AppError::validation_error("File is required"));
    }
    upload.validate()?;

    let now = Utc::now();
    let mut created = documents::insert_documents(store.get_ref(), vec![upload], &user, now).await?;
    let document = created
        .pop()
        .ok_or_else(|| AppError::internal_error("Upload produced no document"))?;

    Ok(HttpResponse::Created().json(AppSuccessResponse {
        success: true,
        message: format!("\"{}\" uploaded successfully", document.title),
        data: DocumentCard::project(&document, &user, now),
        pagination: None,
    }))
}

async fn read_text(field: &mut Field, name: &str) -> Result<String, AppError> {
    let mut data = Vec::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|e| AppError::validation_error(format!("Failed to read {} field: {}", name, e)))?
    {
        data.extend_from_slice(&chunk);
    }
    String::from_utf8(data).map_err(|_| AppError::validation_error(format!("Invalid {} encoding", name)))
}

/// Counts the file's bytes without keeping them.
async fn measure_file(field: &mut Field, max_size: usize) -> Result<usize, AppError> {
    let mut size = 0;
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|e| AppError::validation_error(format!("Failed to read file data: {}", e)))?
    {
        size += chunk.len();
        if size > max_size {
            return Err(AppError::validation_error(format!(
                "File size exceeds maximum limit ({} bytes)",
                max_size
            )));
        }
    }
    Ok(size)
}

/// Accepts a full RFC 3339 timestamp or a bare `YYYY-MM-DD` date (end of day, UTC).
fn parse_expiry(raw: &str) -> Result<Option<DateTime<Utc>>, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(at.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(23, 59, 59))
        .map(|naive| Some(Utc.from_utc_datetime(&naive)))
        .ok_or_else(|| AppError::validation_error(format!("Invalid expiry date: {}", raw)))
}
