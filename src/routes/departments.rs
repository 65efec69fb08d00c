use actix_web::{get, post, web, HttpResponse, Responder};
use tracing::instrument;
use validator::Validate;

use crate::core::{AppError, AppSuccessResponse, CurrentUser};
use crate::db::{departments, DocumentStore};
use crate::models::departments::NewDepartmentRequest;

#[instrument(name = "Get Departments", skip(store))]
#[get("")]
pub async fn get_departments(store: web::Data<DocumentStore>) -> Result<impl Responder, AppError> {
    let data = departments::fetch_departments(store.get_ref()).await;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        message: "Departments retrieved successfully".to_string(),
        data,
        pagination: None,
    }))
}

#[instrument(name = "Create Department", skip(store, user, request), fields(user_id = %user.id))]
#[post("")]
pub async fn create_department(
    store: web::Data<DocumentStore>,
    user: CurrentUser,
    request: web::Json<NewDepartmentRequest>,
) -> Result<impl Responder, AppError> {
    request.validate()?;

    let department =
        departments::insert_department(store.get_ref(), &request.name, &request.color, &user).await?;

    Ok(HttpResponse::Created().json(AppSuccessResponse {
        success: true,
        message: "Department created successfully".to_string(),
        data: department,
        pagination: None,
    }))
}
