use actix_web::{get, post, web, HttpResponse, Result};
use validator::Validate;

use crate::core::{AppError, AppSuccessResponse, CurrentUser};
use crate::db::DocumentStore;
use crate::models::users::{LoginRequest, User};

#[tracing::instrument(name = "List Users", skip(store))]
#[get("")]
pub async fn list_users(store: web::Data<DocumentStore>) -> Result<HttpResponse, AppError> {
    let users: Vec<User> = store.directory().users().to_vec();

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: users,
        message: "Users retrieved successfully".to_string(),
        pagination: None,
    }))
}

const INVALID_CREDENTIALS: &str = "Invalid credentials. Please try again.";

/// Picks a directory user by email. There is no password to check.
#[tracing::instrument(name = "User Login", skip(store, request))]
#[post("/login")]
pub async fn login(
    store: web::Data<DocumentStore>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let user = request
        .validate()
        .ok()
        .and_then(|_| store.directory().find_by_email(&request.email))
        .cloned()
        .ok_or_else(|| {
            tracing::info!(email = %request.email, "login attempt for unknown email");
            AppError::unauthorized(INVALID_CREDENTIALS)
        })?;

    tracing::info!(user_id = %user.id, role = %user.role, "user logged in");
    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: user,
        message: "Login successful".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Current User", skip(user), fields(user_id = %user.id))]
#[get("/me")]
pub async fn current_user(user: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: user.0,
        message: "Current user retrieved successfully".to_string(),
        pagination: None,
    }))
}
