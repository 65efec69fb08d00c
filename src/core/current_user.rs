use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::core::AppError;
use crate::db::DocumentStore;
use crate::models::users::User;

pub const USER_ID_HEADER: &str = "X-User-Id";

/// The directory user named by the `X-User-Id` header.
///
/// This only identifies who is acting so views can be shaped for them; no
/// credential is checked.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl std::ops::Deref for CurrentUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(resolve(req))
    }
}

fn resolve(req: &HttpRequest) -> Result<CurrentUser, AppError> {
    let store = req
        .app_data::<web::Data<DocumentStore>>()
        .ok_or_else(|| AppError::internal_error("Document store is not configured"))?;

    let user_id = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::unauthorized("Select a user before continuing"))?;

    store
        .directory()
        .find_user(user_id)
        .cloned()
        .map(CurrentUser)
        .ok_or_else(|| AppError::unauthorized(format!("Unknown user: {}", user_id)))
}
