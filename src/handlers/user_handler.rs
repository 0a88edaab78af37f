use actix_web::{get, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{AdminUser, AuthenticatedUser},
    errors::AppError,
    models::dto::request::{UpdateUserRequest, UserListParams},
};

/// Profile of the caller, created on first use.
#[get("/api/me")]
pub async fn get_me(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = state.user_service.ensure_profile(&auth.0).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[get("/api/users")]
pub async fn list_users(
    state: web::Data<AppState>,
    query: web::Query<UserListParams>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let users = state.user_service.list_users(&query).await?;
    Ok(HttpResponse::Ok().json(users))
}

#[put("/api/users/{id}")]
pub async fn update_user(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateUserRequest>,
    admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    if admin.0.id == *id && request.banned == Some(true) {
        return Err(AppError::BadRequest("Admins cannot ban themselves".to_string()));
    }

    let user = state.user_service.update_user(&id, request).await?;
    Ok(HttpResponse::Ok().json(user))
}
