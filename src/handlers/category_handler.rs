use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AdminUser,
    errors::AppError,
    models::dto::{request::CategoryRequest, response::MessageResponse},
};

#[get("/api/categories")]
pub async fn list_categories(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let categories = state.category_service.list_categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[get("/api/categories/{id}")]
pub async fn get_category(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let category = state.category_service.get_category(&id).await?;
    Ok(HttpResponse::Ok().json(category))
}

#[post("/api/categories")]
pub async fn create_category(
    state: web::Data<AppState>,
    request: web::Json<CategoryRequest>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let category = state
        .category_service
        .create_category(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(category))
}

#[put("/api/categories/{id}")]
pub async fn update_category(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<CategoryRequest>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let category = state
        .category_service
        .update_category(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(category))
}

#[delete("/api/categories/{id}")]
pub async fn delete_category(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    state.category_service.delete_category(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Category deleted")))
}
