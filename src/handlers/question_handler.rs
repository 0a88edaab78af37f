use actix_web::{delete, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AdminUser,
    errors::AppError,
    models::dto::{
        request::{CreateQuestionRequest, UpdateQuestionRequest},
        response::MessageResponse,
    },
};

#[post("/api/questions")]
pub async fn create_question(
    state: web::Data<AppState>,
    request: web::Json<CreateQuestionRequest>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let question = state
        .question_service
        .create_question(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(question))
}

#[put("/api/questions/{id}")]
pub async fn update_question(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateQuestionRequest>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let question = state
        .question_service
        .update_question(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(question))
}

#[delete("/api/questions/{id}")]
pub async fn delete_question(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    state.question_service.delete_question(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Question deleted")))
}
