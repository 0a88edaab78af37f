use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AdminUser,
    errors::AppError,
    models::dto::{
        request::{CreateQuizRequest, QuizFilter, UpdateQuizRequest},
        response::MessageResponse,
    },
};

#[get("/api/quizzes")]
pub async fn list_quizzes(
    state: web::Data<AppState>,
    query: web::Query<QuizFilter>,
) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_service.list_quizzes(&query).await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

#[get("/api/quizzes/{id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[get("/api/quizzes/{id}/questions")]
pub async fn get_quiz_questions(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let questions = state.quiz_service.questions_for_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(questions))
}

#[post("/api/quizzes")]
pub async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<CreateQuizRequest>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.create_quiz(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(quiz))
}

#[put("/api/quizzes/{id}")]
pub async fn update_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateQuizRequest>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .update_quiz(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[delete("/api/quizzes/{id}")]
pub async fn delete_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    state.quiz_service.delete_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Quiz deleted")))
}
