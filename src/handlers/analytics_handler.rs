use actix_web::{get, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState, auth::AdminUser, errors::AppError, models::dto::request::ActivityParams,
};

#[get("/api/analytics/overview")]
pub async fn overview(
    state: web::Data<AppState>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let overview = state.analytics_service.overview().await?;
    Ok(HttpResponse::Ok().json(overview))
}

#[get("/api/analytics/quiz-performance")]
pub async fn quiz_performance(
    state: web::Data<AppState>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let performance = state.analytics_service.quiz_performance().await?;
    Ok(HttpResponse::Ok().json(performance))
}

#[get("/api/analytics/user-activity")]
pub async fn user_activity(
    state: web::Data<AppState>,
    query: web::Query<ActivityParams>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    query.validate()?;
    let activity = state.analytics_service.user_activity(query.days()).await?;
    Ok(HttpResponse::Ok().json(activity))
}
