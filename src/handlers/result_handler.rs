use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_owner_or_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::request::SubmitResultRequest,
};

#[post("/api/results")]
pub async fn submit_result(
    state: web::Data<AppState>,
    request: web::Json<SubmitResultRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let result = state
        .result_service
        .submit(&auth.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(result))
}

#[get("/api/results/{user_id}")]
pub async fn get_user_results(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let caller = state.user_service.find_profile(&auth.0.sub).await?;
    require_owner_or_admin(&auth.0, caller.as_ref(), &user_id)?;

    let results = state.result_service.results_for_user(&user_id).await?;
    Ok(HttpResponse::Ok().json(results))
}

#[get("/api/leaderboard")]
pub async fn get_leaderboard(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let entries = state.result_service.leaderboard().await?;
    Ok(HttpResponse::Ok().json(entries))
}
