use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AdminUser,
    errors::AppError,
    models::dto::{request::AchievementRequest, response::MessageResponse},
};

#[get("/api/achievements")]
pub async fn list_achievements(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let achievements = state.achievement_service.list_achievements().await?;
    Ok(HttpResponse::Ok().json(achievements))
}

#[get("/api/achievements/{id}")]
pub async fn get_achievement(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let achievement = state.achievement_service.get_achievement(&id).await?;
    Ok(HttpResponse::Ok().json(achievement))
}

#[post("/api/achievements")]
pub async fn create_achievement(
    state: web::Data<AppState>,
    request: web::Json<AchievementRequest>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let achievement = state
        .achievement_service
        .create_achievement(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(achievement))
}

#[put("/api/achievements/{id}")]
pub async fn update_achievement(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<AchievementRequest>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let achievement = state
        .achievement_service
        .update_achievement(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(achievement))
}

#[delete("/api/achievements/{id}")]
pub async fn delete_achievement(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    state.achievement_service.delete_achievement(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Achievement deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::domain::{Achievement, UserRole},
        test_utils::fixtures::{signed_in, test_state},
    };
    use actix_web::{http::StatusCode, test};
    use serde_json::json;

    #[actix_web::test]
    async fn created_achievement_is_listed_with_defaults() {
        let state = test_state();
        let admin = signed_in(&state, "boss", UserRole::Admin).await;
        let app = crate::test_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/achievements")
            .insert_header(admin)
            .set_json(json!({ "name": "First Quiz", "description": "Finish one quiz" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::get().uri("/api/achievements").to_request();
        let listed: Vec<Achievement> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].xp_reward, 10);
    }
}
