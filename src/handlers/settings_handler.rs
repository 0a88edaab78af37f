use actix_web::{get, put, web, HttpResponse};

use crate::{
    app_state::AppState, auth::AdminUser, errors::AppError,
    models::dto::request::UpdateSettingRequest,
};

#[get("/api/settings")]
pub async fn list_settings(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let settings = state.settings_service.list_settings().await?;
    Ok(HttpResponse::Ok().json(settings))
}

#[put("/api/settings/{key}")]
pub async fn update_setting(
    state: web::Data<AppState>,
    key: web::Path<String>,
    request: web::Json<UpdateSettingRequest>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let setting = state
        .settings_service
        .update_setting(&key, request.into_inner().value)
        .await?;
    Ok(HttpResponse::Ok().json(setting))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::domain::{AppSetting, UserRole},
        test_utils::fixtures::{signed_in, test_state},
    };
    use actix_web::{http::StatusCode, test};
    use serde_json::json;

    #[actix_web::test]
    async fn settings_default_and_update() {
        let state = test_state();
        let admin = signed_in(&state, "boss", UserRole::Admin).await;
        let app = crate::test_app!(state);

        let req = test::TestRequest::get().uri("/api/settings").to_request();
        let defaults: Vec<AppSetting> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(defaults.len(), 2);

        let req = test::TestRequest::put()
            .uri("/api/settings/maintenance")
            .insert_header(admin.clone())
            .set_json(json!({ "value": { "enabled": true, "message": "Back soon" } }))
            .to_request();
        let saved: AppSetting = test::call_and_read_body_json(&app, req).await;
        assert_eq!(saved.value["enabled"], true);

        let req = test::TestRequest::put()
            .uri("/api/settings/branding")
            .insert_header(admin)
            .set_json(json!({ "value": { "appName": "Q", "primaryColor": "red" } }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }
}
