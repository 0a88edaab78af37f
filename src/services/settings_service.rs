use std::sync::Arc;

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        app_setting::{BrandingSettings, MaintenanceSettings, BRANDING_KEY, MAINTENANCE_KEY},
        AppSetting,
    },
    repositories::ResourceRepository,
};

static SETTING_KEY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z][a-z0-9_]{0,63}$").expect("SETTING_KEY_REGEX is a valid regex pattern")
});

pub struct SettingsService {
    repository: Arc<dyn ResourceRepository<AppSetting>>,
}

impl SettingsService {
    pub fn new(repository: Arc<dyn ResourceRepository<AppSetting>>) -> Self {
        Self { repository }
    }

    /// Stored settings laid over the defaults, ordered by key.
    pub async fn list_settings(&self) -> AppResult<Vec<AppSetting>> {
        let stored = self.repository.find_all().await?;

        let defaults: Vec<AppSetting> = AppSetting::defaults()
            .into_iter()
            .filter(|d| !stored.iter().any(|s| s.key == d.key))
            .collect();
        let mut settings: Vec<AppSetting> = defaults.into_iter().chain(stored).collect();

        settings.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(settings)
    }

    pub async fn get_setting(&self, key: &str) -> AppResult<AppSetting> {
        if let Some(setting) = self.repository.find_by_id(key).await? {
            return Ok(setting);
        }

        AppSetting::defaults()
            .into_iter()
            .find(|d| d.key == key)
            .ok_or_else(|| AppError::NotFound(format!("Setting '{}' not found", key)))
    }

    /// Saves `value` under `key`. Known keys must match their typed shape.
    pub async fn update_setting(&self, key: &str, value: serde_json::Value) -> AppResult<AppSetting> {
        if !SETTING_KEY_REGEX.is_match(key) {
            return Err(AppError::BadRequest(format!("Invalid setting key '{}'", key)));
        }

        match key {
            BRANDING_KEY => check_shape::<BrandingSettings>(key, &value)?,
            MAINTENANCE_KEY => check_shape::<MaintenanceSettings>(key, &value)?,
            _ => {}
        }

        let saved = match self.repository.find_by_id(key).await? {
            Some(mut existing) => {
                existing.value = value;
                existing.updated_at = Utc::now();
                self.repository.update(existing).await?
            }
            None => self.repository.create(AppSetting::new(key, value)).await?,
        };

        log::info!("Setting '{}' updated", key);
        Ok(saved)
    }
}

fn check_shape<T: DeserializeOwned + Validate>(key: &str, value: &serde_json::Value) -> AppResult<()> {
    let typed: T = serde_json::from_value(value.clone()).map_err(|e| {
        AppError::ValidationError(format!("Invalid value for '{}': {}", key, e))
    })?;
    typed.validate()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryRepository;
    use serde_json::json;

    fn service() -> SettingsService {
        SettingsService::new(Arc::new(InMemoryRepository::new()))
    }

    #[tokio::test]
    async fn defaults_are_served_until_overridden() {
        let service = service();

        let before = service.list_settings().await.unwrap();
        assert_eq!(before.len(), 2);

        service
            .update_setting(
                BRANDING_KEY,
                json!({ "appName": "Quizzly", "primaryColor": "#ff0066" }),
            )
            .await
            .unwrap();

        let after = service.list_settings().await.unwrap();
        assert_eq!(after.len(), 2);
        let branding = service.get_setting(BRANDING_KEY).await.unwrap();
        assert_eq!(branding.value["appName"], "Quizzly");
    }

    #[tokio::test]
    async fn rejects_bad_branding_colour() {
        let result = service()
            .update_setting(
                BRANDING_KEY,
                json!({ "appName": "Quizzly", "primaryColor": "pink" }),
            )
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn rejects_wrongly_shaped_maintenance_value() {
        let result = service()
            .update_setting(MAINTENANCE_KEY, json!({ "enabled": "yes" }))
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn unknown_keys_store_any_json_and_repeat_updates_overwrite() {
        let service = service();

        service.update_setting("welcome_banner", json!("Hi")).await.unwrap();
        let updated = service
            .update_setting("welcome_banner", json!("Hello"))
            .await
            .unwrap();

        assert_eq!(updated.value, json!("Hello"));
        assert_eq!(service.list_settings().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn rejects_malformed_keys_and_unknown_lookups() {
        let service = service();
        assert!(matches!(
            service.update_setting("Bad Key", json!(1)).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            service.get_setting("nothing_here").await,
            Err(AppError::NotFound(_))
        ));
    }
}
