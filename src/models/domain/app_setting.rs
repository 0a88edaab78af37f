use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::repositories::Resource;

pub const BRANDING_KEY: &str = "branding";
pub const MAINTENANCE_KEY: &str = "maintenance";

static HEX_COLOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#[0-9a-fA-F]{6}$").expect("HEX_COLOR_REGEX is a valid regex pattern")
});

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AppSetting {
    pub key: String,
    pub value: serde_json::Value,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl AppSetting {
    pub fn new(key: &str, value: serde_json::Value) -> Self {
        AppSetting {
            key: key.to_string(),
            value,
            updated_at: Utc::now(),
        }
    }

    /// Values served for keys nobody has saved yet.
    pub fn defaults() -> Vec<AppSetting> {
        vec![
            AppSetting::new(
                BRANDING_KEY,
                json!({ "appName": "CloudQuiz", "primaryColor": "#3b82f6" }),
            ),
            AppSetting::new(MAINTENANCE_KEY, json!({ "enabled": false, "message": "" })),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BrandingSettings {
    #[validate(length(min = 1, max = 100))]
    pub app_name: String,

    #[validate(regex(path = *HEX_COLOR_REGEX, message = "Colour must look like #rrggbb"))]
    pub primary_color: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct MaintenanceSettings {
    pub enabled: bool,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub message: String,
}

impl Resource for AppSetting {
    const COLLECTION: &'static str = "app_settings";
    const ID_FIELD: &'static str = "key";
    const LABEL: &'static str = "Setting";

    fn resource_id(&self) -> &str {
        &self.key
    }
}
