use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repositories::Resource;

pub const DEFAULT_XP_REWARD: u32 = 10;
pub const DEFAULT_ICON: &str = "🏆";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_xp_reward")]
    pub xp_reward: u32,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn default_xp_reward() -> u32 {
    DEFAULT_XP_REWARD
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

impl Achievement {
    pub fn new(name: &str, description: &str, xp_reward: u32, icon: &str) -> Self {
        Achievement {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.to_string(),
            xp_reward,
            icon: icon.to_string(),
            created_at: Utc::now(),
        }
    }
}

impl Resource for Achievement {
    const COLLECTION: &'static str = "achievements";
    const LABEL: &'static str = "Achievement";

    fn resource_id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn achievement_defaults_match_admin_form() {
        let json = r#"{ "id": "a1", "name": "First Quiz" }"#;
        let achievement: Achievement = serde_json::from_str(json).unwrap();

        assert_eq!(achievement.xp_reward, 10);
        assert_eq!(achievement.icon, "🏆");
    }
}
