use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repositories::Resource;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String, // category name, not id
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

fn default_active() -> bool {
    true
}

impl Quiz {
    pub fn new(title: &str, description: &str, category: &str, difficulty: Difficulty) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            difficulty,
            active: true,
            created_at: Utc::now(),
        }
    }
}

impl Resource for Quiz {
    const COLLECTION: &'static str = "quizzes";
    const LABEL: &'static str = "Quiz";

    fn resource_id(&self) -> &str {
        &self.id
    }
}
