use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repositories::Resource;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Category {
    pub fn new(name: &str, description: &str, icon: &str) -> Self {
        Category {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            active: true,
            created_at: Utc::now(),
        }
    }
}

impl Resource for Category {
    const COLLECTION: &'static str = "categories";
    const LABEL: &'static str = "Category";

    fn resource_id(&self) -> &str {
        &self.id
    }
}
