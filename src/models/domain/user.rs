use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repositories::Resource;

/// Application-side profile of an identity managed by the external provider.
/// `id` is the provider's subject claim.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub banned: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserProfile {
    pub fn new(id: &str, email: &str) -> Self {
        UserProfile {
            id: id.to_string(),
            email: email.to_string(),
            role: UserRole::User,
            banned: false,
            created_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin && !self.banned
    }
}

impl Resource for UserProfile {
    const COLLECTION: &'static str = "users";
    const LABEL: &'static str = "User";

    fn resource_id(&self) -> &str {
        &self.id
    }
}
