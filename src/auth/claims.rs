use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Claims carried by access tokens of the external identity provider.
/// Only `sub` and `exp` are required; the application role lives on the
/// stored profile, not in the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user id)
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String, // provider role, e.g. "authenticated"
    pub exp: usize,
    #[serde(default)]
    pub iat: usize,
}

impl Claims {
    pub fn new(user_id: &str, email: &str, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: "authenticated".to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}
