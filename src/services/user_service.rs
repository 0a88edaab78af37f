use std::sync::Arc;

use crate::{
    auth::{self, Claims},
    errors::{AppError, AppResult},
    models::{
        domain::{UserProfile, UserRole},
        dto::request::{UpdateUserRequest, UserListParams},
    },
    repositories::ResourceRepository,
};

pub struct UserService {
    repository: Arc<dyn ResourceRepository<UserProfile>>,
}

impl UserService {
    pub fn new(repository: Arc<dyn ResourceRepository<UserProfile>>) -> Self {
        Self { repository }
    }

    pub async fn find_profile(&self, id: &str) -> AppResult<Option<UserProfile>> {
        self.repository.find_by_id(id).await
    }

    pub async fn get_user(&self, id: &str) -> AppResult<UserProfile> {
        self.find_profile(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", id)))
    }

    /// Returns the caller's profile, creating it on first sight of the subject.
    pub async fn ensure_profile(&self, claims: &Claims) -> AppResult<UserProfile> {
        if let Some(profile) = self.find_profile(&claims.sub).await? {
            return Ok(profile);
        }

        match self
            .repository
            .create(UserProfile::new(&claims.sub, &claims.email))
            .await
        {
            Ok(profile) => {
                log::info!("Created profile for {}", profile.email);
                Ok(profile)
            }
            // Another request created it first.
            Err(AppError::AlreadyExists(_)) => self.get_user(&claims.sub).await,
            Err(e) => Err(e),
        }
    }

    /// The caller's profile when it exists, has the admin role and is not banned.
    pub async fn require_admin(&self, claims: &Claims) -> AppResult<UserProfile> {
        let profile = self
            .find_profile(&claims.sub)
            .await?
            .ok_or_else(|| AppError::Forbidden("Only admins can perform this action".to_string()))?;

        auth::require_admin(&profile)?;
        Ok(profile)
    }

    /// Profiles matching the given role and ban state, newest first.
    pub async fn list_users(&self, params: &UserListParams) -> AppResult<Vec<UserProfile>> {
        let mut users: Vec<UserProfile> = self
            .repository
            .find_all()
            .await?
            .into_iter()
            .filter(|u| params.role.map_or(true, |r| u.role == r))
            .filter(|u| params.banned.map_or(true, |b| u.banned == b))
            .collect();

        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    pub async fn update_user(&self, id: &str, request: UpdateUserRequest) -> AppResult<UserProfile> {
        let mut user = self.get_user(id).await?;

        if let Some(role) = request.role {
            user.role = role;
        }
        if let Some(banned) = request.banned {
            user.banned = banned;
        }

        let updated = self.repository.update(user).await?;
        log::info!(
            "Updated user {}: role={:?} banned={}",
            updated.id,
            updated.role,
            updated.banned
        );
        Ok(updated)
    }

    /// Grants the admin role to the profile with `email`, or to the most
    /// recently created profile when no profile has that email.
    pub async fn promote_to_admin(&self, email: &str) -> AppResult<UserProfile> {
        let by_email = self.repository.find_by_field("email", email).await?;

        let mut user = match by_email.into_iter().next() {
            Some(user) => user,
            None => {
                log::warn!("No user with email {}, promoting the latest user", email);
                self.repository
                    .find_all()
                    .await?
                    .into_iter()
                    .max_by_key(|u| u.created_at)
                    .ok_or_else(|| AppError::NotFound("No users found to promote".to_string()))?
            }
        };

        user.role = UserRole::Admin;
        let promoted = self.repository.update(user).await?;
        log::info!("User {} promoted to admin", promoted.email);
        Ok(promoted)
    }
}
