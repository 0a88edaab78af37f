use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{
            achievement::{DEFAULT_ICON, DEFAULT_XP_REWARD},
            Achievement,
        },
        dto::request::AchievementRequest,
    },
    repositories::ResourceRepository,
};

pub struct AchievementService {
    repository: Arc<dyn ResourceRepository<Achievement>>,
}

impl AchievementService {
    pub fn new(repository: Arc<dyn ResourceRepository<Achievement>>) -> Self {
        Self { repository }
    }

    pub async fn list_achievements(&self) -> AppResult<Vec<Achievement>> {
        let mut achievements = self.repository.find_all().await?;
        achievements.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(achievements)
    }

    pub async fn get_achievement(&self, id: &str) -> AppResult<Achievement> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Achievement with id '{}' not found", id)))
    }

    pub async fn create_achievement(&self, request: AchievementRequest) -> AppResult<Achievement> {
        request.validate()?;

        let achievement = Achievement::new(
            request.name.trim(),
            &request.description,
            request.xp_reward.unwrap_or(DEFAULT_XP_REWARD),
            request.icon.as_deref().unwrap_or(DEFAULT_ICON),
        );
        self.repository.create(achievement).await
    }

    pub async fn update_achievement(
        &self,
        id: &str,
        request: AchievementRequest,
    ) -> AppResult<Achievement> {
        request.validate()?;

        let mut achievement = self.get_achievement(id).await?;
        achievement.name = request.name.trim().to_string();
        achievement.description = request.description;
        if let Some(xp_reward) = request.xp_reward {
            achievement.xp_reward = xp_reward;
        }
        if let Some(icon) = request.icon {
            achievement.icon = icon;
        }

        self.repository.update(achievement).await
    }

    pub async fn delete_achievement(&self, id: &str) -> AppResult<()> {
        self.repository.delete(id).await
    }
}
