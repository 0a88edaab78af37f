use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::{Config, StorageBackend},
    db::Database,
    errors::AppResult,
    repositories::Repositories,
    services::{
        AchievementService, AnalyticsService, CategoryService, QuestionService, QuizService,
        ResultService, SettingsService, UserService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub jwt_service: Arc<JwtService>,
    pub quiz_service: Arc<QuizService>,
    pub question_service: Arc<QuestionService>,
    pub result_service: Arc<ResultService>,
    pub category_service: Arc<CategoryService>,
    pub achievement_service: Arc<AchievementService>,
    pub user_service: Arc<UserService>,
    pub settings_service: Arc<SettingsService>,
    pub analytics_service: Arc<AnalyticsService>,
    pub repositories: Repositories,
    db: Option<Database>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        match config.storage {
            StorageBackend::Mongo => {
                let db = Database::connect(&config).await?;
                let repositories = Repositories::mongo(&db).await?;
                Ok(Self::from_repositories(config, repositories, Some(db)))
            }
            StorageBackend::Memory => {
                log::warn!("Using in-memory storage; data is lost on shutdown");
                Ok(Self::in_memory(config))
            }
        }
    }

    pub fn in_memory(config: Config) -> Self {
        Self::from_repositories(config, Repositories::in_memory(), None)
    }

    pub fn from_repositories(config: Config, repos: Repositories, db: Option<Database>) -> Self {
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
        ));

        let repositories = repos.clone();

        Self {
            jwt_service,
            quiz_service: Arc::new(QuizService::new(
                repos.quizzes.clone(),
                repos.questions.clone(),
            )),
            question_service: Arc::new(QuestionService::new(
                repos.questions.clone(),
                repos.quizzes.clone(),
            )),
            result_service: Arc::new(ResultService::new(
                repos.results.clone(),
                repos.quizzes.clone(),
                repos.questions.clone(),
                repos.users.clone(),
                config.leaderboard_limit,
            )),
            category_service: Arc::new(CategoryService::new(repos.categories.clone())),
            achievement_service: Arc::new(AchievementService::new(repos.achievements.clone())),
            user_service: Arc::new(UserService::new(repos.users.clone())),
            settings_service: Arc::new(SettingsService::new(repos.settings.clone())),
            analytics_service: Arc::new(AnalyticsService::new(
                repos.users,
                repos.quizzes,
                repos.questions,
                repos.results,
            )),
            repositories,
            config: Arc::new(config),
            db,
        }
    }

    /// Pings the document store. Always healthy for in-memory storage.
    pub async fn health_check(&self) -> AppResult<()> {
        match &self.db {
            Some(db) => db.ping().await,
            None => Ok(()),
        }
    }
}
