pub mod achievement_service;
pub mod analytics_service;
pub mod category_service;
pub mod question_service;
pub mod quiz_service;
pub mod result_service;
pub mod settings_service;
pub mod user_service;

pub use achievement_service::AchievementService;
pub use analytics_service::AnalyticsService;
pub use category_service::CategoryService;
pub use question_service::QuestionService;
pub use quiz_service::QuizService;
pub use result_service::ResultService;
pub use settings_service::SettingsService;
pub use user_service::UserService;
