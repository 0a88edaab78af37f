pub mod achievement;
pub mod app_setting;
pub mod category;
pub mod question;
pub mod quiz;
pub mod quiz_result;
pub mod user;
pub use achievement::Achievement;
pub use app_setting::AppSetting;
pub use category::Category;
pub use question::Question;
pub use quiz::{Difficulty, Quiz};
pub use quiz_result::QuizResult;
pub use user::{UserProfile, UserRole};
