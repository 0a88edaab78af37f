use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Difficulty, UserRole};

/// Query string of `GET /quizzes`. Empty strings mean "no filter".
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct QuizFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 200))]
    pub search: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl QuizFilter {
    pub fn search(&self) -> Option<&str> {
        non_blank(&self.search)
    }

    pub fn category(&self) -> Option<&str> {
        non_blank(&self.category)
    }

    pub fn difficulty(&self) -> Option<&str> {
        non_blank(&self.difficulty)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,

    #[serde(default)]
    #[validate(length(max = 100))]
    pub category: String,

    #[serde(default)]
    pub difficulty: Option<Difficulty>,

    #[serde(default)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(length(max = 100))]
    pub category: Option<String>,

    pub difficulty: Option<Difficulty>,

    pub active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1))]
    pub quiz_id: String,

    #[validate(length(min = 1, max = 1000))]
    pub question_text: String,

    pub options: Vec<String>,

    pub correct_answer: String,

    #[serde(default)]
    pub explanation: Option<String>,

    #[serde(default)]
    #[validate(range(min = 5, max = 600))]
    pub time_limit: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub question_text: Option<String>,

    pub options: Option<Vec<String>>,

    pub correct_answer: Option<String>,

    pub explanation: Option<String>,

    #[validate(range(min = 5, max = 600))]
    pub time_limit: Option<u32>,
}

/// Body of `POST /results`; also what the session hands to the result sink.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct SubmitResultRequest {
    #[validate(length(min = 1))]
    pub user_id: String,

    #[validate(length(min = 1))]
    pub quiz_id: String,

    pub score: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,

    #[serde(default)]
    #[validate(length(max = 50))]
    pub icon: String,

    #[serde(default)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct AchievementRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,

    #[serde(default)]
    #[validate(range(max = 100000))]
    pub xp_reward: Option<u32>,

    #[serde(default)]
    #[validate(length(min = 1, max = 50))]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateUserRequest {
    pub role: Option<UserRole>,
    pub banned: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UserListParams {
    pub role: Option<UserRole>,
    pub banned: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateSettingRequest {
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct ActivityParams {
    #[validate(range(min = 1, max = 365))]
    pub days: Option<u32>,
}

impl ActivityParams {
    pub fn days(&self) -> u32 {
        self.days.unwrap_or(30)
    }
}
