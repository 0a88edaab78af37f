use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::QuizResult;

/// Embedded quiz reference, serialized as `"quizzes": { "title": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizTitle {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LeaderboardEntry {
    pub user_email: String,
    pub quizzes: QuizTitle,
    pub score: u32,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserResultDto {
    pub id: String,
    pub user_id: String,
    pub quiz_id: String,
    pub score: u32,
    pub completed_at: DateTime<Utc>,
    pub quizzes: QuizTitle,
}

impl UserResultDto {
    pub fn from_result(result: QuizResult, quiz_title: String) -> Self {
        UserResultDto {
            id: result.id,
            user_id: result.user_id,
            quiz_id: result.quiz_id,
            score: result.score,
            completed_at: result.completed_at,
            quizzes: QuizTitle { title: quiz_title },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    pub total_users: u64,
    pub total_quizzes: u64,
    pub total_questions: u64,
    pub total_attempts: u64,
    /// Mean percentage of the attainable score, one decimal.
    pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizPerformance {
    pub quiz_id: String,
    pub title: String,
    pub attempts: u64,
    pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub attempts: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}
