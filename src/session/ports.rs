use async_trait::async_trait;

use crate::{
    errors::AppResult,
    models::{
        domain::{Question, QuizResult},
        dto::request::SubmitResultRequest,
    },
};

/// Supplies the ordered question list for a quiz.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn questions(&self, quiz_id: &str) -> AppResult<Vec<Question>>;
}

/// Accepts a finished attempt and returns the stored record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn submit_result(&self, request: &SubmitResultRequest) -> AppResult<QuizResult>;
}

/// "Give me a user id or nothing."
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_user_id(&self) -> Option<String>;
}
