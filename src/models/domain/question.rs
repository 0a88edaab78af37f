use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::repositories::Resource;

/// Every question offers exactly this many options.
pub const OPTION_COUNT: usize = 4;

pub const DEFAULT_TIME_LIMIT_SECS: u32 = 30;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    #[serde(default)]
    pub quiz_id: String,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default = "default_time_limit")]
    pub time_limit: u32,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn default_time_limit() -> u32 {
    DEFAULT_TIME_LIMIT_SECS
}

impl Question {
    pub fn new(
        quiz_id: &str,
        question_text: &str,
        options: Vec<String>,
        correct_answer: &str,
    ) -> Self {
        Question {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz_id.to_string(),
            question_text: question_text.to_string(),
            options,
            correct_answer: correct_answer.to_string(),
            explanation: None,
            time_limit: DEFAULT_TIME_LIMIT_SECS,
            created_at: Utc::now(),
        }
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Four distinct, non-blank options, one of which is the correct answer verbatim.
    pub fn check_options(options: &[String], correct_answer: &str) -> AppResult<()> {
        if options.len() != OPTION_COUNT {
            return Err(AppError::ValidationError(format!(
                "A question needs exactly {} options, got {}",
                OPTION_COUNT,
                options.len()
            )));
        }

        if options.iter().any(|o| o.trim().is_empty()) {
            return Err(AppError::ValidationError(
                "Options must not be blank".to_string(),
            ));
        }

        for (i, option) in options.iter().enumerate() {
            if options[..i].contains(option) {
                return Err(AppError::ValidationError(format!(
                    "Duplicate option '{}'",
                    option
                )));
            }
        }

        if !options.iter().any(|o| o == correct_answer) {
            return Err(AppError::ValidationError(
                "Correct answer must match one of the options exactly".to_string(),
            ));
        }

        Ok(())
    }
}

impl Resource for Question {
    const COLLECTION: &'static str = "questions";
    const LABEL: &'static str = "Question";

    fn resource_id(&self) -> &str {
        &self.id
    }
}
