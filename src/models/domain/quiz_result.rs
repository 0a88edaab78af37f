use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repositories::Resource;

pub const POINTS_PER_CORRECT_ANSWER: u32 = 10;

/// A finished attempt as stored by the result sink.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizResult {
    pub id: String,
    pub user_id: String,
    pub quiz_id: String,
    pub score: u32,
    #[serde(default = "Utc::now")]
    pub completed_at: DateTime<Utc>,
}

impl QuizResult {
    pub fn new(user_id: &str, quiz_id: &str, score: u32) -> Self {
        QuizResult {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            quiz_id: quiz_id.to_string(),
            score,
            completed_at: Utc::now(),
        }
    }
}

pub fn max_score(question_count: usize) -> u32 {
    POINTS_PER_CORRECT_ANSWER * question_count as u32
}

/// True when `score` is a multiple of the per-answer points within `[0, max_score]`.
pub fn is_valid_score(score: u32, question_count: usize) -> bool {
    score % POINTS_PER_CORRECT_ANSWER == 0 && score <= max_score(question_count)
}

impl Resource for QuizResult {
    const COLLECTION: &'static str = "results";
    const LABEL: &'static str = "Result";

    fn resource_id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_scores_are_bounded_multiples_of_ten() {
        assert!(is_valid_score(0, 0));
        assert!(is_valid_score(0, 3));
        assert!(is_valid_score(30, 3));
        assert!(!is_valid_score(40, 3));
        assert!(!is_valid_score(15, 3));
    }

    #[test]
    fn new_result_gets_fresh_id() {
        let a = QuizResult::new("user-1", "quiz-1", 20);
        let b = QuizResult::new("user-1", "quiz-1", 20);
        assert_ne!(a.id, b.id);
        assert_eq!(a.score, 20);
    }
}
