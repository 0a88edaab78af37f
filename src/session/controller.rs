use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    errors::AppResult,
    models::{
        domain::{Question, QuizResult, quiz_result::POINTS_PER_CORRECT_ANSWER},
        dto::request::SubmitResultRequest,
    },
    session::ports::{IdentityProvider, QuestionSource, ResultSink},
};

pub const DEFAULT_SESSION_TIME_LIMIT_SECS: u32 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SessionStatus {
    /// The quiz had no questions; nothing can be answered or submitted.
    NoQuestions,
    InProgress,
    Submitting,
    Completed,
    AuthRequired,
    SubmissionFailed,
    Abandoned,
}

/// A computed score that has not reached the result sink yet.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PendingResult {
    pub quiz_id: String,
    pub score: u32,
    pub computed_at: DateTime<Utc>,
}

impl PendingResult {
    pub fn into_request(self, user_id: &str) -> SubmitResultRequest {
        SubmitResultRequest {
            user_id: user_id.to_string(),
            quiz_id: self.quiz_id,
            score: self.score,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed { score: u32, result: QuizResult },
    AuthenticationRequired { pending: PendingResult },
    SubmissionFailed { score: u32, message: String },
    NoQuestions,
    Abandoned,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("'{0}' is not an option of the current question")]
    UnknownOption(String),

    #[error("Session is not in progress")]
    NotInProgress,
}

/// State of one attempt at a quiz.
///
/// Every path into submission goes through [`QuizSession::begin_submit`], which
/// flips the status to `Submitting` before anything is awaited. Ticks, advances
/// and finish requests arriving after that point are no-ops, so a session
/// produces at most one call to the result sink.
#[derive(Debug)]
pub struct QuizSession {
    quiz_id: String,
    questions: Vec<Question>,
    question_index: usize,
    answers: HashMap<usize, String>,
    seconds_remaining: u32,
    status: SessionStatus,
}

impl QuizSession {
    pub fn new(quiz_id: &str, questions: Vec<Question>, time_limit_secs: u32) -> Self {
        let status = if questions.is_empty() {
            SessionStatus::NoQuestions
        } else {
            SessionStatus::InProgress
        };

        Self {
            quiz_id: quiz_id.to_string(),
            questions,
            question_index: 0,
            answers: HashMap::new(),
            seconds_remaining: time_limit_secs,
            status,
        }
    }

    /// Fetches the quiz's questions once and starts a session over them.
    pub async fn load(
        quiz_id: &str,
        source: &dyn QuestionSource,
        time_limit_secs: u32,
    ) -> AppResult<Self> {
        let questions = source.questions(quiz_id).await.map_err(|e| {
            log::error!("Failed to load questions for quiz {}: {}", quiz_id, e);
            e
        })?;

        log::debug!("Loaded {} questions for quiz {}", questions.len(), quiz_id);
        Ok(Self::new(quiz_id, questions, time_limit_secs))
    }

    pub fn quiz_id(&self) -> &str {
        &self.quiz_id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.status {
            SessionStatus::NoQuestions => None,
            _ => self.questions.get(self.question_index),
        }
    }

    pub fn current_selection(&self) -> Option<&str> {
        self.answers.get(&self.question_index).map(String::as_str)
    }

    pub fn is_last_question(&self) -> bool {
        self.question_index + 1 >= self.questions.len()
    }

    /// Records the answer for the current question, replacing any earlier one.
    pub fn select_option(&mut self, option: &str) -> Result<(), SessionError> {
        if self.status != SessionStatus::InProgress {
            return Err(SessionError::NotInProgress);
        }

        let question = &self.questions[self.question_index];
        if !question.has_option(option) {
            return Err(SessionError::UnknownOption(option.to_string()));
        }

        self.answers.insert(self.question_index, option.to_string());
        Ok(())
    }

    /// Moves to the next question, or starts submission from the last one.
    pub fn advance(&mut self) -> Option<PendingResult> {
        if self.status != SessionStatus::InProgress {
            return None;
        }

        if self.is_last_question() {
            self.begin_submit()
        } else {
            self.question_index += 1;
            None
        }
    }

    /// One second elapsed. Running out of time starts submission.
    pub fn tick(&mut self) -> Option<PendingResult> {
        if self.status != SessionStatus::InProgress {
            return None;
        }

        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            log::debug!("Time is up for quiz {}", self.quiz_id);
            self.begin_submit()
        } else {
            None
        }
    }

    /// Synchronous half of submission. Returns the score to submit the first
    /// time it is called on an in-progress session and `None` afterwards.
    pub fn begin_submit(&mut self) -> Option<PendingResult> {
        if self.status != SessionStatus::InProgress {
            return None;
        }

        self.status = SessionStatus::Submitting;

        Some(PendingResult {
            quiz_id: self.quiz_id.clone(),
            score: self.score(),
            computed_at: Utc::now(),
        })
    }

    /// Hands a pending result to the sink on behalf of the current user.
    pub async fn finish_submission(
        &mut self,
        pending: PendingResult,
        identity: &dyn IdentityProvider,
        sink: &dyn ResultSink,
    ) -> SessionOutcome {
        let Some(user_id) = identity.current_user_id().await else {
            log::info!(
                "No signed-in user, keeping score {} for quiz {} pending",
                pending.score,
                pending.quiz_id
            );
            self.status = SessionStatus::AuthRequired;
            return SessionOutcome::AuthenticationRequired { pending };
        };

        let score = pending.score;
        match sink.submit_result(&pending.into_request(&user_id)).await {
            Ok(result) => {
                log::info!("Submitted score {} for quiz {}", score, self.quiz_id);
                self.status = SessionStatus::Completed;
                SessionOutcome::Completed { score, result }
            }
            Err(e) => {
                log::error!("Failed to submit result for quiz {}: {}", self.quiz_id, e);
                self.status = SessionStatus::SubmissionFailed;
                SessionOutcome::SubmissionFailed {
                    score,
                    message: e.to_string(),
                }
            }
        }
    }

    /// Submits the attempt. `None` when a submission already started or the
    /// session never had questions.
    pub async fn submit(
        &mut self,
        identity: &dyn IdentityProvider,
        sink: &dyn ResultSink,
    ) -> Option<SessionOutcome> {
        let pending = self.begin_submit()?;
        Some(self.finish_submission(pending, identity, sink).await)
    }

    pub fn abandon(&mut self) {
        if self.status == SessionStatus::InProgress {
            self.status = SessionStatus::Abandoned;
        }
    }

    /// Points for every answered question whose answer matches verbatim.
    pub fn score(&self) -> u32 {
        let correct = self
            .questions
            .iter()
            .enumerate()
            .filter(|(i, q)| self.answers.get(i) == Some(&q.correct_answer))
            .count() as u32;

        correct * POINTS_PER_CORRECT_ANSWER
    }
}
