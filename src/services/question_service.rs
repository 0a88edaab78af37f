use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Question, Quiz},
        dto::request::{CreateQuestionRequest, UpdateQuestionRequest},
    },
    repositories::ResourceRepository,
};

pub struct QuestionService {
    questions: Arc<dyn ResourceRepository<Question>>,
    quizzes: Arc<dyn ResourceRepository<Quiz>>,
}

impl QuestionService {
    pub fn new(
        questions: Arc<dyn ResourceRepository<Question>>,
        quizzes: Arc<dyn ResourceRepository<Quiz>>,
    ) -> Self {
        Self { questions, quizzes }
    }

    pub async fn get_question(&self, id: &str) -> AppResult<Question> {
        self.questions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Question with id '{}' not found", id)))
    }

    pub async fn create_question(&self, request: CreateQuestionRequest) -> AppResult<Question> {
        request.validate()?;
        Question::check_options(&request.options, &request.correct_answer)?;

        if self.quizzes.find_by_id(&request.quiz_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Quiz with id '{}' not found",
                request.quiz_id
            )));
        }

        let mut question = Question::new(
            &request.quiz_id,
            request.question_text.trim(),
            request.options,
            &request.correct_answer,
        );
        question.explanation = request.explanation.filter(|e| !e.trim().is_empty());
        if let Some(time_limit) = request.time_limit {
            question.time_limit = time_limit;
        }

        self.questions.create(question).await
    }

    pub async fn update_question(
        &self,
        id: &str,
        request: UpdateQuestionRequest,
    ) -> AppResult<Question> {
        request.validate()?;

        let mut question = self.get_question(id).await?;
        if let Some(text) = request.question_text {
            question.question_text = text.trim().to_string();
        }
        if let Some(options) = request.options {
            question.options = options;
        }
        if let Some(correct_answer) = request.correct_answer {
            question.correct_answer = correct_answer;
        }
        if let Some(explanation) = request.explanation {
            question.explanation = Some(explanation).filter(|e| !e.trim().is_empty());
        }
        if let Some(time_limit) = request.time_limit {
            question.time_limit = time_limit;
        }

        // Options and answer are checked together since either may have changed.
        Question::check_options(&question.options, &question.correct_answer)?;

        self.questions.update(question).await
    }

    pub async fn delete_question(&self, id: &str) -> AppResult<()> {
        self.questions.delete(id).await
    }
}
