use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Difficulty, Question, Quiz},
        dto::request::{CreateQuizRequest, QuizFilter, UpdateQuizRequest},
    },
    repositories::ResourceRepository,
};

pub struct QuizService {
    quizzes: Arc<dyn ResourceRepository<Quiz>>,
    questions: Arc<dyn ResourceRepository<Question>>,
}

impl QuizService {
    pub fn new(
        quizzes: Arc<dyn ResourceRepository<Quiz>>,
        questions: Arc<dyn ResourceRepository<Question>>,
    ) -> Self {
        Self { quizzes, questions }
    }

    /// Quizzes matching every given filter, newest first.
    pub async fn list_quizzes(&self, filter: &QuizFilter) -> AppResult<Vec<Quiz>> {
        filter.validate()?;

        let difficulty = filter
            .difficulty()
            .map(|d| {
                Difficulty::parse(d)
                    .ok_or_else(|| AppError::BadRequest(format!("Unknown difficulty '{}'", d)))
            })
            .transpose()?;
        let search = filter.search().map(str::to_lowercase);

        let mut quizzes: Vec<Quiz> = self
            .quizzes
            .find_all()
            .await?
            .into_iter()
            .filter(|q| search.as_ref().map_or(true, |s| q.title.to_lowercase().contains(s)))
            .filter(|q| filter.category().map_or(true, |c| q.category == c))
            .filter(|q| difficulty.map_or(true, |d| q.difficulty == d))
            .collect();

        quizzes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(quizzes)
    }

    pub async fn get_quiz(&self, id: &str) -> AppResult<Quiz> {
        let quiz = self
            .quizzes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;

        Ok(quiz)
    }

    pub async fn create_quiz(&self, request: CreateQuizRequest) -> AppResult<Quiz> {
        request.validate()?;

        let mut quiz = Quiz::new(
            request.title.trim(),
            &request.description,
            &request.category,
            request.difficulty.unwrap_or_default(),
        );
        if let Some(active) = request.active {
            quiz.active = active;
        }

        let created = self.quizzes.create(quiz).await?;
        log::info!("Created quiz '{}' ({})", created.title, created.id);
        Ok(created)
    }

    pub async fn update_quiz(&self, id: &str, request: UpdateQuizRequest) -> AppResult<Quiz> {
        request.validate()?;

        let mut quiz = self.get_quiz(id).await?;
        if let Some(title) = request.title {
            quiz.title = title.trim().to_string();
        }
        if let Some(description) = request.description {
            quiz.description = description;
        }
        if let Some(category) = request.category {
            quiz.category = category;
        }
        if let Some(difficulty) = request.difficulty {
            quiz.difficulty = difficulty;
        }
        if let Some(active) = request.active {
            quiz.active = active;
        }

        self.quizzes.update(quiz).await
    }

    /// Deletes the quiz together with its questions.
    pub async fn delete_quiz(&self, id: &str) -> AppResult<()> {
        self.get_quiz(id).await?;

        let questions = self.questions.find_by_field("quiz_id", id).await?;
        for question in &questions {
            self.questions.delete(&question.id).await?;
        }

        self.quizzes.delete(id).await?;
        log::info!("Deleted quiz {} and {} questions", id, questions.len());
        Ok(())
    }

    /// Questions of a quiz in the order they were added.
    pub async fn questions_for_quiz(&self, quiz_id: &str) -> AppResult<Vec<Question>> {
        self.get_quiz(quiz_id).await?;

        let mut questions = self.questions.find_by_field("quiz_id", quiz_id).await?;
        questions.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryRepository;
    use chrono::{Duration, Utc};

    fn service_with(quizzes: Vec<Quiz>, questions: Vec<Question>) -> QuizService {
        QuizService::new(
            Arc::new(InMemoryRepository::with_items(quizzes)),
            Arc::new(InMemoryRepository::with_items(questions)),
        )
    }

    fn quiz(title: &str, category: &str, difficulty: Difficulty, age_mins: i64) -> Quiz {
        let mut quiz = Quiz::new(title, "", category, difficulty);
        quiz.created_at = Utc::now() - Duration::minutes(age_mins);
        quiz
    }

    fn create_request(title: &str) -> CreateQuizRequest {
        CreateQuizRequest {
            title: title.to_string(),
            description: "About the cloud".to_string(),
            category: "Cloud".to_string(),
            difficulty: Some(Difficulty::Medium),
            active: None,
        }
    }

    #[tokio::test]
    async fn list_applies_filters_and_sorts_newest_first() {
        let service = service_with(
            vec![
                quiz("AWS Basics", "Cloud", Difficulty::Easy, 30),
                quiz("Advanced AWS", "Cloud", Difficulty::Hard, 10),
                quiz("Rust Traits", "Programming", Difficulty::Hard, 20),
            ],
            vec![],
        );

        let all = service.list_quizzes(&QuizFilter::default()).await.unwrap();
        let titles: Vec<_> = all.iter().map(|q| q.title.as_str()).collect();
        assert_eq!(titles, vec!["Advanced AWS", "Rust Traits", "AWS Basics"]);

        let filter = QuizFilter {
            search: Some("aws".to_string()),
            category: Some("Cloud".to_string()),
            difficulty: Some("hard".to_string()),
        };
        let filtered = service.list_quizzes(&filter).await.unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Advanced AWS");
    }

    #[tokio::test]
    async fn list_rejects_unknown_difficulty() {
        let service = service_with(vec![], vec![]);
        let filter = QuizFilter {
            difficulty: Some("impossible".to_string()),
            ..Default::default()
        };

        let result = service.list_quizzes(&filter).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn create_and_partially_update_quiz() {
        let service = service_with(vec![], vec![]);

        let created = service.create_quiz(create_request("  Cloud 101 ")).await.unwrap();
        assert_eq!(created.title, "Cloud 101");
        assert_eq!(created.difficulty, Difficulty::Medium);
        assert!(created.active);

        let updated = service
            .update_quiz(
                &created.id,
                UpdateQuizRequest {
                    active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Cloud 101");
        assert!(!updated.active);
    }

    #[tokio::test]
    async fn create_rejects_blank_title() {
        let service = service_with(vec![], vec![]);
        let result = service.create_quiz(create_request("")).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn delete_cascades_to_questions() {
        let target = quiz("Doomed", "Cloud", Difficulty::Easy, 0);
        let other = quiz("Kept", "Cloud", Difficulty::Easy, 0);
        let options = || vec!["a".into(), "b".into(), "c".into(), "d".into()];
        let service = service_with(
            vec![target.clone(), other.clone()],
            vec![
                Question::new(&target.id, "Q1", options(), "a"),
                Question::new(&target.id, "Q2", options(), "b"),
                Question::new(&other.id, "Q3", options(), "c"),
            ],
        );

        service.delete_quiz(&target.id).await.unwrap();

        assert!(matches!(
            service.get_quiz(&target.id).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(service.questions_for_quiz(&other.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn questions_for_unknown_quiz_is_not_found() {
        let service = service_with(vec![], vec![]);
        let result = service.questions_for_quiz("missing").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn questions_come_back_in_creation_order() {
        let target = quiz("Ordered", "Cloud", Difficulty::Easy, 0);
        let options = || vec!["a".into(), "b".into(), "c".into(), "d".into()];
        let mut second = Question::new(&target.id, "Second", options(), "a");
        let mut first = Question::new(&target.id, "First", options(), "a");
        first.created_at = Utc::now() - Duration::minutes(5);
        second.created_at = Utc::now();
        let service = service_with(vec![target.clone()], vec![second, first]);

        let questions = service.questions_for_quiz(&target.id).await.unwrap();
        let texts: Vec<_> = questions.iter().map(|q| q.question_text.as_str()).collect();
        assert_eq!(texts, vec!["First", "Second"]);
    }
}
