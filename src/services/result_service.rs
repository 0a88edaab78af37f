use std::{collections::HashMap, sync::Arc};

use validator::Validate;

use crate::{
    auth::{self, Claims},
    errors::{AppError, AppResult},
    models::{
        domain::{
            quiz_result::{is_valid_score, max_score},
            Question, Quiz, QuizResult, UserProfile,
        },
        dto::{
            request::SubmitResultRequest,
            response::{LeaderboardEntry, QuizTitle, UserResultDto},
        },
    },
    repositories::ResourceRepository,
};

const UNKNOWN_QUIZ_TITLE: &str = "Unknown quiz";
const UNKNOWN_USER_EMAIL: &str = "Anonymous";

pub struct ResultService {
    results: Arc<dyn ResourceRepository<QuizResult>>,
    quizzes: Arc<dyn ResourceRepository<Quiz>>,
    questions: Arc<dyn ResourceRepository<Question>>,
    users: Arc<dyn ResourceRepository<UserProfile>>,
    leaderboard_limit: usize,
}

impl ResultService {
    pub fn new(
        results: Arc<dyn ResourceRepository<QuizResult>>,
        quizzes: Arc<dyn ResourceRepository<Quiz>>,
        questions: Arc<dyn ResourceRepository<Question>>,
        users: Arc<dyn ResourceRepository<UserProfile>>,
        leaderboard_limit: usize,
    ) -> Self {
        Self {
            results,
            quizzes,
            questions,
            users,
            leaderboard_limit,
        }
    }

    /// Stores a finished attempt for `request.user_id`.
    pub async fn submit(&self, claims: &Claims, request: SubmitResultRequest) -> AppResult<QuizResult> {
        request.validate()?;

        let caller = self.users.find_by_id(&claims.sub).await?;
        if caller.as_ref().is_some_and(|p| p.banned) {
            return Err(AppError::Forbidden("This account is banned".to_string()));
        }
        auth::require_owner_or_admin(claims, caller.as_ref(), &request.user_id)?;
        if caller.is_none() {
            self.create_profile(claims).await?;
        }

        if self.quizzes.find_by_id(&request.quiz_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Quiz with id '{}' not found",
                request.quiz_id
            )));
        }

        let question_count = self
            .questions
            .find_by_field("quiz_id", &request.quiz_id)
            .await?
            .len();
        if !is_valid_score(request.score, question_count) {
            return Err(AppError::ValidationError(format!(
                "Score {} is not a multiple of 10 between 0 and {}",
                request.score,
                max_score(question_count)
            )));
        }

        let result = self
            .results
            .create(QuizResult::new(&request.user_id, &request.quiz_id, request.score))
            .await?;

        log::info!(
            "Stored score {} for user {} on quiz {}",
            result.score,
            result.user_id,
            result.quiz_id
        );
        Ok(result)
    }

    /// A user's attempts joined with quiz titles, newest first.
    /// Profile for a subject submitting before it ever fetched `/me`, so the
    /// leaderboard can show its email.
    async fn create_profile(&self, claims: &Claims) -> AppResult<()> {
        match self
            .users
            .create(UserProfile::new(&claims.sub, &claims.email))
            .await
        {
            Ok(profile) => {
                log::info!("Created profile for {} on first submission", profile.email);
                Ok(())
            }
            Err(AppError::AlreadyExists(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    pub async fn results_for_user(&self, user_id: &str) -> AppResult<Vec<UserResultDto>> {
        let mut results = self.results.find_by_field("user_id", user_id).await?;
        results.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));

        let titles = self.quiz_titles().await?;
        Ok(results
            .into_iter()
            .map(|r| {
                let title = title_of(&titles, &r.quiz_id);
                UserResultDto::from_result(r, title)
            })
            .collect())
    }

    /// Highest scores overall. Equal scores rank by who finished first.
    pub async fn leaderboard(&self) -> AppResult<Vec<LeaderboardEntry>> {
        let mut results = self.results.find_all().await?;
        results.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.completed_at.cmp(&b.completed_at))
        });
        results.truncate(self.leaderboard_limit);

        let titles = self.quiz_titles().await?;
        let emails: HashMap<String, String> = self
            .users
            .find_all()
            .await?
            .into_iter()
            .map(|u| (u.id, u.email))
            .collect();

        Ok(results
            .into_iter()
            .map(|r| LeaderboardEntry {
                user_email: emails
                    .get(&r.user_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_USER_EMAIL.to_string()),
                quizzes: QuizTitle {
                    title: title_of(&titles, &r.quiz_id),
                },
                score: r.score,
                completed_at: r.completed_at,
            })
            .collect())
    }

    async fn quiz_titles(&self) -> AppResult<HashMap<String, String>> {
        Ok(self
            .quizzes
            .find_all()
            .await?
            .into_iter()
            .map(|q| (q.id, q.title))
            .collect())
    }
}

fn title_of(titles: &HashMap<String, String>, quiz_id: &str) -> String {
    titles
        .get(quiz_id)
        .cloned()
        .unwrap_or_else(|| UNKNOWN_QUIZ_TITLE.to_string())
}
