use std::{collections::HashMap, sync::Arc};

use chrono::{Duration, NaiveDate, Utc};

use crate::{
    errors::AppResult,
    models::{
        domain::{quiz_result::max_score, Question, Quiz, QuizResult, UserProfile},
        dto::response::{AnalyticsOverview, DailyActivity, QuizPerformance},
    },
    repositories::ResourceRepository,
};

pub struct AnalyticsService {
    users: Arc<dyn ResourceRepository<UserProfile>>,
    quizzes: Arc<dyn ResourceRepository<Quiz>>,
    questions: Arc<dyn ResourceRepository<Question>>,
    results: Arc<dyn ResourceRepository<QuizResult>>,
}

impl AnalyticsService {
    pub fn new(
        users: Arc<dyn ResourceRepository<UserProfile>>,
        quizzes: Arc<dyn ResourceRepository<Quiz>>,
        questions: Arc<dyn ResourceRepository<Question>>,
        results: Arc<dyn ResourceRepository<QuizResult>>,
    ) -> Self {
        Self {
            users,
            quizzes,
            questions,
            results,
        }
    }

    pub async fn overview(&self) -> AppResult<AnalyticsOverview> {
        let results = self.results.find_all().await?;
        let question_counts = self.question_counts().await?;

        Ok(AnalyticsOverview {
            total_users: self.users.count().await?,
            total_quizzes: self.quizzes.count().await?,
            total_questions: question_counts.values().sum::<usize>() as u64,
            total_attempts: results.len() as u64,
            average_score: average_percentage(results.iter(), &question_counts),
        })
    }

    /// Attempts and average percentage per quiz, most attempted first.
    pub async fn quiz_performance(&self) -> AppResult<Vec<QuizPerformance>> {
        let results = self.results.find_all().await?;
        let question_counts = self.question_counts().await?;

        let mut performance: Vec<QuizPerformance> = self
            .quizzes
            .find_all()
            .await?
            .into_iter()
            .map(|quiz| {
                let attempts: Vec<&QuizResult> =
                    results.iter().filter(|r| r.quiz_id == quiz.id).collect();
                QuizPerformance {
                    attempts: attempts.len() as u64,
                    average_score: average_percentage(attempts.into_iter(), &question_counts),
                    quiz_id: quiz.id,
                    title: quiz.title,
                }
            })
            .collect();

        performance.sort_by(|a, b| {
            b.attempts
                .cmp(&a.attempts)
                .then_with(|| a.title.cmp(&b.title))
        });
        Ok(performance)
    }

    /// Attempts per day over the last `days` days, oldest first.
    pub async fn user_activity(&self, days: u32) -> AppResult<Vec<DailyActivity>> {
        let results = self.results.find_all().await?;
        Ok(daily_activity(&results, Utc::now().date_naive(), days))
    }

    async fn question_counts(&self) -> AppResult<HashMap<String, usize>> {
        let mut counts = HashMap::new();
        for question in self.questions.find_all().await? {
            *counts.entry(question.quiz_id).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

/// Mean of each result's share of its quiz's attainable score, as a
/// percentage with one decimal. Results of quizzes without questions are skipped.
fn average_percentage<'a>(
    results: impl Iterator<Item = &'a QuizResult>,
    question_counts: &HashMap<String, usize>,
) -> f64 {
    let percentages: Vec<f64> = results
        .filter_map(|r| {
            let max = max_score(question_counts.get(&r.quiz_id).copied().unwrap_or(0));
            (max > 0).then(|| f64::from(r.score) / f64::from(max) * 100.0)
        })
        .collect();

    if percentages.is_empty() {
        return 0.0;
    }
    let mean = percentages.iter().sum::<f64>() / percentages.len() as f64;
    (mean * 10.0).round() / 10.0
}

fn daily_activity(results: &[QuizResult], today: NaiveDate, days: u32) -> Vec<DailyActivity> {
    let days = i64::from(days.max(1));
    let first = today - Duration::days(days - 1);

    let mut per_day: HashMap<NaiveDate, u64> = HashMap::new();
    for result in results {
        let date = result.completed_at.date_naive();
        if date >= first && date <= today {
            *per_day.entry(date).or_insert(0) += 1;
        }
    }

    (0..days)
        .map(|offset| {
            let date = first + Duration::days(offset);
            DailyActivity {
                date,
                attempts: per_day.get(&date).copied().unwrap_or(0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::domain::Difficulty, repositories::InMemoryRepository};

    fn options() -> Vec<String> {
        vec!["a".into(), "b".into(), "c".into(), "d".into()]
    }

    fn questions_for(quiz: &Quiz, n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question::new(&quiz.id, &format!("Q{}", i), options(), "a"))
            .collect()
    }

    fn setup() -> (AnalyticsService, Quiz, Quiz) {
        let popular = Quiz::new("Popular", "", "Cloud", Difficulty::Easy);
        let quiet = Quiz::new("Quiet", "", "Cloud", Difficulty::Hard);

        let mut questions = questions_for(&popular, 2);
        questions.extend(questions_for(&quiet, 4));

        let results = vec![
            QuizResult::new("ada", &popular.id, 20),
            QuizResult::new("bob", &popular.id, 0),
            QuizResult::new("ada", &quiet.id, 10),
        ];

        let service = AnalyticsService::new(
            Arc::new(InMemoryRepository::with_items(vec![
                UserProfile::new("ada", "ada@example.com"),
                UserProfile::new("bob", "bob@example.com"),
            ])),
            Arc::new(InMemoryRepository::with_items(vec![popular.clone(), quiet.clone()])),
            Arc::new(InMemoryRepository::with_items(questions)),
            Arc::new(InMemoryRepository::with_items(results)),
        );
        (service, popular, quiet)
    }

    #[tokio::test]
    async fn overview_counts_and_averages_percentages() {
        let (service, _, _) = setup();

        let overview = service.overview().await.unwrap();

        assert_eq!(overview.total_users, 2);
        assert_eq!(overview.total_quizzes, 2);
        assert_eq!(overview.total_questions, 6);
        assert_eq!(overview.total_attempts, 3);
        // (100 + 0 + 25) / 3
        assert_eq!(overview.average_score, 41.7);
    }

    #[tokio::test]
    async fn quiz_performance_is_most_attempted_first() {
        let (service, popular, quiet) = setup();

        let performance = service.quiz_performance().await.unwrap();

        assert_eq!(performance[0].quiz_id, popular.id);
        assert_eq!(performance[0].attempts, 2);
        assert_eq!(performance[0].average_score, 50.0);
        assert_eq!(performance[1].quiz_id, quiet.id);
        assert_eq!(performance[1].average_score, 25.0);
    }

    #[tokio::test]
    async fn empty_store_has_zero_average() {
        let service = AnalyticsService::new(
            Arc::new(InMemoryRepository::new()),
            Arc::new(InMemoryRepository::new()),
            Arc::new(InMemoryRepository::new()),
            Arc::new(InMemoryRepository::new()),
        );

        let overview = service.overview().await.unwrap();
        assert_eq!(overview.total_attempts, 0);
        assert_eq!(overview.average_score, 0.0);
    }

    #[test]
    fn daily_activity_is_zero_filled_and_oldest_first() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let at = |y, m, d| {
            let mut r = QuizResult::new("ada", "quiz", 0);
            r.completed_at = NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
                .and_utc();
            r
        };
        let results = vec![at(2024, 3, 10), at(2024, 3, 10), at(2024, 3, 8), at(2024, 2, 1)];

        let activity = daily_activity(&results, today, 3);

        let counts: Vec<_> = activity.iter().map(|d| (d.date.to_string(), d.attempts)).collect();
        assert_eq!(
            counts,
            vec![
                ("2024-03-08".to_string(), 1),
                ("2024-03-09".to_string(), 0),
                ("2024-03-10".to_string(), 2),
            ]
        );
    }

    #[tokio::test]
    async fn user_activity_covers_requested_days() {
        let (service, _, _) = setup();

        let activity = service.user_activity(30).await.unwrap();

        assert_eq!(activity.len(), 30);
        assert_eq!(activity.last().unwrap().attempts, 3);
    }
}
