use tokio::sync::Mutex;

use crate::{
    models::domain::QuizResult,
    session::{
        controller::PendingResult,
        ports::{IdentityProvider, ResultSink},
    },
};

/// Scores computed while nobody was signed in, waiting to be submitted.
#[derive(Default)]
pub struct PendingResults {
    items: Mutex<Vec<PendingResult>>,
}

impl PendingResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<PendingResult>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }

    /// Copy of everything still parked, oldest first.
    pub async fn items(&self) -> Vec<PendingResult> {
        self.items.lock().await.clone()
    }

    pub async fn park(&self, pending: PendingResult) {
        log::info!(
            "Parking score {} for quiz {} until sign-in",
            pending.score,
            pending.quiz_id
        );
        self.items.lock().await.push(pending);
    }

    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }

    /// Submits every parked result as the current user. Results the sink
    /// rejects stay parked; with nobody signed in nothing is attempted.
    pub async fn replay(
        &self,
        identity: &dyn IdentityProvider,
        sink: &dyn ResultSink,
    ) -> Vec<QuizResult> {
        let Some(user_id) = identity.current_user_id().await else {
            return Vec::new();
        };

        let parked = std::mem::take(&mut *self.items.lock().await);
        let mut stored = Vec::with_capacity(parked.len());
        let mut failed = Vec::new();

        for pending in parked {
            match sink.submit_result(&pending.clone().into_request(&user_id)).await {
                Ok(result) => stored.push(result),
                Err(e) => {
                    log::warn!(
                        "Replaying score for quiz {} failed, keeping it: {}",
                        pending.quiz_id,
                        e
                    );
                    failed.push(pending);
                }
            }
        }

        if !failed.is_empty() {
            // Failures are older than anything parked while submitting.
            let mut items = self.items.lock().await;
            let newer = std::mem::replace(&mut *items, failed);
            items.extend(newer);
        }

        if !stored.is_empty() {
            log::info!("Replayed {} pending results for {}", stored.len(), user_id);
        }
        stored
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::{
        errors::{AppError, AppResult},
        models::dto::request::SubmitResultRequest,
        session::ports::{MockIdentityProvider, MockResultSink},
    };

    fn pending(quiz_id: &str, score: u32) -> PendingResult {
        PendingResult {
            quiz_id: quiz_id.to_string(),
            score,
            computed_at: Utc::now(),
        }
    }

    fn identity(user: Option<&'static str>) -> MockIdentityProvider {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_current_user_id()
            .returning(move || user.map(str::to_string));
        identity
    }

    #[tokio::test]
    async fn replay_without_user_keeps_everything() {
        let queue = PendingResults::new();
        queue.park(pending("quiz-1", 20)).await;
        let mut sink = MockResultSink::new();
        sink.expect_submit_result().times(0);

        let stored = queue.replay(&identity(None), &sink).await;

        assert!(stored.is_empty());
        assert_eq!(queue.len().await, 1);
    }

    #[tokio::test]
    async fn replay_submits_as_signed_in_user() {
        let queue = PendingResults::new();
        queue.park(pending("quiz-1", 20)).await;
        queue.park(pending("quiz-2", 0)).await;
        let mut sink = MockResultSink::new();
        sink.expect_submit_result()
            .withf(|req| req.user_id == "user-1")
            .times(2)
            .returning(|req| Ok(QuizResult::new(&req.user_id, &req.quiz_id, req.score)));

        let stored = queue.replay(&identity(Some("user-1")), &sink).await;

        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].quiz_id, "quiz-1");
        assert_eq!(stored[0].score, 20);
        assert!(queue.is_empty().await);
    }

    #[tokio::test]
    async fn failed_replays_stay_parked() {
        let queue = PendingResults::new();
        queue.park(pending("quiz-1", 10)).await;
        queue.park(pending("missing", 10)).await;
        let mut sink = MockResultSink::new();
        sink.expect_submit_result().returning(|req| {
            if req.quiz_id == "missing" {
                Err(AppError::NotFound("Quiz not found".to_string()))
            } else {
                Ok(QuizResult::new(&req.user_id, &req.quiz_id, req.score))
            }
        });

        let stored = queue.replay(&identity(Some("user-1")), &sink).await;

        assert_eq!(stored.len(), 1);
        let left: Vec<_> = queue.items().await.into_iter().map(|p| p.quiz_id).collect();
        assert_eq!(left, vec!["missing".to_string()]);
    }

    /// Parks another score mid-submission, then reports the sink offline.
    struct ParkingSink {
        queue: Arc<PendingResults>,
    }

    #[async_trait]
    impl ResultSink for ParkingSink {
        async fn submit_result(&self, _request: &SubmitResultRequest) -> AppResult<QuizResult> {
            self.queue.park(pending("quiz-late", 5)).await;
            Err(AppError::ExternalService("offline".to_string()))
        }
    }

    #[tokio::test]
    async fn parking_during_replay_does_not_wait_for_submission() {
        let queue = Arc::new(PendingResults::new());
        queue.park(pending("quiz-1", 10)).await;
        let sink = ParkingSink {
            queue: Arc::clone(&queue),
        };

        let stored = tokio::time::timeout(
            Duration::from_secs(5),
            queue.replay(&identity(Some("user-1")), &sink),
        )
        .await
        .expect("replay blocked a concurrent park");

        assert!(stored.is_empty());
        let left: Vec<_> = queue.items().await.into_iter().map(|p| p.quiz_id).collect();
        assert_eq!(left, vec!["quiz-1".to_string(), "quiz-late".to_string()]);
    }
}
