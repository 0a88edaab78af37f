use std::time::Duration;

use serde::Serialize;
use tokio::{
    sync::{mpsc, watch},
    time::{self, Instant, MissedTickBehavior},
};

use crate::session::{
    controller::{QuizSession, SessionOutcome, SessionStatus},
    ports::{IdentityProvider, ResultSink},
};

const TICK: Duration = Duration::from_secs(1);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Select(String),
    Advance,
    Finish,
}

/// What a view layer needs to render the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub question_index: usize,
    pub question_count: usize,
    pub seconds_remaining: u32,
    pub selected: Option<String>,
    pub status: SessionStatus,
}

impl SessionSnapshot {
    pub fn of(session: &QuizSession) -> Self {
        Self {
            question_index: session.question_index(),
            question_count: session.question_count(),
            seconds_remaining: session.seconds_remaining(),
            selected: session.current_selection().map(str::to_string),
            status: session.status(),
        }
    }
}

/// Drives a session until it is submitted or abandoned.
///
/// User commands and the one-second countdown are multiplexed onto the
/// session. The countdown is dropped as soon as submission begins, so only one
/// path ever reaches the result sink. Dropping every command sender abandons
/// the attempt without submitting.
pub async fn run_session(
    mut session: QuizSession,
    mut commands: mpsc::Receiver<SessionCommand>,
    identity: &dyn IdentityProvider,
    sink: &dyn ResultSink,
    snapshots: &watch::Sender<SessionSnapshot>,
) -> SessionOutcome {
    let publish = |session: &QuizSession| {
        snapshots.send_replace(SessionSnapshot::of(session));
    };

    publish(&session);
    if session.status() == SessionStatus::NoQuestions {
        log::warn!("Quiz {} has no questions", session.quiz_id());
        return SessionOutcome::NoQuestions;
    }

    let mut countdown = time::interval_at(Instant::now() + TICK, TICK);
    countdown.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let pending = loop {
        let transition = tokio::select! {
            command = commands.recv() => match command {
                Some(SessionCommand::Select(option)) => {
                    if let Err(e) = session.select_option(&option) {
                        log::warn!("Ignoring selection: {}", e);
                    }
                    None
                }
                Some(SessionCommand::Advance) => session.advance(),
                Some(SessionCommand::Finish) => session.begin_submit(),
                None => {
                    log::info!("Quiz {} abandoned", session.quiz_id());
                    session.abandon();
                    publish(&session);
                    return SessionOutcome::Abandoned;
                }
            },
            _ = countdown.tick() => session.tick(),
        };

        publish(&session);
        if let Some(pending) = transition {
            break pending;
        }
    };
    drop(countdown);

    let outcome = session.finish_submission(pending, identity, sink).await;
    publish(&session);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::domain::{Question, QuizResult},
        session::ports::{MockIdentityProvider, MockResultSink},
    };

    fn questions() -> Vec<Question> {
        ["a", "b", "c"]
            .iter()
            .enumerate()
            .map(|(i, correct)| {
                let options = ["a", "b", "c", "d"].iter().map(|o| o.to_string()).collect();
                Question::new("quiz-1", &format!("Question {}", i + 1), options, correct)
            })
            .collect()
    }

    fn identity() -> MockIdentityProvider {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_current_user_id()
            .returning(|| Some("user-1".to_string()));
        identity
    }

    fn sink(times: usize) -> MockResultSink {
        let mut sink = MockResultSink::new();
        sink.expect_submit_result()
            .times(times)
            .returning(|req| Ok(QuizResult::new(&req.user_id, &req.quiz_id, req.score)));
        sink
    }

    fn snapshot_channel(session: &QuizSession) -> watch::Sender<SessionSnapshot> {
        watch::channel(SessionSnapshot::of(session)).0
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_submits_once_when_time_runs_out() {
        let session = QuizSession::new("quiz-1", questions(), 3);
        let snapshots = snapshot_channel(&session);
        let (tx, rx) = mpsc::channel(8);
        tx.send(SessionCommand::Select("a".to_string())).await.unwrap();
        tx.send(SessionCommand::Advance).await.unwrap();
        tx.send(SessionCommand::Select("a".to_string())).await.unwrap();
        tx.send(SessionCommand::Advance).await.unwrap();

        let started = Instant::now();
        let outcome = run_session(session, rx, &identity(), &sink(1), &snapshots).await;

        assert!(matches!(outcome, SessionOutcome::Completed { score: 10, .. }));
        assert_eq!(started.elapsed(), Duration::from_secs(3));

        let last = snapshots.borrow().clone();
        assert_eq!(last.seconds_remaining, 0);
        assert_eq!(last.status, SessionStatus::Completed);
        drop(tx);
    }

    #[tokio::test(start_paused = true)]
    async fn commands_drive_the_session_to_completion() {
        let session = QuizSession::new("quiz-1", questions(), 60);
        let snapshots = snapshot_channel(&session);
        let (tx, rx) = mpsc::channel(16);
        for command in [
            SessionCommand::Select("a".to_string()),
            SessionCommand::Select("b".to_string()),
            SessionCommand::Select("a".to_string()),
            SessionCommand::Advance,
            SessionCommand::Select("b".to_string()),
            SessionCommand::Advance,
            SessionCommand::Select("d".to_string()),
            SessionCommand::Finish,
            SessionCommand::Finish,
        ] {
            tx.send(command).await.unwrap();
        }

        let outcome = run_session(session, rx, &identity(), &sink(1), &snapshots).await;

        match outcome {
            SessionOutcome::Completed { score, result } => {
                assert_eq!(score, 20);
                assert_eq!(result.user_id, "user-1");
            }
            other => panic!("Expected completion, got {:?}", other),
        }
        assert_eq!(snapshots.borrow().question_index, 2);
        assert_eq!(snapshots.borrow().selected.as_deref(), Some("d"));
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_options_are_ignored() {
        let session = QuizSession::new("quiz-1", questions(), 60);
        let snapshots = snapshot_channel(&session);
        let (tx, rx) = mpsc::channel(8);
        tx.send(SessionCommand::Select("a".to_string())).await.unwrap();
        tx.send(SessionCommand::Select("not an option".to_string()))
            .await
            .unwrap();
        tx.send(SessionCommand::Finish).await.unwrap();

        let outcome = run_session(session, rx, &identity(), &sink(1), &snapshots).await;

        assert!(matches!(outcome, SessionOutcome::Completed { score: 10, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn closing_the_command_channel_abandons_without_submitting() {
        let session = QuizSession::new("quiz-1", questions(), 60);
        let snapshots = snapshot_channel(&session);
        let (tx, rx) = mpsc::channel(8);
        tx.send(SessionCommand::Select("a".to_string())).await.unwrap();
        drop(tx);

        let outcome = run_session(session, rx, &identity(), &sink(0), &snapshots).await;

        assert_eq!(outcome, SessionOutcome::Abandoned);
        assert_eq!(snapshots.borrow().status, SessionStatus::Abandoned);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_quiz_returns_no_questions() {
        let session = QuizSession::new("quiz-1", vec![], 60);
        let snapshots = snapshot_channel(&session);
        let (_tx, rx) = mpsc::channel(1);

        let outcome = run_session(session, rx, &identity(), &sink(0), &snapshots).await;

        assert_eq!(outcome, SessionOutcome::NoQuestions);
        assert_eq!(snapshots.borrow().status, SessionStatus::NoQuestions);
    }
}
