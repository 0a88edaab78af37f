//! Terminal quiz player. Usage: `play <quiz-id>`.
//!
//! Commands while playing: an option number selects it, `n` moves on,
//! `f` finishes early, `q` quits without submitting. Scores earned without
//! `QUIZ_ACCESS_TOKEN` are kept in `PENDING_RESULTS_PATH` and submitted on
//! the next signed-in run.

use std::{
    io::BufRead,
    path::{Path, PathBuf},
    thread::JoinHandle,
};

use cloudquiz_server::{
    auth::{AuthSession, SessionContext},
    client::ApiClient,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::Question,
    session::{
        run_session, PendingResult, PendingResults, QuizSession, SessionCommand,
        SessionOutcome, SessionSnapshot,
    },
};
use env_logger::Env;
use secrecy::SecretString;
use tokio::sync::{mpsc, watch};

const DEFAULT_PENDING_PATH: &str = ".cloudquiz-pending.json";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("warn"));

    let Some(quiz_id) = std::env::args().nth(1) else {
        eprintln!("usage: play <quiz-id>");
        std::process::exit(2);
    };

    if let Err(e) = play(&quiz_id).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn play(quiz_id: &str) -> AppResult<()> {
    let config = Config::from_env();
    let pending_path = PathBuf::from(
        std::env::var("PENDING_RESULTS_PATH").unwrap_or_else(|_| DEFAULT_PENDING_PATH.to_string()),
    );

    let mut api = ApiClient::from_config(&config);
    let context = SessionContext::new();
    if let Some(token) = std::env::var("QUIZ_ACCESS_TOKEN")
        .ok()
        .filter(|t| !t.is_empty())
        .map(SecretString::from)
    {
        api.set_token(Some(token.clone()));
        let profile = api.me().await?;
        context.sign_in(AuthSession {
            user_id: profile.id,
            email: profile.email,
            access_token: token,
        });
    }

    let pending = PendingResults::with_items(load_pending(&pending_path).await);
    if !pending.is_empty().await {
        let saved = pending.replay(&context, &api).await;
        if !saved.is_empty() {
            println!("Saved {} score(s) from earlier runs.", saved.len());
        }
    }

    let session = QuizSession::load(quiz_id, &api, config.quiz_time_limit_secs).await?;
    let questions = session.questions().to_vec();

    let (commands, receiver) = mpsc::channel(8);
    let (snapshots, updates) = watch::channel(SessionSnapshot::of(&session));
    let printer = tokio::spawn(print_progress(questions.clone(), updates.clone()));
    // Detached: a blocked stdin read must not hold up runtime shutdown.
    let _reader = spawn_command_reader(
        std::io::BufReader::new(std::io::stdin()),
        questions,
        updates,
        commands,
    );

    let outcome = run_session(session, receiver, &context, &api, &snapshots).await;
    drop(snapshots);
    let _ = printer.await;

    match outcome {
        SessionOutcome::Completed { score, .. } => println!("\nDone! You scored {}.", score),
        SessionOutcome::AuthenticationRequired { pending: result } => {
            println!(
                "\nYou scored {}. Set QUIZ_ACCESS_TOKEN and play again to save it.",
                result.score
            );
            pending.park(result).await;
        }
        SessionOutcome::SubmissionFailed { score, message } => {
            println!("\nYou scored {}, but saving failed: {}", score, message);
        }
        SessionOutcome::NoQuestions => println!("This quiz has no questions."),
        SessionOutcome::Abandoned => println!("\nQuiz abandoned."),
    }

    save_pending(&pending_path, &pending.items().await).await
}

async fn print_progress(questions: Vec<Question>, mut updates: watch::Receiver<SessionSnapshot>) {
    let mut shown_question = usize::MAX;
    let mut shown_seconds = u32::MAX;

    while updates.changed().await.is_ok() {
        let snapshot = updates.borrow_and_update().clone();

        if snapshot.question_index != shown_question {
            shown_question = snapshot.question_index;
            if let Some(question) = questions.get(shown_question) {
                println!(
                    "\n[{}/{}] {}",
                    shown_question + 1,
                    snapshot.question_count,
                    question.question_text
                );
                for (i, option) in question.options.iter().enumerate() {
                    println!("  {}. {}", i + 1, option);
                }
            }
        }

        let seconds = snapshot.seconds_remaining;
        if seconds != shown_seconds && (seconds % 10 == 0 || seconds <= 5) {
            shown_seconds = seconds;
            println!("  ({}s left)", seconds);
        }
    }
}

fn spawn_command_reader<R>(
    input: R,
    questions: Vec<Question>,
    updates: watch::Receiver<SessionSnapshot>,
    commands: mpsc::Sender<SessionCommand>,
) -> JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    std::thread::spawn(move || read_commands(input, &questions, &updates, &commands))
}

fn read_commands(
    input: impl BufRead,
    questions: &[Question],
    updates: &watch::Receiver<SessionSnapshot>,
    commands: &mpsc::Sender<SessionCommand>,
) {
    for line in input.lines() {
        let Ok(line) = line else { break };
        let options = questions
            .get(updates.borrow().question_index)
            .map(|q| q.options.as_slice())
            .unwrap_or_default();

        let command = match line.trim() {
            "n" => SessionCommand::Advance,
            "f" => SessionCommand::Finish,
            "q" => break,
            other => match other
                .parse::<usize>()
                .ok()
                .and_then(|n| options.get(n.checked_sub(1)?))
            {
                Some(option) => SessionCommand::Select(option.clone()),
                None => {
                    println!("  pick 1-{}, n, f or q", options.len());
                    continue;
                }
            },
        };

        if commands.blocking_send(command).is_err() {
            break;
        }
    }
}

async fn load_pending(path: &Path) -> Vec<PendingResult> {
    match tokio::fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable {}: {}", path.display(), e);
            Vec::new()
        }),
        Err(_) => Vec::new(),
    }
}

async fn save_pending(path: &Path, items: &[PendingResult]) -> AppResult<()> {
    if items.is_empty() {
        if tokio::fs::try_exists(path).await.unwrap_or(false) {
            tokio::fs::remove_file(path)
                .await
                .map_err(|e| AppError::InternalError(e.to_string()))?;
        }
        return Ok(());
    }

    let json = serde_json::to_vec_pretty(items)?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))
}
