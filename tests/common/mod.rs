use std::net::TcpListener;

use cloudquiz_server::{
    app_state::AppState,
    client::ApiClient,
    config::Config,
    models::domain::{Difficulty, Question, Quiz, UserProfile, UserRole},
    repositories::ResourceRepository,
    run,
};
use secrecy::SecretString;

#[allow(dead_code)]
pub struct TestApp {
    pub address: String,
    pub state: AppState,
}

/// Serves an in-memory instance on a random port.
pub async fn spawn_app() -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let mut config = Config::test_config();
    config.api_base_url = format!("{}/api", address);
    let state = AppState::in_memory(config);

    let server = run(listener, state.clone()).expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp { address, state }
}

#[allow(dead_code)]
impl TestApp {
    pub fn anonymous(&self) -> ApiClient {
        ApiClient::from_config(&self.state.config)
    }

    pub fn token_for(&self, user_id: &str) -> SecretString {
        let token = self
            .state
            .jwt_service
            .create_token(user_id, &format!("{}@example.com", user_id))
            .expect("Failed to sign token");
        SecretString::from(token)
    }

    pub fn client_for(&self, user_id: &str) -> ApiClient {
        self.anonymous().with_token(self.token_for(user_id))
    }

    /// Stores a profile with `role` and returns a client signed in as it.
    pub async fn user(&self, user_id: &str, role: UserRole) -> ApiClient {
        let mut profile = UserProfile::new(user_id, &format!("{}@example.com", user_id));
        profile.role = role;
        self.state
            .repositories
            .users
            .create(profile)
            .await
            .expect("Failed to store profile");
        self.client_for(user_id)
    }

    /// A quiz with `n` questions whose correct answer is always "S3".
    pub async fn seed_quiz(&self, title: &str, n: usize) -> (Quiz, Vec<Question>) {
        let repos = &self.state.repositories;
        let quiz = repos
            .quizzes
            .create(Quiz::new(title, "", "Cloud", Difficulty::Easy))
            .await
            .expect("Failed to store quiz");

        let mut questions = Vec::new();
        for i in 0..n {
            let question = Question::new(&quiz.id, &format!("Question {}", i + 1), options(), "S3");
            questions.push(repos.questions.create(question).await.expect("Failed to store question"));
        }
        (quiz, questions)
    }
}

pub fn options() -> Vec<String> {
    vec!["EC2".into(), "S3".into(), "Lambda".into(), "RDS".into()]
}
