use crate::{
    app_state::AppState,
    config::Config,
    models::domain::{Difficulty, Question, Quiz, UserProfile, UserRole},
};

/// Builds the full application around `$state` for `actix_web::test` calls.
#[macro_export]
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .wrap($crate::auth::AuthMiddleware)
                .wrap($crate::middleware::RequestIdMiddleware)
                .configure($crate::handlers::configure),
        )
        .await
    };
}

pub mod fixtures {
    use super::*;
    use crate::repositories::ResourceRepository;

    pub fn test_state() -> AppState {
        AppState::in_memory(Config::test_config())
    }

    pub fn bearer(state: &AppState, user_id: &str) -> (&'static str, String) {
        let token = state
            .jwt_service
            .create_token(user_id, &format!("{}@example.com", user_id))
            .unwrap();
        ("Authorization", format!("Bearer {}", token))
    }

    /// Stores a profile with the given role and returns a bearer header for it.
    pub async fn signed_in(state: &AppState, user_id: &str, role: UserRole) -> (&'static str, String) {
        let mut profile = UserProfile::new(user_id, &format!("{}@example.com", user_id));
        profile.role = role;
        state.repositories.users.create(profile).await.unwrap();
        bearer(state, user_id)
    }

    pub fn options() -> Vec<String> {
        vec!["EC2".into(), "S3".into(), "Lambda".into(), "RDS".into()]
    }

    /// A quiz with `n` questions whose correct answer is always "S3".
    pub async fn seed_quiz(state: &AppState, title: &str, n: usize) -> (Quiz, Vec<Question>) {
        let quiz = state
            .repositories
            .quizzes
            .create(Quiz::new(title, "", "Cloud", Difficulty::Easy))
            .await
            .unwrap();

        let mut questions = Vec::new();
        for i in 0..n {
            let question = Question::new(&quiz.id, &format!("Question {}", i + 1), options(), "S3");
            questions.push(state.repositories.questions.create(question).await.unwrap());
        }
        (quiz, questions)
    }
}
