use cloudquiz_server::{app_state::AppState, config::Config};
use env_logger::Env;

const DEFAULT_ADMIN_EMAIL: &str = "admin_report@test.com";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let email = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string());

    let state = match AppState::new(Config::from_env()).await {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to open the store: {}", e);
            std::process::exit(1);
        }
    };

    match state.user_service.promote_to_admin(&email).await {
        Ok(user) => println!("{} ({}) is now an admin", user.email, user.id),
        Err(e) => {
            log::error!("Could not promote {}: {}", email, e);
            std::process::exit(1);
        }
    }
}
