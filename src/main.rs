use std::net::TcpListener;

use cloudquiz_server::{
    app_state::AppState,
    config::{Config, StorageBackend},
    run,
};
use env_logger::Env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if config.storage == StorageBackend::Mongo {
        if let Err(e) = config.validate_for_production() {
            log::error!("Refusing to start: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    }

    let (host, port) = config.bind_address();
    let state = AppState::new(config)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let listener = TcpListener::bind((host.as_str(), port))?;
    log::info!("Starting server at http://{}:{}", host, port);

    run(listener, state)?.await
}
