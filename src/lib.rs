pub mod app_state;
pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod session;

#[cfg(test)]
pub mod test_utils;

use std::net::TcpListener;

use actix_cors::Cors;
use actix_web::{
    dev::Server,
    http::header::{self, HeaderName},
    middleware::Logger,
    web, App, HttpServer,
};

use crate::{app_state::AppState, auth::AuthMiddleware, middleware::RequestIdMiddleware};

fn cors(allowed_origin: Option<&str>) -> Cors {
    match allowed_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .expose_headers(vec![HeaderName::from_static(
                middleware::REQUEST_ID_HEADER,
            )])
            .max_age(3600),
        None => Cors::permissive(),
    }
}

/// Serves the API on an already bound listener.
pub fn run(listener: TcpListener, state: AppState) -> Result<Server, std::io::Error> {
    let data = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(AuthMiddleware)
            .wrap(cors(data.config.cors_allowed_origin.as_deref()))
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .configure(handlers::configure)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
