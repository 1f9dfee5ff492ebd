use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use walking_tour_api::app_state::AppState;
use walking_tour_api::config::AppConfig;
use walking_tour_api::routes;
use walking_tour_api::services::narration_service::LoggedPlayback;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    log::info!("Application starting...");

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let client = config
        .http_client()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let host = config.host.clone();
    let port = config.port;
    let state = web::Data::new(AppState::new(
        config,
        client,
        Arc::new(LoggedPlayback::default()),
    ));

    log::info!("Attempting to bind to {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
