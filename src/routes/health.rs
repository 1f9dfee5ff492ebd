use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;

use crate::app_state::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
    generation: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let config = &state.config;
    let mut services = HashMap::new();

    services.insert(
        "completion".to_string(),
        key_status(&config.openai_api_key, &config.openai_base_url),
    );
    services.insert(
        "places".to_string(),
        key_status(&config.google_api_key, &config.google_places_base_url),
    );
    services.insert(
        "photos".to_string(),
        key_status(&config.unsplash_access_key, &config.unsplash_base_url),
    );
    services.insert(
        "backend".to_string(),
        ServiceStatus {
            status: "configured".to_string(),
            details: Some(config.api_url.clone()),
        },
    );

    let status = if services.values().all(|s| s.status == "configured") {
        "ok"
    } else {
        "degraded"
    };

    HttpResponse::Ok().json(HealthStatus {
        status: status.to_string(),
        services,
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
        generation: state.generation_state().name().to_string(),
    })
}

fn key_status(key: &str, endpoint: &str) -> ServiceStatus {
    if key.trim().is_empty() {
        ServiceStatus {
            status: "error".to_string(),
            details: Some("API key is empty".to_string()),
        }
    } else {
        ServiceStatus {
            status: "configured".to_string(),
            details: Some(endpoint.to_string()),
        }
    }
}
