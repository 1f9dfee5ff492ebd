use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::app_state::AppState;
use crate::models::tour::TourRequest;
use crate::services::route_generation_service::GENERATION_FAILED_MESSAGE;

/*
    /api/tours/generate
*/
pub async fn generate(
    state: web::Data<AppState>,
    input: web::Json<TourRequest>,
) -> impl Responder {
    let request = input.into_inner();
    if request.city.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "City is required" }));
    }

    let generation = match state.begin_generation() {
        Ok(generation) => generation,
        Err(err) => {
            log::warn!("Rejected tour generation for {}: {}", request.city, err);
            return HttpResponse::Conflict().json(json!({ "error": err.to_string() }));
        }
    };

    match state.pipeline.run(request).await {
        Ok(outcome) => {
            if let Err(err) = generation.complete(outcome.clone()) {
                log::error!("Failed to record generated tour: {}", err);
            }
            HttpResponse::Ok().json(outcome)
        }
        Err(err) => {
            log::error!("Error generating walking tour: {}", err);
            if let Err(err) = generation.fail(GENERATION_FAILED_MESSAGE) {
                log::error!("Failed to record generation failure: {}", err);
            }
            HttpResponse::BadGateway().json(json!({ "error": GENERATION_FAILED_MESSAGE }))
        }
    }
}

/*
    /api/tours/state
*/
pub async fn get_state(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.generation_state())
}
