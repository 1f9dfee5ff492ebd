use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::app_state::AppState;

/*
    /api/pointofinterest/{id}/narration
*/
pub async fn toggle_narration(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    let poi_id = path.into_inner();
    match state.narration.toggle(&poi_id).await {
        Ok(status) => HttpResponse::Ok().json(status),
        Err(err) => {
            log::error!("Failed to fetch commentary for {}: {}", poi_id, err);
            HttpResponse::BadGateway().json(json!({ "error": "Failed to fetch commentary" }))
        }
    }
}

/*
    /api/narration/stop
*/
pub async fn stop_narration(state: web::Data<AppState>) -> impl Responder {
    state.narration.stop();
    HttpResponse::Ok().json(json!({ "status": "cancelled" }))
}
