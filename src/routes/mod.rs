pub mod health;
pub mod point_of_interest;
pub mod tour;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(|| async { "OK" })).service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/tours")
                    .route("/generate", web::post().to(tour::generate))
                    .route("/state", web::get().to(tour::get_state)),
            )
            .route(
                "/pointofinterest/{id}/narration",
                web::post().to(point_of_interest::toggle_narration),
            )
            .route(
                "/narration/stop",
                web::post().to(point_of_interest::stop_narration),
            ),
    );
}
