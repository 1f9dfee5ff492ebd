//! Tour Pipeline
//!
//! One run turns a `TourRequest` into a persisted tour:
//! sanitize, generate the route, parse the stops, fetch the city photo,
//! create the tour, then enrich and create each point of interest in order.
//!
//! Only a generation failure stops the run. Everything after that is best
//! effort and reported back as warnings.

use chrono::Utc;
use futures::StreamExt;
use reqwest::Client;
use std::pin::pin;

use crate::config::AppConfig;
use crate::models::generation_state::TourOutcome;
use crate::models::point_of_interest::PointOfInterest;
use crate::models::tour::{Tour, TourId, TourRequest};
use crate::services::city_photo_service::CityPhotoService;
use crate::services::place_enrichment_service::PlaceEnrichmentService;
use crate::services::route_generation_service::{GenerationError, RouteGenerationService};
use crate::services::route_parser::parse_points_of_interest;
use crate::services::sanitizer::sanitize_input;
use crate::services::tour_persistence_service::TourPersistenceService;

#[derive(Clone)]
pub struct TourPipeline {
    generator: RouteGenerationService,
    city_photos: CityPhotoService,
    enricher: PlaceEnrichmentService,
    persistence: TourPersistenceService,
}

impl TourPipeline {
    pub fn new(client: Client, config: &AppConfig) -> Self {
        Self {
            generator: RouteGenerationService::new(client.clone(), config),
            city_photos: CityPhotoService::new(client.clone(), config),
            enricher: PlaceEnrichmentService::new(client.clone(), config),
            persistence: TourPersistenceService::new(client, config),
        }
    }

    pub fn persistence(&self) -> &TourPersistenceService {
        &self.persistence
    }

    pub async fn run(&self, request: TourRequest) -> Result<TourOutcome, GenerationError> {
        let request = request.sanitize();

        let tour_content = self.generator.generate_route(&request).await?;

        let points_of_interest: Vec<String> = parse_points_of_interest(&tour_content)
            .iter()
            .map(|name| sanitize_input(name.as_str()))
            .collect();
        log::info!("Points of Interest: {:?}", points_of_interest);

        let image_url = self.city_photos.fetch_city_photo(request.city()).await;
        let tour = Tour::new(&request, image_url, points_of_interest);
        log::info!("Generated Tour Name: {}", tour.tour_name);

        let mut warnings = Vec::new();
        let (tour_id, enriched) = match self.persistence.create_tour(&tour).await {
            Ok(tour_id) => {
                let enriched = self
                    .persist_points_of_interest(&tour, &tour_id, &mut warnings)
                    .await;
                (Some(tour_id), enriched)
            }
            Err(e) => {
                log::error!("Error adding tour: {}", e);
                warnings.push(format!(
                    "Tour could not be saved, points of interest were not stored: {}",
                    e
                ));
                (None, Vec::new())
            }
        };

        Ok(TourOutcome {
            tour_content,
            tour,
            tour_id,
            points_of_interest: enriched,
            warnings,
            generated_at: Utc::now(),
        })
    }

    /// Enriches the tour's stops and stores each one as its enrichment
    /// arrives. Stores happen one at a time, in route order.
    async fn persist_points_of_interest(
        &self,
        tour: &Tour,
        tour_id: &TourId,
        warnings: &mut Vec<String>,
    ) -> Vec<PointOfInterest> {
        let mut stored = Vec::with_capacity(tour.ordered_points_of_interest.len());
        let mut enriched = pin!(self.enricher.enrich_stream(&tour.ordered_points_of_interest));

        while let Some(poi) = enriched.next().await {
            if let Err(e) = self.persistence.create_point_of_interest(&poi, tour_id).await {
                log::error!("Error adding Point of Interest \"{}\": {}", poi.name, e);
                warnings.push(format!("Point of interest \"{}\" was not saved: {}", poi.name, e));
            }
            stored.push(poi);
        }

        stored
    }
}
