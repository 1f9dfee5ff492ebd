//! Place Enrichment Service
//!
//! Resolves a point-of-interest name to coordinates and a photo through the
//! Google Places API:
//!
//! 1. `findplacefromtext` gives the first candidate's location and place id
//! 2. `details` for that place id gives the first photo reference
//! 3. the photo reference is templated into a `photo` URL for the client to load
//!
//! Any failure along the way resolves to an empty [`Enrichment`]; nothing is
//! retried.

use futures::stream::{self, Stream, StreamExt};
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use url::Url;

use crate::config::AppConfig;
use crate::models::point_of_interest::{Coordinates, Enrichment, PointOfInterest};

const PHOTO_MAX_WIDTH: u32 = 400;

#[derive(Debug, Deserialize)]
struct FindPlaceResponse {
    #[serde(default)]
    candidates: Vec<PlaceCandidate>,
}

#[derive(Debug, Deserialize)]
struct PlaceCandidate {
    geometry: Option<PlaceGeometry>,
    place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaceGeometry {
    location: Option<Coordinates>,
}

#[derive(Debug, Deserialize)]
struct PlaceDetailsResponse {
    result: Option<PlaceDetails>,
}

#[derive(Debug, Deserialize)]
struct PlaceDetails {
    #[serde(default)]
    photos: Vec<PlacePhoto>,
}

#[derive(Debug, Deserialize)]
struct PlacePhoto {
    photo_reference: Option<String>,
}

#[derive(Debug)]
enum EnrichmentError {
    HttpError(reqwest::Error),
    UrlError(url::ParseError),
    NoCandidate,
    NoPhoto,
}

impl fmt::Display for EnrichmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrichmentError::HttpError(err) => write!(f, "HTTP error: {}", err),
            EnrichmentError::UrlError(err) => write!(f, "Invalid places URL: {}", err),
            EnrichmentError::NoCandidate => write!(f, "No place candidate with a location"),
            EnrichmentError::NoPhoto => write!(f, "No photo reference for place"),
        }
    }
}

impl From<reqwest::Error> for EnrichmentError {
    fn from(err: reqwest::Error) -> Self {
        EnrichmentError::HttpError(err)
    }
}

impl From<url::ParseError> for EnrichmentError {
    fn from(err: url::ParseError) -> Self {
        EnrichmentError::UrlError(err)
    }
}

#[derive(Clone)]
pub struct PlaceEnrichmentService {
    client: Client,
    api_key: String,
    base_url: String,
    concurrency: usize,
}

impl PlaceEnrichmentService {
    pub fn new(client: Client, config: &AppConfig) -> Self {
        Self {
            client,
            api_key: config.google_api_key.clone(),
            base_url: config.google_places_base_url.trim_end_matches('/').to_string(),
            concurrency: config.enrichment_concurrency.max(1),
        }
    }

    /// Coordinates and photo for one name. Never fails; an unresolved place
    /// comes back as `Enrichment::unresolved()`.
    pub async fn enrich(&self, name: &str) -> Enrichment {
        match self.lookup(name).await {
            Ok(enrichment) => enrichment,
            Err(e) => {
                log::warn!("Error fetching place data for {}: {}", name, e);
                Enrichment::unresolved()
            }
        }
    }

    /// Enriches `names` with at most `concurrency` lookups in flight. Items are
    /// yielded in input order, tagged with their position.
    pub fn enrich_stream<'a>(
        &'a self,
        names: &'a [String],
    ) -> impl Stream<Item = PointOfInterest> + 'a {
        stream::iter(names.iter().enumerate())
            .map(move |(ordinal, name)| async move {
                let enrichment = self.enrich(name).await;
                PointOfInterest::new(ordinal, name.clone(), enrichment)
            })
            .buffered(self.concurrency)
    }

    pub async fn enrich_all(&self, names: &[String]) -> Vec<PointOfInterest> {
        self.enrich_stream(names).collect().await
    }

    pub fn photo_url(&self, photo_reference: &str) -> Result<String, url::ParseError> {
        let url = Url::parse_with_params(
            &format!("{}/photo", self.base_url),
            &[
                ("maxwidth", PHOTO_MAX_WIDTH.to_string().as_str()),
                ("photoreference", photo_reference),
                ("key", self.api_key.as_str()),
            ],
        )?;
        Ok(url.to_string())
    }

    async fn lookup(&self, name: &str) -> Result<Enrichment, EnrichmentError> {
        let find_url = Url::parse_with_params(
            &format!("{}/findplacefromtext/json", self.base_url),
            &[
                ("input", name),
                ("inputtype", "textquery"),
                ("fields", "geometry,place_id"),
                ("key", self.api_key.as_str()),
            ],
        )?;

        let found: FindPlaceResponse = self
            .client
            .get(find_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let candidate = found
            .candidates
            .into_iter()
            .next()
            .ok_or(EnrichmentError::NoCandidate)?;
        let coordinates = candidate
            .geometry
            .and_then(|g| g.location)
            .ok_or(EnrichmentError::NoCandidate)?;
        let place_id = candidate.place_id.ok_or(EnrichmentError::NoCandidate)?;

        let details_url = Url::parse_with_params(
            &format!("{}/details/json", self.base_url),
            &[
                ("place_id", place_id.as_str()),
                ("fields", "photos"),
                ("key", self.api_key.as_str()),
            ],
        )?;

        let details: PlaceDetailsResponse = self
            .client
            .get(details_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let photo_reference = details
            .result
            .and_then(|r| r.photos.into_iter().next())
            .and_then(|p| p.photo_reference)
            .ok_or(EnrichmentError::NoPhoto)?;

        Ok(Enrichment {
            coordinates: Some(coordinates),
            image_url: self.photo_url(&photo_reference)?,
        })
    }
}
