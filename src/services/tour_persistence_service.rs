use reqwest::Client;
use std::error::Error;
use std::fmt;

use crate::config::AppConfig;
use crate::models::point_of_interest::{Commentary, PointOfInterest};
use crate::models::tour::{CreatedTour, Tour, TourId};

#[derive(Debug)]
pub enum PersistenceError {
    HttpError(reqwest::Error),
    StatusError(u16, String),
    ResponseError(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::HttpError(err) => write!(f, "HTTP error: {}", err),
            PersistenceError::StatusError(status, body) => {
                write!(f, "Backend request failed with status {}: {}", status, body)
            }
            PersistenceError::ResponseError(msg) => write!(f, "Response error: {}", msg),
        }
    }
}

impl Error for PersistenceError {}

impl From<reqwest::Error> for PersistenceError {
    fn from(err: reqwest::Error) -> Self {
        PersistenceError::HttpError(err)
    }
}

/// Client for the tour backend's REST API.
#[derive(Clone)]
pub struct TourPersistenceService {
    client: Client,
    api_url: String,
}

impl TourPersistenceService {
    pub fn new(client: Client, config: &AppConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        }
    }

    /*
        POST {api_url}/tours
    */
    pub async fn create_tour(&self, tour: &Tour) -> Result<TourId, PersistenceError> {
        let response = self
            .client
            .post(format!("{}/tours", self.api_url))
            .json(tour)
            .send()
            .await?;

        let response = check_status(response).await?;
        let created: CreatedTour = response
            .json()
            .await
            .map_err(|e| PersistenceError::ResponseError(format!("Failed to parse tour id: {}", e)))?;

        log::info!("Tour added successfully with id {}", created.id);
        Ok(created.id)
    }

    /*
        POST {api_url}/pointofinterest
    */
    pub async fn create_point_of_interest(
        &self,
        poi: &PointOfInterest,
        tour_id: &TourId,
    ) -> Result<(), PersistenceError> {
        let record = poi.to_record(tour_id);
        log::debug!("Sending point of interest to backend: {:?}", record);

        let response = self
            .client
            .post(format!("{}/pointofinterest", self.api_url))
            .json(&record)
            .send()
            .await?;

        check_status(response).await?;
        log::info!("Point of Interest \"{}\" added successfully", poi.name);
        Ok(())
    }

    /*
        GET {api_url}/commentary/{poi_id}
    */
    pub async fn fetch_commentary(&self, poi_id: &str) -> Result<Commentary, PersistenceError> {
        let response = self
            .client
            .get(format!("{}/commentary/{}", self.api_url, poi_id))
            .send()
            .await?;

        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| PersistenceError::ResponseError(format!("Failed to parse commentary: {}", e)))
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, PersistenceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(PersistenceError::StatusError(status.as_u16(), error_text))
}
