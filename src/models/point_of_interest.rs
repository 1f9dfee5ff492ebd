use serde::{Deserialize, Serialize};

use crate::models::tour::TourId;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Result of looking a name up in the places service. A failed lookup is
/// `coordinates: None` with an empty `image_url`, never an error.
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct Enrichment {
    pub coordinates: Option<Coordinates>,
    pub image_url: String,
}

impl Enrichment {
    pub fn unresolved() -> Self {
        Self::default()
    }
}

/// A stop on the route, in the position it appeared in the generated text.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PointOfInterest {
    pub ordinal: usize,
    pub name: String,
    pub coordinates: Option<Coordinates>,
    pub image_url: String,
}

impl PointOfInterest {
    pub fn new(ordinal: usize, name: String, enrichment: Enrichment) -> Self {
        Self {
            ordinal,
            name,
            coordinates: enrichment.coordinates,
            image_url: enrichment.image_url,
        }
    }

    pub fn to_record<'a>(&'a self, tour_id: &'a TourId) -> PointOfInterestRecord<'a> {
        PointOfInterestRecord {
            poi_name: &self.name,
            tour_id,
            latitude: self.coordinates.map(|c| c.lat),
            longitude: self.coordinates.map(|c| c.lng),
            image_url: if self.image_url.is_empty() {
                None
            } else {
                Some(&self.image_url)
            },
        }
    }
}

/// The body of `POST /pointofinterest`. Borrowing a `TourId` means a record
/// cannot be built before the tour exists.
#[derive(Debug, Serialize)]
pub struct PointOfInterestRecord<'a> {
    pub poi_name: &'a str,
    pub tour_id: &'a TourId,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<&'a str>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Commentary {
    #[serde(default)]
    pub description: String,
}
