use serde::{Deserialize, Serialize};
use std::fmt;

use crate::services::sanitizer::sanitize_input;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum TourDuration {
    #[default]
    #[serde(rename = "Full-day")]
    FullDay,
    #[serde(rename = "Half-day")]
    HalfDay,
    #[serde(rename = "2 hours")]
    TwoHours,
}

impl TourDuration {
    pub fn as_str(&self) -> &'static str {
        match self {
            TourDuration::FullDay => "Full-day",
            TourDuration::HalfDay => "Half-day",
            TourDuration::TwoHours => "2 hours",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Historic,
    Scenic,
    Fun,
    Museums,
    Pubs,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Historic => "Historic",
            Theme::Scenic => "Scenic",
            Theme::Fun => "Fun",
            Theme::Museums => "Museums",
            Theme::Pubs => "Pubs",
        }
    }
}

/// Tour parameters exactly as the user typed them.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TourRequest {
    pub city: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub duration: TourDuration,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub theme: Theme,
}

impl TourRequest {
    /// Escapes every field once. Consumes the request so the raw text cannot
    /// be escaped a second time by accident.
    pub fn sanitize(self) -> SanitizedTourRequest {
        SanitizedTourRequest {
            city: sanitize_input(&self.city),
            region: sanitize_input(&self.region),
            state: sanitize_input(&self.state),
            country: sanitize_input(&self.country),
            duration: sanitize_input(self.duration.as_str()),
            difficulty: sanitize_input(self.difficulty.as_str()),
            theme: sanitize_input(self.theme.as_str()),
        }
    }
}

/// A `TourRequest` whose text fields have been escaped exactly once.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SanitizedTourRequest {
    city: String,
    region: String,
    state: String,
    country: String,
    duration: String,
    difficulty: String,
    theme: String,
}

impl SanitizedTourRequest {
    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn tour_name(&self) -> String {
        format!(
            "{}, {} {} tour - lasting {} with {} difficulty.",
            self.city, self.country, self.theme, self.duration, self.difficulty
        )
    }
}

/// Identifier assigned by the backend on tour creation. Echoed back verbatim
/// on every point of interest, whether the backend uses numbers or strings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum TourId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for TourId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TourId::Numeric(id) => write!(f, "{}", id),
            TourId::Text(id) => write!(f, "{}", id),
        }
    }
}

/// The record sent to `POST /tours`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Tour {
    pub country: String,
    pub region: String,
    pub state: String,
    pub city: String,
    pub duration: String,
    pub difficulty: String,
    pub theme: String,
    pub tour_name: String,
    pub image_url: String,
    pub ordered_points_of_interest: Vec<String>,
}

impl Tour {
    pub fn new(
        request: &SanitizedTourRequest,
        image_url: String,
        ordered_points_of_interest: Vec<String>,
    ) -> Self {
        Self {
            country: request.country.clone(),
            region: request.region.clone(),
            state: request.state.clone(),
            city: request.city.clone(),
            duration: request.duration.clone(),
            difficulty: request.difficulty.clone(),
            theme: request.theme.clone(),
            tour_name: request.tour_name(),
            image_url,
            ordered_points_of_interest,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatedTour {
    pub id: TourId,
}
