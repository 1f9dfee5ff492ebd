use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::models::point_of_interest::PointOfInterest;
use crate::models::tour::{Tour, TourId};

/// Everything one pipeline run produced.
#[derive(Debug, Serialize, Clone)]
pub struct TourOutcome {
    pub tour_content: String,
    pub tour: Tour,
    pub tour_id: Option<TourId>,
    pub points_of_interest: Vec<PointOfInterest>,
    pub warnings: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub enum StateError {
    AlreadyLoading,
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::AlreadyLoading => write!(f, "A tour is already being generated"),
            StateError::InvalidTransition { from, to } => {
                write!(f, "Cannot move from {} to {}", from, to)
            }
        }
    }
}

impl std::error::Error for StateError {}

/// Status of the most recent generation run, as shown to the user.
#[derive(Debug, Serialize, Clone, Default)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GenerationState {
    #[default]
    Idle,
    Loading,
    Loaded(Box<TourOutcome>),
    Failed {
        message: String,
    },
}

impl GenerationState {
    pub fn name(&self) -> &'static str {
        match self {
            GenerationState::Idle => "idle",
            GenerationState::Loading => "loading",
            GenerationState::Loaded(_) => "loaded",
            GenerationState::Failed { .. } => "failed",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, GenerationState::Loading)
    }

    pub fn begin(&mut self) -> Result<(), StateError> {
        if self.is_loading() {
            return Err(StateError::AlreadyLoading);
        }
        *self = GenerationState::Loading;
        Ok(())
    }

    pub fn complete(&mut self, outcome: TourOutcome) -> Result<(), StateError> {
        self.require_loading("loaded")?;
        *self = GenerationState::Loaded(Box::new(outcome));
        Ok(())
    }

    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), StateError> {
        self.require_loading("failed")?;
        *self = GenerationState::Failed {
            message: message.into(),
        };
        Ok(())
    }

    fn require_loading(&self, to: &'static str) -> Result<(), StateError> {
        if self.is_loading() {
            Ok(())
        } else {
            Err(StateError::InvalidTransition {
                from: self.name(),
                to,
            })
        }
    }
}
