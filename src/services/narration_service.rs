use serde::Serialize;
use std::sync::{Arc, Mutex};

use crate::services::tour_persistence_service::{PersistenceError, TourPersistenceService};

pub const NARRATION_RATE: f32 = 0.85;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Utterance {
    pub text: String,
    pub rate: f32,
}

/// Text-to-speech playback. Passed to whatever needs to narrate rather than
/// reached through a process-wide handle, so tests can swap it out.
pub trait SpeechPlayback: Send + Sync {
    fn is_speaking(&self) -> bool;
    fn speak(&self, utterance: Utterance);
    fn cancel(&self);
}

/// Server-side playback: remembers the active utterance and logs it.
#[derive(Default)]
pub struct LoggedPlayback {
    current: Mutex<Option<Utterance>>,
}

impl LoggedPlayback {
    pub fn current(&self) -> Option<Utterance> {
        self.current.lock().ok().and_then(|current| current.clone())
    }
}

impl SpeechPlayback for LoggedPlayback {
    fn is_speaking(&self) -> bool {
        self.current.lock().map(|c| c.is_some()).unwrap_or(false)
    }

    fn speak(&self, utterance: Utterance) {
        log::info!("Speaking at rate {}: {}", utterance.rate, utterance.text);
        if let Ok(mut current) = self.current.lock() {
            *current = Some(utterance);
        }
    }

    fn cancel(&self) {
        log::info!("Speech cancelled");
        if let Ok(mut current) = self.current.lock() {
            *current = None;
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum NarrationStatus {
    Speaking { text: String },
    Cancelled,
}

#[derive(Clone)]
pub struct NarrationService {
    persistence: TourPersistenceService,
    playback: Arc<dyn SpeechPlayback>,
}

impl NarrationService {
    pub fn new(persistence: TourPersistenceService, playback: Arc<dyn SpeechPlayback>) -> Self {
        Self {
            persistence,
            playback,
        }
    }

    /// Play button: stops whatever is playing, otherwise reads out the
    /// commentary for `poi_id`.
    pub async fn toggle(&self, poi_id: &str) -> Result<NarrationStatus, PersistenceError> {
        if self.playback.is_speaking() {
            self.playback.cancel();
            return Ok(NarrationStatus::Cancelled);
        }

        let commentary = self.persistence.fetch_commentary(poi_id).await?;
        self.playback.speak(Utterance {
            text: commentary.description.clone(),
            rate: NARRATION_RATE,
        });
        Ok(NarrationStatus::Speaking {
            text: commentary.description,
        })
    }

    pub fn stop(&self) {
        self.playback.cancel();
    }
}
