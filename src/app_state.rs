use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::AppConfig;
use crate::models::generation_state::{GenerationState, StateError, TourOutcome};
use crate::services::narration_service::{NarrationService, SpeechPlayback};
use crate::services::route_generation_service::GENERATION_FAILED_MESSAGE;
use crate::services::tour_pipeline::TourPipeline;

/// Shared by every worker through `web::Data`.
pub struct AppState {
    pub config: AppConfig,
    pub pipeline: TourPipeline,
    pub narration: NarrationService,
    generation: Mutex<GenerationState>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        client: reqwest::Client,
        playback: Arc<dyn SpeechPlayback>,
    ) -> Self {
        let pipeline = TourPipeline::new(client, &config);
        let narration = NarrationService::new(pipeline.persistence().clone(), playback);
        Self {
            config,
            pipeline,
            narration,
            generation: Mutex::new(GenerationState::default()),
        }
    }

    pub fn generation_state(&self) -> GenerationState {
        self.lock_generation().clone()
    }

    /// Moves the state to `Loading`. The returned guard must be settled with
    /// `complete` or `fail`; dropping it unsettled records the run as failed.
    pub fn begin_generation(&self) -> Result<GenerationGuard<'_>, StateError> {
        self.lock_generation().begin()?;
        Ok(GenerationGuard {
            state: self,
            armed: true,
        })
    }

    // A panic mid-transition leaves a whole enum value behind, so a poisoned
    // lock is still safe to read.
    fn lock_generation(&self) -> MutexGuard<'_, GenerationState> {
        self.generation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// One in-flight generation run.
pub struct GenerationGuard<'a> {
    state: &'a AppState,
    armed: bool,
}

impl GenerationGuard<'_> {
    pub fn complete(mut self, outcome: TourOutcome) -> Result<(), StateError> {
        self.armed = false;
        self.state.lock_generation().complete(outcome)
    }

    pub fn fail(mut self, message: &str) -> Result<(), StateError> {
        self.armed = false;
        self.state.lock_generation().fail(message)
    }
}

impl Drop for GenerationGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut generation = self.state.lock_generation();
        if generation.is_loading() {
            log::warn!("Tour generation was abandoned before it finished");
            if let Err(err) = generation.fail(GENERATION_FAILED_MESSAGE) {
                log::error!("Failed to record abandoned generation: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::narration_service::LoggedPlayback;

    fn app_state() -> AppState {
        let config = AppConfig::for_base_url("http://127.0.0.1:9");
        let client = config.http_client().unwrap();
        AppState::new(config, client, Arc::new(LoggedPlayback::default()))
    }

    #[test]
    fn test_dropped_guard_fails_generation() {
        let state = app_state();

        let guard = state.begin_generation().unwrap();
        assert!(state.generation_state().is_loading());
        drop(guard);

        match state.generation_state() {
            GenerationState::Failed { message } => {
                assert_eq!(message, GENERATION_FAILED_MESSAGE)
            }
            other => panic!("unexpected state: {}", other.name()),
        }
        assert!(state.begin_generation().is_ok());
    }

    #[test]
    fn test_settled_guard_keeps_outcome() {
        let state = app_state();

        let guard = state.begin_generation().unwrap();
        guard.fail("upstream down").unwrap();

        match state.generation_state() {
            GenerationState::Failed { message } => assert_eq!(message, "upstream down"),
            other => panic!("unexpected state: {}", other.name()),
        }
    }

    #[test]
    fn test_second_begin_rejected_while_guard_alive() {
        let state = app_state();

        let _guard = state.begin_generation().unwrap();
        assert!(matches!(
            state.begin_generation(),
            Err(StateError::AlreadyLoading)
        ));
    }
}
