use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

use crate::config::AppConfig;
use crate::models::tour::SanitizedTourRequest;

pub const GENERATION_FAILED_MESSAGE: &str = "Error generating the walking tour. Please try again.";

const SYSTEM_INSTRUCTION: &str = "Create a self-guided walking tour where a person can start somewhere and follow a route from the start point to each point of interest and returning to the start point when the tour is over.  I only want the tour route and what points of interest are on that route. I will ask later for an in-depth tour of each point of interest.";

const FORMAT_EXAMPLE: &str = "Use this as a format example for the response I want to get. I do not want any additional information other than what is in this example, also notice how the start point and end point are the same:

// Start Point: Plaça de Catalunya

// Route:
1. Plaça de Catalunya
2. La Rambla
3. Palau Güell
4. Plaça Reial
5. Barcelona Cathedral
6. Santa Maria del Mar
7. Picasso Museum
8. Parc de la Ciutadella
9. Arc de Triomf
10. Sagrada Família
11. Casa Batlló
12. Casa Milà (La Pedrera)
13. Passeig de Gràcia
14. Plaça de Catalunya";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug)]
pub enum GenerationError {
    HttpError(reqwest::Error),
    StatusError(u16, String),
    ResponseError(String),
    EmptyResponse,
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::HttpError(err) => write!(f, "HTTP error: {}", err),
            GenerationError::StatusError(status, body) => {
                write!(f, "Completion request failed with status {}: {}", status, body)
            }
            GenerationError::ResponseError(msg) => write!(f, "Response error: {}", msg),
            GenerationError::EmptyResponse => write!(f, "Completion response had no content"),
        }
    }
}

impl Error for GenerationError {}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::HttpError(err)
    }
}

pub fn build_prompt(request: &SanitizedTourRequest) -> String {
    format!(
        "Walking Tour in {}, {}, {}, {}\nTour Duration: {}\nDifficulty Level: {}\nTour Theme: {},",
        request.city(),
        request.region(),
        request.state(),
        request.country(),
        request.duration(),
        request.difficulty(),
        request.theme()
    )
}

pub fn build_messages(request: &SanitizedTourRequest) -> Vec<ChatMessage> {
    vec![
        ChatMessage::new("system", SYSTEM_INSTRUCTION),
        ChatMessage::new("user", build_prompt(request)),
        ChatMessage::new("user", FORMAT_EXAMPLE),
    ]
}

/// Asks the completion service for a closed-loop walking route.
#[derive(Clone)]
pub struct RouteGenerationService {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl RouteGenerationService {
    pub fn new(client: Client, config: &AppConfig) -> Self {
        Self {
            client,
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            model: config.openai_model.clone(),
        }
    }

    pub async fn generate_route(
        &self,
        request: &SanitizedTourRequest,
    ) -> Result<String, GenerationError> {
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: build_messages(request),
        };

        let url = format!("{}/v1/chat/completions", self.base_url);
        log::info!("Requesting walking route for {}", request.city());

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::StatusError(status.as_u16(), error_text));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::ResponseError(format!("Failed to parse response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GenerationError::EmptyResponse)
    }
}
