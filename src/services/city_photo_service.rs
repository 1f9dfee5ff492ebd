use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::AppConfig;

#[derive(Debug, Deserialize)]
struct PhotoSearchResponse {
    #[serde(default)]
    results: Vec<PhotoResult>,
}

#[derive(Debug, Deserialize)]
struct PhotoResult {
    urls: Option<PhotoUrls>,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: Option<String>,
}

/// Looks up one representative photo of a city on Unsplash.
#[derive(Clone)]
pub struct CityPhotoService {
    client: Client,
    access_key: String,
    base_url: String,
}

impl CityPhotoService {
    pub fn new(client: Client, config: &AppConfig) -> Self {
        Self {
            client,
            access_key: config.unsplash_access_key.clone(),
            base_url: config.unsplash_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Regular-size URL of the most relevant photo, or an empty string.
    pub async fn fetch_city_photo(&self, city: &str) -> String {
        match self.search(city).await {
            Ok(url) => url,
            Err(e) => {
                log::error!("Error fetching city photo for {}: {}", city, e);
                String::new()
            }
        }
    }

    async fn search(&self, city: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let url = Url::parse_with_params(
            &format!("{}/search/photos", self.base_url),
            &[
                ("query", city),
                ("client_id", self.access_key.as_str()),
                ("count", "1"),
                ("order_by", "relevant"),
                ("per_page", "1"),
            ],
        )?;

        let response: PhotoSearchResponse = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response
            .results
            .into_iter()
            .next()
            .and_then(|r| r.urls)
            .and_then(|u| u.regular)
            .unwrap_or_default())
    }
}
