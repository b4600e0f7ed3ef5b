//! HTTP implementation of [`HotelsApi`] for hotels4 on RapidAPI.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::config::HotelsApiConfig;
use crate::error::{HotelsApiError, Result};
use crate::models::{LocationSearchResponse, Property, PropertyListResponse, PropertyQuery};
use crate::HotelsApi;

const LOCATIONS_PATH: &str = "/locations/search";
const PROPERTIES_PATH: &str = "/properties/list";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Masks an API key for safe logging: first 7 chars + "***" + last 4 chars; keys of 11 chars or fewer become "***".
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

/// hotels4 client. Cheap to clone (reqwest client is reference-counted).
#[derive(Clone)]
pub struct RapidApiHotelsClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    host: String,
    locale: String,
    currency: String,
    landmark: String,
}

impl RapidApiHotelsClient {
    /// Builds a client from config; the request timeout comes from `timeout_secs`.
    pub fn new(config: &dyn HotelsApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs()))
            .build()
            .map_err(|e| HotelsApiError::Config(format!("failed to build http client: {}", e)))?;
        Ok(Self {
            http,
            api_key: config.api_key().to_string(),
            base_url: config.base_url().trim_end_matches('/').to_string(),
            host: config.host().to_string(),
            locale: config.locale().to_string(),
            currency: config.currency().to_string(),
            landmark: config.landmark().to_string(),
        })
    }

    /// Query string of a listings page request.
    pub fn property_params(&self, query: &PropertyQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("adults1", "1".to_string()),
            ("pageNumber", query.page_number.to_string()),
            ("destinationId", query.destination_id.clone()),
            ("pageSize", query.page_size.to_string()),
            ("checkIn", query.check_in.format(DATE_FORMAT).to_string()),
            ("checkOut", query.check_out.format(DATE_FORMAT).to_string()),
            ("sortOrder", query.sort_order.as_str().to_string()),
            ("locale", self.locale.clone()),
            ("currency", self.currency.clone()),
        ];
        if let Some(range) = query.price_range {
            params.push(("priceMin", range.min.to_string()));
            params.push(("priceMax", range.max.to_string()));
            params.push(("landmarkIds", self.landmark.clone()));
        }
        params
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, params = ?params, api_key = %mask_token(&self.api_key), "hotels4 request");

        let response = self
            .http
            .get(&url)
            .query(params)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.host)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(status = status.as_u16(), path = %path, "hotels4 returned non-success status");
            return Err(HotelsApiError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl HotelsApi for RapidApiHotelsClient {
    #[instrument(skip(self))]
    async fn search_locations(&self, query: &str) -> Result<LocationSearchResponse> {
        let params = [("query", query.to_string()), ("locale", self.locale.clone())];
        let response: LocationSearchResponse = self.get_json(LOCATIONS_PATH, &params).await?;
        info!(
            groups = response.suggestions.as_ref().map(|s| s.len()),
            "hotels4 locations/search completed"
        );
        Ok(response)
    }

    #[instrument(skip(self, query), fields(destination_id = %query.destination_id, page = query.page_number))]
    async fn list_properties(&self, query: &PropertyQuery) -> Result<Vec<Property>> {
        let params = self.property_params(query);
        let response: PropertyListResponse = self.get_json(PROPERTIES_PATH, &params).await?;
        let properties = response.into_properties()?;
        info!(count = properties.len(), "hotels4 properties/list completed");
        Ok(properties)
    }
}
