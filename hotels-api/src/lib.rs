//! # hotels-api
//!
//! Listings search and destination lookup against the hotels4 API (RapidAPI).
//! [`HotelsApi`] is the seam used by search strategies and the dialogue; [`RapidApiHotelsClient`] is the HTTP implementation.

mod client;
mod config;
mod error;
pub mod locations;
pub mod models;

use async_trait::async_trait;

pub use client::{mask_token, RapidApiHotelsClient};
pub use config::{EnvHotelsApiConfig, HotelsApiConfig};
pub use error::{HotelsApiError, Result};
pub use locations::{strip_markup, CityCandidate};
pub use models::{LocationSearchResponse, PriceRange, Property, PropertyQuery, SortOrder};

/// Maximum page size accepted by the listings endpoint.
pub const MAX_PAGE_SIZE: u32 = 25;

/// Remote listings and destination lookup service.
#[async_trait]
pub trait HotelsApi: Send + Sync {
    /// Looks up destinations matching free text. The raw suggestion groups are returned; see
    /// [`LocationSearchResponse::city_candidates`] for the city filter.
    async fn search_locations(&self, query: &str) -> Result<LocationSearchResponse>;

    /// Fetches one page of listings. A body flagged as an API-level error yields [`HotelsApiError::Upstream`].
    async fn list_properties(&self, query: &PropertyQuery) -> Result<Vec<Property>>;
}
