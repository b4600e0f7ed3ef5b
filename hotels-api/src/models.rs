//! Wire models of the hotels4 API and the request/record types built from them.
//!
//! Every field the API may omit is optional on the wire; conversion to [`Property`] keeps absences explicit
//! instead of failing the whole page.

use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{HotelsApiError, Result};

/// Result marker the API uses for failed requests.
const ERROR_RESULT: &str = "ERROR";

/// Accepts `"1153093"`, `1153093` or null for ids the API is inconsistent about.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!("unexpected id value: {}", other))),
    }
}

// ---------- Destination lookup ----------

/// Body of `locations/search`. `suggestions` is absent when the API rejects the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationSearchResponse {
    pub suggestions: Option<Vec<SuggestionGroup>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionGroup {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub entities: Vec<SuggestionEntity>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionEntity {
    #[serde(default, deserialize_with = "string_or_number")]
    pub destination_id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub name: String,
}

// ---------- Listings ----------

/// Body of `properties/list`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyListResponse {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<PropertyListData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyListData {
    pub body: Option<PropertyListBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListBody {
    pub search_results: Option<SearchResults>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub results: Vec<RawProperty>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProperty {
    #[serde(default)]
    pub name: String,
    pub address: Option<RawAddress>,
    pub rate_plan: Option<RawRatePlan>,
    #[serde(default)]
    pub landmarks: Vec<RawLandmark>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAddress {
    pub street_address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRatePlan {
    pub price: Option<RawPrice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPrice {
    /// Localized display price, e.g. `"5 320 RUB"`.
    pub current: Option<String>,
    pub exact_current: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLandmark {
    pub label: Option<String>,
    /// Localized distance, e.g. `"1,3 км"`.
    pub distance: Option<String>,
}

/// One listing record as used by the search strategies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Property {
    pub name: String,
    pub street_address: Option<String>,
    pub price_label: Option<String>,
    pub exact_price: Option<f64>,
    /// Raw distance string of the first landmark.
    pub landmark_distance: Option<String>,
}

impl From<RawProperty> for Property {
    fn from(raw: RawProperty) -> Self {
        let price = raw.rate_plan.and_then(|plan| plan.price);
        Self {
            name: raw.name,
            street_address: raw.address.and_then(|a| a.street_address),
            price_label: price.as_ref().and_then(|p| p.current.clone()),
            exact_price: price.and_then(|p| p.exact_current),
            landmark_distance: raw.landmarks.into_iter().next().and_then(|l| l.distance),
        }
    }
}

impl PropertyListResponse {
    /// Converts the body into listing records; an error-flagged or structurally incomplete body is an error.
    pub fn into_properties(self) -> Result<Vec<Property>> {
        if self.result.as_deref() == Some(ERROR_RESULT) {
            return Err(HotelsApiError::Upstream(
                self.message.unwrap_or_else(|| ERROR_RESULT.to_string()),
            ));
        }
        let results = self
            .data
            .and_then(|d| d.body)
            .and_then(|b| b.search_results)
            .ok_or_else(|| HotelsApiError::Malformed("missing data.body.searchResults".to_string()))?;
        Ok(results.results.into_iter().map(Property::from).collect())
    }
}

// ---------- Request ----------

/// Server-side ordering of listing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Price,
    PriceHighestFirst,
    DistanceFromLandmark,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Price => "PRICE",
            SortOrder::PriceHighestFirst => "PRICE_HIGHEST_FIRST",
            SortOrder::DistanceFromLandmark => "DISTANCE_FROM_LANDMARK",
        }
    }
}

/// Price filter hint sent with best-deal requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Parameters of one listings page request.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyQuery {
    pub destination_id: String,
    pub page_number: u32,
    pub page_size: u32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub sort_order: SortOrder,
    pub price_range: Option<PriceRange>,
}
