//! Search strategies: server-side ordering, price hint, admission rule, and result rendering.

use hotels_api::{PriceRange, Property, SortOrder};
use tracing::debug;

use crate::distance::parse_distance_km;

const UNKNOWN: &str = "нет данных";

/// User-supplied best-deal bounds. Prices are in the configured currency, distances in kilometres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DealBounds {
    pub min_price: f64,
    pub max_price: f64,
    pub min_distance: f64,
    pub max_distance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchStrategy {
    Cheapest,
    MostExpensive,
    BestDeal(DealBounds),
}

/// Verdict of a strategy on one listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admit,
    Skip,
    /// Listings are ordered by distance and this one is already beyond the maximum: nothing later can qualify.
    Exhausted,
}

impl SearchStrategy {
    pub fn sort_order(&self) -> SortOrder {
        match self {
            SearchStrategy::Cheapest => SortOrder::Price,
            SearchStrategy::MostExpensive => SortOrder::PriceHighestFirst,
            SearchStrategy::BestDeal(_) => SortOrder::DistanceFromLandmark,
        }
    }

    pub fn price_range(&self) -> Option<PriceRange> {
        match self {
            SearchStrategy::BestDeal(bounds) => Some(PriceRange {
                min: bounds.min_price,
                max: bounds.max_price,
            }),
            _ => None,
        }
    }

    pub fn admit(&self, property: &Property) -> Admission {
        if property.name.is_empty() {
            return Admission::Skip;
        }
        match self {
            SearchStrategy::Cheapest => Admission::Admit,
            SearchStrategy::MostExpensive => match property.exact_price {
                Some(price) if price > 0.0 => Admission::Admit,
                _ => Admission::Skip,
            },
            SearchStrategy::BestDeal(bounds) => {
                let Some(distance) = property
                    .landmark_distance
                    .as_deref()
                    .and_then(parse_distance_km)
                else {
                    return Admission::Skip;
                };
                // Price bounds are applied server-side.
                debug!(name = %property.name, distance, price = ?property.exact_price, "best deal candidate");
                if distance > bounds.max_distance {
                    Admission::Exhausted
                } else if distance >= bounds.min_distance {
                    Admission::Admit
                } else {
                    Admission::Skip
                }
            }
        }
    }

    /// Display text stored in the accumulator for an admitted listing.
    pub fn render(&self, property: &Property) -> String {
        let price = property.price_label.as_deref().unwrap_or(UNKNOWN);
        let street = property.street_address.as_deref().unwrap_or(UNKNOWN);
        let mut text = format!("Стоимость: {}\nАдрес: {}", price, street);
        if let SearchStrategy::BestDeal(_) = self {
            let distance = property.landmark_distance.as_deref().unwrap_or(UNKNOWN);
            text.push_str(&format!("\nРасстояние от центра города: {}", distance));
        }
        text
    }
}
