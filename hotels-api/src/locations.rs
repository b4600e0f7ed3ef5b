//! City candidates from a destination lookup: only `CITY` entities of the `CITY_GROUP` group, with caption markup removed.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::LocationSearchResponse;

const CITY_GROUP: &str = "CITY_GROUP";
const CITY_TYPE: &str = "CITY";

/// A destination the user can pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityCandidate {
    pub destination_id: String,
    pub caption: String,
}

fn markup_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").expect("markup pattern is valid"))
}

/// Removes HTML-like tags, e.g. `<span class='highlighted'>Моск</span>ва` → `Москва`.
pub fn strip_markup(caption: &str) -> String {
    markup_pattern().replace_all(caption, "").trim().to_string()
}

impl LocationSearchResponse {
    /// Cities in response order, first occurrence per destination id.
    /// Returns None when the response carried no suggestions at all (API-level failure).
    pub fn city_candidates(&self) -> Option<Vec<CityCandidate>> {
        let groups = self.suggestions.as_ref()?;
        let mut candidates: Vec<CityCandidate> = Vec::new();
        let entities = groups
            .iter()
            .filter(|g| g.group == CITY_GROUP)
            .flat_map(|g| g.entities.iter())
            .filter(|e| e.kind == CITY_TYPE && !e.destination_id.is_empty());
        for entity in entities {
            if candidates.iter().any(|c| c.destination_id == entity.destination_id) {
                continue;
            }
            let caption = match strip_markup(&entity.caption) {
                c if c.is_empty() => entity.name.clone(),
                c => c,
            };
            candidates.push(CityCandidate {
                destination_id: entity.destination_id.clone(),
                caption,
            });
        }
        Some(candidates)
    }
}
