//! The paging loop shared by all strategies.

use std::sync::Arc;

use hotels_api::{HotelsApi, PropertyQuery, MAX_PAGE_SIZE};
use tracing::{debug, info, instrument, warn};

use crate::accumulator::ResultAccumulator;
use crate::strategy::{Admission, SearchStrategy};
use crate::window::StayWindow;

/// Hard ceiling on fetched pages per run, for an upstream that keeps cycling names.
pub const MAX_PAGES: u32 = 100;

/// Runs a [`SearchStrategy`] against a [`HotelsApi`], one page at a time.
#[derive(Clone)]
pub struct PagedSearch {
    api: Arc<dyn HotelsApi>,
    page_size: u32,
}

impl PagedSearch {
    pub fn new(api: Arc<dyn HotelsApi>) -> Self {
        Self {
            api,
            page_size: MAX_PAGE_SIZE,
        }
    }

    /// Collects up to `limit` listings.
    ///
    /// Stops when the accumulator is full, when a best-deal listing lies beyond the maximum distance,
    /// or when a page leaves the last admitted identity unchanged. A failed page counts as empty.
    #[instrument(skip(self, strategy), fields(sort = strategy.sort_order().as_str()))]
    pub async fn run(
        &self,
        destination_id: &str,
        strategy: &SearchStrategy,
        limit: usize,
        window: StayWindow,
    ) -> ResultAccumulator {
        let mut results = ResultAccumulator::new();
        let mut previous_last: Option<String> = None;
        let mut last_admitted: Option<String> = None;
        let mut page_number = 1;

        while !results.is_full(limit) && page_number <= MAX_PAGES {
            let query = PropertyQuery {
                destination_id: destination_id.to_string(),
                page_number,
                page_size: self.page_size,
                check_in: window.check_in,
                check_out: window.check_out,
                sort_order: strategy.sort_order(),
                price_range: strategy.price_range(),
            };
            let page = match self.api.list_properties(&query).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(page_number, error = %e, "Listings page failed, treating as empty");
                    Vec::new()
                }
            };
            debug!(page_number, listings = page.len(), "Fetched listings page");

            let mut exhausted = false;
            for property in &page {
                if results.is_full(limit) {
                    break;
                }
                match strategy.admit(property) {
                    Admission::Admit => {
                        results.add(property.name.clone(), strategy.render(property));
                        last_admitted = Some(property.name.clone());
                    }
                    Admission::Skip => {}
                    Admission::Exhausted => {
                        exhausted = true;
                        break;
                    }
                }
            }

            if exhausted {
                debug!(page_number, "Passed maximum distance");
                break;
            }
            if last_admitted == previous_last {
                debug!(page_number, "Page made no progress");
                break;
            }
            previous_last = last_admitted.clone();
            page_number += 1;
        }

        info!(found = results.size(), limit, "Search finished");
        results
    }
}
