//! # hotel-search
//!
//! One paging loop parameterized by [`SearchStrategy`]: fetch pages from [`hotels_api::HotelsApi`],
//! admit entries by the strategy's rule into a bounded [`ResultAccumulator`], and stop on limit,
//! best-deal exhaustion, or a page that made no progress.

mod accumulator;
mod distance;
mod paged;
mod strategy;
mod window;

pub use accumulator::ResultAccumulator;
pub use distance::{parse_decimal, parse_distance_km};
pub use paged::{PagedSearch, MAX_PAGES};
pub use strategy::{Admission, DealBounds, SearchStrategy};
pub use window::StayWindow;
