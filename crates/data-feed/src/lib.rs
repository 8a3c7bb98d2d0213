//! # Raw indicator acquisition
//!
//! Produces the raw `AnnualPanel` for the four indicators, either from the
//! live FRED feed or from a built-in historical table.
//!
//! - `SeriesFeed`: the abstract feed interface, so tests can substitute a canned feed.
//! - `FredClient`: the HTTP implementation of `SeriesFeed`.
//! - `fetch_panel`: the primary path, returning `Result<AnnualPanel, FeedError>`.
//! - `SourceProvider`: primary path with the fallback decision; never fails on feed errors.

use async_trait::async_trait;
use core_types::Indicator;
use std::ops::RangeInclusive;

pub mod error;
pub mod fallback;
pub mod fred;
pub mod observations;
pub mod provider;

// --- Public API ---
pub use error::FeedError;
pub use fred::FredClient;
pub use observations::{Observation, annual_means, parse_observations};
pub use provider::{PanelOrigin, SourceProvider, SourcedPanel, fetch_panel};

/// A source of dated observations for a single indicator.
#[async_trait]
pub trait SeriesFeed: Send + Sync {
    /// Fetches every observation of `indicator` dated within `years`, at the feed's native frequency.
    async fn fetch_series(
        &self,
        indicator: Indicator,
        years: &RangeInclusive<i32>,
    ) -> Result<Vec<Observation>, FeedError>;
}
