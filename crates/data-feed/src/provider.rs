use crate::SeriesFeed;
use crate::error::FeedError;
use crate::fallback::historical_panel;
use crate::fred::FredClient;
use crate::observations::annual_means;
use configuration::FeedConfig;
use core_types::{AnnualPanel, CoreError, Indicator};
use futures::future::try_join_all;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;

/// Which path produced a panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelOrigin {
    Feed,
    Fallback { reason: String },
}

/// A raw panel together with the path that produced it.
#[derive(Debug, Clone)]
pub struct SourcedPanel {
    pub panel: AnnualPanel,
    pub origin: PanelOrigin,
}

/// Fetches all four indicators and assembles them into one raw panel.
///
/// Every indicator must succeed; the first error aborts the whole fetch so
/// a panel never mixes feed values with fallback values.
pub async fn fetch_panel<F>(
    feed: &F,
    years: RangeInclusive<i32>,
    timeout: Duration,
    progress: &ProgressBar,
) -> Result<AnnualPanel, FeedError>
where
    F: SeriesFeed + ?Sized,
{
    let downloads = Indicator::ALL.into_iter().map(|indicator| {
        let years = years.clone();
        async move {
            let series = indicator.series_id();
            progress.set_message(format!("Fetching {}...", series));
            let observations = tokio::time::timeout(timeout, feed.fetch_series(indicator, &years))
                .await
                .map_err(|_| FeedError::Timeout {
                    series: series.to_string(),
                    after: timeout,
                })??;
            progress.inc(1);
            tracing::debug!(series, observations = observations.len(), "Series downloaded");
            Ok::<_, FeedError>((indicator, observations))
        }
    });

    let series = try_join_all(downloads).await?;

    let mut panel = AnnualPanel::with_years(years)?;
    for (indicator, observations) in series {
        for (year, mean) in annual_means(&observations) {
            if let Some(record) = panel.get_mut(year) {
                record.set_indicator(indicator, Some(mean));
            }
        }
        let covered = panel.iter().filter(|r| r.indicator(indicator).is_some()).count();
        if covered < panel.len() {
            tracing::warn!(
                field = indicator.field_name(),
                covered,
                years = panel.len(),
                "Feed series does not cover every requested year; missing years are null"
            );
        }
    }

    Ok(panel)
}

/// The single entry point for raw data: tries the feed, falls back to the built-in table.
pub struct SourceProvider {
    feed: Option<Arc<dyn SeriesFeed>>,
    timeout: Duration,
    show_progress: bool,
}

impl SourceProvider {
    pub fn new(feed: Arc<dyn SeriesFeed>, timeout: Duration) -> Self {
        Self {
            feed: Some(feed),
            timeout,
            show_progress: false,
        }
    }

    /// A provider that never touches the network.
    pub fn offline() -> Self {
        Self {
            feed: None,
            timeout: Duration::ZERO,
            show_progress: false,
        }
    }

    /// Builds the provider described by the `[feed]` configuration section.
    pub fn from_config(config: &FeedConfig) -> Result<Self, FeedError> {
        if config.offline {
            return Ok(Self::offline());
        }
        let client = FredClient::new(config)?;
        Ok(Self::new(Arc::new(client), Duration::from_secs(config.timeout_secs)).with_progress(config.show_progress))
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Produces a raw panel for `years`.
    ///
    /// Feed failures are absorbed here: they are logged and reported through
    /// `PanelOrigin::Fallback`. Only an inverted year range is an error.
    pub async fn load(&self, years: RangeInclusive<i32>) -> Result<SourcedPanel, CoreError> {
        if years.start() > years.end() {
            return Err(CoreError::InvalidRange {
                start: *years.start(),
                end: *years.end(),
            });
        }

        let Some(feed) = &self.feed else {
            tracing::info!("Offline mode: using the built-in historical table.");
            return Self::fallback(years, "offline mode".to_string());
        };

        tracing::info!(
            "Downloading {} series for {}-{}",
            Indicator::ALL.len(),
            years.start(),
            years.end()
        );
        let progress = self.progress_bar();

        match fetch_panel(feed.as_ref(), years.clone(), self.timeout, &progress).await {
            Ok(panel) => {
                progress.finish_with_message("Download complete");
                tracing::info!("Feed download succeeded: {} years", panel.len());
                Ok(SourcedPanel {
                    panel,
                    origin: PanelOrigin::Feed,
                })
            }
            Err(e) => {
                progress.abandon_with_message("Download failed");
                tracing::warn!("Feed unavailable ({}); using the built-in historical table.", e);
                Self::fallback(years, e.to_string())
            }
        }
    }

    fn fallback(years: RangeInclusive<i32>, reason: String) -> Result<SourcedPanel, CoreError> {
        Ok(SourcedPanel {
            panel: historical_panel(years)?,
            origin: PanelOrigin::Fallback { reason },
        })
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let progress_bar = ProgressBar::new(Indicator::ALL.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style);
        progress_bar
    }
}
