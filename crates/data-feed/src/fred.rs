use crate::SeriesFeed;
use crate::error::FeedError;
use crate::observations::{Observation, parse_observations};
use async_trait::async_trait;
use configuration::FeedConfig;
use core_types::Indicator;
use std::ops::RangeInclusive;
use std::time::Duration;

/// A `SeriesFeed` backed by the FRED graph CSV endpoint.
#[derive(Clone)]
pub struct FredClient {
    client: reqwest::Client,
    base_url: String,
}

impl FredClient {
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("heckscher/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl SeriesFeed for FredClient {
    async fn fetch_series(
        &self,
        indicator: Indicator,
        years: &RangeInclusive<i32>,
    ) -> Result<Vec<Observation>, FeedError> {
        let series = indicator.series_id();
        let start = format!("{}-01-01", years.start());
        let end = format!("{}-12-31", years.end());

        tracing::debug!(series, %start, %end, "Requesting series from {}", self.base_url);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("id", series), ("cosd", start.as_str()), ("coed", end.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                series: series.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_observations(series, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_endpoint_is_an_error() {
        let config = FeedConfig {
            base_url: "http://127.0.0.1:9/fredgraph.csv".to_string(),
            timeout_secs: 2,
            ..FeedConfig::default()
        };
        let client = FredClient::new(&config).unwrap();

        let result = client.fetch_series(Indicator::RealGdp, &(2000..=2001)).await;
        assert!(result.is_err());
    }
}
