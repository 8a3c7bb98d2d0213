use crate::error::FeedError;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Marker the feed uses for a missing observation.
const MISSING_MARKER: &str = ".";

/// A single dated value from a feed series. `None` means the observation is missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// Parses a `DATE,VALUE` CSV document into observations.
///
/// The first row is a header. A value of `.` or an empty cell is a missing
/// observation, not zero; the row is kept.
pub fn parse_observations(series: &str, body: &str) -> Result<Vec<Observation>, FeedError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let mut observations = Vec::new();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let parse_error = |message: String| FeedError::Parse {
            series: series.to_string(),
            line,
            message,
        };

        if record.len() < 2 {
            return Err(parse_error(format!("expected a date and a value, found {} field(s)", record.len())));
        }

        let date = NaiveDate::parse_from_str(&record[0], "%Y-%m-%d")
            .map_err(|e| parse_error(format!("invalid date '{}': {}", &record[0], e)))?;

        let raw_value = &record[1];
        let value = if raw_value.is_empty() || raw_value == MISSING_MARKER {
            None
        } else {
            let parsed = raw_value
                .parse::<f64>()
                .map_err(|e| parse_error(format!("invalid value '{}': {}", raw_value, e)))?;
            if !parsed.is_finite() {
                return Err(parse_error(format!("non-finite value '{}'", raw_value)));
            }
            Some(parsed)
        };

        observations.push(Observation { date, value });
    }

    if observations.is_empty() {
        return Err(FeedError::Empty {
            series: series.to_string(),
        });
    }

    Ok(observations)
}

/// Resamples observations of any frequency to calendar years by arithmetic mean.
///
/// Missing observations are ignored; a year with no present value is absent
/// from the result.
pub fn annual_means(observations: &[Observation]) -> BTreeMap<i32, f64> {
    let mut sums: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for obs in observations {
        if let Some(value) = obs.value {
            let entry = sums.entry(obs.date.year()).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    sums.into_iter()
        .map(|(year, (sum, count))| (year, sum / count as f64))
        .collect()
}
