use crate::enums::Indicator;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// One calendar year of raw and derived observations.
///
/// Every value is optional: a missing observation is `None`, never zero.
/// The field order is the column order of the persisted panel table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: i32,
    /// Billions of chained dollars.
    pub real_gdp: Option<f64>,
    /// Thousands of persons.
    pub labor_force: Option<f64>,
    /// Billions of chained dollars.
    pub real_investment: Option<f64>,
    /// Billions of chained dollars.
    pub real_exports: Option<f64>,
    /// Investment as a percentage of GDP.
    pub capital_deepening_pct: Option<f64>,
    /// Dollars of investment per worker.
    pub capital_labor_ratio: Option<f64>,
}

impl YearRecord {
    /// Creates a record with every field missing.
    pub fn empty(year: i32) -> Self {
        Self {
            year,
            real_gdp: None,
            labor_force: None,
            real_investment: None,
            real_exports: None,
            capital_deepening_pct: None,
            capital_labor_ratio: None,
        }
    }

    /// Creates a record holding only the four raw indicators.
    pub fn raw(
        year: i32,
        real_gdp: Option<f64>,
        labor_force: Option<f64>,
        real_investment: Option<f64>,
        real_exports: Option<f64>,
    ) -> Self {
        Self {
            real_gdp,
            labor_force,
            real_investment,
            real_exports,
            ..Self::empty(year)
        }
    }

    pub fn indicator(&self, indicator: Indicator) -> Option<f64> {
        match indicator {
            Indicator::RealGdp => self.real_gdp,
            Indicator::LaborForce => self.labor_force,
            Indicator::RealInvestment => self.real_investment,
            Indicator::RealExports => self.real_exports,
        }
    }

    pub fn set_indicator(&mut self, indicator: Indicator, value: Option<f64>) {
        match indicator {
            Indicator::RealGdp => self.real_gdp = value,
            Indicator::LaborForce => self.labor_force = value,
            Indicator::RealInvestment => self.real_investment = value,
            Indicator::RealExports => self.real_exports = value,
        }
    }
}

/// An ordered, year-keyed sequence of `YearRecord`s.
///
/// Years are unique and ascending. Gaps between years are allowed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnualPanel {
    records: Vec<YearRecord>,
}

impl AnnualPanel {
    /// Builds a panel from records in any order, rejecting duplicate years.
    pub fn new(mut records: Vec<YearRecord>) -> Result<Self, CoreError> {
        records.sort_by_key(|r| r.year);
        if let Some(pair) = records.windows(2).find(|w| w[0].year == w[1].year) {
            return Err(CoreError::DuplicateYear(pair[0].year));
        }
        Ok(Self { records })
    }

    /// Builds a panel with one empty record for every year in the range.
    pub fn with_years(years: RangeInclusive<i32>) -> Result<Self, CoreError> {
        if years.start() > years.end() {
            return Err(CoreError::InvalidRange {
                start: *years.start(),
                end: *years.end(),
            });
        }
        Ok(Self {
            records: years.map(YearRecord::empty).collect(),
        })
    }

    pub fn records(&self) -> &[YearRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &YearRecord> {
        self.records.iter()
    }

    /// Replaces every record with `f(record)`. Each record keeps its year.
    pub fn map_records<F>(self, mut f: F) -> Self
    where
        F: FnMut(YearRecord) -> YearRecord,
    {
        let records = self
            .records
            .into_iter()
            .map(|record| YearRecord {
                year: record.year,
                ..f(record)
            })
            .collect();
        Self { records }
    }

    pub fn into_records(self) -> Vec<YearRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn years(&self) -> Vec<i32> {
        self.records.iter().map(|r| r.year).collect()
    }

    pub fn first_year(&self) -> Option<i32> {
        self.records.first().map(|r| r.year)
    }

    pub fn last_year(&self) -> Option<i32> {
        self.records.last().map(|r| r.year)
    }

    pub fn get(&self, year: i32) -> Option<&YearRecord> {
        self.records
            .binary_search_by_key(&year, |r| r.year)
            .ok()
            .map(|idx| &self.records[idx])
    }

    pub fn get_mut(&mut self, year: i32) -> Option<&mut YearRecord> {
        self.records
            .binary_search_by_key(&year, |r| r.year)
            .ok()
            .map(move |idx| &mut self.records[idx])
    }

    /// The non-null values of one column, in chronological order.
    pub fn column<F>(&self, accessor: F) -> Vec<f64>
    where
        F: Fn(&YearRecord) -> Option<f64>,
    {
        self.records.iter().filter_map(accessor).collect()
    }

    /// `(year, x, y)` for every year where both columns are present.
    pub fn paired<X, Y>(&self, x: X, y: Y) -> Vec<(i32, f64, f64)>
    where
        X: Fn(&YearRecord) -> Option<f64>,
        Y: Fn(&YearRecord) -> Option<f64>,
    {
        self.records
            .iter()
            .filter_map(|r| Some((r.year, x(r)?, y(r)?)))
            .collect()
    }
}
