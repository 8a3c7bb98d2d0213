use crate::structs::YearRecord;
use serde::{Deserialize, Serialize};

/// The four raw national-accounts indicators the pipeline consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Indicator {
    /// Real GDP, billions of chained dollars (quarterly).
    RealGdp,
    /// Civilian labor force, thousands of persons (monthly).
    LaborForce,
    /// Real gross private domestic investment, billions of chained dollars (quarterly).
    RealInvestment,
    /// Real exports of goods and services, billions of chained dollars (quarterly).
    RealExports,
}

impl Indicator {
    pub const ALL: [Indicator; 4] = [
        Indicator::RealGdp,
        Indicator::LaborForce,
        Indicator::RealInvestment,
        Indicator::RealExports,
    ];

    /// The identifier of the series on the external feed.
    pub fn series_id(&self) -> &'static str {
        match self {
            Indicator::RealGdp => "GDPC1",
            Indicator::LaborForce => "CLF16OV",
            Indicator::RealInvestment => "GPDIC1",
            Indicator::RealExports => "EXPGSC1",
        }
    }

    /// The `YearRecord` field this indicator populates.
    pub fn field_name(&self) -> &'static str {
        match self {
            Indicator::RealGdp => "real_gdp",
            Indicator::LaborForce => "labor_force",
            Indicator::RealInvestment => "real_investment",
            Indicator::RealExports => "real_exports",
        }
    }
}

/// The series the stationarity tester is run over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyzedSeries {
    RealExports,
    CapitalLaborRatio,
    CapitalDeepeningPct,
}

impl AnalyzedSeries {
    pub const ALL: [AnalyzedSeries; 3] = [
        AnalyzedSeries::RealExports,
        AnalyzedSeries::CapitalLaborRatio,
        AnalyzedSeries::CapitalDeepeningPct,
    ];

    pub fn field_name(&self) -> &'static str {
        match self {
            AnalyzedSeries::RealExports => "real_exports",
            AnalyzedSeries::CapitalLaborRatio => "capital_labor_ratio",
            AnalyzedSeries::CapitalDeepeningPct => "capital_deepening_pct",
        }
    }

    /// Reads this series' value out of a single record.
    pub fn value(&self, record: &YearRecord) -> Option<f64> {
        match self {
            AnalyzedSeries::RealExports => record.real_exports,
            AnalyzedSeries::CapitalLaborRatio => record.capital_labor_ratio,
            AnalyzedSeries::CapitalDeepeningPct => record.capital_deepening_pct,
        }
    }
}
