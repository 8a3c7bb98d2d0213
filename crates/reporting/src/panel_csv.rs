//! The persisted panel table: one row per year, ascending, with the seven
//! `YearRecord` fields as columns. Missing values are empty fields.

use crate::error::ReportError;
use core_types::{AnnualPanel, YearRecord};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Column names, identical to the `YearRecord` field names and in the same order.
pub const PANEL_HEADER: [&str; 7] = [
    "year",
    "real_gdp",
    "labor_force",
    "real_investment",
    "real_exports",
    "capital_deepening_pct",
    "capital_labor_ratio",
];

pub fn write_panel<W: Write>(panel: &AnnualPanel, writer: W) -> Result<(), ReportError> {
    let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    // Written explicitly so that an empty panel still carries its header.
    csv_writer.write_record(PANEL_HEADER)?;
    for record in panel.iter() {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn read_panel<R: Read>(reader: R) -> Result<AnnualPanel, ReportError> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = csv_reader.headers()?;
    if !headers.iter().eq(PANEL_HEADER) {
        return Err(ReportError::Header {
            expected: PANEL_HEADER.join(","),
            found: headers.iter().collect::<Vec<_>>().join(","),
        });
    }

    let records = csv_reader
        .deserialize::<YearRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    for record in &records {
        check_finite(record)?;
    }
    Ok(AnnualPanel::new(records)?)
}

/// `NaN` and `inf` parse as floats but are never valid observations.
fn check_finite(record: &YearRecord) -> Result<(), ReportError> {
    let values = [
        record.real_gdp,
        record.labor_force,
        record.real_investment,
        record.real_exports,
        record.capital_deepening_pct,
        record.capital_labor_ratio,
    ];
    for (&field, value) in PANEL_HEADER[1..].iter().zip(values) {
        if let Some(value) = value.filter(|v| !v.is_finite()) {
            return Err(ReportError::NonFinite {
                year: record.year,
                field,
                value,
            });
        }
    }
    Ok(())
}

/// Writes the panel to `path`, creating the parent directory if needed.
pub fn write_panel_file(panel: &AnnualPanel, path: &Path) -> Result<(), ReportError> {
    let file = create_file(path)?;
    write_panel(panel, file)?;
    tracing::info!("Panel written to {} ({} years)", path.display(), panel.len());
    Ok(())
}

pub fn read_panel_file(path: &Path) -> Result<AnnualPanel, ReportError> {
    let file = File::open(path).map_err(|e| ReportError::io(path, e))?;
    let panel = read_panel(file)?;
    tracing::info!("Panel read from {} ({} years)", path.display(), panel.len());
    Ok(panel)
}

pub(crate) fn create_file(path: &Path) -> Result<File, ReportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
    }
    File::create(path).map_err(|e| ReportError::io(path, e))
}
