//! Built-in historical table used when the live feed is unavailable.
//!
//! Annual values for the United States approximating the FRED series,
//! in the same units the feed delivers: GDP, investment and exports in
//! billions of chained 2017 dollars, the labor force in thousands of persons.

use core_types::{AnnualPanel, CoreError, YearRecord};
use std::ops::RangeInclusive;

pub const FIRST_YEAR: i32 = 1960;
pub const LAST_YEAR: i32 = 2024;
const TABLE_LEN: usize = (LAST_YEAR - FIRST_YEAR + 1) as usize;

const REAL_GDP: [f64; TABLE_LEN] = [
    3260.0, 3345.0, 3550.0, 3705.0, 3915.0, 4170.0, 4431.0, 4543.0, 4752.0, 4875.0, // 1960-1969
    4870.0, 5021.0, 5280.0, 5590.0, 5551.0, 5519.0, 5818.0, 6116.0, 6453.0, 6628.0, // 1970-1979
    6581.0, 6753.0, 6624.0, 6880.0, 7365.0, 7679.0, 7945.0, 8197.0, 8475.0, 8786.0, // 1980-1989
    8908.0, 8870.0, 9179.0, 9415.0, 9721.0, 9989.0, 10320.0, 10684.0, 11124.0, 11557.0, // 1990-1999
    11992.0, 12090.0, 12288.0, 12594.0, 12992.0, 13373.0, 13608.0, 13660.0, 13228.0, 12837.0, // 2000-2009
    13145.0, 13458.0, 13782.0, 14035.0, 14417.0, 14813.0, 15045.0, 15348.0, 15822.0, 16330.0, // 2010-2019
    16197.0, 17032.0, 17551.0, 18014.0, 18537.0, // 2020-2024
];

const LABOR_FORCE: [f64; TABLE_LEN] = [
    69628.0, 70459.0, 70614.0, 71833.0, 73091.0, 74455.0, 75770.0, 77347.0, 78737.0, 80734.0, // 1960-1969
    82771.0, 84382.0, 87034.0, 89429.0, 91949.0, 93775.0, 96158.0, 99009.0, 102251.0, 104962.0, // 1970-1979
    106940.0, 108670.0, 110204.0, 111550.0, 113544.0, 115461.0, 117834.0, 119865.0, 121669.0, 123869.0, // 1980-1989
    125840.0, 126346.0, 128105.0, 129200.0, 131056.0, 132304.0, 133943.0, 136297.0, 137673.0, 139368.0, // 1990-1999
    142583.0, 143734.0, 144863.0, 146510.0, 147401.0, 149320.0, 151428.0, 153124.0, 154287.0, 154142.0, // 2000-2009
    153889.0, 153617.0, 154975.0, 155389.0, 155922.0, 156715.0, 159187.0, 160320.0, 162075.0, 163539.0, // 2010-2019
    160742.0, 161204.0, 164287.0, 166778.0, 168500.0, // 2020-2024
];

const REAL_INVESTMENT: [f64; TABLE_LEN] = [
    395.0, 395.0, 433.0, 465.0, 494.0, 557.0, 599.0, 576.0, 598.0, 631.0, // 1960-1969
    600.0, 651.0, 727.0, 799.0, 726.0, 617.0, 731.0, 863.0, 956.0, 979.0, // 1970-1979
    830.0, 907.0, 760.0, 820.0, 1002.0, 1053.0, 1094.0, 1135.0, 1188.0, 1235.0, // 1980-1989
    1193.0, 1105.0, 1185.0, 1268.0, 1390.0, 1479.0, 1586.0, 1735.0, 1927.0, 2084.0, // 1990-1999
    2198.0, 2061.0, 1943.0, 2003.0, 2185.0, 2318.0, 2384.0, 2322.0, 2078.0, 1512.0, // 2000-2009
    1698.0, 1825.0, 2020.0, 2120.0, 2260.0, 2412.0, 2475.0, 2565.0, 2730.0, 2806.0, // 2010-2019
    2617.0, 2920.0, 3142.0, 3200.0, 3350.0, // 2020-2024
];

const REAL_EXPORTS: [f64; TABLE_LEN] = [
    145.0, 147.0, 157.0, 170.0, 188.0, 195.0, 207.0, 220.0, 243.0, 260.0, // 1960-1969
    291.0, 304.0, 331.0, 405.0, 439.0, 438.0, 480.0, 510.0, 571.0, 649.0, // 1970-1979
    709.0, 721.0, 680.0, 665.0, 714.0, 734.0, 798.0, 884.0, 1002.0, 1104.0, // 1980-1989
    1178.0, 1217.0, 1271.0, 1327.0, 1409.0, 1509.0, 1612.0, 1739.0, 1844.0, 1947.0, // 1990-1999
    2086.0, 2020.0, 2007.0, 2011.0, 2133.0, 2260.0, 2431.0, 2484.0, 2471.0, 2181.0, // 2000-2009
    2393.0, 2559.0, 2699.0, 2765.0, 2857.0, 2907.0, 2878.0, 2955.0, 3098.0, 3128.0, // 2010-2019
    2641.0, 2790.0, 3040.0, 3150.0, 3280.0, // 2020-2024
];

/// The table row for `year`, if the table covers it.
pub fn historical_record(year: i32) -> Option<YearRecord> {
    if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
        return None;
    }
    let idx = (year - FIRST_YEAR) as usize;
    Some(YearRecord::raw(
        year,
        Some(REAL_GDP[idx]),
        Some(LABOR_FORCE[idx]),
        Some(REAL_INVESTMENT[idx]),
        Some(REAL_EXPORTS[idx]),
    ))
}

/// A raw panel over `years` filled from the table.
///
/// Requested years outside the table are kept as rows with missing values,
/// so the panel has the same years as a successful feed download.
pub fn historical_panel(years: RangeInclusive<i32>) -> Result<AnnualPanel, CoreError> {
    let panel = AnnualPanel::with_years(years)?;
    let records = panel
        .into_records()
        .into_iter()
        .map(|r| historical_record(r.year).unwrap_or(r))
        .collect();
    AnnualPanel::new(records)
}
