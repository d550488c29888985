//! Row-oriented text export of a forecast.
//!
//! Fields are comma-joined with no quoting or escaping; a label or column
//! name containing the delimiter will shift columns in the output. That is
//! a documented limitation of the format, not handled here.

use crate::engine::Forecast;
use std::fmt::Write;

/// Render a forecast as delimited rows: a header of the three column names,
/// then one row per index across historical and forecasted values.
///
/// Historical rows leave the forecast field blank and forecast rows leave
/// the value field blank. Row labels come from `date_labels` when supplied
/// and in range, otherwise the zero-based row index.
pub fn to_rows(result: &Forecast, date_labels: Option<&[String]>, columns: [&str; 3]) -> String {
    let total = result.historical.len() + result.forecast.len();
    let mut out = String::new();

    let _ = writeln!(out, "{},{},{}", columns[0], columns[1], columns[2]);

    for i in 0..total {
        let label = date_labels
            .and_then(|labels| labels.get(i))
            .map(|l| l.to_string())
            .unwrap_or_else(|| i.to_string());

        if i < result.historical.len() {
            let _ = writeln!(out, "{},{},", label, result.historical[i]);
        } else {
            let _ = writeln!(
                out,
                "{},,{}",
                label,
                result.forecast[i - result.historical.len()]
            );
        }
    }

    out
}
