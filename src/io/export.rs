//! CSV export for the per-appliance load breakdown.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sizing::{Appliance, SizingError, total_watt_hours};

/// Column header for the load breakdown export.
const HEADER: &str = "name,watts,hours_per_day,watt_hours,share_pct";

/// Exports the load breakdown to a CSV file at the given path.
///
/// Writes a header row followed by one row per appliance in input order.
///
/// # Arguments
///
/// * `appliances` - Household loads
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if an appliance is invalid or file creation or
/// writing fails.
pub fn export_breakdown_csv(appliances: &[Appliance], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_breakdown_csv(appliances, buf)
}

/// Writes the load breakdown as CSV to any writer.
///
/// `share_pct` is each appliance's share of the daily total; it is `0` for
/// every row when the total is zero.
///
/// # Errors
///
/// Returns an `io::Error` with kind `InvalidInput` if an appliance fails
/// validation, or any error raised by the writer.
pub fn write_breakdown_csv(appliances: &[Appliance], writer: impl Write) -> io::Result<()> {
    let total = total_watt_hours(appliances).map_err(invalid_input)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for a in appliances {
        let wh = a.watt_hours().map_err(invalid_input)?;
        let share = if total > 0.0 { 100.0 * wh / total } else { 0.0 };
        wtr.write_record(&[
            a.name.clone(),
            format!("{:.2}", a.watts),
            format!("{:.2}", a.hours_per_day),
            format!("{wh:.2}"),
            format!("{share:.2}"),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn invalid_input(err: SizingError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, err)
}
