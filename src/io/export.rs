//! CSV export of the itemized before/after bill comparison.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::billing::BillBreakdown;

/// Schema v1 column header for the comparison export.
const HEADER: &str = "item,before_non_service,before_service,before_total,\
                      after_non_service,after_service,after_total";

/// Exports a before/after bill comparison to a CSV file at the given path.
///
/// Writes a header row followed by one row per bill line item. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(before: &BillBreakdown, after: &BillBreakdown, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(before, after, buf)
}

/// Writes a before/after bill comparison as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(
    before: &BillBreakdown,
    after: &BillBreakdown,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    let split_rows: [(&str, [f64; 6]); 8] = [
        (
            "usage_kwh",
            [
                before.usage_non_service_kwh,
                before.usage_service_kwh,
                before.usage_total_kwh,
                after.usage_non_service_kwh,
                after.usage_service_kwh,
                after.usage_total_kwh,
            ],
        ),
        (
            "energy_rm",
            [
                before.energy_non_service_rm,
                before.energy_service_rm,
                before.energy_total_rm,
                after.energy_non_service_rm,
                after.energy_service_rm,
                after.energy_total_rm,
            ],
        ),
        (
            "capacity_rm",
            [
                before.capacity_non_service_rm,
                before.capacity_service_rm,
                before.capacity_total_rm,
                after.capacity_non_service_rm,
                after.capacity_service_rm,
                after.capacity_total_rm,
            ],
        ),
        (
            "network_rm",
            [
                before.network_non_service_rm,
                before.network_service_rm,
                before.network_total_rm,
                after.network_non_service_rm,
                after.network_service_rm,
                after.network_total_rm,
            ],
        ),
        (
            "afa_rm",
            [
                before.afa_non_service_rm,
                before.afa_service_rm,
                before.afa_total_rm,
                after.afa_non_service_rm,
                after.afa_service_rm,
                after.afa_total_rm,
            ],
        ),
        (
            "incentive_rm",
            [
                before.incentive_non_service_rm,
                before.incentive_service_rm,
                before.incentive_total_rm,
                after.incentive_non_service_rm,
                after.incentive_service_rm,
                after.incentive_total_rm,
            ],
        ),
        (
            "retail_rm",
            [
                0.0,
                before.retail_service_rm,
                before.retail_service_rm,
                0.0,
                after.retail_service_rm,
                after.retail_service_rm,
            ],
        ),
        (
            "usage_charge_rm",
            [
                before.usage_charge_non_service_rm,
                before.usage_charge_service_rm,
                before.usage_charge_total_rm,
                after.usage_charge_non_service_rm,
                after.usage_charge_service_rm,
                after.usage_charge_total_rm,
            ],
        ),
    ];

    for (item, values) in &split_rows {
        let mut record = vec![(*item).to_string()];
        record.extend(values.iter().map(|v| format!("{v:.2}")));
        wtr.write_record(&record)?;
    }

    // Levies and totals have no non-service/service split.
    for (item, before_rm, after_rm) in [
        ("kwtbb_rm", before.kwtbb_rm, after.kwtbb_rm),
        ("sst_rm", before.sst_rm, after.sst_rm),
        ("total_rm", before.total_rm, after.total_rm),
    ] {
        wtr.write_record(&[
            item.to_string(),
            String::new(),
            String::new(),
            format!("{before_rm:.2}"),
            String::new(),
            String::new(),
            format!("{after_rm:.2}"),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
