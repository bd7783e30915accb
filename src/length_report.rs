//! CSV export of the accession/length/description table.

use crate::record::SequenceRecord;
use anyhow::{Result, anyhow};
use serde::Serialize;
use std::path::Path;

/// One exported row. Row order follows collection order; the plotter sorts a
/// copy and never mutates the exported table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LengthRow {
    #[serde(rename = "Accession")]
    pub accession: String,
    #[serde(rename = "Length")]
    pub length: u64,
    #[serde(rename = "Description")]
    pub description: String,
}

pub fn length_table(records: &[SequenceRecord]) -> Vec<LengthRow> {
    records
        .iter()
        .map(|record| LengthRow {
            accession: record.accession.clone(),
            length: record.len() as u64,
            description: record.description.clone(),
        })
        .collect()
}

/// Writes the table as comma-delimited rows with a header, in input order.
/// No deduplication, no schema validation. Returns the in-memory table for
/// downstream plotting.
pub fn write_length_csv(records: &[SequenceRecord], path: &Path) -> Result<Vec<LengthRow>> {
    let rows = length_table(records);
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| anyhow!("Could not create CSV file '{}': {e}", path.display()))?;
    for row in &rows {
        writer
            .serialize(row)
            .map_err(|e| anyhow!("Could not write CSV row to '{}': {e}", path.display()))?;
    }
    writer
        .flush()
        .map_err(|e| anyhow!("Could not flush CSV file '{}': {e}", path.display()))?;
    Ok(rows)
}
