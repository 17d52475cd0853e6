use crate::utils::error::{PrmError, Result};
use csv::StringRecord;
use std::path::Path;

/// Column index the rank is inserted at.
pub const RANK_COLUMN_INDEX: usize = 2;

/// AllPairs does not rank edges, so every edge gets the same rank.
pub const DEFAULT_RANK: &str = "1";

/// Rewrites a raw AllPairs pathway into the universal pathway format by
/// inserting a constant rank column. Returns the number of rows written.
pub fn parse_output(raw_pathway_file: &Path, standardized_pathway_file: &Path) -> Result<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(raw_pathway_file)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(standardized_pathway_file)?;

    let mut rows = 0;
    for result in reader.records() {
        let record = result?;
        let ranked = insert_rank(&record).ok_or_else(|| PrmError::MalformedPathwayError {
            path: raw_pathway_file.to_path_buf(),
            line: record.position().map(|p| p.line()).unwrap_or_default(),
            reason: format!(
                "expected at least {} columns, found {}",
                RANK_COLUMN_INDEX,
                record.len()
            ),
        })?;
        writer.write_record(&ranked)?;
        rows += 1;
    }
    writer.flush()?;

    tracing::info!(
        "Standardized {} pathway edges into {}",
        rows,
        standardized_pathway_file.display()
    );
    Ok(rows)
}

fn insert_rank(record: &StringRecord) -> Option<StringRecord> {
    if record.len() < RANK_COLUMN_INDEX {
        return None;
    }
    let mut ranked = StringRecord::with_capacity(record.as_slice().len() + 1, record.len() + 1);
    for (index, field) in record.iter().enumerate() {
        if index == RANK_COLUMN_INDEX {
            ranked.push_field(DEFAULT_RANK);
        }
        ranked.push_field(field);
    }
    if record.len() == RANK_COLUMN_INDEX {
        ranked.push_field(DEFAULT_RANK);
    }
    Some(ranked)
}
