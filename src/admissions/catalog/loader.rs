use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::RuleRow;

/// Failure reading the rule source before catalog construction starts.
#[derive(Debug, thiserror::Error)]
pub enum RuleSourceError {
    #[error("failed to read rule source: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid rule CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads rule rows from a CSV export of the admission-rules sheet.
pub fn load_rows<R: Read>(reader: R) -> Result<Vec<RuleRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.deserialize::<RuleRow>() {
        rows.push(record?);
    }

    Ok(rows)
}

pub fn load_rows_from_path(path: &Path) -> Result<Vec<RuleRow>, RuleSourceError> {
    let file = File::open(path)?;
    let rows = load_rows(file)?;
    Ok(rows)
}
