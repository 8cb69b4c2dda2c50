//! CSV sheet reading, wired through the schema validator.

use crate::error::Error;
use crate::mapping::FieldMappingRegistry;
use crate::schema::{CoveragePolicy, SchemaValidator};
use std::path::Path;
use tracing::info;

/// One validated record: `(column, value)` pairs in header order.
///
/// The empty-named index pseudo-column is never copied in. A row is built
/// once and consumed once by the graph builder.
#[derive(Debug, Clone)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            cells: pairs.into_iter().collect(),
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.cells
            .iter()
            .map(|(column, value)| (column.as_str(), value.as_str()))
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, value)| value.as_str())
    }
}

/// Reads every row of a sheet, validating its header against the registry.
///
/// The registry's key set is the expected-column set, so an unknown header
/// fails the whole sheet before a single row is mapped.
pub fn read_rows(
    path: &Path,
    registry: &FieldMappingRegistry,
    policy: CoveragePolicy,
) -> Result<Vec<Row>, Error> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut validator = SchemaValidator::new(registry.columns());
    for header in headers.iter() {
        validator.observe(header)?;
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cells = headers
            .iter()
            .zip(record.iter())
            .filter(|(header, _)| !header.is_empty())
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();
        rows.push(Row { cells });
    }
    validator.finish(policy)?;

    info!(path = %path.display(), rows = rows.len(), "sheet read");
    Ok(rows)
}
