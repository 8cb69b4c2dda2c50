use crate::error::Error;
use rustc_hash::FxHashSet;

/// What to do about expected columns that never showed up.
///
/// Unknown columns are always fatal; missing ones are only fatal under
/// [`CoveragePolicy::Exact`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoveragePolicy {
    /// The observed columns may be any subset of the expected set.
    #[default]
    Subset,
    /// Every expected column must have been observed by end of stream.
    Exact,
}

/// Pure gate over the column names a tabular source presents.
///
/// Fails fast: the first column outside the expected set aborts the source
/// before any row is mapped. The empty-named pseudo-column some sheet
/// exports prepend (a row index) is ignored and never recorded.
pub struct SchemaValidator {
    expected: FxHashSet<&'static str>,
    seen: FxHashSet<String>,
}

impl SchemaValidator {
    pub fn new(expected: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            expected: expected.into_iter().collect(),
            seen: FxHashSet::default(),
        }
    }

    /// Records one observed column name, failing on anything unexpected.
    pub fn observe(&mut self, column: &str) -> Result<(), Error> {
        if column.is_empty() {
            return Ok(());
        }
        if !self.expected.contains(column) {
            return Err(Error::UnexpectedColumn {
                column: column.to_string(),
            });
        }
        if !self.seen.contains(column) {
            self.seen.insert(column.to_string());
        }
        Ok(())
    }

    /// End-of-stream check against the coverage policy.
    pub fn finish(&self, policy: CoveragePolicy) -> Result<(), Error> {
        match policy {
            CoveragePolicy::Subset => Ok(()),
            CoveragePolicy::Exact => {
                let mut missing: Vec<String> = self
                    .expected
                    .iter()
                    .filter(|column| !self.seen.contains(**column))
                    .map(|column| column.to_string())
                    .collect();
                if missing.is_empty() {
                    Ok(())
                } else {
                    missing.sort();
                    Err(Error::MissingColumns { columns: missing })
                }
            }
        }
    }
}
