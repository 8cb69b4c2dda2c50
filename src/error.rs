use thiserror::Error;

/// Error taxonomy for the pipeline.
///
/// Schema and value-coercion failures abort the whole run: a half-populated
/// target graph is worse than no graph at all, so nothing is handed to a
/// sink until every row mapped cleanly. The only condition that is retried
/// automatically is a query-endpoint timeout, and that never surfaces here
/// unless a retry ceiling is configured and exhausted.
#[derive(Error, Debug)]
pub enum Error {
    /// A column outside the expected set was observed in a sheet.
    #[error("unexpected column {column:?}")]
    UnexpectedColumn { column: String },

    /// Exact-coverage policy was requested and some expected columns never
    /// appeared.
    #[error("missing expected columns {columns:?}")]
    MissingColumns { columns: Vec<String> },

    /// A Yes/No cell held something else. This indicates a malformed sheet,
    /// not a single bad row.
    #[error("invalid boolean value {value:?} (expected Yes/No)")]
    InvalidBoolean { value: String },

    /// Region resolution was requested but GEONAMES_USERNAME is not set.
    #[error("GEONAMES_USERNAME is not configured")]
    MissingCredential,

    /// The authority service returned zero matches for a region name.
    #[error("no authority entry found for region {name:?}")]
    RegionNotFound { name: String },

    /// A cross-reference cell expanded to something that is not an IRI.
    #[error("invalid IRI {value:?}: {source}")]
    InvalidIri {
        value: String,
        source: oxrdf::IriParseError,
    },

    #[error("authority lookup failed: {0}")]
    Lookup(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Fetch(#[source] reqwest::Error),

    /// Only raised when a retry ceiling is configured; the default is to
    /// keep retrying until the operator interrupts.
    #[error("gave up after {attempts} consecutive timeouts on page {page}")]
    RetriesExhausted { page: u32, attempts: u32 },

    #[error("failed to parse RDF payload: {0}")]
    Parse(#[from] oxrdfio::RdfParseError),

    #[error("failed to read sheet: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
