//! Ariadne: cultural-site damage sheets to RDF, plus linkset retrieval
//!
//! This crate turns row-oriented damage-site sheets into a quad graph and
//! reconciles it against previously published damage-event data:
//!
//! 1. **Ingest** -- Read a CSV sheet, validate its header against the
//!    sheet's declared column set, and map every cell through a per-column
//!    processor into zero, one or many quads, one minted subject per row
//! 2. **Linkset** -- Drive the remote CONSTRUCT query that pairs new sites
//!    with earlier damage events, paging with a timeout-adaptive page size
//!    and merging every page into one named graph
//! 3. **Excerpt** -- Fetch the GeoNames RDF documents for the regions the
//!    sheets reference so the published dataset is self-describing
//!
//! # Architecture
//!
//! The mapping configuration is data, not code: each sheet declares a
//! registry of tagged processor variants keyed by column name, validated
//! against the sheet header before any row is mapped. Failures are
//! fail-fast by design; no sink ever receives a partial graph.
//!
//! - **Sequential rows** -- Subject identifiers must follow row order, so
//!   rows are never reordered or processed in parallel
//! - **Memoized lookups** -- Region resolution caches per normalized name
//!   for the lifetime of the run; repeats cost zero network calls
//! - **Adaptive paging** -- The query endpoint times out on big pages;
//!   page size shrinks to 1 on a timeout and grows by 1 per healthy page
//!
//! # Key Modules
//!
//! - [`sheet`] -- CSV reading wired through schema validation
//! - [`schema`] -- Expected-column gate with subset/exact coverage policy
//! - [`mapping`] -- Cell processors: the per-column transform vocabulary
//! - [`sources`] -- The concrete UNESCO and Science-at-Risk sheet configs
//! - [`builder`] -- Row-to-quad conversion with per-row minted subjects
//! - [`ids`] -- Zero-padded monotonic entity identifiers
//! - [`resolver`] -- Cached GeoNames region resolution
//! - [`linkset`] -- Paginated retrieval of the linking query's results
//! - [`excerpt`] -- GeoNames RDF excerpt download
//! - [`store`] -- N-Quads sinks, the seam towards the graph store
//! - [`stats`] -- Counters reported at the end of an ingest
//! - [`config`] -- Constants for mapping, paging and lookups
//!
//! # Example Usage
//!
//! ```bash
//! # Map the UNESCO sheet into an N-Quads file
//! ariadne ingest --sheet unesco -i input/unesco.csv -o out/unesco.nq
//!
//! # Retrieve the linkset from the remote query endpoint
//! ariadne linkset --endpoint https://api.example.org/queries/link-damage/run -o out/linkset.nq
//!
//! # Download the GeoNames excerpt for the referenced regions
//! ariadne excerpt --region "Kyiv Oblast" --region "Kharkiv Oblast" -o out/excerpt.nq
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod excerpt;
pub mod ids;
pub mod linkset;
pub mod mapping;
pub mod resolver;
pub mod schema;
pub mod sheet;
pub mod sources;
pub mod stats;
pub mod store;
pub mod vocab;
