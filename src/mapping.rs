//! Declarative per-column mapping from raw cell text to RDF terms.
//!
//! A sheet's mapping is a [`FieldMappingRegistry`]: one [`CellProcessor`]
//! per expected column, built up front so the whole configuration can be
//! validated against the sheet header before any row is touched. Processors
//! are tagged data variants rather than closures, which keeps them
//! inspectable and lets the one transform that needs the network (region
//! resolution) share the builder's async context.

use crate::error::Error;
use crate::resolver::RegionResolver;
use crate::vocab::geo;
use once_cell::sync::Lazy;
use oxrdf::vocab::{rdf, xsd};
use oxrdf::{BlankNode, GraphName, Literal, NamedNode, NamedNodeRef, Quad, Term};
use regex::Regex;
use rustc_hash::FxHashMap;
use tracing::warn;

static FULL_DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d{4}-\d{2}-\d{2}$").unwrap());
static YEAR_MONTH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d{4}-\d{2}$").unwrap());
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d{4}$").unwrap());

/// Decides whether a Direct processor fires for a cell at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Guard {
    /// Skip cells that are empty after trimming.
    #[default]
    NonEmpty,
    /// Skip cells without a ':', i.e. absent prefixed references.
    ContainsColon,
}

impl Guard {
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Guard::NonEmpty => !value.trim().is_empty(),
            Guard::ContainsColon => value.contains(':'),
        }
    }
}

/// How a Direct processor turns cell text into an object term.
#[derive(Debug, Clone, Copy)]
pub enum ObjectKind {
    /// Language-tagged literal with a fixed tag.
    Lang(&'static str),
    /// Plain literal, no datatype or tag.
    Plain,
    /// Literal with a fixed datatype.
    Typed(NamedNodeRef<'static>),
    /// "Yes"/"No" to an xsd:boolean literal. The lenient variant also
    /// accepts any casing; both reject everything else.
    YesNo { lenient: bool },
    /// Full date, year-month or year (optionally negative for BCE),
    /// degrading to a plain literal with a warning.
    DateOrPlain,
    /// URL-safe slug appended to a base IRI.
    Slug { base: &'static str },
    /// Region name resolved against the GeoNames-backed cache.
    Authority,
    /// Prefixed reference expanded to a full IRI.
    Expand {
        prefix: &'static str,
        base: &'static str,
    },
}

impl ObjectKind {
    /// Applies the transform to one cell value.
    ///
    /// Only [`ObjectKind::Authority`] touches `resolver`; passing `None`
    /// for a registry that never uses it is fine.
    pub async fn apply(
        &self,
        value: &str,
        resolver: Option<&RegionResolver>,
    ) -> Result<Term, Error> {
        match self {
            ObjectKind::Lang(tag) => {
                Ok(Literal::new_language_tagged_literal_unchecked(value, *tag).into())
            }
            ObjectKind::Plain => Ok(Literal::new_simple_literal(value).into()),
            ObjectKind::Typed(datatype) => Ok(Literal::new_typed_literal(value, *datatype).into()),
            ObjectKind::YesNo { lenient } => {
                let truth = if *lenient {
                    match value.trim().to_ascii_lowercase().as_str() {
                        "yes" => true,
                        "no" => false,
                        _ => {
                            return Err(Error::InvalidBoolean {
                                value: value.to_string(),
                            })
                        }
                    }
                } else {
                    match value {
                        "Yes" => true,
                        "No" => false,
                        _ => {
                            return Err(Error::InvalidBoolean {
                                value: value.to_string(),
                            })
                        }
                    }
                };
                let rendered = if truth { "true" } else { "false" };
                Ok(Literal::new_typed_literal(rendered, xsd::BOOLEAN).into())
            }
            ObjectKind::DateOrPlain => {
                let trimmed = value.trim();
                let datatype = if FULL_DATE_RE.is_match(trimmed) {
                    Some(xsd::DATE)
                } else if YEAR_MONTH_RE.is_match(trimmed) {
                    Some(xsd::G_YEAR_MONTH)
                } else if YEAR_RE.is_match(trimmed) {
                    Some(xsd::G_YEAR)
                } else {
                    None
                };
                match datatype {
                    Some(datatype) => Ok(Literal::new_typed_literal(trimmed, datatype).into()),
                    None => {
                        warn!(value, "unrecognized date format, keeping it as plain text");
                        Ok(Literal::new_simple_literal(value).into())
                    }
                }
            }
            ObjectKind::Slug { base } => {
                Ok(NamedNode::new_unchecked(format!("{base}{}", slugify(value))).into())
            }
            ObjectKind::Authority => match resolver {
                Some(resolver) => Ok(resolver.resolve(value).await?.into()),
                None => Err(Error::MissingCredential),
            },
            ObjectKind::Expand { prefix, base } => {
                let expanded = value.replacen(prefix, base, 1);
                let expanded = expanded.trim();
                NamedNode::new(expanded)
                    .map(Term::from)
                    .map_err(|source| Error::InvalidIri {
                        value: expanded.to_string(),
                        source,
                    })
            }
        }
    }
}

/// Normalizes an arbitrary label into a URL-safe IRI segment.
///
/// Every run of non-alphanumeric characters collapses to one hyphen, with
/// no hyphen at either end, lower-cased.
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut gap = false;
    for c in s.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if gap && !out.is_empty() {
                out.push('-');
            }
            gap = false;
            out.push(c.to_ascii_lowercase());
        } else {
            gap = true;
        }
    }
    out
}

/// Rectangle used by the optional coordinate sanity check.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }
}

/// Processors that fan one cell out into several statements.
#[derive(Debug, Clone, Copy)]
pub enum MultiKind {
    /// A "lat,lon" cell becomes a geometry node with a WKT serialization.
    ///
    /// `bounds`, when set, warns about coordinates outside the expected
    /// rectangle; it never rejects them.
    PointGeometry { bounds: Option<BoundingBox> },
}

impl MultiKind {
    /// Produces all statements for one cell, or none when the cell cannot
    /// be understood (logged, not fatal).
    pub fn statements(&self, subject: &NamedNode, graph: &GraphName, value: &str) -> Vec<Quad> {
        match self {
            MultiKind::PointGeometry { bounds } => {
                point_geometry(subject, graph, value, bounds.as_ref())
            }
        }
    }
}

fn point_geometry(
    subject: &NamedNode,
    graph: &GraphName,
    value: &str,
    bounds: Option<&BoundingBox>,
) -> Vec<Quad> {
    if value.trim().is_empty() {
        return Vec::new();
    }
    // Sheets write "lat,lon": Y first, X second.
    let Some((lat, lon)) = parse_lat_lon(value) else {
        warn!(value, subject = subject.as_str(), "unparseable coordinate pair");
        return Vec::new();
    };
    if let Some(bounds) = bounds {
        if !bounds.contains(lon, lat) {
            warn!(
                value,
                subject = subject.as_str(),
                "coordinates fall outside the expected bounding box"
            );
        }
    }
    // Label derived from the subject's numeric suffix keeps re-runs
    // reproducible where a random blank node id would not.
    let suffix = subject.as_str().rsplit('/').next().unwrap_or("0");
    let node = BlankNode::new_unchecked(format!("geom{suffix}"));
    let wkt = format!("POINT({lon:.10} {lat:.10})");
    vec![
        Quad::new(
            subject.clone(),
            geo::HAS_GEOMETRY,
            node.clone(),
            graph.clone(),
        ),
        Quad::new(node.clone(), rdf::TYPE, geo::GEOMETRY, graph.clone()),
        Quad::new(
            node,
            geo::AS_WKT,
            Literal::new_typed_literal(wkt, geo::WKT_LITERAL),
            graph.clone(),
        ),
    ]
}

fn parse_lat_lon(value: &str) -> Option<(f64, f64)> {
    let (lat, lon) = value.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lon: f64 = lon.trim().parse().ok()?;
    if !lat.is_finite() || !lon.is_finite() {
        return None;
    }
    Some((lat, lon))
}

/// One column's mapping.
#[derive(Debug, Clone, Copy)]
pub enum CellProcessor {
    /// At most one statement per row.
    Direct {
        predicate: NamedNodeRef<'static>,
        object: ObjectKind,
        guard: Guard,
    },
    /// Zero or more statements per row.
    Multi(MultiKind),
}

/// The per-column processor table for one sheet.
///
/// Its key set doubles as the sheet's expected-column set: the schema
/// validator rejects any header this registry does not know.
pub struct FieldMappingRegistry {
    processors: FxHashMap<&'static str, CellProcessor>,
}

impl FieldMappingRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder {
            processors: FxHashMap::default(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&CellProcessor> {
        self.processors.get(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.processors.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}

/// Static-registration builder; later entries override earlier ones so a
/// sheet can specialize a shared column.
pub struct RegistryBuilder {
    processors: FxHashMap<&'static str, CellProcessor>,
}

impl RegistryBuilder {
    pub fn direct(
        self,
        column: &'static str,
        predicate: NamedNodeRef<'static>,
        object: ObjectKind,
    ) -> Self {
        self.direct_when(column, predicate, object, Guard::NonEmpty)
    }

    pub fn direct_when(
        mut self,
        column: &'static str,
        predicate: NamedNodeRef<'static>,
        object: ObjectKind,
        guard: Guard,
    ) -> Self {
        self.processors.insert(
            column,
            CellProcessor::Direct {
                predicate,
                object,
                guard,
            },
        );
        self
    }

    pub fn multi(mut self, column: &'static str, kind: MultiKind) -> Self {
        self.processors.insert(column, CellProcessor::Multi(kind));
        self
    }

    pub fn build(self) -> FieldMappingRegistry {
        FieldMappingRegistry {
            processors: self.processors,
        }
    }
}
