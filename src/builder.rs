//! Row-to-quad conversion.

use crate::config::PROGRESS_INTERVAL;
use crate::error::Error;
use crate::ids::EntityIdGenerator;
use crate::mapping::CellProcessor;
use crate::resolver::RegionResolver;
use crate::sheet::Row;
use crate::sources::SheetConfig;
use crate::stats::IngestStats;
use indicatif::ProgressBar;
use oxrdf::{GraphName, Quad, Term};
use tracing::info;

/// Consumes validated rows and produces the sheet's quad set.
///
/// One subject is minted per row, in row order; the generator is owned
/// here so a fresh builder over the same sheet reproduces the same ids.
/// Cells within a row are independent of each other, but rows are
/// processed strictly in sequence to keep identifier assignment stable.
pub struct GraphBuilder<'a> {
    ids: EntityIdGenerator,
    graph: GraphName,
    sheet: &'a SheetConfig,
    resolver: Option<&'a RegionResolver>,
    stats: &'a IngestStats,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(
        sheet: &'a SheetConfig,
        resolver: Option<&'a RegionResolver>,
        stats: &'a IngestStats,
    ) -> Self {
        Self {
            ids: EntityIdGenerator::new(sheet.id_namespace),
            graph: GraphName::from(sheet.graph.into_owned()),
            sheet,
            resolver,
            stats,
        }
    }

    /// Maps every row, failing fast: either the full quad set comes back
    /// or nothing does.
    pub async fn build(&mut self, rows: &[Row]) -> Result<Vec<Quad>, Error> {
        let pb = ProgressBar::new_spinner();
        let mut quads = Vec::new();

        for row in rows {
            let subject = self.ids.mint();
            self.stats.inc_rows();

            for (column, value) in row.cells() {
                let Some(processor) = self.sheet.registry.get(column) else {
                    // Unreachable after schema validation, but a row source
                    // other than read_rows could still get here.
                    return Err(Error::UnexpectedColumn {
                        column: column.to_string(),
                    });
                };
                match processor {
                    CellProcessor::Multi(kind) => {
                        let produced = kind.statements(&subject, &self.graph, value);
                        if produced.is_empty() {
                            self.stats.inc_skipped();
                        } else {
                            self.stats.add_quads(produced.len() as u64);
                            quads.extend(produced);
                        }
                    }
                    CellProcessor::Direct {
                        predicate,
                        object,
                        guard,
                    } => {
                        if !guard.accepts(value) {
                            self.stats.inc_skipped();
                            continue;
                        }
                        let term = object.apply(value, self.resolver).await?;
                        if term_text(&term).trim().is_empty() {
                            self.stats.inc_skipped();
                            continue;
                        }
                        quads.push(Quad::new(
                            subject.clone(),
                            *predicate,
                            term,
                            self.graph.clone(),
                        ));
                        self.stats.add_quads(1);
                    }
                }
            }

            if self.ids.minted() % PROGRESS_INTERVAL == 0 {
                pb.tick();
            }
        }

        pb.finish_and_clear();
        info!(
            sheet = self.sheet.name,
            rows = self.stats.rows(),
            quads = quads.len(),
            "sheet mapped"
        );
        Ok(quads)
    }
}

fn term_text(term: &Term) -> &str {
    match term {
        Term::NamedNode(node) => node.as_str(),
        Term::BlankNode(node) => node.as_str(),
        Term::Literal(literal) => literal.value(),
    }
}
