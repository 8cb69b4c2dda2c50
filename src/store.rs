//! The narrow seam towards the target graph store.
//!
//! This pipeline never provisions datasets or clears remote services; it
//! hands a finished batch of quads to a sink and is done. The production
//! sink is an N-Quads file that the publishing step imports.

use crate::error::Error;
use oxrdf::Quad;
use oxrdfio::{RdfFormat, RdfParser, RdfSerializer};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Accepts one batch of quads for import.
pub trait QuadSink {
    fn import(&mut self, quads: &[Quad]) -> Result<(), Error>;
}

/// Serializes a batch of quads to an N-Quads file.
pub fn write_nquads(path: &Path, quads: &[Quad]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut writer =
        RdfSerializer::from_format(RdfFormat::NQuads).for_writer(BufWriter::new(file));
    for quad in quads {
        writer.serialize_quad(quad)?;
    }
    writer.finish()?.flush()?;
    info!(path = %path.display(), quads = quads.len(), "wrote N-Quads");
    Ok(())
}

/// Reads an N-Quads file back; the inverse of [`write_nquads`].
pub fn read_nquads(path: &Path) -> Result<Vec<Quad>, Error> {
    let file = File::open(path)?;
    RdfParser::from_format(RdfFormat::NQuads)
        .for_reader(BufReader::new(file))
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)
}

/// File-backed sink. Each import replaces the file's contents.
pub struct NQuadsFileSink {
    path: PathBuf,
}

impl NQuadsFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl QuadSink for NQuadsFileSink {
    fn import(&mut self, quads: &[Quad]) -> Result<(), Error> {
        write_nquads(&self.path, quads)
    }
}

/// In-memory sink for tests and dry runs.
#[derive(Default)]
pub struct MemorySink {
    pub quads: Vec<Quad>,
}

impl QuadSink for MemorySink {
    fn import(&mut self, quads: &[Quad]) -> Result<(), Error> {
        self.quads.extend_from_slice(quads);
        Ok(())
    }
}
