use std::sync::atomic::{AtomicU64, Ordering};

/// Counters collected while mapping a sheet
#[derive(Default)]
pub struct IngestStats {
    rows_processed: AtomicU64,
    quads_emitted: AtomicU64,
    cells_skipped: AtomicU64,
}

impl IngestStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_rows(&self) {
        self.rows_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_quads(&self, count: u64) {
        self.quads_emitted.fetch_add(count, Ordering::Relaxed);
    }

    pub fn inc_skipped(&self) {
        self.cells_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn rows(&self) -> u64 {
        self.rows_processed.load(Ordering::Relaxed)
    }

    pub fn quads(&self) -> u64 {
        self.quads_emitted.load(Ordering::Relaxed)
    }

    pub fn skipped(&self) -> u64 {
        self.cells_skipped.load(Ordering::Relaxed)
    }
}
