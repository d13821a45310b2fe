//! Streaming counters for display and diagnostics

/// Outcome of one `update` call
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Whether a full scan ran this tick
    pub scanned: bool,
    /// Chunks built and registered
    pub built: usize,
    /// Chunks whose host submission failed
    pub failed: usize,
    /// Chunks disposed and removed
    pub unloaded: usize,
    /// In-range chunks left for a later tick by the per-tick cap
    pub deferred: usize,
}

impl TickReport {
    /// Whether the resident set changed
    pub fn changed(&self) -> bool {
        self.built > 0 || self.unloaded > 0
    }
}

/// Running totals kept by the streaming manager
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamingStats {
    pub resident_chunks: usize,
    pub resident_resources: usize,
    /// Heap bytes held by resident chunk geometry
    pub resident_geometry_bytes: usize,
    pub total_built: u64,
    pub total_unloaded: u64,
    pub failed_builds: u64,
    pub scans: u64,
}

impl StreamingStats {
    pub(crate) fn record(&mut self, report: &TickReport) {
        if report.scanned {
            self.scans += 1;
        }
        self.total_built += report.built as u64;
        self.total_unloaded += report.unloaded as u64;
        self.failed_builds += report.failed as u64;
    }
}
