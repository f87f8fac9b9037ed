// crates/slotframe-core/src/config.rs

/// Behaviour switches for an element tree.
///
/// Rejected mutations (bad alignment, negative size, out-of-range slot) are
/// always dropped without an error. These flags only decide how loudly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    /// Log rejected mutations at WARN instead of TRACE.
    pub report_rejections: bool,
    /// Re-verify container slot bookkeeping after every mutation (debug builds).
    pub check_invariants: bool,
}

impl EngineConfig {
    /// Everything on. Meant for tests and development builds.
    pub fn strict() -> Self {
        Self {
            report_rejections: true,
            check_invariants: true,
        }
    }

    pub fn report_rejection(&self, what: &str) {
        if self.report_rejections {
            tracing::warn!("rejected: {}", what);
        } else {
            tracing::trace!("rejected: {}", what);
        }
    }
}
