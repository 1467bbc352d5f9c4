use crate::escalate::Width;

/// Callbacks fired while sweeping. Every method defaults to doing nothing, and
/// `()` implements the trait for callers that do not care.
pub trait KernelObserver {
    /// A database column is about to be processed.
    fn column(&mut self) {}
    /// The best score moved to a new column.
    fn max_moved(&mut self) {}
    /// One lane-shift pass of the lazy F loop ran.
    fn lazy_f_pass(&mut self) {}
    /// The sweep overflowed `from` and will be rerun at `to`.
    fn escalated(&mut self, _from: Width, _to: Width) {}
}

impl KernelObserver for () {}

/// Counts every event, summed over all passes and widths of an alignment.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SweepCounters {
    pub columns: u64,
    pub max_moves: u64,
    pub lazy_f_passes: u64,
    pub escalations: u64,
}

impl KernelObserver for SweepCounters {
    fn column(&mut self) {
        self.columns += 1;
    }

    fn max_moved(&mut self) {
        self.max_moves += 1;
    }

    fn lazy_f_pass(&mut self) {
        self.lazy_f_passes += 1;
    }

    fn escalated(&mut self, _from: Width, _to: Width) {
        self.escalations += 1;
    }
}
