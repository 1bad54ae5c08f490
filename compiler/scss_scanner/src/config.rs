//! Scanner configuration.

use crate::hashtable::DEFAULT_BUCKETS;

/// Tuning knobs for a [`Scanner`](crate::Scanner).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ScannerConfig {
    /// Bucket count of the restriction and ignore sets (at least 1).
    pub restriction_buckets: u32,
    /// Number of trailing tokens shown by the scanner's `Display`.
    pub history_len: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        ScannerConfig {
            restriction_buckets: DEFAULT_BUCKETS,
            history_len: 10,
        }
    }
}

impl ScannerConfig {
    #[must_use]
    pub fn with_restriction_buckets(mut self, buckets: u32) -> Self {
        self.restriction_buckets = buckets.max(1);
        self
    }

    #[must_use]
    pub fn with_history_len(mut self, history_len: usize) -> Self {
        self.history_len = history_len;
        self
    }
}
