//! Engine configuration.

/// Configuration for [`crate::LogEngine`].
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Whether to flush after every store/delete (safer but slower).
    pub sync_on_store: bool,

    /// Minimum number of dead records before close compacts the log.
    pub compact_min_garbage: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            sync_on_store: true,
            compact_min_garbage: 64,
        }
    }
}

impl LogConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to flush after every store/delete.
    #[must_use]
    pub const fn sync_on_store(mut self, value: bool) -> Self {
        self.sync_on_store = value;
        self
    }

    /// Sets the garbage threshold for compaction on close.
    #[must_use]
    pub const fn compact_min_garbage(mut self, value: u64) -> Self {
        self.compact_min_garbage = value;
        self
    }
}
