//! Store configuration.

/// Configuration for opening a store.
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether to create the root directory if it doesn't exist.
    pub create_if_missing: bool,

    /// Whether to fsync documents and their directory on every write.
    ///
    /// Without it, writes are still atomic but may not survive power loss.
    pub sync_writes: bool,

    /// Whether reads take the collection lock.
    ///
    /// Off by default: reads may then observe a document that is
    /// concurrently being replaced, but always a complete one.
    pub lock_reads: bool,

    /// Permission bits for created directories (Unix only).
    pub dir_mode: u32,

    /// Permission bits for written documents (Unix only).
    pub file_mode: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            create_if_missing: true,
            sync_writes: true,
            lock_reads: false,
            dir_mode: 0o755,
            file_mode: 0o644,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to create the root directory if missing.
    #[must_use]
    pub const fn create_if_missing(mut self, value: bool) -> Self {
        self.create_if_missing = value;
        self
    }

    /// Sets whether writes are fsynced.
    #[must_use]
    pub const fn sync_writes(mut self, value: bool) -> Self {
        self.sync_writes = value;
        self
    }

    /// Sets whether reads are serialized with writes.
    #[must_use]
    pub const fn lock_reads(mut self, value: bool) -> Self {
        self.lock_reads = value;
        self
    }

    /// Sets directory permission bits.
    #[must_use]
    pub const fn dir_mode(mut self, mode: u32) -> Self {
        self.dir_mode = mode;
        self
    }

    /// Sets document permission bits.
    #[must_use]
    pub const fn file_mode(mut self, mode: u32) -> Self {
        self.file_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.create_if_missing);
        assert!(config.sync_writes);
        assert!(!config.lock_reads);
        assert_eq!(config.dir_mode, 0o755);
        assert_eq!(config.file_mode, 0o644);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new()
            .create_if_missing(false)
            .sync_writes(false)
            .lock_reads(true)
            .file_mode(0o600);

        assert!(!config.create_if_missing);
        assert!(!config.sync_writes);
        assert!(config.lock_reads);
        assert_eq!(config.file_mode, 0o600);
    }
}
