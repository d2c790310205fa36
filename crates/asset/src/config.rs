//! Decoder settings. Every decode call reads its own copy; nothing is global.

/// Default capacity of the buffered line reader, in bytes.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 65536;

/// How numbers that fail to parse are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NumericPolicy {
    /// Unparseable or missing numbers become zero and the record is kept.
    #[default]
    Permissive,
    /// Records with unparseable numbers are skipped.
    Strict,
}

impl NumericPolicy {
    pub fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    pub read_buffer_size: usize,
    /// Emit the per-decode summary at `info` instead of `debug`.
    pub log_stats: bool,
    pub numeric_policy: NumericPolicy,
}

impl DecoderConfig {
    pub fn new() -> Self {
        Self {
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            log_stats: false,
            numeric_policy: NumericPolicy::Permissive,
        }
    }

    /// Sets the reader capacity. Zero is bumped to one byte.
    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size.max(1);
        self
    }

    pub fn with_log_stats(mut self, enabled: bool) -> Self {
        self.log_stats = enabled;
        self
    }

    pub fn with_numeric_policy(mut self, policy: NumericPolicy) -> Self {
        self.numeric_policy = policy;
        self
    }

    pub fn strict() -> Self {
        Self::new().with_numeric_policy(NumericPolicy::Strict)
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::new()
    }
}
