//! Error types for compression operations.

use core::fmt;

use thiserror::Error;

/// Result type alias for compression operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Region of a container in which a decoding failure was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// The fixed 8-byte header.
    Header,
    /// The serialized code tree span.
    Tree,
    /// The packed data bitstream.
    Data,
}

impl Region {
    /// Get region name as string.
    pub fn name(self) -> &'static str {
        match self {
            Region::Header => "header",
            Region::Tree => "tree",
            Region::Data => "data",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compression error types.
#[derive(Debug, Error)]
pub enum Error {
    /// Internal invariant violated while building a container.
    #[error("encoding failed: {message}")]
    Encoding { message: String },

    /// Container is malformed or truncated.
    #[error("corrupt container ({region}): {message}")]
    CorruptContainer { region: Region, message: String },

    /// Bit reader exhausted its buffer.
    ///
    /// Signals the end of a read loop; the decoder turns it into
    /// [`Error::CorruptContainer`] when it arrives before the declared bit count.
    #[error("end of bit stream after {bits_read} bits")]
    EndOfStream { bits_read: u64 },

    /// Buffer too small for output.
    #[error("buffer too small: need {required} bytes, got {provided}")]
    BufferTooSmall { required: usize, provided: usize },

    /// Configuration value could not be parsed or is out of range.
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// I/O error from the surrounding file layer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an encoding (internal invariant) error.
    pub fn encoding(message: impl Into<String>) -> Self {
        Error::Encoding {
            message: message.into(),
        }
    }

    /// Create a corrupt container error for the given region.
    pub fn corrupted(region: Region, message: impl Into<String>) -> Self {
        Error::CorruptContainer {
            region,
            message: message.into(),
        }
    }

    /// Create a corrupt container error with bit offset context.
    pub fn corrupted_at(region: Region, message: impl Into<String>, bit_offset: u64) -> Self {
        Error::CorruptContainer {
            region,
            message: format!("{} at bit {}", message.into(), bit_offset),
        }
    }

    /// Create an end-of-stream sentinel.
    pub fn end_of_stream(bits_read: u64) -> Self {
        Error::EndOfStream { bits_read }
    }

    /// Create a buffer too small error.
    pub fn buffer_too_small(required: usize, provided: usize) -> Self {
        Error::BufferTooSmall { required, provided }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Check if this is the end-of-stream sentinel.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Error::EndOfStream { .. })
    }

    /// Region of the container the error refers to, if any.
    pub fn region(&self) -> Option<Region> {
        match self {
            Error::CorruptContainer { region, .. } => Some(*region),
            _ => None,
        }
    }

    /// Check if error is recoverable by the caller (reject the input, or
    /// retry with a larger buffer).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::CorruptContainer { .. } | Error::BufferTooSmall { .. }
        )
    }

    /// Get error category for metrics.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Encoding { .. } => "encoding",
            Error::CorruptContainer { .. } => "corrupt_container",
            Error::EndOfStream { .. } => "end_of_stream",
            Error::BufferTooSmall { .. } => "buffer_too_small",
            Error::Config { .. } => "config",
            Error::Io(_) => "io_error",
        }
    }
}
