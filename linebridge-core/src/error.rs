//! Error types for the adapters

use thiserror::Error;

/// Errors produced by the line and chunk adapters
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The underlying reader or slice read failed
    #[error("read failed: {0}")]
    Read(#[from] std::io::Error),

    /// The requested text encoding is not known
    #[error("unknown encoding label '{label}'")]
    UnknownEncoding {
        /// The label that could not be resolved
        label: String,
    },

    /// Invalid configuration value
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The input cannot be used for the requested operation
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A slice read returned no data before the end of the resource
    #[error("resource ended at offset {offset} before its declared size {size}")]
    UnexpectedEof {
        /// Offset at which the empty read happened
        offset: u64,
        /// Declared total size of the resource
        size: u64,
    },

    /// A slice read returned more bytes than the window asked for
    #[error("slice at offset {offset} returned {actual} bytes, window was {requested}")]
    SliceOverrun {
        /// Offset of the window
        offset: u64,
        /// Window length requested
        requested: u64,
        /// Bytes actually returned
        actual: u64,
    },
}

impl From<toml::de::Error> for BridgeError {
    fn from(err: toml::de::Error) -> Self {
        BridgeError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for BridgeError {
    fn from(err: toml::ser::Error) -> Self {
        BridgeError::Config(err.to_string())
    }
}

/// Result type for adapter operations
pub type Result<T> = std::result::Result<T, BridgeError>;
