//! Configuration types for the adapters

use crate::error::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default window used by the chunked reader (4 MiB)
pub const DEFAULT_WINDOW_SIZE: usize = 4 * 1024 * 1024;

/// Default block size when a source is turned into a byte reader (64 KiB)
pub const DEFAULT_BLOCK_SIZE: usize = 64 * 1024;

/// Default text encoding label
pub const DEFAULT_ENCODING: &str = "utf-8";

/// What the line adapter hands back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// A lazy sequence of `\r\n` terminated lines
    #[default]
    Lines,
    /// The decoded text consumed before reading stopped
    Text,
}

/// Options for the line adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineOptions {
    /// Maximum number of lines to emit (0 = unbounded)
    pub max_lines: usize,
    /// Output mode
    pub mode: OutputMode,
    /// Encoding label understood by the WHATWG Encoding Standard
    pub encoding: String,
    /// Block size used when a source has to be turned into a reader
    pub block_size: usize,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            max_lines: 0,
            mode: OutputMode::Lines,
            encoding: DEFAULT_ENCODING.to_string(),
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl LineOptions {
    /// Options emitting every line
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of emitted lines (0 = unbounded)
    pub fn max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Select the output mode
    pub fn mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Select the text encoding
    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = label.into();
        self
    }

    /// Select the reader block size
    pub fn block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// The cap as an option, `None` when unbounded
    pub fn cap(&self) -> Option<usize> {
        (self.max_lines != 0).then_some(self.max_lines)
    }

    /// Check the options before any reading starts
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(BridgeError::Config(
                "lines.block_size must be greater than zero".to_string(),
            ));
        }
        if encoding_rs::Encoding::for_label(self.encoding.as_bytes()).is_none() {
            return Err(BridgeError::UnknownEncoding {
                label: self.encoding.clone(),
            });
        }
        Ok(())
    }
}

/// Options for the chunked reader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkOptions {
    /// Window size in bytes
    pub window_size: usize,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl ChunkOptions {
    /// Select the window size
    pub fn window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Check the options before any reading starts
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(BridgeError::Config(
                "chunks.window_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Top-level configuration, usually loaded from a TOML file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Line adapter settings
    pub lines: LineOptions,
    /// Chunked reader settings
    pub chunks: ChunkOptions,
}

impl BridgeConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BridgeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            BridgeError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.lines.validate()?;
        self.chunks.validate()
    }
}
