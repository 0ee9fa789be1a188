//! Adapters from chunk-oriented readers to line and window consumers
//!
//! Two independent adapters live here:
//!
//! - the line adapter ([`to_line_stream`], [`LineStream`]) pulls opaque byte
//!   blocks from a [`ByteReader`], decodes them incrementally and hands out
//!   `\r\n` terminated lines, optionally capped, or the decoded text;
//! - the chunked reader ([`ChunkedFileReader`]) walks a [`SliceSource`] in
//!   fixed windows (4 MiB by default) and reports each window with its
//!   cumulative offset.
//!
//! [`Source`] and [`SourceDetector`] tell native file handles apart from
//! other inputs and convert any input into the shape an adapter needs.
//!
//! # Example
//!
//! ```
//! use linebridge_core::{LineOptions, LineStream, Source};
//!
//! # futures::executor::block_on(async {
//! let reader = Source::from_text("id,name\n1,ada\n2,grace\n")
//!     .into_byte_reader(4)
//!     .await?;
//! let lines = LineStream::new(reader, &LineOptions::new().max_lines(2))?
//!     .collect_lines()
//!     .await?;
//! assert_eq!(lines, vec!["id,name\r\n", "1,ada\r\n"]);
//! # Ok::<(), linebridge_core::BridgeError>(())
//! # }).unwrap();
//! ```

#![warn(missing_docs)]

pub mod chunked;
pub mod config;
pub mod decode;
pub mod error;
pub mod lines;
pub mod reader;
pub mod source;

// Re-export key types
pub use chunked::{
    Chunk, ChunkedFileReader, Chunks, FsSource, MemorySource, SliceReader, SliceSource,
};
pub use config::{BridgeConfig, ChunkOptions, LineOptions, OutputMode};
pub use decode::TextDecoder;
pub use error::{BridgeError, Result};
pub use lines::{
    to_line_stream, LineOutput, LineSplitter, LineStream, Termination, LINE_TERMINATOR,
};
pub use reader::{AsyncReadReader, ByteReader, StreamReader};
pub use source::{is_file_handle, NativeFileDetector, ReadPath, Source, SourceDetector};
