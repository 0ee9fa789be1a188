//! Line adapter
//!
//! Turns a [`ByteReader`](crate::reader::ByteReader) into `\r\n` terminated
//! lines, optionally capped, or into the decoded text it consumed.

pub mod splitter;
pub mod stream;

pub use splitter::{LineSplitter, LINE_TERMINATOR};
pub use stream::{to_line_stream, LineOutput, LineStream, Termination};
