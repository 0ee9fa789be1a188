//! Input sources and file-handle detection

use crate::{
    chunked::{FsSource, MemorySource, SliceReader, SliceSource},
    error::{BridgeError, Result},
    reader::{AsyncReadReader, ByteReader},
};
use bytes::Bytes;
use std::path::PathBuf;

/// The inputs the adapters accept
pub enum Source {
    /// Text already in memory
    Text(String),
    /// Bytes already in memory
    Bytes(Bytes),
    /// Path of a local file, opened on demand
    Path(PathBuf),
    /// Native sliceable file handle
    File(Box<dyn SliceSource>),
    /// Plain incremental reader (stdin, network, ...)
    Reader(Box<dyn ByteReader>),
}

impl std::fmt::Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Text(text) => f
                .debug_tuple("Text")
                .field(&format!("<{} bytes>", text.len()))
                .finish(),
            Source::Bytes(bytes) => f
                .debug_tuple("Bytes")
                .field(&format!("<{} bytes>", bytes.len()))
                .finish(),
            Source::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Source::File(file) => f
                .debug_tuple("File")
                .field(&format!("<{} bytes>", file.size()))
                .finish(),
            Source::Reader(_) => f.debug_tuple("Reader").field(&"<Reader>").finish(),
        }
    }
}

impl Source {
    /// Source from text
    pub fn from_text(text: impl Into<String>) -> Self {
        Source::Text(text.into())
    }

    /// Source from bytes
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Source::Bytes(bytes.into())
    }

    /// Source from a file path
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Source::Path(path.into())
    }

    /// Source from a sliceable file handle
    pub fn from_file(file: impl SliceSource + 'static) -> Self {
        Source::File(Box::new(file))
    }

    /// Source from an incremental reader
    pub fn from_reader(reader: impl ByteReader + 'static) -> Self {
        Source::Reader(Box::new(reader))
    }

    /// Source reading standard input
    pub fn stdin(block_size: usize) -> Self {
        Source::from_reader(AsyncReadReader::new(tokio::io::stdin(), block_size))
    }

    /// Turn the source into a reader delivering blocks of `block_size` bytes
    pub async fn into_byte_reader(self, block_size: usize) -> Result<Box<dyn ByteReader>> {
        if block_size == 0 {
            return Err(BridgeError::Config(
                "block size must be greater than zero".to_string(),
            ));
        }
        match self {
            Source::Reader(reader) => Ok(reader),
            other => {
                let source = other.into_slice_source().await?;
                Ok(Box::new(SliceReader::new(source, block_size)))
            }
        }
    }

    /// Turn the source into a sliceable resource
    ///
    /// Plain readers have no known size and cannot be sliced.
    pub async fn into_slice_source(self) -> Result<Box<dyn SliceSource>> {
        match self {
            Source::Text(text) => Ok(Box::new(MemorySource::new(text.into_bytes()))),
            Source::Bytes(bytes) => Ok(Box::new(MemorySource::new(bytes))),
            Source::Path(path) => {
                let file = FsSource::open(&path).await.map_err(|e| {
                    BridgeError::InvalidInput(format!("cannot open {}: {e}", path.display()))
                })?;
                Ok(Box::new(file))
            }
            Source::File(file) => Ok(file),
            Source::Reader(_) => Err(BridgeError::InvalidInput(
                "an incremental reader cannot be read by slices".to_string(),
            )),
        }
    }

    /// Pick the read path for this source with `detector`
    ///
    /// Sources the detector recognises as file handles are read by slices;
    /// everything else is read as a sequence of blocks.
    pub async fn read_path<D>(self, detector: &D, block_size: usize) -> Result<ReadPath>
    where
        D: SourceDetector + ?Sized,
    {
        if detector.is_file_handle(&self) {
            Ok(ReadPath::Slices(self.into_slice_source().await?))
        } else {
            Ok(ReadPath::Blocks(self.into_byte_reader(block_size).await?))
        }
    }
}

/// How a [`Source`] is going to be read
pub enum ReadPath {
    /// Sliceable file handle, read window by window
    Slices(Box<dyn SliceSource>),
    /// Incremental input, read block by block
    Blocks(Box<dyn ByteReader>),
}

impl std::fmt::Debug for ReadPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadPath::Slices(file) => f
                .debug_tuple("Slices")
                .field(&format!("<{} bytes>", file.size()))
                .finish(),
            ReadPath::Blocks(_) => f.debug_tuple("Blocks").field(&"<Reader>").finish(),
        }
    }
}

impl ReadPath {
    /// Collapse either path into a block reader
    pub fn into_byte_reader(self, block_size: usize) -> Box<dyn ByteReader> {
        match self {
            ReadPath::Slices(file) => Box::new(SliceReader::new(file, block_size)),
            ReadPath::Blocks(reader) => reader,
        }
    }
}

/// Capability predicate telling native file handles apart from other inputs
pub trait SourceDetector {
    /// Whether `source` is a native sliceable file handle
    fn is_file_handle(&self, source: &Source) -> bool;
}

/// Detector recognising [`Source::File`]
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFileDetector;

impl SourceDetector for NativeFileDetector {
    fn is_file_handle(&self, source: &Source) -> bool {
        matches!(source, Source::File(_))
    }
}

impl<F> SourceDetector for F
where
    F: Fn(&Source) -> bool,
{
    fn is_file_handle(&self, source: &Source) -> bool {
        self(source)
    }
}

/// Shorthand for [`NativeFileDetector`]
pub fn is_file_handle(source: &Source) -> bool {
    NativeFileDetector.is_file_handle(source)
}
