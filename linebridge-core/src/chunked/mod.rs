//! Chunked whole-resource reading
//!
//! [`ChunkedFileReader`] walks a [`SliceSource`] in fixed windows. The pull
//! API ([`Chunks`]) is the primitive; [`ChunkedFileReader::read`] layers the
//! `next` / `done` callback contract on top of it.

pub mod source;

pub use source::{FsSource, MemorySource, SliceReader, SliceSource};

use crate::{
    config::{ChunkOptions, DEFAULT_WINDOW_SIZE},
    error::{BridgeError, Result},
};
use bytes::Bytes;
use tracing::{debug, trace};

/// One window of a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Bytes of this window
    pub data: Bytes,
    /// Cumulative offset after this window
    pub offset: u64,
    /// Total size of the resource
    pub total: u64,
}

impl Chunk {
    /// Whether this is the last window of the resource
    pub fn is_last(&self) -> bool {
        self.offset >= self.total
    }
}

/// Reads a resource sequentially in fixed-size windows
#[derive(Debug, Clone, Copy)]
pub struct ChunkedFileReader {
    window_size: u64,
}

impl Default for ChunkedFileReader {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE as u64,
        }
    }
}

impl ChunkedFileReader {
    /// Reader with the default 4 MiB window
    pub fn new() -> Self {
        Self::default()
    }

    /// Reader with a custom window; zero is rejected
    pub fn with_window_size(window_size: usize) -> Result<Self> {
        Self::from_options(&ChunkOptions::default().window_size(window_size))
    }

    /// Reader configured from options
    pub fn from_options(options: &ChunkOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            window_size: options.window_size as u64,
        })
    }

    /// Window size in bytes
    pub fn window_size(&self) -> u64 {
        self.window_size
    }

    /// Pull-based iteration over the windows of `source`
    pub fn chunks<S: SliceSource>(&self, source: S) -> Chunks<S> {
        Chunks {
            total: source.size(),
            source,
            window_size: self.window_size,
            offset: 0,
            finished: false,
        }
    }

    /// Read `source` to the end, reporting through callbacks
    ///
    /// `next` runs once per window with the cumulative offset after it.
    /// `done` runs exactly once: with `None` after the last window, or with
    /// the first error, after which nothing else is read.
    pub async fn read<S, N, D>(&self, source: S, mut next: N, done: D)
    where
        S: SliceSource,
        N: FnMut(Chunk),
        D: FnOnce(Option<BridgeError>),
    {
        let mut chunks = self.chunks(source);
        loop {
            match chunks.next_chunk().await {
                Ok(Some(chunk)) => next(chunk),
                Ok(None) => return done(None),
                Err(err) => return done(Some(err)),
            }
        }
    }
}

/// Iterator-like cursor over the windows of a resource
///
/// Returns `Ok(None)` after the final window or after an error.
#[derive(Debug)]
pub struct Chunks<S> {
    source: S,
    window_size: u64,
    offset: u64,
    total: u64,
    finished: bool,
}

impl<S: SliceSource> Chunks<S> {
    /// Total size of the resource
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Read the next window
    pub async fn next_chunk(&mut self) -> Result<Option<Chunk>> {
        if self.finished {
            return Ok(None);
        }

        let start = self.offset;
        let end = start.saturating_add(self.window_size);
        let data = match self.source.read_slice(start, end).await {
            Ok(data) => data,
            Err(err) => {
                debug!(offset = start, error = %err, "window read failed");
                return Err(self.fail(err.into()));
            }
        };

        let len = data.len() as u64;
        if len > self.window_size {
            return Err(self.fail(BridgeError::SliceOverrun {
                offset: start,
                requested: self.window_size,
                actual: len,
            }));
        }
        if len == 0 && start < self.total {
            return Err(self.fail(BridgeError::UnexpectedEof {
                offset: start,
                size: self.total,
            }));
        }

        self.offset += len;
        trace!(offset = self.offset, total = self.total, "read window");
        if self.offset >= self.total {
            self.finished = true;
        }

        Ok(Some(Chunk {
            data,
            offset: self.offset,
            total: self.total,
        }))
    }

    fn fail(&mut self, err: BridgeError) -> BridgeError {
        self.finished = true;
        err
    }
}
