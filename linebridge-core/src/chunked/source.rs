//! Sliceable binary resources

use crate::reader::ByteReader;
use async_trait::async_trait;
use bytes::Bytes;
use std::io::{self, SeekFrom};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// Finite binary resource of known size that can be read by range
#[async_trait]
pub trait SliceSource: Send {
    /// Total size in bytes
    fn size(&self) -> u64;

    /// Read `[start, end)` fully into memory
    ///
    /// The range is clamped to the end of the resource, so a window reaching
    /// past the end returns the bytes that exist.
    async fn read_slice(&mut self, start: u64, end: u64) -> io::Result<Bytes>;
}

#[async_trait]
impl<S: SliceSource + ?Sized> SliceSource for Box<S> {
    fn size(&self) -> u64 {
        (**self).size()
    }

    async fn read_slice(&mut self, start: u64, end: u64) -> io::Result<Bytes> {
        (**self).read_slice(start, end).await
    }
}

/// Clamp a requested range to a resource of `size` bytes
pub(crate) fn clamp_range(start: u64, end: u64, size: u64) -> (u64, u64) {
    let end = end.min(size);
    (start.min(end), end)
}

/// In-memory resource
#[derive(Debug, Clone)]
pub struct MemorySource {
    data: Bytes,
}

impl MemorySource {
    /// Wrap bytes
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }
}

#[async_trait]
impl SliceSource for MemorySource {
    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    async fn read_slice(&mut self, start: u64, end: u64) -> io::Result<Bytes> {
        let (start, end) = clamp_range(start, end, self.size());
        Ok(self.data.slice(start as usize..end as usize))
    }
}

/// Local file read through tokio
#[derive(Debug)]
pub struct FsSource {
    file: File,
    size: u64,
}

impl FsSource {
    /// Open a file and record its size
    pub async fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path.as_ref()).await?;
        let size = file.metadata().await?.len();
        Ok(Self { file, size })
    }
}

#[async_trait]
impl SliceSource for FsSource {
    fn size(&self) -> u64 {
        self.size
    }

    async fn read_slice(&mut self, start: u64, end: u64) -> io::Result<Bytes> {
        let (start, end) = clamp_range(start, end, self.size);
        self.file.seek(SeekFrom::Start(start)).await?;

        let mut buf = Vec::with_capacity((end - start) as usize);
        (&mut self.file).take(end - start).read_to_end(&mut buf).await?;
        Ok(Bytes::from(buf))
    }
}

/// Sequential [`ByteReader`] over a [`SliceSource`]
///
/// Reads consecutive blocks of `block_size` bytes until the declared size is
/// consumed.
pub struct SliceReader<S> {
    source: Option<S>,
    offset: u64,
    block_size: u64,
}

impl<S: SliceSource> SliceReader<S> {
    /// Wrap a source
    ///
    /// # Panics
    ///
    /// Panics if `block_size` is zero.
    pub fn new(source: S, block_size: usize) -> Self {
        assert!(block_size > 0, "block size must be greater than zero");
        Self {
            source: Some(source),
            offset: 0,
            block_size: block_size as u64,
        }
    }

    /// Bytes delivered so far
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

#[async_trait]
impl<S: SliceSource> ByteReader for SliceReader<S> {
    async fn read(&mut self) -> io::Result<Option<Bytes>> {
        let Some(source) = self.source.as_mut() else {
            return Ok(None);
        };
        if self.offset >= source.size() {
            self.source = None;
            return Ok(None);
        }

        let end = self.offset.saturating_add(self.block_size);
        let block = source.read_slice(self.offset, end).await?;
        if block.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("source ended at offset {}", self.offset),
            ));
        }
        self.offset += block.len() as u64;
        Ok(Some(block))
    }

    async fn cancel(&mut self) -> io::Result<()> {
        self.source = None;
        Ok(())
    }
}
