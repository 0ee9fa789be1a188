//! Incremental byte readers
//!
//! [`ByteReader`] is the pull-based reader the line adapter consumes: each
//! call to [`ByteReader::read`] yields the next opaque block, `None` marks the
//! end of input, and [`ByteReader::cancel`] releases interest in the rest.

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Pull-based reader delivering blocks of arbitrary size
#[async_trait]
pub trait ByteReader: Send {
    /// Read the next block; `Ok(None)` once the input is exhausted
    async fn read(&mut self) -> io::Result<Option<Bytes>>;

    /// Stop reading and release the underlying resource
    ///
    /// Advisory: callers ignore failures.
    async fn cancel(&mut self) -> io::Result<()>;
}

#[async_trait]
impl<R: ByteReader + ?Sized> ByteReader for Box<R> {
    async fn read(&mut self) -> io::Result<Option<Bytes>> {
        (**self).read().await
    }

    async fn cancel(&mut self) -> io::Result<()> {
        (**self).cancel().await
    }
}

/// Adapter over a `futures` stream of byte blocks
pub struct StreamReader<S> {
    stream: Option<S>,
}

impl<S> StreamReader<S>
where
    S: Stream<Item = io::Result<Bytes>> + Send + Unpin,
{
    /// Wrap a stream
    pub fn new(stream: S) -> Self {
        Self {
            stream: Some(stream),
        }
    }

    /// Whether the stream was released by `cancel`
    pub fn is_cancelled(&self) -> bool {
        self.stream.is_none()
    }
}

#[async_trait]
impl<S> ByteReader for StreamReader<S>
where
    S: Stream<Item = io::Result<Bytes>> + Send + Unpin,
{
    async fn read(&mut self) -> io::Result<Option<Bytes>> {
        match self.stream.as_mut() {
            Some(stream) => stream.next().await.transpose(),
            None => Ok(None),
        }
    }

    async fn cancel(&mut self) -> io::Result<()> {
        self.stream = None;
        Ok(())
    }
}

/// Adapter over a tokio `AsyncRead`, reading up to `block_size` bytes per call
pub struct AsyncReadReader<R> {
    inner: Option<R>,
    block_size: usize,
}

impl<R> AsyncReadReader<R>
where
    R: AsyncRead + Send + Unpin,
{
    /// Wrap a reader
    ///
    /// # Panics
    ///
    /// Panics if `block_size` is zero.
    pub fn new(inner: R, block_size: usize) -> Self {
        assert!(block_size > 0, "block size must be greater than zero");
        Self {
            inner: Some(inner),
            block_size,
        }
    }
}

#[async_trait]
impl<R> ByteReader for AsyncReadReader<R>
where
    R: AsyncRead + Send + Unpin,
{
    async fn read(&mut self) -> io::Result<Option<Bytes>> {
        let Some(inner) = self.inner.as_mut() else {
            return Ok(None);
        };

        let mut buf = BytesMut::with_capacity(self.block_size);
        let n = inner.read_buf(&mut buf).await?;
        if n == 0 {
            self.inner = None;
            return Ok(None);
        }
        Ok(Some(buf.freeze()))
    }

    async fn cancel(&mut self) -> io::Result<()> {
        self.inner = None;
        Ok(())
    }
}
