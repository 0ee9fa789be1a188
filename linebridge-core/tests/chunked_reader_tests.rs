//! Integration tests for the chunked reader

use async_trait::async_trait;
use bytes::Bytes;
use linebridge_core::*;
use std::cell::{Cell, RefCell};
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory source failing on a chosen window (1-based)
struct FailingSource {
    inner: MemorySource,
    fail_on: usize,
    reads: Arc<AtomicUsize>,
}

#[async_trait]
impl SliceSource for FailingSource {
    fn size(&self) -> u64 {
        self.inner.size()
    }

    async fn read_slice(&mut self, start: u64, end: u64) -> io::Result<Bytes> {
        let n = self.reads.fetch_add(1, Ordering::SeqCst) + 1;
        if n == self.fail_on {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "window refused"));
        }
        self.inner.read_slice(start, end).await
    }
}

/// Source whose data is shorter than the size it declares
struct TruncatedSource {
    data: Bytes,
    declared: u64,
}

#[async_trait]
impl SliceSource for TruncatedSource {
    fn size(&self) -> u64 {
        self.declared
    }

    async fn read_slice(&mut self, start: u64, end: u64) -> io::Result<Bytes> {
        let len = self.data.len() as u64;
        let end = end.min(len);
        let start = start.min(end);
        Ok(self.data.slice(start as usize..end as usize))
    }
}

/// Source ignoring the requested window and returning everything
struct GreedySource(Bytes);

#[async_trait]
impl SliceSource for GreedySource {
    fn size(&self) -> u64 {
        self.0.len() as u64
    }

    async fn read_slice(&mut self, _start: u64, _end: u64) -> io::Result<Bytes> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Default)]
struct Recorded {
    chunks: Vec<Chunk>,
    done: Vec<Option<String>>,
    chunks_before_done: Option<usize>,
}

async fn run<S: SliceSource>(reader: ChunkedFileReader, source: S) -> Recorded {
    let chunks = RefCell::new(Vec::new());
    let done = RefCell::new(Vec::new());
    let chunks_before_done = Cell::new(None);

    reader
        .read(
            source,
            |chunk| chunks.borrow_mut().push(chunk),
            |err: Option<BridgeError>| {
                chunks_before_done.set(Some(chunks.borrow().len()));
                done.borrow_mut().push(err.map(|e| e.to_string()));
            },
        )
        .await;

    Recorded {
        chunks: chunks.into_inner(),
        done: done.into_inner(),
        chunks_before_done: chunks_before_done.get(),
    }
}

#[tokio::test]
async fn test_offsets_strictly_increase_to_size() {
    let data: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
    let reader = ChunkedFileReader::with_window_size(3000).unwrap();
    let recorded = run(reader, MemorySource::new(data.clone())).await;

    let offsets: Vec<u64> = recorded.chunks.iter().map(|c| c.offset).collect();
    assert_eq!(offsets, vec![3000, 6000, 9000, 10_000]);
    assert!(recorded.chunks.iter().all(|c| c.total == 10_000));
    assert_eq!(recorded.done, vec![None]);
    assert_eq!(recorded.chunks_before_done, Some(4));

    let joined: Vec<u8> = recorded
        .chunks
        .iter()
        .flat_map(|c| c.data.iter().copied())
        .collect();
    assert_eq!(joined, data);
}

#[tokio::test]
async fn test_exact_multiple_of_window() {
    let reader = ChunkedFileReader::with_window_size(4).unwrap();
    let recorded = run(reader, MemorySource::new(&b"abcdefgh"[..])).await;

    let offsets: Vec<u64> = recorded.chunks.iter().map(|c| c.offset).collect();
    assert_eq!(offsets, vec![4, 8]);
    assert_eq!(recorded.done, vec![None]);
}

#[tokio::test]
async fn test_default_window_reads_small_file_in_one_chunk() {
    let recorded = run(ChunkedFileReader::new(), MemorySource::new(&b"tiny"[..])).await;

    assert_eq!(recorded.chunks.len(), 1);
    assert_eq!(recorded.chunks[0].data, Bytes::from_static(b"tiny"));
    assert_eq!(recorded.chunks[0].offset, 4);
    assert_eq!(recorded.done, vec![None]);
}

#[tokio::test]
async fn test_failure_at_window_k() {
    for k in 1..=3usize {
        let reads = Arc::new(AtomicUsize::new(0));
        let source = FailingSource {
            inner: MemorySource::new(vec![7u8; 40]),
            fail_on: k,
            reads: Arc::clone(&reads),
        };
        let reader = ChunkedFileReader::with_window_size(10).unwrap();
        let recorded = run(reader, source).await;

        assert_eq!(recorded.chunks.len(), k - 1, "window {k}");
        assert_eq!(recorded.done.len(), 1);
        assert!(recorded.done[0]
            .as_deref()
            .is_some_and(|msg| msg.contains("window refused")));
        assert_eq!(reads.load(Ordering::SeqCst), k, "no reads after the failure");
    }
}

#[tokio::test]
async fn test_truncated_source_reports_unexpected_eof() {
    let source = TruncatedSource {
        data: Bytes::from_static(b"abcdef"),
        declared: 10,
    };
    let reader = ChunkedFileReader::with_window_size(4).unwrap();
    let mut chunks = reader.chunks(source);

    assert_eq!(chunks.next_chunk().await.unwrap().unwrap().offset, 4);
    assert_eq!(chunks.next_chunk().await.unwrap().unwrap().offset, 6);
    let err = chunks.next_chunk().await.unwrap_err();
    assert!(matches!(err, BridgeError::UnexpectedEof { offset: 6, size: 10 }));
    assert!(chunks.next_chunk().await.unwrap().is_none());
}

#[tokio::test]
async fn test_oversized_slice_is_rejected() {
    let reader = ChunkedFileReader::with_window_size(2).unwrap();
    let recorded = run(reader, GreedySource(Bytes::from_static(b"abcdef"))).await;

    assert!(recorded.chunks.is_empty());
    assert_eq!(recorded.done.len(), 1);
    assert!(recorded.done[0]
        .as_deref()
        .is_some_and(|msg| msg.contains("returned 6 bytes")));
}

#[tokio::test]
async fn test_reads_local_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[b'x'; 2500]).unwrap();
    file.flush().unwrap();

    let source = FsSource::open(file.path()).await.unwrap();
    let reader = ChunkedFileReader::with_window_size(1024).unwrap();
    let recorded = run(reader, source).await;

    let sizes: Vec<usize> = recorded.chunks.iter().map(|c| c.data.len()).collect();
    assert_eq!(sizes, vec![1024, 1024, 452]);
    assert!(recorded.chunks.last().unwrap().is_last());
    assert_eq!(recorded.done, vec![None]);
}

#[tokio::test]
async fn test_path_source_through_slice_conversion() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"0123456789").unwrap();
    file.flush().unwrap();

    let source = Source::from_path(file.path()).into_slice_source().await.unwrap();
    let reader = ChunkedFileReader::from_options(&ChunkOptions::default().window_size(6)).unwrap();
    let recorded = run(reader, source).await;

    let offsets: Vec<u64> = recorded.chunks.iter().map(|c| c.offset).collect();
    assert_eq!(offsets, vec![6, 10]);
}
