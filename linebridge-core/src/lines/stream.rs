//! Lazy line sequence over a [`ByteReader`]

use crate::{
    config::{LineOptions, OutputMode},
    decode::TextDecoder,
    error::Result,
    lines::splitter::LineSplitter,
    reader::ByteReader,
};
use futures::Stream;
use std::collections::VecDeque;
use tracing::{debug, trace, warn};

/// Why a [`LineStream`] stopped reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The reader reported end of input
    EndOfInput,
    /// The line cap was reached
    CapReached,
    /// A read failed
    ReadFailed,
}

/// Result of [`to_line_stream`], selected by [`OutputMode`]
pub enum LineOutput<R> {
    /// Lazily produced lines
    Lines(LineStream<R>),
    /// Decoded text consumed before reading stopped
    Text(String),
}

impl<R> std::fmt::Debug for LineOutput<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineOutput::Lines(stream) => f.debug_tuple("Lines").field(stream).finish(),
            LineOutput::Text(text) => f
                .debug_tuple("Text")
                .field(&format!("<{} bytes>", text.len()))
                .finish(),
        }
    }
}

/// Adapt a byte reader into lines or accumulated text
///
/// Options are validated before the first read. In [`OutputMode::Text`] the
/// reader is driven to termination (end of input or cap) before returning.
pub async fn to_line_stream<R: ByteReader>(
    reader: R,
    options: &LineOptions,
) -> Result<LineOutput<R>> {
    let stream = LineStream::new(reader, options)?;
    match options.mode {
        OutputMode::Lines => Ok(LineOutput::Lines(stream)),
        OutputMode::Text => Ok(LineOutput::Text(stream.read_to_text().await?)),
    }
}

/// Finite, non-restartable sequence of `\r\n` terminated lines
///
/// Blocks are pulled from the reader only when a line is requested and none
/// is pending. A trailing partial line at end of input is dropped. The reader
/// is cancelled on every exit path. Dropping the stream before it
/// terminates releases the reader without calling
/// [`ByteReader::cancel`], since cancelling is asynchronous.
pub struct LineStream<R> {
    reader: R,
    decoder: TextDecoder,
    splitter: LineSplitter,
    pending: VecDeque<String>,
    cap: Option<usize>,
    emitted: usize,
    text: String,
    termination: Option<Termination>,
}

impl<R> std::fmt::Debug for LineStream<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineStream")
            .field("cap", &self.cap)
            .field("emitted", &self.emitted)
            .field("pending", &self.pending.len())
            .field("termination", &self.termination)
            .finish()
    }
}

impl<R: ByteReader> LineStream<R> {
    /// Create a stream with a fresh decoder for `options.encoding`
    pub fn new(reader: R, options: &LineOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            reader,
            decoder: TextDecoder::for_label(&options.encoding)?,
            splitter: LineSplitter::new(),
            pending: VecDeque::new(),
            cap: options.cap(),
            emitted: 0,
            text: String::new(),
            termination: None,
        })
    }

    /// Number of lines handed out so far
    pub fn lines_emitted(&self) -> usize {
        self.emitted
    }

    /// Why reading stopped, `None` while still reading
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Next line, or `None` once the sequence is over
    pub async fn next_line(&mut self) -> Result<Option<String>> {
        loop {
            if self.cap_reached() {
                return Ok(None);
            }

            if let Some(line) = self.pending.pop_front() {
                self.emitted += 1;
                if self.cap_reached() {
                    debug!(lines = self.emitted, "line cap reached");
                    self.pending.clear();
                    self.terminate(Termination::CapReached).await;
                }
                return Ok(Some(line));
            }

            if self.termination.is_some() {
                return Ok(None);
            }

            self.fill().await?;
        }
    }

    /// Drive the reader to termination and return the accumulated text
    pub async fn read_to_text(mut self) -> Result<String> {
        while self.next_line().await?.is_some() {}
        Ok(self.text)
    }

    /// Drive the reader to termination and collect the emitted lines
    pub async fn collect_lines(mut self) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        while let Some(line) = self.next_line().await? {
            lines.push(line);
        }
        Ok(lines)
    }

    /// Expose the sequence as a `futures` stream
    ///
    /// The stream ends after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<String>> {
        futures::stream::unfold(Some(self), |state| async move {
            let mut lines = state?;
            match lines.next_line().await {
                Ok(Some(line)) => Some((Ok(line), Some(lines))),
                Ok(None) => None,
                Err(err) => Some((Err(err), None)),
            }
        })
    }

    async fn fill(&mut self) -> Result<()> {
        let block = match self.reader.read().await {
            Ok(block) => block,
            Err(err) => {
                self.terminate(Termination::ReadFailed).await;
                return Err(err.into());
            }
        };

        let Some(block) = block else {
            let tail = self.decoder.finish();
            self.accept(&tail);
            if self.decoder.had_errors() {
                warn!(
                    encoding = self.decoder.encoding_name(),
                    "malformed input replaced while decoding"
                );
            }
            let dropped = std::mem::take(&mut self.splitter).into_remainder();
            if !dropped.is_empty() {
                debug!(bytes = dropped.len(), "dropping unterminated final line");
            }
            self.terminate(Termination::EndOfInput).await;
            return Ok(());
        };

        trace!(bytes = block.len(), "read block");
        let decoded = self.decoder.decode(&block);
        self.accept(&decoded);
        Ok(())
    }

    fn cap_reached(&self) -> bool {
        self.cap.is_some_and(|cap| self.emitted >= cap)
    }

    fn accept(&mut self, decoded: &str) {
        if decoded.is_empty() {
            return;
        }
        self.text.push_str(decoded);
        self.pending.extend(self.splitter.push(decoded));
    }

    async fn terminate(&mut self, termination: Termination) {
        if self.termination.is_some() {
            return;
        }
        self.termination = Some(termination);
        if let Err(err) = self.reader.cancel().await {
            debug!(error = %err, "ignoring reader cancel failure");
        }
    }
}
