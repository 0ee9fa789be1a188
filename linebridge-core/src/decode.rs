//! Incremental byte-to-text decoding

use crate::error::{BridgeError, Result};
use encoding_rs::{CoderResult, Decoder, Encoding};

/// Stateful decoder that keeps partial byte sequences between calls
///
/// Build one per adaptation call; state never leaks across calls.
pub struct TextDecoder {
    encoding: &'static Encoding,
    decoder: Decoder,
    had_errors: bool,
}

impl std::fmt::Debug for TextDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextDecoder")
            .field("encoding", &self.encoding.name())
            .field("had_errors", &self.had_errors)
            .finish()
    }
}

impl TextDecoder {
    /// UTF-8 decoder
    pub fn utf8() -> Self {
        Self::new(encoding_rs::UTF_8)
    }

    /// Decoder for a WHATWG encoding label such as `"utf-8"` or `"latin1"`
    pub fn for_label(label: &str) -> Result<Self> {
        Encoding::for_label(label.as_bytes())
            .map(Self::new)
            .ok_or_else(|| BridgeError::UnknownEncoding {
                label: label.to_string(),
            })
    }

    fn new(encoding: &'static Encoding) -> Self {
        Self {
            encoding,
            decoder: encoding.new_decoder_with_bom_removal(),
            had_errors: false,
        }
    }

    /// Canonical name of the encoding
    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Whether malformed input was replaced with U+FFFD so far
    pub fn had_errors(&self) -> bool {
        self.had_errors
    }

    /// Decode one block, holding back an incomplete trailing sequence
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        self.decode_inner(bytes, false)
    }

    /// Flush whatever is held back; the decoder must not be used afterwards
    pub fn finish(&mut self) -> String {
        self.decode_inner(&[], true)
    }

    fn decode_inner(&mut self, bytes: &[u8], last: bool) -> String {
        let capacity = self
            .decoder
            .max_utf8_buffer_length(bytes.len())
            .unwrap_or(bytes.len());
        let mut out = String::with_capacity(capacity);
        let mut src = bytes;

        loop {
            let (result, read, had_errors) = self.decoder.decode_to_string(src, &mut out, last);
            self.had_errors |= had_errors;
            src = &src[read..];
            match result {
                CoderResult::InputEmpty => break,
                CoderResult::OutputFull => out.reserve(src.len().max(4) * 3),
            }
        }

        out
    }
}
