//! Line splitting over incrementally decoded text

/// Terminator appended to every emitted line
pub const LINE_TERMINATOR: &str = "\r\n";

/// Splits text pushed in arbitrary pieces into complete lines
///
/// Recognises `\r\n`, `\r` and `\n`. At most one partial line is held between
/// pushes. A piece ending in a lone `\r` completes its line at once; a `\n`
/// starting the next piece is then treated as the rest of that terminator.
#[derive(Debug, Default)]
pub struct LineSplitter {
    carry: String,
    skip_lf: bool,
}

impl LineSplitter {
    /// Create an empty splitter
    pub fn new() -> Self {
        Self::default()
    }

    /// Partial line held since the last terminator
    pub fn carry(&self) -> &str {
        &self.carry
    }

    /// Push decoded text, returning the lines it completes
    pub fn push(&mut self, text: &str) -> Vec<String> {
        let mut text = text;
        if self.skip_lf && !text.is_empty() {
            self.skip_lf = false;
            if let Some(rest) = text.strip_prefix('\n') {
                text = rest;
            }
        }

        let bytes = text.as_bytes();
        let mut lines = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'\n' => {
                    lines.push(self.complete(&text[start..i]));
                    i += 1;
                    start = i;
                }
                b'\r' => {
                    lines.push(self.complete(&text[start..i]));
                    match bytes.get(i + 1) {
                        Some(b'\n') => i += 2,
                        Some(_) => i += 1,
                        None => {
                            self.skip_lf = true;
                            i += 1;
                        }
                    }
                    start = i;
                }
                _ => i += 1,
            }
        }

        self.carry.push_str(&text[start..]);
        lines
    }

    /// Consume the splitter, returning the partial line that was never completed
    pub fn into_remainder(self) -> String {
        self.carry
    }

    fn complete(&mut self, segment: &str) -> String {
        let mut line = std::mem::take(&mut self.carry);
        line.push_str(segment);
        line.push_str(LINE_TERMINATOR);
        line
    }
}
