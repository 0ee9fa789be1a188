//! Chunks command implementation

use crate::commands::lines::{kib_to_bytes, open_input};
use crate::progress::ProgressReporter;
use anyhow::{bail, Context, Result};
use clap::Args;
use linebridge_core::config::DEFAULT_BLOCK_SIZE;
use linebridge_core::{ChunkOptions, ChunkedFileReader, NativeFileDetector, ReadPath};
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the chunks command
#[derive(Debug, Args)]
pub struct ChunksArgs {
    /// Input file
    #[arg(short, long, value_name = "FILE")]
    pub input: String,

    /// Window size in KiB (default: 4096)
    #[arg(short, long, value_name = "KB")]
    pub window_kb: Option<usize>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Copy the windows to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Totals reported once the whole input was read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSummary {
    /// Windows delivered
    pub chunks: usize,
    /// Bytes delivered
    pub bytes: u64,
}

impl ChunksArgs {
    /// Execute the chunks command
    pub async fn execute(&self, quiet: bool) -> Result<()> {
        let options = self.resolve_options()?;
        let reader = ChunkedFileReader::from_options(&options)?;
        log::info!(
            "Reading {} in windows of {} bytes",
            self.input,
            reader.window_size()
        );

        let source = open_input(&self.input, DEFAULT_BLOCK_SIZE)
            .await?
            .read_path(&NativeFileDetector, DEFAULT_BLOCK_SIZE)
            .await
            .with_context(|| format!("Failed to open input: {}", self.input))?;
        let source = match source {
            ReadPath::Slices(source) => source,
            ReadPath::Blocks(_) => bail!(
                "Failed to open input: {}: an incremental reader cannot be read by slices",
                self.input
            ),
        };

        let mut out = match &self.output {
            Some(path) => Some(crate::output::open(Some(path))?),
            None => None,
        };

        let mut progress = ProgressReporter::new(quiet);
        let mut chunks = reader.chunks(source);
        progress.init_bytes(chunks.total(), &self.input)?;

        let mut summary = ChunkSummary {
            chunks: 0,
            bytes: 0,
        };
        loop {
            let chunk = match chunks.next_chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(err) => {
                    progress.abandon();
                    return Err(err).with_context(|| format!("Failed to read {}", self.input));
                }
            };

            if let Some(out) = out.as_mut() {
                out.write_all(&chunk.data)?;
            }
            summary.chunks += 1;
            summary.bytes += chunk.data.len() as u64;
            progress.window_read(chunk.offset);
            log::debug!(
                "Window {} ends at {}/{}",
                summary.chunks,
                chunk.offset,
                chunk.total
            );
        }
        progress.finish();

        if let Some(mut out) = out {
            out.flush()?;
        }
        println!(
            "Read {} chunk(s), {} bytes from {}",
            summary.chunks, summary.bytes, self.input
        );

        Ok(())
    }

    /// Merge the configuration file with command-line overrides
    pub fn resolve_options(&self) -> Result<ChunkOptions> {
        let mut options = crate::load_config(self.config.as_deref())?.chunks;
        if let Some(window_kb) = self.window_kb {
            options.window_size = kib_to_bytes(window_kb, "window size")?;
        }
        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_window_override() {
        let args = ChunksArgs {
            input: "data.bin".to_string(),
            window_kb: Some(8),
            config: None,
            output: None,
        };
        assert_eq!(args.resolve_options().unwrap().window_size, 8192);
    }

    #[test]
    fn test_resolve_rejects_zero_window() {
        let args = ChunksArgs {
            input: "data.bin".to_string(),
            window_kb: Some(0),
            config: None,
            output: None,
        };
        assert!(args.resolve_options().is_err());
    }

    #[test]
    fn test_resolve_rejects_oversized_window() {
        let args = ChunksArgs {
            input: "data.bin".to_string(),
            window_kb: Some(usize::MAX),
            config: None,
            output: None,
        };
        let err = args.resolve_options().unwrap_err();
        assert!(err.to_string().contains("window size"));
    }
}
