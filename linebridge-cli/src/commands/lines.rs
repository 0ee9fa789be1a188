//! Lines command implementation

use anyhow::{anyhow, Context, Result};
use clap::Args;
use linebridge_core::{
    to_line_stream, FsSource, LineOptions, LineOutput, NativeFileDetector, OutputMode, Source,
};
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the lines command
#[derive(Debug, Args)]
pub struct LinesArgs {
    /// Input file, or `-` for standard input
    #[arg(short, long, value_name = "FILE")]
    pub input: String,

    /// Maximum number of lines to print (0 = all)
    #[arg(short = 'n', long, value_name = "N")]
    pub max_lines: Option<usize>,

    /// Print the decoded text consumed instead of normalized lines
    #[arg(long)]
    pub text: bool,

    /// Text encoding label (e.g. utf-8, latin1, shift_jis)
    #[arg(short, long, value_name = "LABEL")]
    pub encoding: Option<String>,

    /// Read block size in KiB
    #[arg(long, value_name = "KB")]
    pub block_kb: Option<usize>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl LinesArgs {
    /// Execute the lines command
    pub async fn execute(&self) -> Result<()> {
        let options = self.resolve_options()?;
        log::info!("Reading lines from {}", self.input);
        log::debug!("Line options: {:?}", options);

        let reader = open_input(&self.input, options.block_size)
            .await?
            .read_path(&NativeFileDetector, options.block_size)
            .await
            .with_context(|| format!("Failed to open input: {}", self.input))?
            .into_byte_reader(options.block_size);

        let mut out = crate::output::open(self.output.as_deref())?;
        match to_line_stream(reader, &options).await? {
            LineOutput::Lines(mut lines) => {
                while let Some(line) = lines.next_line().await? {
                    out.write_all(line.as_bytes())?;
                }
                log::info!("Emitted {} lines", lines.lines_emitted());
            }
            LineOutput::Text(text) => {
                out.write_all(text.as_bytes())?;
                log::info!("Emitted {} bytes of text", text.len());
            }
        }
        out.flush()?;

        Ok(())
    }

    /// Merge the configuration file with command-line overrides
    pub fn resolve_options(&self) -> Result<LineOptions> {
        let mut options = crate::load_config(self.config.as_deref())?.lines;

        if let Some(max_lines) = self.max_lines {
            options.max_lines = max_lines;
        }
        if self.text {
            options.mode = OutputMode::Text;
        }
        if let Some(encoding) = &self.encoding {
            options.encoding = encoding.clone();
        }
        if let Some(block_kb) = self.block_kb {
            options.block_size = kib_to_bytes(block_kb, "block size")?;
        }

        options.validate()?;
        Ok(options)
    }
}

/// Open an input argument; `-` is standard input, anything else a local file
pub async fn open_input(input: &str, block_size: usize) -> Result<Source> {
    if input == "-" {
        return Ok(Source::stdin(block_size));
    }
    let file = FsSource::open(input)
        .await
        .with_context(|| format!("Failed to open input: {input}"))?;
    Ok(Source::from_file(file))
}

/// Convert a size given in KiB to bytes
pub fn kib_to_bytes(kib: usize, what: &str) -> Result<usize> {
    kib.checked_mul(1024)
        .ok_or_else(|| anyhow!("{what} of {kib} KiB is too large"))
}
