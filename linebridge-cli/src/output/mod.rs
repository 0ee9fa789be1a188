//! Output destination handling

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Open the output file, or standard output when none is given
pub fn open(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_open_file_output() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");

        let mut out = open(Some(&path)).unwrap();
        out.write_all(b"hello").unwrap();
        out.flush().unwrap();
        drop(out);

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_open_missing_directory() {
        let path = Path::new("/nonexistent/dir/out.txt");
        let err = open(Some(path)).err().unwrap();
        assert!(err.to_string().contains("Failed to create output file"));
    }
}
