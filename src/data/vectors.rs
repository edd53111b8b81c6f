// ============================================================
// Layer 4 — Pretrained Word Vectors
// ============================================================
// Reads a pretrained embedding table in the plain-text GloVe
// format: one entry per line, a token followed by its vector
// components, all whitespace-separated.
//
//   movie 0.30824 -0.14342 0.03482 ...
//
// The file is read exactly once, at vocabulary-build time. A
// malformed line is logged and skipped rather than failing the
// whole load; a missing file is an error.
//
// Reference: Pennington et al. (2014) GloVe
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// An in-memory token → vector table of a fixed dimension.
pub struct PretrainedVectors {
    dim: usize,
    table: HashMap<String, Vec<f32>>,
}

impl PretrainedVectors {
    /// Load a GloVe-format text file, keeping only entries whose
    /// vector has exactly `dim` components.
    pub fn load(path: impl AsRef<Path>, dim: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| {
            format!("Cannot open pretrained vectors '{}'", path.display())
        })?;

        let mut table = HashMap::new();
        let mut skipped = 0usize;

        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line = line.with_context(|| {
                format!("Read error in '{}' at line {}", path.display(), line_no + 1)
            })?;

            let mut fields = line.split_whitespace();
            let token = match fields.next() {
                Some(t) => t,
                None => continue, // blank line
            };

            let values: Vec<f32> = fields.filter_map(|f| f.parse().ok()).collect();
            if values.len() != dim {
                tracing::warn!(
                    "Skipping line {} of '{}': expected {} components, got {}",
                    line_no + 1,
                    path.display(),
                    dim,
                    values.len()
                );
                skipped += 1;
                continue;
            }

            table.insert(token.to_string(), values);
        }

        tracing::info!(
            "Loaded {} pretrained vectors (dim {}) from '{}', {} lines skipped",
            table.len(),
            dim,
            path.display(),
            skipped
        );

        Ok(Self { dim, table })
    }

    /// The vector for a token, if the pretrained table has one.
    pub fn get(&self, token: &str) -> Option<&[f32]> {
        self.table.get(token).map(|v| v.as_slice())
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_vectors(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_well_formed_entries() {
        let f = write_vectors("movie 0.1 0.2 0.3\nfilm 0.4 0.5 0.6\n");
        let v = PretrainedVectors::load(f.path(), 3).unwrap();
        assert_eq!(v.len(), 2);
        assert_eq!(v.get("movie"), Some([0.1f32, 0.2, 0.3].as_slice()));
    }

    #[test]
    fn skips_wrong_dimension_lines() {
        let f = write_vectors("movie 0.1 0.2 0.3\nbroken 0.4 0.5\n");
        let v = PretrainedVectors::load(f.path(), 3).unwrap();
        assert_eq!(v.len(), 1);
        assert!(v.get("broken").is_none());
    }

    #[test]
    fn missing_file_is_an_error() {
        let r = PretrainedVectors::load("does/not/exist.txt", 3);
        assert!(r.is_err());
    }
}
