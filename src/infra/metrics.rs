// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records the average training loss per epoch to a CSV file.
//
// Output file: <checkpoint_dir>/metrics.csv
//
// Example CSV output:
//   epoch,train_loss
//   1,0.693100
//   2,0.612400
//   ...
//
// The fine-grained 32-batch loss windows stay on the console;
// this file keeps one row per epoch for plotting the learning
// curve afterwards.
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};
use serde::{Deserialize, Serialize};

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Average BCE-with-logits loss over all training batches
    pub train_loss: f64,
}

impl EpochMetrics {
    pub fn new(epoch: usize, train_loss: f64) -> Self {
        Self { epoch, train_loss }
    }
}

/// Appends epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header if the file doesn't exist yet, so an
    /// interrupted run can be resumed without losing earlier rows.
    pub fn new(dir: impl Into<String>) -> Result<Self> {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,train_loss")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new CSV row.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;

        writeln!(f, "{},{:.6}", m.epoch, m.train_loss)?;

        tracing::debug!("Logged epoch {} metrics: train_loss={:.4}", m.epoch, m.train_loss);
        Ok(())
    }

    /// Return the path to the metrics CSV file
    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path().to_str().unwrap()).unwrap();

        logger.log(&EpochMetrics::new(1, 0.6931)).unwrap();
        logger.log(&EpochMetrics::new(2, 0.5123)).unwrap();

        let content = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "epoch,train_loss");
        assert_eq!(lines[1], "1,0.693100");
        assert_eq!(lines[2], "2,0.512300");
    }

    #[test]
    fn appends_across_logger_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_str().unwrap();

        MetricsLogger::new(path)
            .unwrap()
            .log(&EpochMetrics::new(1, 0.7))
            .unwrap();
        MetricsLogger::new(path)
            .unwrap()
            .log(&EpochMetrics::new(2, 0.6))
            .unwrap();

        let content = fs::read_to_string(dir.path().join("metrics.csv")).unwrap();
        assert_eq!(content.lines().count(), 3);
    }
}
