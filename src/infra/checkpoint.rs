// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores model weights using Burn's CompactRecorder.
//
// What gets saved:
//   1. model.mpk.gz       — all trained parameters, written once
//                           after the final epoch. The pretrained
//                           embedding table and the optimiser
//                           state are NOT part of the checkpoint.
//   2. train_config.json  — the hyperparameters of the run, so a
//                           later process can rebuild the same
//                           architecture before loading weights.
//
// Burn's CompactRecorder:
//   - Serialises model parameters to MessagePack format
//   - Compresses with gzip
//   - Type-safe: loading fails if the architecture doesn't match
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
    tensor::backend::AutodiffBackend,
};

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::SentimentNet;

/// File stem of the single weights file (recorder adds .mpk.gz)
const MODEL_FILE: &str = "model";

pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a new CheckpointManager, creating the directory if
    /// it doesn't already exist.
    pub fn new(dir: impl Into<String>) -> Self {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    /// Save the trained model parameters to the fixed file path.
    pub fn save_model<B: AutodiffBackend>(&self, model: &SentimentNet<B>) -> Result<()> {
        let path = self.dir.join(MODEL_FILE);

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| {
                format!("Failed to save checkpoint to '{}'", path.display())
            })?;

        tracing::debug!("Saved checkpoint to '{}'", path.display());
        Ok(())
    }

    /// Load model weights from the checkpoint into a freshly built
    /// model of the same architecture.
    pub fn load_model<B: Backend>(
        &self,
        model:  SentimentNet<B>,
        device: &B::Device,
    ) -> Result<SentimentNet<B>> {
        let path = self.dir.join(MODEL_FILE);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!(
                    "Cannot load checkpoint '{}'. Have you trained the model first?",
                    path.display()
                )
            })?;

        Ok(model.load_record(record))
    }

    /// Persist the training configuration to JSON.
    /// Must happen before training starts so a later prediction run
    /// can rebuild the exact model architecture.
    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.dir.join("train_config.json");
        let json = serde_json::to_string_pretty(cfg)?;

        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }

    /// Load the training configuration back from JSON.
    pub fn load_config(&self) -> Result<TrainConfig> {
        let path = self.dir.join("train_config.json");

        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read config from '{}'. \
                     Make sure you have run 'train' before 'predict'.",
                    path.display()
                )
            })?;

        Ok(serde_json::from_str(&json)?)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::model::SentimentNetConfig;

    type TestAutodiff = burn::backend::Autodiff<burn::backend::NdArray>;
    type TestInner    = burn::backend::NdArray;

    #[test]
    fn config_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = CheckpointManager::new(dir.path().to_str().unwrap());

        let cfg = TrainConfig::default();
        mgr.save_config(&cfg).unwrap();
        let loaded = mgr.load_config().unwrap();

        assert_eq!(loaded.hidden, cfg.hidden);
        assert_eq!(loaded.num_layers, cfg.num_layers);
        assert_eq!(loaded.epochs, cfg.epochs);
        assert!((loaded.lr - cfg.lr).abs() < f64::EPSILON);
    }

    #[test]
    fn load_without_checkpoint_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = CheckpointManager::new(dir.path().to_str().unwrap());

        let device = Default::default();
        let model: SentimentNet<TestInner> =
            SentimentNetConfig::new(4, 6, 1, 5, 0.0).init(&device);
        assert!(mgr.load_model(model, &device).is_err());
    }

    #[test]
    fn saved_weights_survive_a_round_trip() {
        use burn::module::AutodiffModule;
        use burn::prelude::*;

        let dir = tempfile::tempdir().unwrap();
        let mgr = CheckpointManager::new(dir.path().to_str().unwrap());

        let device = Default::default();
        let trained: SentimentNet<TestAutodiff> =
            SentimentNetConfig::new(4, 6, 2, 5, 0.0).init(&device);
        mgr.save_model(&trained).unwrap();

        let fresh: SentimentNet<TestInner> =
            SentimentNetConfig::new(4, 6, 2, 5, 0.0).init(&device);
        let restored = mgr.load_model(fresh, &device).unwrap();

        // The restored model must produce the trained model's outputs
        let embedded = Tensor::<TestInner, 1>::from_floats(
            (0..24).map(|i| i as f32 * 0.1).collect::<Vec<_>>().as_slice(),
            &device,
        )
        .reshape([2, 3, 4]);
        let lengths = Tensor::<TestInner, 1, Int>::from_ints([3, 2].as_slice(), &device);

        let expect: Vec<f32> = trained
            .valid()
            .forward(embedded.clone(), lengths.clone())
            .into_data()
            .to_vec()
            .unwrap();
        let got: Vec<f32> = restored
            .forward(embedded, lengths)
            .into_data()
            .to_vec()
            .unwrap();

        // CompactRecorder stores half precision, so allow for the
        // f16 rounding of the weights
        for (e, g) in expect.iter().zip(got.iter()) {
            assert!((e - g).abs() < 1e-2, "restored output drifted: {e} vs {g}");
        }
    }
}
