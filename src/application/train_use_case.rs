// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load train + validation reviews  (Layer 4 - data)
//   Step 2: Tokenise every review            (Layer 4 - data)
//   Step 3: Load pretrained vectors          (Layer 4 - data)
//   Step 4: Build the vocabulary             (Layer 4 - data)
//   Step 5: Encode reviews to id samples     (Layer 4 - data)
//   Step 6: Build datasets                   (Layer 4 - data)
//   Step 7: Save config                      (Layer 6 - infra)
//   Step 8: Run training loop                (Layer 5 - ml)
//
// Reference: Burn Book §5 (Training)

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::{ReviewDataset, ReviewSample},
    loader::DirReviewLoader,
    preprocessor::Preprocessor,
    vectors::PretrainedVectors,
    vocab::Vocabulary,
};
use crate::domain::review::{Review, Split};
use crate::domain::traits::ReviewSource;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run, serialisable so the run
// can be reconstructed for prediction. Defaults: 50-d vectors into
// a 3-layer bidirectional LSTM with hidden size 100, dropout 0.7,
// batches of 64, 15 epochs of Adam at lr 0.001.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_dir:       String,
    pub vectors_path:   String,
    pub checkpoint_dir: String,
    pub embed_dim:      usize,
    pub hidden:         usize,
    pub num_layers:     usize,
    pub fc_hidden:      usize,
    pub dropout:        f64,
    pub batch_size:     usize,
    pub epochs:         usize,
    pub lr:             f64,
    pub seed:           u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_dir:       "data/reviews".to_string(),
            vectors_path:   "data/glove.6B.50d.txt".to_string(),
            checkpoint_dir: "checkpoints".to_string(),
            embed_dim:      50,
            hidden:         100,
            num_layers:     3,
            fc_hidden:      64,
            dropout:        0.7,
            batch_size:     64,
            epochs:         15,
            lr:             1e-3,
            seed:           42,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load both pre-split corpora ───────────────────────────────
        tracing::info!("Loading reviews from '{}'", cfg.data_dir);
        let loader = DirReviewLoader::new(&cfg.data_dir);
        let train_reviews = loader.load_split(Split::Train)?;
        let val_reviews   = loader.load_split(Split::Validation)?;

        // ── Step 2: Tokenise ──────────────────────────────────────────────────
        let prep = Preprocessor::new();
        let train_tokens = tokenize_all(&prep, &train_reviews);
        let val_tokens   = tokenize_all(&prep, &val_reviews);

        // ── Step 3: Pretrained vectors ────────────────────────────────────────
        let pretrained = PretrainedVectors::load(&cfg.vectors_path, cfg.embed_dim)?;

        // ── Step 4: Vocabulary over train + validation ────────────────────────
        let vocab = Vocabulary::build(&train_tokens, &val_tokens, &pretrained);

        // ── Step 5: Encode to id samples ──────────────────────────────────────
        let train_samples = encode_samples(&vocab, &train_reviews, &train_tokens);
        let val_samples   = encode_samples(&vocab, &val_reviews, &val_tokens);
        tracing::info!(
            "Encoded {} training and {} validation samples",
            train_samples.len(),
            val_samples.len(),
        );

        // ── Step 6: Build Burn datasets ───────────────────────────────────────
        let train_dataset = ReviewDataset::new(train_samples);
        let val_dataset   = ReviewDataset::new(val_samples);

        // ── Step 7: Save config for prediction ────────────────────────────────
        let ckpt_manager = CheckpointManager::new(&cfg.checkpoint_dir);
        ckpt_manager.save_config(cfg)?;

        // ── Step 8: Run training loop (Layer 5) ───────────────────────────────
        run_training(cfg, &vocab, train_dataset, val_dataset, ckpt_manager)?;

        Ok(())
    }
}

/// Tokenise every review, keeping one token sequence per review
/// (possibly empty — empties are dropped at encoding time).
fn tokenize_all(prep: &Preprocessor, reviews: &[Review]) -> Vec<Vec<String>> {
    reviews.iter().map(|r| prep.tokenize(&r.text)).collect()
}

/// Pair each review's encoded ids with its label, dropping reviews
/// whose token sequence filtered down to nothing — a zero-length
/// sequence has no final state to read.
fn encode_samples(
    vocab:   &Vocabulary,
    reviews: &[Review],
    tokens:  &[Vec<String>],
) -> Vec<ReviewSample> {
    let mut dropped = 0usize;
    let samples: Vec<ReviewSample> = reviews
        .iter()
        .zip(tokens.iter())
        .filter_map(|(review, seq)| {
            if seq.is_empty() {
                dropped += 1;
                return None;
            }
            Some(ReviewSample::new(vocab.encode(seq), review.label))
        })
        .collect();

    if dropped > 0 {
        tracing::warn!("Dropped {} reviews with no surviving tokens", dropped);
    }
    samples
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_token_sequences_are_dropped() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"movie 0.1 0.2\n").unwrap();
        let pretrained = PretrainedVectors::load(f.path(), 2).unwrap();

        let reviews = vec![Review::new("great movie", 2), Review::new("the", 1)];
        let prep = Preprocessor::new();
        let tokens = tokenize_all(&prep, &reviews);
        assert!(tokens[1].is_empty());

        let vocab = Vocabulary::build(&tokens, &[], &pretrained);
        let samples = encode_samples(&vocab, &reviews, &tokens);

        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].label, 2);
        assert_eq!(samples[0].token_ids.len(), 2);
    }
}
