// ============================================================
// Layer 2 — PredictUseCase
// ============================================================
// Classifies a single review using a trained checkpoint.
//
// The checkpoint holds parameters only — no vocabulary. The
// vocabulary is a pure function of the corpora and the pretrained
// vectors, so this use case rebuilds it exactly as training did
// (same corpora, same ordering rules → same ids), then restores
// the model and scores the text.

use anyhow::Result;

use crate::data::{
    loader::DirReviewLoader,
    preprocessor::Preprocessor,
    vectors::PretrainedVectors,
    vocab::Vocabulary,
};
use crate::domain::review::{Sentiment, Split};
use crate::domain::traits::ReviewSource;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::inferencer::Inferencer;

pub struct PredictUseCase {
    vocab:      Vocabulary,
    inferencer: Inferencer,
}

impl PredictUseCase {
    /// Rebuild the training-time vocabulary and load the checkpoint.
    /// Corpus and vector paths come from the saved train_config.json.
    pub fn new(checkpoint_dir: String) -> Result<Self> {
        let ckpt = CheckpointManager::new(&checkpoint_dir);
        let cfg  = ckpt.load_config()?;

        tracing::info!("Rebuilding vocabulary from '{}'", cfg.data_dir);
        let loader = DirReviewLoader::new(&cfg.data_dir);
        let train_reviews = loader.load_split(Split::Train)?;
        let val_reviews   = loader.load_split(Split::Validation)?;

        let prep = Preprocessor::new();
        let train_tokens: Vec<Vec<String>> =
            train_reviews.iter().map(|r| prep.tokenize(&r.text)).collect();
        let val_tokens: Vec<Vec<String>> =
            val_reviews.iter().map(|r| prep.tokenize(&r.text)).collect();

        let pretrained = PretrainedVectors::load(&cfg.vectors_path, cfg.embed_dim)?;
        let vocab      = Vocabulary::build(&train_tokens, &val_tokens, &pretrained);

        let inferencer = Inferencer::from_checkpoint(&ckpt, &vocab)?;
        Ok(Self { vocab, inferencer })
    }

    /// Score one review text.
    pub fn classify(&self, text: &str) -> Result<(Sentiment, f32)> {
        self.inferencer.classify(&self.vocab, text)
    }
}
