// ============================================================
// Layer 5 — Inferencer
// ============================================================
use anyhow::Result;
use burn::prelude::*;

use crate::data::{preprocessor::Preprocessor, vocab::Vocabulary};
use crate::domain::review::Sentiment;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::embedding::EmbeddingTable;
use crate::ml::model::{SentimentNet, SentimentNetConfig};

type InferBackend = burn::backend::Wgpu;

pub struct Inferencer {
    model:  SentimentNet<InferBackend>,
    table:  EmbeddingTable<InferBackend>,
    device: burn::backend::wgpu::WgpuDevice,
}

impl Inferencer {
    /// Rebuild the architecture from the saved config, restore the
    /// trained weights, and upload the vocabulary's vector table.
    pub fn from_checkpoint(ckpt_manager: &CheckpointManager, vocab: &Vocabulary) -> Result<Self> {
        let device = burn::backend::wgpu::WgpuDevice::default();
        let cfg    = ckpt_manager.load_config()?;
        let model_cfg = SentimentNetConfig::new(
            cfg.embed_dim, cfg.hidden, cfg.num_layers, cfg.fc_hidden, 0.0,
        );
        let model: SentimentNet<InferBackend> = model_cfg.init(&device);
        let model = ckpt_manager.load_model(model, &device)?;
        let table = EmbeddingTable::new(vocab, &device);
        tracing::info!("Model loaded from checkpoint");
        Ok(Self { model, table, device })
    }

    /// Classify one review. Returns the predicted sentiment and the
    /// sigmoid confidence of that side.
    ///
    /// The sigmoid output is the probability of the SECOND class in
    /// loader order (pos); ≥ 0.5 rounds to positive, matching the
    /// 1/2 → 0/1 label shift used in training.
    pub fn classify(&self, vocab: &Vocabulary, text: &str) -> Result<(Sentiment, f32)> {
        let tokens = Preprocessor::new().tokenize(text);
        let ids    = vocab.encode(&tokens);
        if ids.is_empty() {
            anyhow::bail!("No tokens survive preprocessing — cannot classify an empty review");
        }

        let len  = ids.len();
        let flat: Vec<i32> = ids.iter().map(|&id| id as i32).collect();
        let token_tensor = Tensor::<InferBackend, 1, Int>::from_ints(
            flat.as_slice(), &self.device,
        ).reshape([1, len]);
        let lengths = Tensor::<InferBackend, 1, Int>::from_ints(
            [len as i32].as_slice(), &self.device,
        );

        let embedded = self.table.lookup(token_tensor);
        let logits   = self.model.forward(embedded, lengths);
        let prob: f32 = burn::tensor::activation::sigmoid(logits)
            .into_scalar()
            .elem::<f32>();

        let (sentiment, confidence) = if prob >= 0.5 {
            (Sentiment::Positive, prob)
        } else {
            (Sentiment::Negative, 1.0 - prob)
        };

        tracing::debug!("p(pos)={:.4} → {} ({:.4})", prob, sentiment, confidence);
        Ok((sentiment, confidence))
    }
}
