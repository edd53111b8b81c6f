// ============================================================
// Layer 5 — Embedding Table
// ============================================================
// The vocabulary's embedding rows, uploaded once as a single
// [vocab_size, dim] tensor. Lookup is a row-select per token id
// — this is deliberately not an nn::Embedding module, because
// the pretrained vectors are frozen: no gradient ever flows into
// them and they are not part of the checkpoint.

use burn::prelude::*;

use crate::data::vocab::Vocabulary;

/// A frozen [vocab_size, dim] embedding table on one device.
#[derive(Debug, Clone)]
pub struct EmbeddingTable<B: Backend> {
    weights: Tensor<B, 2>,
    dim: usize,
}

impl<B: Backend> EmbeddingTable<B> {
    pub fn new(vocab: &Vocabulary, device: &B::Device) -> Self {
        let weights = Tensor::<B, 1>::from_floats(vocab.vectors_flat(), device)
            .reshape([vocab.len(), vocab.dim()]);
        Self { weights, dim: vocab.dim() }
    }

    /// Look up the rows of a padded id batch.
    /// [batch, seq] ids → [batch, seq, dim] floats; padding ids hit
    /// row 0, which is the zero vector.
    pub fn lookup(&self, token_ids: Tensor<B, 2, Int>) -> Tensor<B, 3> {
        let [batch_size, seq_len] = token_ids.dims();
        let flat = token_ids.reshape([batch_size * seq_len]);
        self.weights
            .clone()
            .select(0, flat)
            .reshape([batch_size, seq_len, self.dim])
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::vectors::PretrainedVectors;
    use std::io::Write;

    type TestBackend = burn::backend::NdArray;

    fn small_vocab() -> Vocabulary {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"movie 1.0 2.0\ngreat 3.0 4.0\n").unwrap();
        let pretrained = PretrainedVectors::load(f.path(), 2).unwrap();
        let seqs = vec![vec!["movie".to_string(), "great".to_string()]];
        Vocabulary::build(&seqs, &[], &pretrained)
    }

    #[test]
    fn lookup_returns_embedded_rows() {
        let vocab = small_vocab();
        let device = Default::default();
        let table = EmbeddingTable::<TestBackend>::new(&vocab, &device);

        let movie = vocab.id_of("movie") as i32;
        let ids = Tensor::<TestBackend, 1, Int>::from_ints([movie, 0].as_slice(), &device)
            .reshape([1, 2]);

        let embedded = table.lookup(ids);
        assert_eq!(embedded.dims(), [1, 2, 2]);

        let values: Vec<f32> = embedded.into_data().to_vec().unwrap();
        // First position is the pretrained row, second is the pad zero row
        assert_eq!(values, vec![1.0, 2.0, 0.0, 0.0]);
    }
}
