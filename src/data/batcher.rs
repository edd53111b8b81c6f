// ============================================================
// Layer 4 — Review Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<ReviewSample>
// into tensors the encoder can consume.
//
// Unlike a fixed-width pipeline, sequences here keep their true
// lengths until batch time. Per batch:
//   1. Sort items by descending token count
//   2. Pad every sequence with id 0 to the batch maximum
//   3. Emit [batch, max_len] ids + [batch] lengths + [batch] labels
//
// The sort keeps the lengths vector non-increasing, and padding
// only to the batch maximum (not a global maximum) keeps the
// wasted positions small. The encoder uses the lengths to read
// each example's final states at its true last token.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::ReviewSample;
use crate::data::vocab::PAD_ID;

// ─── ReviewBatch ──────────────────────────────────────────────────────────────
/// A batch of reviews ready for embedding lookup and the forward
/// pass. All tensors have batch_size as their first dimension.
#[derive(Debug, Clone)]
pub struct ReviewBatch<B: Backend> {
    /// Token ids, padded with 0 — shape: [batch_size, max_len_in_batch]
    pub tokens: Tensor<B, 2, Int>,

    /// True sequence lengths, non-increasing — shape: [batch_size]
    pub lengths: Tensor<B, 1, Int>,

    /// Raw class ids (1 or 2) — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

// ─── ReviewBatcher ────────────────────────────────────────────────────────────
/// Holds the target device so tensors are created where the
/// model runs.
#[derive(Clone, Debug)]
pub struct ReviewBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> ReviewBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<ReviewSample, ReviewBatch<B>> for ReviewBatcher<B> {
    fn batch(&self, mut items: Vec<ReviewSample>) -> ReviewBatch<B> {
        // Longest first — the lengths tensor must be non-increasing
        items.sort_by(|a, b| b.seq_len().cmp(&a.seq_len()));

        let batch_size = items.len();
        let max_len = items.first().map(ReviewSample::seq_len).unwrap_or(0);

        let mut tokens_flat: Vec<i32> = Vec::with_capacity(batch_size * max_len);
        let mut lengths: Vec<i32> = Vec::with_capacity(batch_size);
        let mut labels: Vec<i32> = Vec::with_capacity(batch_size);

        for sample in &items {
            lengths.push(sample.seq_len() as i32);
            labels.push(sample.label as i32);
            tokens_flat.extend(sample.token_ids.iter().map(|&id| id as i32));
            tokens_flat
                .extend(std::iter::repeat(PAD_ID as i32).take(max_len - sample.seq_len()));
        }

        let tokens = Tensor::<B, 1, Int>::from_ints(tokens_flat.as_slice(), &self.device)
            .reshape([batch_size, max_len]);
        let lengths = Tensor::<B, 1, Int>::from_ints(lengths.as_slice(), &self.device);
        let labels = Tensor::<B, 1, Int>::from_ints(labels.as_slice(), &self.device);

        ReviewBatch { tokens, lengths, labels }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    fn sample(ids: &[u32], label: u8) -> ReviewSample {
        ReviewSample::new(ids.to_vec(), label)
    }

    #[test]
    fn pads_to_batch_maximum_and_sorts_by_length() {
        let device = Default::default();
        let batcher = ReviewBatcher::<TestBackend>::new(device);

        let batch = batcher.batch(vec![
            sample(&[5, 6], 1),
            sample(&[7, 8, 9, 10], 2),
            sample(&[11], 1),
        ]);

        assert_eq!(batch.tokens.dims(), [3, 4]);

        let lengths: Vec<i64> = batch.lengths.into_data().to_vec().unwrap();
        assert_eq!(lengths, vec![4, 2, 1]);

        // Longest example first, shorter ones padded with id 0
        let tokens: Vec<i64> = batch.tokens.into_data().to_vec().unwrap();
        assert_eq!(tokens, vec![7, 8, 9, 10, 5, 6, 0, 0, 11, 0, 0, 0]);

        // Labels follow the sorted order
        let labels: Vec<i64> = batch.labels.into_data().to_vec().unwrap();
        assert_eq!(labels, vec![2, 1, 1]);
    }

    #[test]
    fn max_length_equals_padded_width() {
        let device = Default::default();
        let batcher = ReviewBatcher::<TestBackend>::new(device);

        let batch = batcher.batch(vec![sample(&[1, 2, 3], 1), sample(&[4], 2)]);

        let lengths: Vec<i64> = batch.lengths.into_data().to_vec().unwrap();
        let [_, width] = batch.tokens.dims();
        assert_eq!(*lengths.iter().max().unwrap() as usize, width);
        assert!(lengths.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn all_vectors_share_the_batch_size() {
        let device = Default::default();
        let batcher = ReviewBatcher::<TestBackend>::new(device);

        let batch = batcher.batch(vec![
            sample(&[1], 1),
            sample(&[2, 3], 2),
            sample(&[4, 5, 6], 1),
            sample(&[7], 2),
            sample(&[8, 9], 1),
        ]);

        assert_eq!(batch.tokens.dims()[0], 5);
        assert_eq!(batch.lengths.dims(), [5]);
        assert_eq!(batch.labels.dims(), [5]);
    }
}
