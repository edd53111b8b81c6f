use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// One fully tokenised and encoded review. Not yet padded — padding
/// happens per batch, against the longest sequence in that batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSample {
    /// Vocabulary ids of the surviving tokens, in order. Never empty:
    /// reviews whose token sequence filters down to nothing are
    /// dropped before dataset construction.
    pub token_ids: Vec<u32>,

    /// Raw class id from the label vocabulary (1 = neg, 2 = pos)
    pub label: u8,
}

impl ReviewSample {
    pub fn new(token_ids: Vec<u32>, label: u8) -> Self {
        Self { token_ids, label }
    }

    pub fn seq_len(&self) -> usize {
        self.token_ids.len()
    }
}

pub struct ReviewDataset {
    samples: Vec<ReviewSample>,
}

impl ReviewDataset {
    pub fn new(samples: Vec<ReviewSample>) -> Self {
        Self { samples }
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

impl Dataset<ReviewSample> for ReviewDataset {
    fn get(&self, index: usize) -> Option<ReviewSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
