// ============================================================
// Layer 3 — Review Domain Types
// ============================================================
// A review is raw text plus a class id from the label
// vocabulary. Class ids start at 1 (id 0 stays reserved, the
// same convention the token vocabulary uses for its pad slot),
// so a two-class corpus carries ids 1 and 2. The training loop
// shifts them to 0/1 right before the loss — keeping the raw
// ids here preserves the loader-side numbering end to end.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw movie review loaded from disk, before any cleaning
/// or tokenisation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// The full review text as read from the file
    pub text: String,

    /// Label-vocabulary id of the sentiment class.
    /// With the standard corpus layout: 1 = negative, 2 = positive.
    pub label: u8,
}

impl Review {
    pub fn new(text: impl Into<String>, label: u8) -> Self {
        Self { text: text.into(), label }
    }
}

/// Which pre-split part of the corpus to read.
/// The dataset ships already divided into a training split and
/// a held-out validation split — there is no in-process
/// shuffling into splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    Train,
    Validation,
}

impl Split {
    /// Directory name of this split under the corpus root
    pub fn dir_name(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Validation => "dev",
        }
    }
}

/// A predicted sentiment class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Negative,
    Positive,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Negative => write!(f, "negative"),
            Sentiment::Positive => write!(f, "positive"),
        }
    }
}
