// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types, the
// application layer can swap implementations without changes.
// DirReviewLoader implements ReviewSource today; a loader for
// a CSV dump or an HTTP corpus could implement it tomorrow.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::review::{Review, Split};

/// Any component that can load one pre-split review corpus.
pub trait ReviewSource {
    /// Load every review of the given split, in a deterministic
    /// order. Returns an error if the split is missing entirely.
    fn load_split(&self, split: Split) -> Result<Vec<Review>>;
}
