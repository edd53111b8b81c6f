// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from raw review files to GPU-ready tensor batches.
//
// The pipeline flows in this order:
//
//   review files (train/ and dev/ splits)
//       │
//       ▼
//   DirReviewLoader   → reads one file per review, labels from
//       │               the class sub-directory
//       ▼
//   Preprocessor      → lowercases, strips URLs/non-letters,
//       │               drops stop-word items, splits to tokens
//       ▼
//   Vocabulary        → token → id, id → pretrained 50-d vector
//       │               (vectors read once by PretrainedVectors)
//       ▼
//   ReviewDataset     → implements Burn's Dataset trait
//       │
//       ▼
//   ReviewBatcher     → sorts within batch by length, pads,
//       │               stacks into tensors
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Loads labelled reviews from a split/class directory tree
pub mod loader;

/// Cleans raw text and produces the filtered token sequence
pub mod preprocessor;

/// Reads the pretrained word-vector table from disk
pub mod vectors;

/// Token → id and id → embedding-vector mappings
pub mod vocab;

/// Implements Burn's Dataset trait for encoded reviews
pub mod dataset;

/// Implements Burn's Batcher trait to create padded batches
pub mod batcher;
