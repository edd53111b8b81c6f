// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains the Burn framework specific code for the
// sentiment encoder and its training loop.
//
// What's in this layer:
//
//   embedding.rs  — The pretrained vector table as a device
//                   tensor. The table is not a trainable module:
//                   the training loop looks rows up per batch and
//                   feeds already-embedded floats to the encoder.
//
//   model.rs      — The encoder architecture:
//                   • 3 stacked bidirectional LSTM layers,
//                     hidden size 100 per direction
//                   • length-aware time reversal so the backward
//                     direction never reads padding
//                   • dropout on the concatenated final states
//                   • two linear layers down to one logit
//
//   trainer.rs    — The training loop
//                   BCE-with-logits loss, Adam updates, windowed
//                   loss logging, end-of-run checkpoint, and the
//                   held-out accuracy evaluation
//
//   inferencer.rs — Loads a checkpoint and scores a single review
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Hochreiter & Schmidhuber (1997) Long Short-Term Memory

/// Pretrained embedding lookup table
pub mod embedding;

/// Bidirectional LSTM encoder architecture
pub mod model;

/// Training loop with loss logging and final evaluation
pub mod trainer;

/// Inference — loads a checkpoint and classifies text
pub mod inferencer;
