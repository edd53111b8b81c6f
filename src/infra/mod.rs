// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong to any business layer:
//
//   checkpoint.rs — Saving and loading model weights with Burn's
//                   CompactRecorder, plus persisting the training
//                   config as JSON so inference can rebuild the
//                   exact architecture. One checkpoint file per
//                   run, written after the last epoch.
//
//   metrics.rs    — Appends one epoch,train_loss row per epoch
//                   to a CSV for later plotting.
//
// Reference: Burn Book §5 (Records and Checkpointing)

/// Model checkpoint and config persistence
pub mod checkpoint;

/// Training metrics CSV logger
pub mod metrics;
