// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal each:
// training the classifier, or scoring a new review. No ML math
// here, no printing, no direct file formats — only workflow
// coordination.
//
// Reference: Rust Book §7 (Module System)

// The training workflow
pub mod train_use_case;

// The single-review classification workflow
pub mod predict_use_case;
