// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full train + evaluation loop using Burn's DataLoader and Adam.
//
// Key Burn 0.15 insight:
//   - Training uses MyBackend (Autodiff<Wgpu>) for gradients
//   - model.valid() returns the model on MyInnerBackend (Wgpu),
//     which also disables dropout for the evaluation pass
//   - The validation batcher and embedding table must use
//     MyInnerBackend too
//
// The pretrained embedding table is looked up here, per batch,
// and the resulting float tensor handed to the encoder — the
// table is frozen and never part of the optimiser state.
//
// Raw labels arrive as class ids 1/2 and are shifted to 0/1
// right before the loss.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::ReviewBatcher, dataset::ReviewDataset, vocab::Vocabulary};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::embedding::EmbeddingTable;
use crate::ml::model::{SentimentNet, SentimentNetConfig};

type MyBackend      = burn::backend::Autodiff<burn::backend::Wgpu>;
type MyInnerBackend = burn::backend::Wgpu;

/// Mean loss is printed and reset every this many batches.
const LOSS_WINDOW: usize = 32;

pub fn run_training(
    cfg:           &TrainConfig,
    vocab:         &Vocabulary,
    train_dataset: ReviewDataset,
    val_dataset:   ReviewDataset,
    ckpt_manager:  CheckpointManager,
) -> Result<()> {
    let device = burn::backend::wgpu::WgpuDevice::default();
    tracing::info!("Using WGPU device: {:?}", device);
    MyBackend::seed(cfg.seed);
    train_loop(cfg, vocab, train_dataset, val_dataset, ckpt_manager, device)
}

fn train_loop(
    cfg:           &TrainConfig,
    vocab:         &Vocabulary,
    train_dataset: ReviewDataset,
    val_dataset:   ReviewDataset,
    ckpt_manager:  CheckpointManager,
    device:        burn::backend::wgpu::WgpuDevice,
) -> Result<()> {

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = SentimentNetConfig::new(
        cfg.embed_dim, cfg.hidden, cfg.num_layers, cfg.fc_hidden, cfg.dropout,
    );
    let mut model: SentimentNet<MyBackend> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: {} bidirectional layers, hidden={}",
        cfg.num_layers, cfg.hidden,
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let optim_cfg = AdamConfig::new().with_epsilon(1e-8);
    let mut optim = optim_cfg.init();

    // ── Frozen embedding tables, one per backend ──────────────────────────────
    let train_table = EmbeddingTable::<MyBackend>::new(vocab, &device);
    let val_table   = EmbeddingTable::<MyInnerBackend>::new(vocab, &device);

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_batcher = ReviewBatcher::<MyBackend>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(train_dataset);

    // ── Validation data loader (InnerBackend — no autodiff overhead) ──────────
    let val_batcher = ReviewBatcher::<MyInnerBackend>::new(device.clone());
    let val_loader  = DataLoaderBuilder::new(val_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(val_dataset);

    let metrics = MetricsLogger::new(&cfg.checkpoint_dir)?;

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {
        let mut running_loss = 0.0f64;
        let mut epoch_loss   = 0.0f64;
        let mut batches      = 0usize;

        for (i, batch) in train_loader.iter().enumerate() {
            // Embedding lookup happens outside the model, exactly like
            // indexing a frozen vector table
            let embedded = train_table.lookup(batch.tokens);

            // Class ids are 1/2 — shift to 0/1 targets
            let targets = batch.labels.sub_scalar(1);

            let (loss, _) = model.forward_loss(embedded, batch.lengths, targets);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            running_loss += loss_val;
            epoch_loss   += loss_val;
            batches      += 1;

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);

            if i % LOSS_WINDOW == LOSS_WINDOW - 1 {
                println!(
                    "Epoch: {:2}, Batch: {:4}, Loss: {:.3}",
                    epoch,
                    i + 1,
                    running_loss / LOSS_WINDOW as f64,
                );
                running_loss = 0.0;
            }
        }

        let avg_loss = if batches > 0 { epoch_loss / batches as f64 } else { f64::NAN };
        metrics.log(&EpochMetrics::new(epoch, avg_loss))?;
    }

    // ── Save the trained parameters (single checkpoint) ───────────────────────
    ckpt_manager.save_model(&model)?;
    println!("Saved model");

    // ── Evaluation on the held-out split ──────────────────────────────────────
    // model.valid() → SentimentNet<MyInnerBackend>, dropout disabled
    let model_valid = model.valid();

    let mut num_correct = 0usize;
    let mut total       = 0usize;

    for batch in val_loader.iter() {
        let embedded = val_table.lookup(batch.tokens);
        let targets  = batch.labels.sub_scalar(1);

        let logits    = model_valid.forward(embedded, batch.lengths);
        let predicted = burn::tensor::activation::sigmoid(logits).round().int();

        total += targets.dims()[0];
        let correct: i64 = predicted
            .equal(targets)
            .int()
            .sum()
            .into_scalar()
            .elem::<i64>();
        num_correct += correct as usize;
    }

    let accuracy = if total > 0 {
        100.0 * num_correct as f64 / total as f64
    } else {
        0.0
    };
    println!("Classification accuracy: {accuracy}");

    tracing::info!("Training complete!");
    Ok(())
}
