// ============================================================
// Layer 5 — Sentiment Encoder
// ============================================================
// A 3-layer bidirectional LSTM over embedded review tokens.
//
// Batches arrive padded, so the recurrence must not let padding
// positions leak into the final states. Each layer therefore
// runs two plain LSTMs:
//
//   forward — over the batch as-is. States at t < len are
//             untouched by anything after t, so padding at the
//             tail is harmless as long as we READ at t = len-1.
//   reverse — over a per-example mirrored copy: positions
//             0..len hold the example's tokens back to front,
//             padding stays where it was. Reading its output at
//             (mirrored) t = 0 gives the state after consuming
//             exactly the real tokens, newest to oldest.
//
// The mirror is a gather along the time axis with the index map
//   j  →  len-1-j   for j < len,   j  →  j   otherwise
// which is its own inverse, so the same map realigns the
// reverse output to forward time order before layers concatenate.
//
// The classifier head reads the last layer's two final states
// (forward at t = len-1, backward at t = 0), concatenates them,
// applies dropout, and projects 200 → 64 → 1. The output is one
// raw logit per example — sigmoid is the caller's business.
//
// Reference: Hochreiter & Schmidhuber (1997) LSTM
//            Schuster & Paliwal (1997) Bidirectional RNNs
//            Burn Book §3 (Building Blocks)

use burn::{
    nn::{
        loss::BinaryCrossEntropyLossConfig,
        Dropout, DropoutConfig,
        Linear, LinearConfig,
        Lstm, LstmConfig,
    },
    prelude::*,
    tensor::backend::AutodiffBackend,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct SentimentNetConfig {
    pub embed_dim:  usize,
    pub hidden:     usize,
    pub num_layers: usize,
    pub fc_hidden:  usize,
    pub dropout:    f64,
}

impl SentimentNetConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> SentimentNet<B> {
        let layers: Vec<BiLstmLayer<B>> = (0..self.num_layers)
            .map(|i| {
                // Layer 0 reads embeddings; deeper layers read the
                // concatenated output of both directions below them
                let d_input = if i == 0 { self.embed_dim } else { 2 * self.hidden };
                BiLstmLayer {
                    forward: LstmConfig::new(d_input, self.hidden, true).init(device),
                    reverse: LstmConfig::new(d_input, self.hidden, true).init(device),
                }
            })
            .collect();
        let fc1     = LinearConfig::new(2 * self.hidden, self.fc_hidden).init(device);
        let fc2     = LinearConfig::new(self.fc_hidden, 1).init(device);
        let dropout = DropoutConfig::new(self.dropout).init();
        SentimentNet { layers, fc1, fc2, dropout, hidden: self.hidden }
    }
}

// ─── BiLstmLayer ──────────────────────────────────────────────────────────────
/// One bidirectional layer: two independent LSTMs, one reading
/// mirrored time. Output is the time-aligned concatenation of
/// both directions, [batch, seq, 2 * hidden].
#[derive(Module, Debug)]
pub struct BiLstmLayer<B: Backend> {
    pub forward: Lstm<B>,
    pub reverse: Lstm<B>,
}

impl<B: Backend> BiLstmLayer<B> {
    /// `mirror` is the [batch, seq] index map described in the
    /// module header; the same map reverses and realigns.
    pub fn forward(&self, input: Tensor<B, 3>, mirror: Tensor<B, 2, Int>) -> Tensor<B, 3> {
        let [batch_size, seq_len, d_input] = input.dims();

        let mirror_in = mirror
            .clone()
            .unsqueeze_dim::<3>(2)
            .expand([batch_size, seq_len, d_input]);
        let mirrored_input = input.clone().gather(1, mirror_in);

        let (out_fwd, _) = self.forward.forward(input, None);
        let (out_rev, _) = self.reverse.forward(mirrored_input, None);

        // Realign the reverse direction to forward time order
        let hidden = out_fwd.dims()[2];
        let mirror_out = mirror
            .unsqueeze_dim::<3>(2)
            .expand([batch_size, seq_len, hidden]);
        let out_rev = out_rev.gather(1, mirror_out);

        Tensor::cat(vec![out_fwd, out_rev], 2)
    }
}

// ─── SentimentNet ─────────────────────────────────────────────────────────────
#[derive(Module, Debug)]
pub struct SentimentNet<B: Backend> {
    pub layers:  Vec<BiLstmLayer<B>>,
    pub fc1:     Linear<B>,
    pub fc2:     Linear<B>,
    pub dropout: Dropout,
    pub hidden:  usize,
}

impl<B: Backend> SentimentNet<B> {
    /// embedded: [batch, seq, embed_dim], lengths: [batch] (each in 1..=seq)
    /// → one raw logit per example, [batch]
    pub fn forward(&self, embedded: Tensor<B, 3>, lengths: Tensor<B, 1, Int>) -> Tensor<B, 1> {
        let [batch_size, seq_len, _] = embedded.dims();
        let device = embedded.device();

        // ── Mirror index map [batch, seq] ─────────────────────────────────────
        // positions:  0 1 2 3 4 ...
        // len = 3  →  2 1 0 3 4 ...   (prefix mirrored, padding identity)
        let positions = Tensor::<B, 1, Int>::arange(0..seq_len as i64, &device)
            .unsqueeze::<2>()
            .expand([batch_size, seq_len]);
        let len_rows = lengths
            .clone()
            .unsqueeze_dim::<2>(1)
            .expand([batch_size, seq_len]);
        let in_prefix = positions.clone().lower(len_rows.clone());
        let mirrored = len_rows.sub(positions.clone()).sub_scalar(1);
        let mirror = positions.mask_where(in_prefix, mirrored);

        // ── Stacked bidirectional layers ──────────────────────────────────────
        let mut x = embedded;
        for layer in &self.layers {
            x = layer.forward(x, mirror.clone());
        }

        // ── Final states of the last layer ────────────────────────────────────
        // Forward direction lives in columns 0..hidden and is read at
        // t = len-1; the realigned reverse direction lives in columns
        // hidden..2*hidden and its full-sequence state sits at t = 0.
        let h = self.hidden;
        let fwd_seq = x.clone().slice([0..batch_size, 0..seq_len, 0..h]);
        let last_idx = lengths
            .sub_scalar(1)
            .unsqueeze_dim::<2>(1)
            .unsqueeze_dim::<3>(2)
            .expand([batch_size, 1, h]);
        let fwd_last = fwd_seq.gather(1, last_idx).reshape([batch_size, h]);
        let bwd_last = x
            .slice([0..batch_size, 0..1, h..2 * h])
            .reshape([batch_size, h]);

        // ── Classifier head ───────────────────────────────────────────────────
        let states = Tensor::cat(vec![fwd_last, bwd_last], 1); // [batch, 2h]
        let states = self.dropout.forward(states);
        let states = burn::tensor::activation::relu(self.fc1.forward(states));
        let logits = self.fc2.forward(states); // [batch, 1]
        logits.reshape([batch_size])
    }

    /// Forward plus BCE-with-logits loss against 0/1 targets.
    pub fn forward_loss(
        &self,
        embedded: Tensor<B, 3>,
        lengths:  Tensor<B, 1, Int>,
        targets:  Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 1>)
    where
        B: AutodiffBackend,
    {
        let logits = self.forward(embedded, lengths);
        let bce = BinaryCrossEntropyLossConfig::new()
            .with_logits(true)
            .init(&logits.device());
        let loss = bce.forward(logits.clone(), targets);
        (loss, logits)
    }
}
