// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `train` and `predict`, and their
// flags. Every hyperparameter has a default, so a bare
// `review-sentiment train` runs the full configuration.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use crate::application::train_use_case::TrainConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the sentiment classifier on the review corpus
    Train(TrainArgs),

    /// Score one review using a trained checkpoint
    Predict(PredictArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Corpus root containing train/ and dev/ splits with neg/ and
    /// pos/ sub-directories of one-review-per-file text files
    #[arg(long, default_value = "data/reviews")]
    pub data_dir: String,

    /// Pretrained word vectors in GloVe text format
    #[arg(long, default_value = "data/glove.6B.50d.txt")]
    pub vectors_path: String,

    /// Directory for the checkpoint, config, and metrics CSV
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Dimension of the pretrained word vectors
    #[arg(long, default_value_t = 50)]
    pub embed_dim: usize,

    /// LSTM hidden size per direction
    #[arg(long, default_value_t = 100)]
    pub hidden: usize,

    /// Number of stacked bidirectional LSTM layers
    #[arg(long, default_value_t = 3)]
    pub num_layers: usize,

    /// Width of the hidden linear layer between the LSTM states
    /// and the output logit
    #[arg(long, default_value_t = 64)]
    pub fc_hidden: usize,

    /// Dropout probability on the concatenated final states,
    /// active during training only
    #[arg(long, default_value_t = 0.7)]
    pub dropout: f64,

    /// Number of reviews per mini-batch
    #[arg(long, default_value_t = 64)]
    pub batch_size: usize,

    /// Number of full passes through the training split
    #[arg(long, default_value_t = 15)]
    pub epochs: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Seed for shuffling and weight initialisation
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_dir:       a.data_dir,
            vectors_path:   a.vectors_path,
            checkpoint_dir: a.checkpoint_dir,
            embed_dim:      a.embed_dim,
            hidden:         a.hidden,
            num_layers:     a.num_layers,
            fc_hidden:      a.fc_hidden,
            dropout:        a.dropout,
            batch_size:     a.batch_size,
            epochs:         a.epochs,
            lr:             a.lr,
            seed:           a.seed,
        }
    }
}

/// All arguments for the `predict` command
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// The review text to classify
    #[arg(long)]
    pub text: String,

    /// Directory where the checkpoint was saved during training
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,
}
