// ============================================================
// Layer 4 — Vocabulary
// ============================================================
// Bidirectional mapping between tokens and integer ids, paired
// with an embedding row per id.
//
// Id layout:
//   0 — <pad>, the padding sentinel (zero vector)
//   1 — <unk>, every token never seen at build time (zero vector)
//   2…— corpus tokens, ordered by descending frequency with a
//       lexicographic tie-break
//
// The ordering makes ids a pure function of the corpus: two
// builds over the same token sequences assign identical ids,
// which is what lets a prediction run rebuild the vocabulary
// instead of persisting it next to the checkpoint.
//
// Tokens the pretrained table does not know still get a real id
// — their embedding row is simply all zeros, same as <unk>.

use std::collections::HashMap;

use crate::data::vectors::PretrainedVectors;

pub const PAD_ID: usize = 0;
pub const UNK_ID: usize = 1;

pub const PAD_TOKEN: &str = "<pad>";
pub const UNK_TOKEN: &str = "<unk>";

/// Token → id map plus a flat row-major id → vector table.
pub struct Vocabulary {
    token_to_id: HashMap<String, usize>,
    /// Row-major [len() * dim()] embedding table
    vectors: Vec<f32>,
    dim: usize,
}

impl Vocabulary {
    /// Build the vocabulary over the training and validation token
    /// sequences, pulling embedding rows from the pretrained table.
    pub fn build(
        train: &[Vec<String>],
        validation: &[Vec<String>],
        pretrained: &PretrainedVectors,
    ) -> Self {
        // ── Count every token across both corpora ─────────────────────────────
        let mut freq: HashMap<&str, usize> = HashMap::new();
        for sequence in train.iter().chain(validation.iter()) {
            for token in sequence {
                *freq.entry(token.as_str()).or_insert(0) += 1;
            }
        }

        // Frequency descending, then lexicographic — a total order,
        // so repeated builds assign the same ids
        let mut ranked: Vec<(&str, usize)> = freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        // ── Assign ids and copy embedding rows ────────────────────────────────
        let dim = pretrained.dim();
        let mut token_to_id = HashMap::with_capacity(ranked.len() + 2);
        token_to_id.insert(PAD_TOKEN.to_string(), PAD_ID);
        token_to_id.insert(UNK_TOKEN.to_string(), UNK_ID);

        // Rows 0 and 1 are the zero vectors of the sentinels
        let mut vectors = vec![0.0f32; 2 * dim];

        for (rank, (token, _)) in ranked.iter().enumerate() {
            token_to_id.insert(token.to_string(), rank + 2);
            match pretrained.get(token) {
                Some(row) => vectors.extend_from_slice(row),
                None => vectors.extend(std::iter::repeat(0.0).take(dim)),
            }
        }

        tracing::info!(
            "Vocabulary built: {} tokens ({} with pretrained vectors)",
            ranked.len() + 2,
            ranked.iter().filter(|(t, _)| pretrained.get(t).is_some()).count(),
        );

        Self { token_to_id, vectors, dim }
    }

    /// The id of a token, falling back to the unknown sentinel.
    pub fn id_of(&self, token: &str) -> usize {
        self.token_to_id.get(token).copied().unwrap_or(UNK_ID)
    }

    /// Encode a token sequence into ids, in order.
    pub fn encode(&self, tokens: &[String]) -> Vec<u32> {
        tokens.iter().map(|t| self.id_of(t) as u32).collect()
    }

    /// Number of ids, sentinels included
    pub fn len(&self) -> usize {
        self.token_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token_to_id.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The embedding row of one id
    pub fn vector(&self, id: usize) -> &[f32] {
        &self.vectors[id * self.dim..(id + 1) * self.dim]
    }

    /// The whole table, row-major — one row per id
    pub fn vectors_flat(&self) -> &[f32] {
        &self.vectors
    }
}

/// The trivial class-name → id mapping for labels.
/// Ids are assigned in insertion order starting at 1; id 0 stays
/// reserved so class ids line up with the raw 1-based labels the
/// training loop shifts down by one.
pub struct LabelVocab {
    classes: Vec<String>,
}

impl LabelVocab {
    pub fn from_classes(classes: &[&str]) -> Self {
        Self { classes: classes.iter().map(|c| c.to_string()).collect() }
    }

    /// The 1-based id of a class name
    pub fn id_of(&self, class: &str) -> Option<u8> {
        self.classes.iter().position(|c| c == class).map(|i| (i + 1) as u8)
    }

    /// The class name of a 1-based id
    pub fn name_of(&self, id: u8) -> Option<&str> {
        if id == 0 {
            return None;
        }
        self.classes.get(id as usize - 1).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn pretrained_3d() -> PretrainedVectors {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"movie 0.1 0.2 0.3\ngreat 0.4 0.5 0.6\n").unwrap();
        PretrainedVectors::load(f.path(), 3).unwrap()
    }

    fn seq(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn every_token_gets_a_unique_id() {
        let v = Vocabulary::build(
            &[seq(&["movie", "great", "movie"])],
            &[seq(&["plot"])],
            &pretrained_3d(),
        );
        // 2 sentinels + 3 distinct tokens
        assert_eq!(v.len(), 5);
        let ids = [v.id_of("movie"), v.id_of("great"), v.id_of("plot")];
        assert!(ids.iter().all(|&id| id >= 2));
        assert_eq!(
            ids.iter().collect::<std::collections::HashSet<_>>().len(),
            3
        );
    }

    #[test]
    fn ids_are_stable_across_rebuilds() {
        let train = [seq(&["movie", "great", "movie", "plot"])];
        let val = [seq(&["great"])];
        let a = Vocabulary::build(&train, &val, &pretrained_3d());
        let b = Vocabulary::build(&train, &val, &pretrained_3d());
        for token in ["movie", "great", "plot"] {
            assert_eq!(a.id_of(token), b.id_of(token));
        }
    }

    #[test]
    fn frequency_then_lexicographic_order() {
        let v = Vocabulary::build(
            &[seq(&["movie", "movie", "great", "plot"])],
            &[],
            &pretrained_3d(),
        );
        // "movie" appears twice → first corpus id; "great" < "plot" breaks the tie
        assert_eq!(v.id_of("movie"), 2);
        assert_eq!(v.id_of("great"), 3);
        assert_eq!(v.id_of("plot"), 4);
    }

    #[test]
    fn unknown_tokens_map_to_unk() {
        let v = Vocabulary::build(&[seq(&["movie"])], &[], &pretrained_3d());
        assert_eq!(v.id_of("unseen"), UNK_ID);
        assert_eq!(v.encode(&seq(&["movie", "unseen"])), vec![2, UNK_ID as u32]);
    }

    #[test]
    fn sentinel_and_missing_rows_are_zero() {
        let v = Vocabulary::build(
            &[seq(&["movie", "obscureword"])],
            &[],
            &pretrained_3d(),
        );
        assert_eq!(v.vector(PAD_ID), &[0.0, 0.0, 0.0]);
        assert_eq!(v.vector(UNK_ID), &[0.0, 0.0, 0.0]);
        // in the corpus but not in the pretrained table → zero row
        assert_eq!(v.vector(v.id_of("obscureword")), &[0.0, 0.0, 0.0]);
        // in both → the pretrained row
        assert_eq!(v.vector(v.id_of("movie")), &[0.1, 0.2, 0.3]);
    }

    #[test]
    fn label_vocab_is_one_based() {
        let labels = LabelVocab::from_classes(&["neg", "pos"]);
        assert_eq!(labels.id_of("neg"), Some(1));
        assert_eq!(labels.id_of("pos"), Some(2));
        assert_eq!(labels.name_of(2), Some("pos"));
        assert_eq!(labels.name_of(0), None);
        assert_eq!(labels.id_of("meh"), None);
    }
}
