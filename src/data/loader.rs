// ============================================================
// Layer 4 — Review Loader
// ============================================================
// Loads labelled reviews from a pre-split directory tree:
//
//   <root>/
//     train/
//       neg/*.txt   ← one review per file, label "neg"
//       pos/*.txt   ← one review per file, label "pos"
//     dev/
//       neg/*.txt
//       pos/*.txt
//
// Class ids come from the label vocabulary in class-directory
// insertion order: neg = 1, pos = 2. Files are read in sorted
// path order so the corpus order (and therefore every id the
// vocabulary assigns downstream) is identical run to run.
//
// A missing split directory is an error; a single unreadable
// file is logged and skipped.
//
// Reference: Rust Book §9 (Error Handling), §12 (File I/O)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::data::vocab::LabelVocab;
use crate::domain::review::{Review, Split};
use crate::domain::traits::ReviewSource;

/// The class sub-directories, in label-id order.
const CLASS_DIRS: [&str; 2] = ["neg", "pos"];

/// Loads review files from a corpus root directory.
pub struct DirReviewLoader {
    root: PathBuf,
    labels: LabelVocab,
}

impl DirReviewLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            labels: LabelVocab::from_classes(&CLASS_DIRS),
        }
    }

    /// The label vocabulary backing this loader's class ids
    pub fn labels(&self) -> &LabelVocab {
        &self.labels
    }
}

impl ReviewSource for DirReviewLoader {
    fn load_split(&self, split: Split) -> Result<Vec<Review>> {
        let split_dir = self.root.join(split.dir_name());
        let mut reviews = Vec::new();

        for class in CLASS_DIRS {
            let class_dir = split_dir.join(class);
            let label = self
                .labels
                .id_of(class)
                .expect("class directories are fixed at construction");

            // Collect paths first so they can be sorted — read_dir order
            // is filesystem-dependent
            let mut paths: Vec<PathBuf> = fs::read_dir(&class_dir)
                .with_context(|| {
                    format!("Cannot read review directory '{}'", class_dir.display())
                })?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("txt"))
                .collect();
            paths.sort();

            for path in paths {
                match fs::read_to_string(&path) {
                    Ok(text) => reviews.push(Review::new(text, label)),
                    // Log a warning but continue — don't fail on one bad file
                    Err(e) => {
                        tracing::warn!("Skipping '{}': {}", path.display(), e);
                    }
                }
            }
        }

        tracing::info!(
            "Loaded {} reviews from '{}'",
            reviews.len(),
            split_dir.display()
        );
        Ok(reviews)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn corpus_with(split: &str, class: &str, files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let class_dir = dir.path().join(split).join(class);
        fs::create_dir_all(&class_dir).unwrap();
        for (name, text) in files {
            fs::write(class_dir.join(name), text).unwrap();
        }
        dir
    }

    #[test]
    fn labels_follow_class_directories() {
        let dir = corpus_with("train", "neg", &[("0.txt", "awful")]);
        fs::create_dir_all(dir.path().join("train/pos")).unwrap();
        fs::write(dir.path().join("train/pos/0.txt"), "wonderful").unwrap();

        let loader = DirReviewLoader::new(dir.path());
        let reviews = loader.load_split(Split::Train).unwrap();

        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].text, "awful");
        assert_eq!(reviews[0].label, 1);
        assert_eq!(reviews[1].text, "wonderful");
        assert_eq!(reviews[1].label, 2);
    }

    #[test]
    fn non_txt_files_are_ignored() {
        let dir = corpus_with("train", "neg", &[("0.txt", "bad"), ("notes.md", "x")]);
        fs::create_dir_all(dir.path().join("train/pos")).unwrap();

        let loader = DirReviewLoader::new(dir.path());
        let reviews = loader.load_split(Split::Train).unwrap();
        assert_eq!(reviews.len(), 1);
    }

    #[test]
    fn missing_split_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DirReviewLoader::new(dir.path());
        assert!(loader.load_split(Split::Validation).is_err());
    }

    #[test]
    fn file_order_is_deterministic() {
        let dir = corpus_with(
            "dev",
            "neg",
            &[("b.txt", "second"), ("a.txt", "first")],
        );
        fs::create_dir_all(dir.path().join("dev/pos")).unwrap();

        let loader = DirReviewLoader::new(dir.path());
        let reviews = loader.load_split(Split::Validation).unwrap();
        assert_eq!(reviews[0].text, "first");
        assert_eq!(reviews[1].text, "second");
    }
}
