//! Reference corpora, loaded once at startup and read-only afterwards.
//!
//! Sub-modules:
//! - `loader`: CSV readers with per-row skipping.
//! - `tfidf`: TF-IDF index used by the similarity classifier.
//! - `reference`: control / condition word sets used by the risk scorer.
//!
//! Every file is optional. A missing or unreadable file is logged and the
//! matching capability is simply absent.

pub mod loader;
pub mod reference;
pub mod tfidf;

pub use loader::LabeledEntry;
pub use reference::{Overlap, ReferenceCorpora};
pub use tfidf::{Neighbor, TfidfIndex};

use crate::config::CorpusConfig;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared handles to whichever corpora could be loaded.
#[derive(Debug, Clone, Default)]
pub struct Corpora {
    /// Emotion similarity index, if the labeled corpus loaded with rows.
    pub emotions: Option<Arc<TfidfIndex>>,
    /// Risk reference sets, present only when both files loaded.
    pub reference: Option<Arc<ReferenceCorpora>>,
}

impl Corpora {
    /// Load all corpora named in `config`. Never fails.
    pub fn load(config: &CorpusConfig) -> Self {
        let emotions = load_emotion_index(&config.emotions_path(), config.max_features);
        let reference = load_reference(
            &config.control_path(),
            &config.condition_path(),
            config.reference_sample_rows,
        );
        Self {
            emotions,
            reference,
        }
    }

    /// No corpus at all; classification is keyword / remote / default only.
    pub fn empty() -> Self {
        Self::default()
    }
}

fn load_emotion_index(path: &Path, max_features: usize) -> Option<Arc<TfidfIndex>> {
    if !path.exists() {
        warn!(path = %path.display(), "emotion corpus not found; similarity fallback disabled");
        return None;
    }
    match loader::load_labeled(path) {
        Ok(entries) if entries.is_empty() => {
            warn!(path = %path.display(), "emotion corpus has no usable rows");
            None
        }
        Ok(entries) => {
            let index = TfidfIndex::build(&entries, max_features);
            info!(
                rows = index.len(),
                vocabulary = index.vocabulary_size(),
                "emotion corpus indexed"
            );
            Some(Arc::new(index))
        }
        Err(e) => {
            warn!(error = %e, "emotion corpus unreadable; similarity fallback disabled");
            None
        }
    }
}

fn load_reference(control: &Path, condition: &Path, limit: usize) -> Option<Arc<ReferenceCorpora>> {
    let read = |path: &Path| -> Option<Vec<String>> {
        if !path.exists() {
            warn!(path = %path.display(), "risk reference corpus not found");
            return None;
        }
        loader::load_texts(path, limit)
            .map_err(|e| warn!(error = %e, "risk reference corpus unreadable"))
            .ok()
    };

    let control = read(control)?;
    let condition = read(condition)?;
    let corpora = ReferenceCorpora::new(&control, &condition);
    info!(
        control = corpora.control_len(),
        condition = corpora.condition_len(),
        "risk reference corpora loaded"
    );
    Some(Arc::new(corpora))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn missing_directory_loads_nothing() {
        let config = CorpusConfig {
            dir: "/nonexistent/mindmate-datasets".into(),
            ..Default::default()
        };
        let corpora = Corpora::load(&config);
        assert!(corpora.emotions.is_none());
        assert!(corpora.reference.is_none());
    }

    #[test]
    fn reference_requires_both_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("control.csv"), "text\nnice walk\n").unwrap();
        let config = CorpusConfig {
            dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        assert!(Corpora::load(&config).reference.is_none());

        std::fs::write(dir.path().join("condition.csv"), "text\nso alone\n").unwrap();
        let corpora = Corpora::load(&config);
        let reference = corpora.reference.unwrap();
        assert_eq!(reference.control_len(), 1);
        assert_eq!(reference.condition_len(), 1);
    }

    #[test]
    fn header_only_emotion_corpus_is_disabled() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("goemotions.csv"), "text,emotion\n").unwrap();
        let config = CorpusConfig {
            dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        assert!(Corpora::load(&config).emotions.is_none());
    }
}
