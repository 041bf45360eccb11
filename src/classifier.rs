//! Emotion classifier: one decision from several strategies.
//!
//! # Precedence
//!
//! 1. **Keyword**: lexicon substring match, fixed confidence.
//! 2. **Remote**: optional hosted model; any failure falls through.
//! 3. **Similarity**: nearest TF-IDF corpus entry (single best row,
//!    lowest row index on ties). No overlap at all → `neutral`.
//! 4. **Default**: `neutral` when no corpus is loaded.
//!
//! `classify` never returns an error. Empty or whitespace-only input goes
//! straight to the default result without touching the network.

use crate::config::ClassifierConfig;
use crate::corpus::TfidfIndex;
use crate::emotion::{Category, ClassificationResult, Method};
use crate::lexicon;
use crate::remote::EmotionModel;
use std::sync::Arc;
use tracing::{debug, warn};

/// Emotion classifier over shared, read-only resources.
#[derive(Clone)]
pub struct EmotionClassifier {
    config: ClassifierConfig,
    index: Option<Arc<TfidfIndex>>,
    remote: Option<Arc<dyn EmotionModel>>,
}

impl std::fmt::Debug for EmotionClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmotionClassifier")
            .field("corpus_rows", &self.index.as_ref().map(|i| i.len()))
            .field("remote", &self.remote.as_ref().map(|r| r.name().to_owned()))
            .finish()
    }
}

impl EmotionClassifier {
    pub fn new(config: ClassifierConfig, index: Option<Arc<TfidfIndex>>) -> Self {
        Self {
            config,
            index,
            remote: None,
        }
    }

    /// Attach a remote model consulted after the keyword pass.
    pub fn with_remote(mut self, model: Arc<dyn EmotionModel>) -> Self {
        self.remote = Some(model);
        self
    }

    pub fn has_corpus(&self) -> bool {
        self.index.is_some()
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Classify `text` into exactly one category.
    pub async fn classify(&self, text: &str) -> ClassificationResult {
        if text.trim().is_empty() {
            return self.default_result();
        }

        let result = match self.classify_keyword(text) {
            Some(hit) => hit,
            None => match self.classify_remote(text).await {
                Some(hit) => hit,
                None => self
                    .classify_similarity(text)
                    .unwrap_or_else(|| self.default_result()),
            },
        };

        debug!(
            emotion = %result.category,
            confidence = result.confidence,
            method = %result.method,
            "message classified"
        );
        result
    }

    /// Lexicon pass only.
    pub fn classify_keyword(&self, text: &str) -> Option<ClassificationResult> {
        lexicon::match_category(&lexicon::normalize(text)).map(|category| {
            ClassificationResult::new(category, self.config.keyword_confidence, Method::Keyword)
        })
    }

    async fn classify_remote(&self, text: &str) -> Option<ClassificationResult> {
        let model = self.remote.as_ref()?;
        match model.predict(text).await {
            Ok(prediction) => Some(ClassificationResult::new(
                Category::from_label(&prediction.label),
                prediction.score,
                Method::Remote,
            )),
            Err(e) => {
                warn!(
                    model = model.name(),
                    error = %e,
                    "remote classifier unavailable; falling back"
                );
                None
            }
        }
    }

    /// Corpus similarity pass. `None` when no corpus is loaded.
    pub fn classify_similarity(&self, text: &str) -> Option<ClassificationResult> {
        let neighbor = self.index.as_ref()?.nearest(text)?;
        // A query sharing no vocabulary is neutral whatever the threshold.
        let threshold = self.config.min_similarity.max(0.0);
        let result = if neighbor.similarity > threshold {
            ClassificationResult::new(
                neighbor.category,
                self.config.similarity_confidence,
                Method::Similarity,
            )
        } else {
            ClassificationResult::new(
                Category::Neutral,
                self.config.default_confidence,
                Method::Similarity,
            )
        };
        Some(result)
    }

    fn default_result(&self) -> ClassificationResult {
        ClassificationResult::new(
            Category::Neutral,
            self.config.default_confidence,
            Method::Default,
        )
    }
}
