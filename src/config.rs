//! Configuration types for the support pipeline.
//!
//! Every threshold the pipeline uses lives here rather than in code. The
//! defaults are empirically chosen and carry no clinical meaning.

use crate::error::{Result, SupportError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for the support pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MindmateConfig {
    /// Emotion classifier confidences.
    pub classifier: ClassifierConfig,
    /// Optional remote emotion model.
    pub remote: RemoteConfig,
    /// Reference corpus locations and limits.
    pub corpus: CorpusConfig,
    /// Risk scoring thresholds.
    pub risk: RiskConfig,
    /// Reply composition settings.
    pub composer: ComposerConfig,
    /// Per-session history limits.
    pub session: SessionConfig,
}

/// Confidence values assigned by each classification method.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Confidence reported for a direct keyword match.
    pub keyword_confidence: f32,
    /// Conservative confidence reported for a corpus similarity match.
    pub similarity_confidence: f32,
    /// Best cosine similarity must be strictly above this to count as a match.
    pub min_similarity: f32,
    /// Confidence reported when no method produced a signal.
    pub default_confidence: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            keyword_confidence: 0.85,
            similarity_confidence: 0.6,
            min_similarity: 0.0,
            default_confidence: 0.5,
        }
    }
}

/// Remote emotion model (HuggingFace inference API compatible).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Master switch. Even when enabled, no call is made without a key.
    pub enabled: bool,
    /// Full model endpoint URL.
    pub endpoint: String,
    /// Bearer token. Falls back to the `api_key_env` environment variable.
    pub api_key: Option<String>,
    /// Environment variable consulted when `api_key` is unset.
    pub api_key_env: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://api-inference.huggingface.co/models/j-hartmann/emotion-english-distilroberta-base"
                .to_owned(),
            api_key: None,
            api_key_env: "HUGGING_FACE_API_KEY".to_owned(),
            timeout_secs: 10,
        }
    }
}

impl RemoteConfig {
    /// The bearer token to use, if any. Empty strings count as absent.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                std::env::var(&self.api_key_env)
                    .ok()
                    .filter(|k| !k.trim().is_empty())
            })
    }
}

/// Reference corpus files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Directory holding the CSV files.
    pub dir: PathBuf,
    /// Labeled emotion examples (`text`, `emotion` columns).
    pub emotions_file: String,
    /// Non-distressed reference texts (`text` column).
    pub control_file: String,
    /// Distressed reference texts (`text` column).
    pub condition_file: String,
    /// Vocabulary cap for the TF-IDF index (most frequent terms kept).
    pub max_features: usize,
    /// Rows read from each risk reference corpus.
    pub reference_sample_rows: usize,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("datasets"),
            emotions_file: "goemotions.csv".to_owned(),
            control_file: "control.csv".to_owned(),
            condition_file: "condition.csv".to_owned(),
            max_features: 5_000,
            reference_sample_rows: 100,
        }
    }
}

impl CorpusConfig {
    pub fn emotions_path(&self) -> PathBuf {
        self.dir.join(&self.emotions_file)
    }

    pub fn control_path(&self) -> PathBuf {
        self.dir.join(&self.control_file)
    }

    pub fn condition_path(&self) -> PathBuf {
        self.dir.join(&self.condition_file)
    }
}

/// Risk accumulation thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Upper clamp for the cumulative session score.
    pub max_score: u8,
    /// Cumulative score at which a professional-help suggestion is added.
    pub medium_threshold: u8,
    /// Cumulative score at which the crisis resources are added.
    pub high_threshold: u8,
    /// Condition overlap must exceed control overlap by this factor to score 2.
    pub overlap_multiplier: f32,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            max_score: 10,
            medium_threshold: 4,
            high_threshold: 7,
            overlap_multiplier: 1.5,
        }
    }
}

/// Reply composition settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Number of recently emitted replies remembered process-wide.
    pub memory_capacity: usize,
    /// Assembly attempts before accepting a repeated reply.
    pub max_attempts: usize,
    /// How many recent history entries are inspected for a pattern.
    pub pattern_window: usize,
    /// Occurrences of the current emotion in the window that trigger the addendum.
    pub pattern_min_count: usize,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            memory_capacity: 50,
            max_attempts: 15,
            pattern_window: 5,
            pattern_min_count: 3,
        }
    }
}

/// Per-session history limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Emotion categories kept per session.
    pub emotion_history_cap: usize,
    /// Categories reported back as mood history.
    pub mood_history_len: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            emotion_history_cap: 20,
            mood_history_len: 10,
        }
    }
}

impl MindmateConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| SupportError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| SupportError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `<config dir>/mindmate/config.toml`.
    pub fn default_config_path() -> PathBuf {
        match dirs::config_dir() {
            Some(dir) => dir.join("mindmate").join("config.toml"),
            None => PathBuf::from("/tmp/mindmate-config/config.toml"),
        }
    }

    /// Checks cross-field invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SupportError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let risk = &self.risk;
        if risk.medium_threshold == 0 || risk.medium_threshold >= risk.high_threshold {
            return Err(SupportError::Config(
                "risk.medium_threshold must be > 0 and below risk.high_threshold".into(),
            ));
        }
        if risk.high_threshold > risk.max_score {
            return Err(SupportError::Config(
                "risk.high_threshold must not exceed risk.max_score".into(),
            ));
        }
        if risk.overlap_multiplier < 1.0 {
            return Err(SupportError::Config("risk.overlap_multiplier must be >= 1.0".into()));
        }

        let c = &self.classifier;
        if !(0.0..1.0).contains(&c.min_similarity) {
            return Err(SupportError::Config(
                "classifier.min_similarity must be within 0.0..1.0".into(),
            ));
        }
        for (name, value) in [
            ("keyword_confidence", c.keyword_confidence),
            ("similarity_confidence", c.similarity_confidence),
            ("default_confidence", c.default_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SupportError::Config(format!(
                    "classifier.{name} must be within 0.0..=1.0"
                )));
            }
        }

        let composer = &self.composer;
        if composer.max_attempts == 0 || composer.memory_capacity == 0 {
            return Err(SupportError::Config(
                "composer.max_attempts and composer.memory_capacity must be > 0".into(),
            ));
        }
        if composer.pattern_min_count == 0
            || composer.pattern_min_count > composer.pattern_window
        {
            return Err(SupportError::Config(
                "composer.pattern_min_count must be within 1..=pattern_window".into(),
            ));
        }

        if self.remote.timeout_secs == 0 {
            return Err(SupportError::Config("remote.timeout_secs must be greater than 0".into()));
        }
        if self.session.emotion_history_cap == 0 {
            return Err(SupportError::Config(
                "session.emotion_history_cap must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
