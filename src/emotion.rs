//! Emotion categories and classification results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete emotional-state label assigned to a message.
///
/// `Other` holds labels produced by a corpus or remote model that have no
/// dedicated response pool. It is answered from the neutral pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    SevereDistress,
    Sadness,
    Anxiety,
    Anger,
    Joy,
    Neutral,
    Other,
}

impl Category {
    /// Every category, in keyword precedence order.
    pub const ALL: [Category; 7] = [
        Category::SevereDistress,
        Category::Sadness,
        Category::Anxiety,
        Category::Anger,
        Category::Joy,
        Category::Neutral,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::SevereDistress => "severe_distress",
            Category::Sadness => "sadness",
            Category::Anxiety => "anxiety",
            Category::Anger => "anger",
            Category::Joy => "joy",
            Category::Neutral => "neutral",
            Category::Other => "other",
        }
    }

    /// Map a free-form model or corpus label onto a category.
    ///
    /// Covers the GoEmotions label set and the seven-way DistilRoBERTa
    /// emotion model. Unknown labels become [`Category::Other`].
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "severe_distress" | "suicidal" | "crisis" => Category::SevereDistress,
            "sadness" | "sad" | "grief" | "disappointment" | "remorse" => Category::Sadness,
            "anxiety" | "fear" | "nervousness" | "worry" => Category::Anxiety,
            "anger" | "annoyance" | "disgust" | "disapproval" => Category::Anger,
            "joy" | "amusement" | "excitement" | "gratitude" | "love" | "optimism" | "pride"
            | "relief" | "admiration" | "approval" | "caring" => Category::Joy,
            "neutral" => Category::Neutral,
            _ => Category::Other,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which strategy produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Keyword,
    Remote,
    Similarity,
    Default,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Keyword => "keyword",
            Method::Remote => "remote",
            Method::Similarity => "similarity",
            Method::Default => "default",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Category,
    /// Always within `0.0..=1.0`.
    pub confidence: f32,
    pub method: Method,
}

impl ClassificationResult {
    /// Builds a result, clamping `confidence` into `0.0..=1.0`.
    pub fn new(category: Category, confidence: f32, method: Method) -> Self {
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            category,
            confidence,
            method,
        }
    }
}
