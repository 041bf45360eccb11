//! Static keyword tables for emotion matching and risk scoring.
//!
//! The emotion table is an ordered slice, not a map: matching walks it
//! top to bottom and the first category with a hit wins. `SevereDistress`
//! sits first so a crisis phrase is never shadowed by a milder keyword
//! that happens to appear in the same message.

use crate::emotion::Category;

// ── Emotion keywords ────────────────────────────────────────────────────

/// (category, keywords) in match precedence order.
const EMOTION_TABLE: &[(Category, &[&str])] = &[
    (
        Category::SevereDistress,
        &[
            "suicide",
            "kill myself",
            "end it all",
            "want to die",
            "hopeless",
            "worthless",
            "no reason to live",
            "give up on life",
        ],
    ),
    (
        Category::Sadness,
        &[
            "sad",
            "depressed",
            "down",
            "unhappy",
            "crying",
            "tears",
            "lonely",
            "empty",
            "heartbroken",
            "miserable",
            "gloomy",
        ],
    ),
    (
        Category::Anxiety,
        &[
            "anxious",
            "worried",
            "nervous",
            "scared",
            "afraid",
            "panic",
            "stress",
            "overwhelmed",
            "terrified",
            "fear",
            "uneasy",
        ],
    ),
    (
        Category::Anger,
        &[
            "angry",
            "mad",
            "furious",
            "hate",
            "irritated",
            "frustrated",
            "annoyed",
            "rage",
            "pissed",
            "bitter",
            "resentful",
        ],
    ),
    (
        Category::Joy,
        &[
            "happy",
            "great",
            "excellent",
            "wonderful",
            "amazing",
            "fantastic",
            "joyful",
            "excited",
            "thrilled",
            "delighted",
            "cheerful",
            "good",
        ],
    ),
    (
        Category::Neutral,
        &["okay", "fine", "alright", "normal", "average"],
    ),
];

// ── Risk tiers ──────────────────────────────────────────────────────────

/// Self-harm and suicide indicators.
pub const HIGH_RISK_PHRASES: &[&str] = &[
    "suicide",
    "kill myself",
    "end it all",
    "want to die",
    "no reason to live",
    "better off dead",
    "harm myself",
    "can't go on",
    "give up on life",
];

/// Hopelessness and worthlessness indicators.
pub const MEDIUM_RISK_PHRASES: &[&str] = &[
    "hopeless",
    "worthless",
    "nobody cares",
    "hate myself",
    "failure",
    "useless",
    "burden",
    "can't do anything right",
    "everything is wrong",
    "nothing matters",
];

/// Mild distress words, only counted alongside a sadness or anxiety label.
pub const MILD_DISTRESS_KEYWORDS: &[&str] = &[
    "sad",
    "depressed",
    "anxious",
    "worried",
    "lonely",
    "empty",
    "tired",
    "exhausted",
    "stressed",
];

/// Lowercase `text` and fold typographic apostrophes so "can’t" matches "can't".
pub fn normalize(text: &str) -> String {
    text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'")
}

/// First category whose keyword list has a substring hit in `normalized`.
pub fn match_category(normalized: &str) -> Option<Category> {
    EMOTION_TABLE
        .iter()
        .find(|(_, keywords)| contains_any(normalized, keywords))
        .map(|&(category, _)| category)
}

/// Whether any phrase occurs as a substring of `normalized`.
pub fn contains_any(normalized: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| normalized.contains(p))
}

/// Keywords registered for `category`; empty for `Other`.
pub fn keywords_for(category: Category) -> &'static [&'static str] {
    EMOTION_TABLE
        .iter()
        .find(|(c, _)| *c == category)
        .map(|&(_, keywords)| keywords)
        .unwrap_or(&[])
}
