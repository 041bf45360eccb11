//! Single-turn risk increments.
//!
//! The scorer returns a delta in `0..=3` for one message. Accumulation and
//! clamping belong to [`crate::session::SessionState`]. The score is a
//! heuristic severity proxy with no clinical meaning.
//!
//! Rules, first match wins:
//!
//! | Signal                                            | Increment |
//! |---------------------------------------------------|-----------|
//! | self-harm / suicide phrase                        | 3         |
//! | hopelessness / worthlessness phrase               | 2         |
//! | classified as severe distress                     | 3         |
//! | sadness or anxiety with a mild-distress word      | 1         |
//! | reference corpora: condition > control × 1.5      | 2         |
//! | reference corpora: condition > control            | 1         |
//! | otherwise                                         | 0         |

use crate::config::RiskConfig;
use crate::corpus::ReferenceCorpora;
use crate::emotion::Category;
use crate::lexicon::{self, HIGH_RISK_PHRASES, MEDIUM_RISK_PHRASES, MILD_DISTRESS_KEYWORDS};
use std::sync::Arc;

pub const HIGH_RISK_INCREMENT: u8 = 3;
pub const MEDIUM_RISK_INCREMENT: u8 = 2;
pub const LOW_RISK_INCREMENT: u8 = 1;

/// Stateless scorer over shared reference corpora.
#[derive(Debug, Clone)]
pub struct RiskScorer {
    overlap_multiplier: f32,
    reference: Option<Arc<ReferenceCorpora>>,
}

impl RiskScorer {
    pub fn new(config: &RiskConfig, reference: Option<Arc<ReferenceCorpora>>) -> Self {
        Self {
            overlap_multiplier: config.overlap_multiplier,
            reference,
        }
    }

    /// Risk increment for one message given its classified emotion.
    pub fn score(&self, text: &str, emotion: Category) -> u8 {
        let normalized = lexicon::normalize(text);

        if lexicon::contains_any(&normalized, HIGH_RISK_PHRASES) {
            return HIGH_RISK_INCREMENT;
        }
        if lexicon::contains_any(&normalized, MEDIUM_RISK_PHRASES) {
            return MEDIUM_RISK_INCREMENT;
        }
        match emotion {
            Category::SevereDistress => return HIGH_RISK_INCREMENT,
            Category::Sadness | Category::Anxiety
                if lexicon::contains_any(&normalized, MILD_DISTRESS_KEYWORDS) =>
            {
                return LOW_RISK_INCREMENT;
            }
            _ => {}
        }

        self.compare_with_reference(&normalized)
    }

    fn compare_with_reference(&self, normalized: &str) -> u8 {
        let Some(reference) = self.reference.as_ref() else {
            return 0;
        };
        let overlap = reference.overlap(normalized);
        let condition = overlap.condition as f32;
        let control = overlap.control as f32;
        if condition > control * self.overlap_multiplier {
            MEDIUM_RISK_INCREMENT
        } else if condition > control {
            LOW_RISK_INCREMENT
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> RiskScorer {
        RiskScorer::new(&RiskConfig::default(), None)
    }

    fn scorer_with_reference(control: &[&str], condition: &[&str]) -> RiskScorer {
        let own = |rows: &[&str]| rows.iter().map(|s| (*s).to_owned()).collect::<Vec<_>>();
        RiskScorer::new(
            &RiskConfig::default(),
            Some(Arc::new(ReferenceCorpora::new(&own(control), &own(condition)))),
        )
    }

    #[test]
    fn high_risk_phrase_scores_three_for_any_emotion() {
        let s = scorer();
        for emotion in Category::ALL {
            assert_eq!(s.score("I want to end it all", emotion), 3, "{emotion}");
        }
    }

    #[test]
    fn high_risk_beats_medium() {
        assert_eq!(
            scorer().score("I'm useless and I want to die", Category::Neutral),
            3
        );
    }

    #[test]
    fn medium_risk_phrase_scores_two() {
        assert_eq!(
            scorer().score("I feel like such a burden", Category::Joy),
            2
        );
        assert_eq!(
            scorer().score("Nothing matters anymore", Category::Neutral),
            2
        );
    }

    #[test]
    fn severe_distress_category_scores_three() {
        assert_eq!(
            scorer().score("I don't see a way out", Category::SevereDistress),
            3
        );
    }

    #[test]
    fn mild_word_needs_sad_or_anxious_label() {
        let s = scorer();
        assert_eq!(s.score("so tired lately", Category::Sadness), 1);
        assert_eq!(s.score("so tired lately", Category::Anxiety), 1);
        assert_eq!(s.score("so tired lately", Category::Anger), 0);
        assert_eq!(s.score("the rain again", Category::Sadness), 0);
    }

    #[test]
    fn no_reference_defaults_to_zero() {
        assert_eq!(scorer().score("lunch was alright", Category::Neutral), 0);
    }

    #[test]
    fn reference_strongly_condition_scores_two() {
        let s = scorer_with_reference(
            &["went to the gym"],
            &["cannot get out of bed", "bed all day again"],
        );
        // condition: {bed} + {bed, all, day}; control: none.
        assert_eq!(s.score("stayed in bed all day", Category::Neutral), 2);
    }

    #[test]
    fn reference_slightly_condition_scores_one() {
        let s = scorer_with_reference(&["in the park all day"], &["in bed all day"]);
        // control {in, all, day} = 3; condition {in, bed, all, day} = 4; 4 <= 4.5.
        assert_eq!(s.score("in bed all day", Category::Neutral), 1);
    }

    #[test]
    fn reference_control_leaning_scores_zero() {
        let s = scorer_with_reference(&["lovely walk in the park"], &["alone in bed"]);
        assert_eq!(s.score("walk in the park", Category::Neutral), 0);
    }

    #[test]
    fn keyword_signal_skips_reference() {
        let s = scorer_with_reference(&[], &["sad sad sad", "so sad today"]);
        assert_eq!(s.score("sad today", Category::Sadness), 1);
    }
}
