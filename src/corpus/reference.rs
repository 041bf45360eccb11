//! Distressed vs non-distressed reference texts for risk comparison.

use std::collections::HashSet;

/// Whitespace-split lowercase word sets for the two reference groups.
///
/// Both groups are pre-tokenized at load so a comparison is a bounded
/// number of set intersections.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCorpora {
    control: Vec<HashSet<String>>,
    condition: Vec<HashSet<String>>,
}

/// Summed word overlap of a message with each reference group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub control: usize,
    pub condition: usize,
}

impl ReferenceCorpora {
    pub fn new(control: &[String], condition: &[String]) -> Self {
        Self {
            control: control.iter().map(|t| word_set(t)).collect(),
            condition: condition.iter().map(|t| word_set(t)).collect(),
        }
    }

    pub fn control_len(&self) -> usize {
        self.control.len()
    }

    pub fn condition_len(&self) -> usize {
        self.condition.len()
    }

    /// Sum over each group of `|words(text) ∩ words(row)|`.
    pub fn overlap(&self, text: &str) -> Overlap {
        let words = word_set(text);
        let total = |rows: &[HashSet<String>]| -> usize {
            rows.iter()
                .map(|row| row.intersection(&words).count())
                .sum()
        };
        Overlap {
            control: total(&self.control),
            condition: total(&self.condition),
        }
    }
}

fn word_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn overlap_counts_each_row() {
        let corpora = ReferenceCorpora::new(
            &strings(&["went hiking today", "dinner was nice"]),
            &strings(&["i cannot sleep again", "i feel nothing today"]),
        );
        let overlap = corpora.overlap("I feel like I cannot sleep today");
        // control: "today" once. condition: {i, cannot, sleep} + {i, feel, today}.
        assert_eq!(
            overlap,
            Overlap {
                control: 1,
                condition: 6,
            }
        );
    }

    #[test]
    fn duplicate_words_count_once_per_row() {
        let corpora = ReferenceCorpora::new(&strings(&["sleep sleep"]), &[]);
        assert_eq!(corpora.overlap("sleep sleep sleep").control, 1);
        assert_eq!(corpora.condition_len(), 0);
    }
}
