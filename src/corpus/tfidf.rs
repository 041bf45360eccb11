//! TF-IDF index over a labeled emotion corpus.
//!
//! # Scheme
//!
//! ```text
//! text → lowercase → alphanumeric tokens (len ≥ 2, stop words dropped)
//!      → term counts × smoothed idf → L2-normalize
//! ```
//!
//! Idf is `ln((1 + n) / (1 + df)) + 1`. The vocabulary keeps the
//! `max_features` most frequent terms across the corpus, ties broken
//! alphabetically so the index is identical on every build. Vectors are
//! unit length, so cosine similarity is a plain sparse dot product.

use crate::corpus::loader::LabeledEntry;
use crate::emotion::Category;
use std::collections::HashMap;

/// Common English function words carrying no emotional signal.
const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "again", "all", "also", "am", "an", "and", "any", "are", "as", "at",
    "be", "been", "being", "but", "by", "can", "could", "did", "do", "does", "doing", "for", "from",
    "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how", "if", "in",
    "into", "is", "it", "its", "just", "me", "my", "myself", "of", "on", "or", "our", "ours", "she",
    "so", "than", "that", "the", "their", "them", "then", "there", "these", "they", "this", "those",
    "to", "too", "us", "was", "we", "were", "what", "when", "where", "which", "while", "who", "why",
    "will", "with", "would", "you", "your", "yours",
];

/// Sparse vector: `(term index, weight)` pairs sorted by term index.
pub type SparseVec = Vec<(usize, f32)>;

/// Best-matching corpus entry for a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Row index in the corpus.
    pub index: usize,
    pub category: Category,
    /// Cosine similarity in `0.0..=1.0`.
    pub similarity: f32,
}

/// Vectorized reference corpus. Immutable once built.
#[derive(Debug, Clone)]
pub struct TfidfIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    rows: Vec<SparseVec>,
    categories: Vec<Category>,
}

impl TfidfIndex {
    /// Build an index from labeled entries.
    pub fn build(entries: &[LabeledEntry], max_features: usize) -> Self {
        let docs: Vec<Vec<String>> = entries.iter().map(|e| tokenize(&e.text)).collect();

        let mut term_freq: HashMap<&str, usize> = HashMap::new();
        for doc in &docs {
            for token in doc {
                *term_freq.entry(token.as_str()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&str, usize)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(max_features);
        // Column order follows the alphabet, independent of frequency rank.
        let mut terms: Vec<&str> = ranked.into_iter().map(|(t, _)| t).collect();
        terms.sort_unstable();

        let vocabulary: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(i, t)| ((*t).to_owned(), i))
            .collect();

        let mut doc_freq = vec![0usize; vocabulary.len()];
        for doc in &docs {
            let mut seen: Vec<usize> = doc
                .iter()
                .filter_map(|t| vocabulary.get(t))
                .copied()
                .collect();
            seen.sort_unstable();
            seen.dedup();
            for idx in seen {
                doc_freq[idx] += 1;
            }
        }

        let n = docs.len() as f32;
        let idf: Vec<f32> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        let mut index = Self {
            vocabulary,
            idf,
            rows: Vec::with_capacity(docs.len()),
            categories: entries.iter().map(|e| e.category).collect(),
        };
        index.rows = docs.iter().map(|doc| index.weigh(doc)).collect();
        index
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Vectorize `text` against this index's vocabulary.
    pub fn vectorize(&self, text: &str) -> SparseVec {
        self.weigh(&tokenize(text))
    }

    /// The single most similar entry. Exact ties keep the lowest row index.
    ///
    /// Returns `None` for an empty index. A query sharing no vocabulary with
    /// the corpus yields similarity `0.0` against row 0.
    pub fn nearest(&self, text: &str) -> Option<Neighbor> {
        let query = self.vectorize(text);
        let mut best: Option<Neighbor> = None;
        for (index, row) in self.rows.iter().enumerate() {
            let similarity = dot(&query, row);
            if best.is_none_or(|b| similarity > b.similarity) {
                best = Some(Neighbor {
                    index,
                    category: self.categories[index],
                    similarity,
                });
            }
        }
        best
    }

    fn weigh(&self, tokens: &[String]) -> SparseVec {
        let mut counts: HashMap<usize, f32> = HashMap::new();
        for token in tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }
        let mut vec: SparseVec = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();
        vec.sort_unstable_by_key(|&(idx, _)| idx);
        l2_normalize(&mut vec);
        vec
    }
}

/// Lowercase alphanumeric tokens of at least two characters, minus stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2 && !STOP_WORDS.contains(t))
        .map(str::to_owned)
        .collect()
}

fn l2_normalize(vec: &mut SparseVec) {
    let norm = vec.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
    if norm > 0.0 {
        for (_, w) in vec.iter_mut() {
            *w /= norm;
        }
    }
}

/// Dot product of two index-sorted sparse vectors.
fn dot(a: &SparseVec, b: &SparseVec) -> f32 {
    let (mut i, mut j) = (0, 0);
    let mut sum = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}
