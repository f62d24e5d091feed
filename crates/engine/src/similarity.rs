//! TF-IDF similarity space over the soups of one feature frame.
//!
//! ## Algorithm
//! 1. Tokenize each soup: runs of two or more word characters, lowercase
//! 2. Drop English stop words, then emit unigrams and adjacent bigrams
//! 3. Vocabulary = every term seen in at least one document, sorted
//! 4. idf(t) = ln((1 + n) / (1 + df(t))) + 1
//! 5. weight = raw term count * idf, then each row is L2-normalized
//!
//! Rows are unit length, so cosine similarity is a sparse dot product.
//! The space is refit per request: vocabularies differ from pool to pool
//! and pools are small.

use crate::error::{EngineError, Result};
use crate::frame::FeatureFrame;
use crate::stop_words::is_stop_word;
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Sparse, L2-normalized weight vector. Entries are sorted by term index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dot product by merging the two sorted entry lists
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_val) = self.entries[i];
            let (b_idx, b_val) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_val * b_val;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// One weight vector per frame row, index-aligned with the frame
pub type DocumentVectors = Vec<SparseVector>;

/// A fitted term-weighting space
#[derive(Debug, Clone)]
pub struct SimilarityModel {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl SimilarityModel {
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|i| self.idf[i])
    }

    /// Project a document into the fitted space. Unknown terms are ignored.
    pub fn transform(&self, document: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in analyze(document) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut entries {
                *w /= norm;
            }
        }

        SparseVector { entries }
    }
}

/// Split text into stop-word-filtered unigrams followed by bigrams
pub fn analyze(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !is_stop_word(t))
        .collect();

    let mut terms: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    terms.extend(tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
    terms
}

/// Fit the TF-IDF space over the frame's soup column.
///
/// # Returns
/// The model plus one vector per row, in row order.
///
/// # Errors
/// `EngineError::EmptyVocabulary` when no soup yields any term.
pub fn fit(frame: &FeatureFrame) -> Result<(SimilarityModel, DocumentVectors)> {
    let analyzed: Vec<Vec<String>> = frame.soups().map(analyze).collect();

    let mut document_frequency: HashMap<&str, usize> = HashMap::new();
    for terms in &analyzed {
        let unique: HashSet<&str> = terms.iter().map(String::as_str).collect();
        for term in unique {
            *document_frequency.entry(term).or_insert(0) += 1;
        }
    }

    if document_frequency.is_empty() {
        return Err(EngineError::EmptyVocabulary);
    }

    // Sorted terms give stable indices across runs
    let mut terms: Vec<&str> = document_frequency.keys().copied().collect();
    terms.sort_unstable();

    let n_documents = frame.len() as f64;
    let idf: Vec<f64> = terms
        .iter()
        .map(|t| {
            let df = document_frequency[t] as f64;
            ((1.0 + n_documents) / (1.0 + df)).ln() + 1.0
        })
        .collect();

    let vocabulary: HashMap<String, usize> = terms
        .iter()
        .enumerate()
        .map(|(idx, t)| (t.to_string(), idx))
        .collect();

    let model = SimilarityModel { vocabulary, idf };
    let vectors: DocumentVectors = frame
        .rows()
        .par_iter()
        .map(|r| model.transform(&r.soup))
        .collect();

    debug!(
        "Fitted TF-IDF space: {} documents, {} terms",
        frame.len(),
        model.vocabulary_size()
    );
    Ok((model, vectors))
}

/// Cosine similarity of row `row` against every row, itself included.
///
/// Returns `None` if `row` is out of range. A row whose soup produced no
/// terms has similarity 0 to everything.
pub fn similarity(vectors: &[SparseVector], row: usize) -> Option<Vec<f64>> {
    let target = vectors.get(row)?;
    Some(vectors.iter().map(|v| target.dot(v)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::build_frame;
    use catalog::MovieRecord;

    fn frame_of(soups: &[&str]) -> FeatureFrame {
        let records = soups
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let mut r = MovieRecord::new(i as u64 + 1, "m");
                r.soup = s.to_string();
                r
            })
            .collect();
        build_frame(records).unwrap()
    }

    #[test]
    fn test_analyze_removes_stop_words_and_builds_bigrams() {
        let terms = analyze("The haunted hotel in the snow");
        assert_eq!(
            terms,
            vec!["haunted", "hotel", "snow", "haunted hotel", "hotel snow"]
        );
    }

    #[test]
    fn test_analyze_skips_single_characters() {
        assert_eq!(analyze("a b c"), Vec::<String>::new());
    }

    #[test]
    fn test_single_document_fits() {
        let frame = frame_of(&["horror hotel"]);
        let (model, vectors) = fit(&frame).unwrap();
        assert_eq!(model.vocabulary_size(), 3);
        let sims = similarity(&vectors, 0).unwrap();
        assert!((sims[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_vocabulary_is_an_error() {
        let frame = frame_of(&["", "the and of"]);
        assert_eq!(fit(&frame).unwrap_err(), EngineError::EmptyVocabulary);
    }

    #[test]
    fn test_similarity_orders_related_documents() {
        let frame = frame_of(&[
            "horror hotel ghost winter",
            "horror ghost haunted house",
            "comedy wedding romance",
        ]);
        let (_, vectors) = fit(&frame).unwrap();
        let sims = similarity(&vectors, 0).unwrap();

        assert_eq!(sims.len(), 3);
        assert!((sims[0] - 1.0).abs() < 1e-9);
        assert!(sims[1] > sims[2]);
        assert_eq!(sims[2], 0.0);
        assert!(similarity(&vectors, 3).is_none());
    }

    #[test]
    fn test_rarer_terms_get_higher_idf() {
        let frame = frame_of(&["horror ghost", "horror hotel", "horror clown"]);
        let (model, _) = fit(&frame).unwrap();
        assert!(model.idf("ghost").unwrap() > model.idf("horror").unwrap());
        assert!((model.idf("horror").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_soup_row_is_zero_vector() {
        let frame = frame_of(&["horror ghost", ""]);
        let (_, vectors) = fit(&frame).unwrap();
        assert!(vectors[1].is_zero());
        assert_eq!(similarity(&vectors, 1).unwrap(), vec![0.0, 0.0]);
    }
}
