//! The feature frame: a candidate pool materialized for batch scoring.
//!
//! One row per canonical record, in pool order. The typed `MovieRecord`
//! already guarantees every column is present, so the frame only adds an
//! id -> row index and a lazily computed sentiment column.

use crate::error::{EngineError, Result};
use crate::sentiment::SentimentAnalyzer;
use catalog::{CandidatePool, MovieId, MovieRecord};
use once_cell::sync::OnceCell;
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::debug;

/// Row-ordered table of canonical records for one request.
#[derive(Debug)]
pub struct FeatureFrame {
    rows: Vec<MovieRecord>,
    index: HashMap<MovieId, usize>,
    /// Compound sentiment of each row's overview, filled on first use
    sentiment: OnceCell<Vec<f64>>,
}

impl FeatureFrame {
    /// Build a frame from a pool. Pools are id-unique, so this cannot fail.
    pub fn from_pool(pool: CandidatePool) -> Self {
        let rows = pool.into_records();
        let index = rows
            .iter()
            .enumerate()
            .map(|(row, record)| (record.id, row))
            .collect();

        Self {
            rows,
            index,
            sentiment: OnceCell::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[MovieRecord] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> Option<&MovieRecord> {
        self.rows.get(row)
    }

    /// Row index of a movie id, if the frame holds it
    pub fn row_of(&self, id: MovieId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn record(&self, id: MovieId) -> Option<&MovieRecord> {
        self.row_of(id).map(|row| &self.rows[row])
    }

    /// The soup column, in row order
    pub fn soups(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.soup.as_str())
    }

    /// The sentiment column, computed once per frame.
    ///
    /// Later calls return the memoized column even if a different analyzer
    /// is passed; the column belongs to the frame, not the analyzer.
    pub fn sentiment(&self, analyzer: &SentimentAnalyzer) -> &[f64] {
        self.sentiment.get_or_init(|| {
            debug!("Computing sentiment column for {} rows", self.rows.len());
            self.rows
                .par_iter()
                .map(|r| analyzer.compound(&r.overview))
                .collect()
        })
    }

    /// Whether the sentiment column has been computed yet
    pub fn has_sentiment(&self) -> bool {
        self.sentiment.get().is_some()
    }
}

/// Assemble a frame from an ordered list of records.
///
/// Rows are neither dropped nor reordered.
///
/// # Errors
/// `EngineError::DuplicateId` if two records share an id.
pub fn build_frame(records: Vec<MovieRecord>) -> Result<FeatureFrame> {
    let mut pool = CandidatePool::new();
    for record in records {
        let id = record.id;
        if !pool.push(record) {
            return Err(EngineError::DuplicateId(id));
        }
    }
    Ok(FeatureFrame::from_pool(pool))
}
