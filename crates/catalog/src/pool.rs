//! The candidate pool for one recommendation request.

use crate::types::{MovieId, MovieRecord};
use std::collections::HashSet;

/// Insertion-ordered collection of canonical records, unique by id.
///
/// A pool is built fresh for each request and dropped after scoring.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    records: Vec<MovieRecord>,
    ids: HashSet<MovieId>,
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from records, keeping the first occurrence of each id
    pub fn from_records(records: impl IntoIterator<Item = MovieRecord>) -> Self {
        let mut pool = Self::new();
        for record in records {
            pool.push(record);
        }
        pool
    }

    /// Append a record unless its id is already present.
    ///
    /// Returns `true` if the record was inserted.
    pub fn push(&mut self, record: MovieRecord) -> bool {
        if !self.ids.insert(record.id) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.ids.contains(&id)
    }

    pub fn get(&self, id: MovieId) -> Option<&MovieRecord> {
        if !self.contains(id) {
            return None;
        }
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// Keep only the first `len` records
    pub fn truncate(&mut self, len: usize) {
        for dropped in self.records.drain(len.min(self.records.len())..) {
            self.ids.remove(&dropped.id);
        }
    }

    /// Keep records matching the predicate, preserving order
    pub fn retain(&mut self, mut keep: impl FnMut(&MovieRecord) -> bool) {
        let ids = &mut self.ids;
        self.records.retain(|record| {
            let kept = keep(record);
            if !kept {
                ids.remove(&record.id);
            }
            kept
        });
    }

    pub fn into_records(self) -> Vec<MovieRecord> {
        self.records
    }
}

impl FromIterator<MovieRecord> for CandidatePool {
    fn from_iter<I: IntoIterator<Item = MovieRecord>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}
