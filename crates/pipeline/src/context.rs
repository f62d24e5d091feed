//! What the pool filters know about the request.

use catalog::MovieRecord;

/// The seed and the choices the user made explicitly.
///
/// Filters only narrow the pool along dimensions the user left open.
#[derive(Debug, Clone)]
pub struct PoolContext {
    pub seed: MovieRecord,
    /// Certification the user picked, if any
    pub picked_certification: Option<String>,
    /// Whether the user picked any genres
    pub picked_genres: bool,
}

impl PoolContext {
    /// Context for a seed with no explicit user choices
    pub fn new(seed: MovieRecord) -> Self {
        Self {
            seed,
            picked_certification: None,
            picked_genres: false,
        }
    }

    pub fn with_certification(mut self, certification: Option<String>) -> Self {
        self.picked_certification = certification;
        self
    }

    pub fn with_picked_genres(mut self, picked: bool) -> Self {
        self.picked_genres = picked;
        self
    }
}
