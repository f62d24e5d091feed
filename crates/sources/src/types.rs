//! Candidate types shared by the gathering functions.

use catalog::MovieId;

/// Where a candidate id came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateSource {
    /// The provider's filtered discovery listing
    Discover,
    /// The provider's "similar to the seed" listing
    Similar,
}

/// An id returned by the provider, before hydration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub movie_id: MovieId,
    pub source: CandidateSource,
    /// 1-based result page it was found on
    pub page: u32,
}

impl Candidate {
    pub fn new(movie_id: MovieId, source: CandidateSource, page: u32) -> Self {
        Self {
            movie_id,
            source,
            page,
        }
    }
}
