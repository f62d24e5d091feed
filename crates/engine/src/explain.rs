//! Human-readable "why was this recommended" text.
//!
//! Presentation only: nothing here feeds back into ranking.

use catalog::MovieRecord;
use std::fmt;

const MAX_GENRES: usize = 2;
const MAX_KEYWORDS: usize = 2;
const MAX_CAST: usize = 1;
const MAX_REASONS: usize = 3;
const SEPARATOR: &str = " · ";

/// Returned when the two records share nothing we can name
pub const FALLBACK_EXPLANATION: &str = "Similar plot/style based on hybrid match.";

/// One overlap between the seed and a candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    SharedGenres(Vec<String>),
    SharedKeywords(Vec<String>),
    SharedCast(Vec<String>),
    SameDirector,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::SharedGenres(g) => write!(f, "Shared genres: {}", g.join(", ")),
            Reason::SharedKeywords(k) => write!(f, "Shared keywords: {}", k.join(", ")),
            Reason::SharedCast(c) => write!(f, "Shared cast: {}", c.join(", ")),
            Reason::SameDirector => write!(f, "Same director"),
        }
    }
}

/// Overlaps in priority order: genres, keywords, cast, director.
///
/// Shared items are listed in the seed's order and clamped per category.
pub fn reasons(seed: &MovieRecord, candidate: &MovieRecord) -> Vec<Reason> {
    let mut reasons = Vec::new();

    let genres = shared(&seed.genres_list, &candidate.genres_list, MAX_GENRES);
    if !genres.is_empty() {
        reasons.push(Reason::SharedGenres(genres));
    }

    let keywords = shared(&seed.keywords_list, &candidate.keywords_list, MAX_KEYWORDS);
    if !keywords.is_empty() {
        reasons.push(Reason::SharedKeywords(keywords));
    }

    let cast = shared(&seed.cast_list, &candidate.cast_list, MAX_CAST);
    if !cast.is_empty() {
        reasons.push(Reason::SharedCast(cast));
    }

    if !seed.director.is_empty() && seed.director == candidate.director {
        reasons.push(Reason::SameDirector);
    }

    reasons
}

/// Short explanation string: at most three clauses, or the fallback
pub fn explain(seed: &MovieRecord, candidate: &MovieRecord) -> String {
    let reasons = reasons(seed, candidate);
    if reasons.is_empty() {
        return FALLBACK_EXPLANATION.to_string();
    }

    reasons
        .iter()
        .take(MAX_REASONS)
        .map(Reason::to_string)
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

fn shared(seed: &[String], candidate: &[String], limit: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in seed {
        if out.len() == limit {
            break;
        }
        if candidate.contains(item) && !out.contains(item) {
            out.push(item.clone());
        }
    }
    out
}
