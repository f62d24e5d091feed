//! Text soup builder.
//!
//! The soup is a whitespace-joined, lowercase token string that feeds the
//! TF-IDF space. Taste signals are over-weighted by repetition:
//!
//! | field              | repeats |
//! |--------------------|---------|
//! | genres             | 4       |
//! | keywords           | 6       |
//! | top-5 cast         | 2       |
//! | director           | 2       |
//! | overview words     | 1       |
//!
//! Multi-word names are squashed (`"Science Fiction"` -> `sciencefiction`)
//! so a name survives tokenization as a single term.

use crate::types::MovieRecord;

const GENRE_WEIGHT: usize = 4;
const KEYWORD_WEIGHT: usize = 6;
const CAST_WEIGHT: usize = 2;
const DIRECTOR_WEIGHT: usize = 2;

/// Build the weighted token string for a canonical record.
///
/// Deterministic and order-preserving: genres, keywords, cast, director,
/// then overview words. Empty tokens are dropped.
pub fn build_soup(record: &MovieRecord) -> String {
    let genres: Vec<String> = record.genres_list.iter().map(|g| squash(g)).collect();
    let keywords: Vec<String> = record.keywords_list.iter().map(|k| squash(k)).collect();
    let cast: Vec<String> = record.cast_list.iter().map(|c| squash(c)).collect();
    let director = squash(&record.director);
    let overview = record.overview.to_lowercase();

    let mut tokens: Vec<&str> = Vec::new();
    repeat_into(&mut tokens, &genres, GENRE_WEIGHT);
    repeat_into(&mut tokens, &keywords, KEYWORD_WEIGHT);
    repeat_into(&mut tokens, &cast, CAST_WEIGHT);
    for _ in 0..DIRECTOR_WEIGHT {
        tokens.push(&director);
    }
    tokens.extend(overview.split_whitespace());

    tokens.retain(|t| !t.is_empty());
    tokens.join(" ")
}

/// Whole-list repetition: `[a, b] x 2` -> `a b a b`
fn repeat_into<'a>(tokens: &mut Vec<&'a str>, items: &'a [String], times: usize) {
    for _ in 0..times {
        tokens.extend(items.iter().map(String::as_str));
    }
}

fn squash(name: &str) -> String {
    name.replace(' ', "").to_lowercase()
}
