//! Core domain types for provider records and canonical movies.
//!
//! Two shapes live here:
//! - `RawMovie` mirrors the detail payload of the metadata provider. Every
//!   field is optional because the provider omits whole sections freely.
//! - `MovieRecord` is the canonical, fully-defaulted record used everywhere
//!   downstream. No field is ever "missing"; absence is an empty value.

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// External identifier assigned by the metadata provider
pub type MovieId = u64;

/// Provider genre identifier (e.g. 27 = Horror)
pub type GenreId = u32;

/// Provider keyword identifier
pub type KeywordId = u64;

/// Provider person identifier (cast or crew)
pub type PersonId = u64;

// =============================================================================
// Raw provider payload
// =============================================================================

/// A movie detail record exactly as the provider returns it.
///
/// `Default` gives a record with every section absent, which is handy for
/// tests and for summaries that only carry an id and title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMovie {
    pub id: Option<MovieId>,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub vote_average: Option<f32>,
    pub vote_count: Option<u32>,
    pub popularity: Option<f64>,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub original_language: Option<String>,
    pub poster_path: Option<String>,
    pub genres: Option<Vec<RawGenre>>,
    pub credits: Option<RawCredits>,
    pub keywords: Option<RawKeywords>,
    pub release_dates: Option<RawReleaseDates>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawGenre {
    pub id: Option<GenreId>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCredits {
    pub cast: Option<Vec<RawCastMember>>,
    pub crew: Option<Vec<RawCrewMember>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCastMember {
    pub id: Option<PersonId>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCrewMember {
    pub id: Option<PersonId>,
    pub job: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawKeywords {
    pub keywords: Option<Vec<RawKeyword>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawKeyword {
    pub id: Option<KeywordId>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawReleaseDates {
    pub results: Option<Vec<RawRegionRelease>>,
}

/// Release entries for one region (`iso_3166_1` is the country code)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRegionRelease {
    pub iso_3166_1: Option<String>,
    pub release_dates: Option<Vec<RawReleaseDate>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawReleaseDate {
    pub certification: Option<String>,
}

impl RawMovie {
    /// Genre ids in provider order, skipping entries without an id
    pub fn genre_ids(&self) -> Vec<GenreId> {
        self.genres
            .iter()
            .flatten()
            .filter_map(|g| g.id)
            .collect()
    }

    /// Keyword ids in provider order, skipping entries without an id
    pub fn keyword_ids(&self) -> Vec<KeywordId> {
        self.keywords
            .iter()
            .filter_map(|k| k.keywords.as_ref())
            .flatten()
            .filter_map(|k| k.id)
            .collect()
    }

    /// All cast member ids (not just the top five)
    pub fn cast_ids(&self) -> Vec<PersonId> {
        self.credits
            .iter()
            .filter_map(|c| c.cast.as_ref())
            .flatten()
            .filter_map(|c| c.id)
            .collect()
    }

    /// All crew member ids regardless of job
    pub fn crew_ids(&self) -> Vec<PersonId> {
        self.credits
            .iter()
            .filter_map(|c| c.crew.as_ref())
            .flatten()
            .filter_map(|c| c.id)
            .collect()
    }
}

// =============================================================================
// Canonical record
// =============================================================================

/// The canonical movie record.
///
/// Every field is always present. Optional data is either an `Option`
/// (`runtime`, `cert`, `poster_path`, where "unknown" must stay distinct
/// from zero) or an empty string / empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    /// Weighted token string used as similarity fuel, never displayed
    pub soup: String,
    /// 0-10 provider rating
    pub vote_average: f32,
    pub vote_count: u32,
    /// ISO date (`YYYY-MM-DD`) or empty
    pub release_date: String,
    /// Minutes; `None` when the provider does not know
    pub runtime: Option<u32>,
    /// First non-empty US certification, if any
    pub cert: Option<String>,
    /// ISO 639-1 code or empty
    pub language: String,
    pub genres_list: Vec<String>,
    pub keywords_list: Vec<String>,
    /// Top five billed cast members
    pub cast_list: Vec<String>,
    pub director: String,
    pub poster_path: Option<String>,
}

impl MovieRecord {
    /// A record with only an id and title set
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            overview: String::new(),
            soup: String::new(),
            vote_average: 0.0,
            vote_count: 0,
            release_date: String::new(),
            runtime: None,
            cert: None,
            language: String::new(),
            genres_list: Vec::new(),
            keywords_list: Vec::new(),
            cast_list: Vec::new(),
            director: String::new(),
            poster_path: None,
        }
    }

    /// Four-digit release year, if the release date carries one
    pub fn year(&self) -> Option<u16> {
        self.release_date.get(..4)?.parse().ok()
    }
}

/// Re-expand a canonical record into the provider's shape.
///
/// Normalizing the result yields the same canonical record, which is what
/// makes normalization idempotent. Ids that the canonical record does not
/// carry (genre, keyword, person ids) come back as `None`.
impl From<&MovieRecord> for RawMovie {
    fn from(record: &MovieRecord) -> Self {
        let genres = record
            .genres_list
            .iter()
            .map(|name| RawGenre { id: None, name: Some(name.clone()) })
            .collect();

        let keywords = record
            .keywords_list
            .iter()
            .map(|name| RawKeyword { id: None, name: Some(name.clone()) })
            .collect();

        let cast = record
            .cast_list
            .iter()
            .map(|name| RawCastMember { id: None, name: Some(name.clone()) })
            .collect();

        let crew = if record.director.is_empty() {
            Vec::new()
        } else {
            vec![RawCrewMember {
                id: None,
                job: Some("Director".to_string()),
                name: Some(record.director.clone()),
            }]
        };

        let release_dates = record.cert.as_ref().map(|cert| RawReleaseDates {
            results: Some(vec![RawRegionRelease {
                iso_3166_1: Some("US".to_string()),
                release_dates: Some(vec![RawReleaseDate {
                    certification: Some(cert.clone()),
                }]),
            }]),
        });

        RawMovie {
            id: Some(record.id),
            title: Some(record.title.clone()),
            overview: Some(record.overview.clone()),
            vote_average: Some(record.vote_average),
            vote_count: Some(record.vote_count),
            popularity: None,
            release_date: Some(record.release_date.clone()),
            runtime: record.runtime,
            original_language: Some(record.language.clone()),
            poster_path: record.poster_path.clone(),
            genres: Some(genres),
            credits: Some(RawCredits { cast: Some(cast), crew: Some(crew) }),
            keywords: Some(RawKeywords { keywords: Some(keywords) }),
            release_dates,
        }
    }
}
