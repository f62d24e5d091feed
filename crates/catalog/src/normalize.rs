//! Raw provider record -> canonical `MovieRecord`.
//!
//! Normalization is a pure function of its input. Missing sections become
//! empty values; only a missing `id` is rejected.

use crate::error::{CatalogError, Result};
use crate::soup::build_soup;
use crate::types::*;

/// How many billed cast members survive into the canonical record
pub const TOP_CAST: usize = 5;

/// Region whose certification we surface
const CERT_REGION: &str = "US";

/// Convert a raw provider record into a canonical record.
///
/// # Errors
/// `CatalogError::MissingId` when the record has no `id`.
pub fn normalize(raw: &RawMovie) -> Result<MovieRecord> {
    let id = raw.id.ok_or_else(|| CatalogError::MissingId {
        title: raw.title.clone(),
    })?;

    let mut record = MovieRecord {
        id,
        title: raw.title.clone().unwrap_or_default(),
        overview: raw.overview.clone().unwrap_or_default(),
        soup: String::new(),
        vote_average: raw.vote_average.unwrap_or(0.0),
        vote_count: raw.vote_count.unwrap_or(0),
        release_date: raw.release_date.clone().unwrap_or_default(),
        runtime: raw.runtime,
        cert: extract_certification(raw.release_dates.as_ref()),
        language: raw.original_language.clone().unwrap_or_default(),
        genres_list: genre_names(raw),
        keywords_list: keyword_names(raw),
        cast_list: top_cast(raw.credits.as_ref()),
        director: top_director(raw.credits.as_ref()),
        poster_path: raw.poster_path.clone(),
    };
    record.soup = build_soup(&record);

    Ok(record)
}

/// First non-empty US certification, scanning regions and then each
/// region's release entries in provider order.
pub fn extract_certification(release_dates: Option<&RawReleaseDates>) -> Option<String> {
    let regions = release_dates?.results.as_ref()?;

    regions
        .iter()
        .filter(|region| region.iso_3166_1.as_deref() == Some(CERT_REGION))
        .flat_map(|region| region.release_dates.iter().flatten())
        .filter_map(|release| release.certification.as_deref())
        .find(|cert| !cert.is_empty())
        .map(str::to_string)
}

/// Name of the first crew member whose job is "Director".
///
/// The first Director wins even if the provider left their name blank.
pub fn top_director(credits: Option<&RawCredits>) -> String {
    credits
        .and_then(|c| c.crew.as_ref())
        .and_then(|crew| {
            crew.iter()
                .find(|member| member.job.as_deref() == Some("Director"))
        })
        .and_then(|director| director.name.clone())
        .unwrap_or_default()
}

fn top_cast(credits: Option<&RawCredits>) -> Vec<String> {
    credits
        .and_then(|c| c.cast.as_ref())
        .map(|cast| {
            cast.iter()
                .take(TOP_CAST)
                .filter_map(|member| member.name.clone())
                .collect()
        })
        .unwrap_or_default()
}

fn genre_names(raw: &RawMovie) -> Vec<String> {
    raw.genres
        .iter()
        .flatten()
        .filter_map(|g| g.name.clone())
        .collect()
}

fn keyword_names(raw: &RawMovie) -> Vec<String> {
    raw.keywords
        .iter()
        .filter_map(|k| k.keywords.as_ref())
        .flatten()
        .filter_map(|k| k.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_raw() -> RawMovie {
        serde_json::from_str(
            r#"{
                "id": 694,
                "title": "The Shining",
                "overview": "Jack Torrance becomes winter caretaker at the isolated Overlook Hotel.",
                "vote_average": 8.2,
                "vote_count": 17000,
                "release_date": "1980-05-23",
                "runtime": 144,
                "original_language": "en",
                "poster_path": "/shining.jpg",
                "genres": [{"id": 27, "name": "Horror"}, {"id": 53, "name": "Thriller"}],
                "credits": {
                    "cast": [
                        {"id": 1, "name": "Jack Nicholson"},
                        {"id": 2, "name": "Shelley Duvall"},
                        {"id": 3, "name": "Danny Lloyd"},
                        {"id": 4, "name": "Scatman Crothers"},
                        {"id": 5, "name": "Barry Nelson"},
                        {"id": 6, "name": "Philip Stone"}
                    ],
                    "crew": [
                        {"id": 10, "job": "Producer", "name": "Jan Harlan"},
                        {"id": 11, "job": "Director", "name": "Stanley Kubrick"},
                        {"id": 12, "job": "Director", "name": "Someone Else"}
                    ]
                },
                "keywords": {"keywords": [{"id": 100, "name": "hotel"}, {"id": 101, "name": "isolation"}]},
                "release_dates": {"results": [
                    {"iso_3166_1": "GB", "release_dates": [{"certification": "15"}]},
                    {"iso_3166_1": "US", "release_dates": [{"certification": ""}, {"certification": "R"}]}
                ]}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_normalize_full_record() {
        let record = normalize(&full_raw()).unwrap();

        assert_eq!(record.id, 694);
        assert_eq!(record.title, "The Shining");
        assert_eq!(record.runtime, Some(144));
        assert_eq!(record.cert.as_deref(), Some("R"));
        assert_eq!(record.language, "en");
        assert_eq!(record.genres_list, vec!["Horror", "Thriller"]);
        assert_eq!(record.keywords_list, vec!["hotel", "isolation"]);
        assert_eq!(record.cast_list.len(), TOP_CAST);
        assert_eq!(record.cast_list[0], "Jack Nicholson");
        assert_eq!(record.director, "Stanley Kubrick");
        assert!(record.soup.starts_with("horror thriller"));
    }

    #[test]
    fn test_normalize_sparse_record_uses_defaults() {
        let raw: RawMovie = serde_json::from_str(r#"{"id": 7, "overview": null}"#).unwrap();
        let record = normalize(&raw).unwrap();

        assert_eq!(record.title, "");
        assert_eq!(record.overview, "");
        assert_eq!(record.vote_average, 0.0);
        assert_eq!(record.vote_count, 0);
        assert_eq!(record.runtime, None);
        assert_eq!(record.cert, None);
        assert!(record.genres_list.is_empty());
        assert!(record.cast_list.is_empty());
        assert_eq!(record.director, "");
        assert_eq!(record.soup, "");
    }

    #[test]
    fn test_normalize_rejects_missing_id() {
        let raw = RawMovie {
            title: Some("Nameless".to_string()),
            ..Default::default()
        };
        let err = normalize(&raw).unwrap_err();
        assert!(matches!(err, CatalogError::MissingId { .. }));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(&full_raw()).unwrap();
        let twice = normalize(&RawMovie::from(&once)).unwrap();
        assert_eq!(once, twice);

        let sparse = normalize(&RawMovie { id: Some(3), ..Default::default() }).unwrap();
        assert_eq!(normalize(&RawMovie::from(&sparse)).unwrap(), sparse);
    }

    #[test]
    fn test_certification_ignores_other_regions() {
        let raw: RawMovie = serde_json::from_str(
            r#"{"id": 1, "release_dates": {"results": [
                {"iso_3166_1": "DE", "release_dates": [{"certification": "16"}]}
            ]}}"#,
        )
        .unwrap();
        assert_eq!(extract_certification(raw.release_dates.as_ref()), None);
    }

    #[test]
    fn test_director_missing() {
        let credits = RawCredits {
            cast: None,
            crew: Some(vec![RawCrewMember {
                id: Some(1),
                job: Some("Writer".to_string()),
                name: Some("A Writer".to_string()),
            }]),
        };
        assert_eq!(top_director(Some(&credits)), "");
        assert_eq!(top_director(None), "");
    }
}
