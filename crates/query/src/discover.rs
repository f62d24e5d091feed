//! Discovery options: the explicit filter controls a user sets by hand.
//!
//! They render to a [`FilterSet`] on their own, and can be widened with
//! what a seed movie implies when the user left genres or people open.

use crate::filter_set::{Certification, FilterSet, GenreFilter, GenreLogic, SortOrder};
use catalog::{GenreId, PersonId, RawMovie};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoverOptions {
    pub year_from: i32,
    pub year_to: i32,
    pub min_rating: f32,
    pub min_votes: u32,
    pub runtime_min: u32,
    pub runtime_max: u32,
    /// US certification code, e.g. "PG-13"
    pub certification: Option<String>,
    /// ISO 639-1 code
    pub language: Option<String>,
    pub genres: Vec<GenreId>,
    pub genre_logic: GenreLogic,
    pub actor: Option<PersonId>,
    pub director: Option<PersonId>,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            year_from: 1950,
            year_to: 2025,
            min_rating: 6.0,
            min_votes: 0,
            runtime_min: 70,
            runtime_max: 200,
            certification: None,
            language: None,
            genres: Vec::new(),
            genre_logic: GenreLogic::And,
            actor: None,
            director: None,
        }
    }
}

impl DiscoverOptions {
    pub fn picked_genres(&self) -> bool {
        !self.genres.is_empty()
    }

    pub fn picked_people(&self) -> bool {
        self.actor.is_some() || self.director.is_some()
    }

    /// The chosen certification, if any
    pub fn picked_certification(&self) -> Option<&str> {
        self.certification.as_deref().filter(|c| !c.is_empty())
    }

    fn language(&self) -> Option<String> {
        self.language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_lowercase)
    }

    /// Every control as a filter set, sorted by popularity
    pub fn to_filter_set(&self) -> FilterSet {
        FilterSet {
            release_date_gte: NaiveDate::from_ymd_opt(self.year_from, 1, 1),
            release_date_lte: NaiveDate::from_ymd_opt(self.year_to, 12, 31),
            vote_average_gte: Some(self.min_rating),
            vote_count_gte: Some(u64::from(self.min_votes)),
            runtime_gte: Some(self.runtime_min),
            runtime_lte: Some(self.runtime_max),
            genres: self
                .picked_genres()
                .then(|| GenreFilter::new(self.genres.clone(), self.genre_logic)),
            certification: self.picked_certification().map(Certification::us),
            with_cast: self.actor.into_iter().collect(),
            with_crew: self.director.into_iter().collect(),
            original_language: self.language(),
            sort_by: Some(SortOrder::PopularityDesc),
            ..Default::default()
        }
    }

    /// Only the quality floor (rating and vote count).
    ///
    /// Natural-language results are merged with these so a parsed query
    /// still respects the user's minimums unless it names its own.
    pub fn quality_floor(&self) -> FilterSet {
        FilterSet {
            vote_average_gte: Some(self.min_rating),
            vote_count_gte: Some(u64::from(self.min_votes)),
            ..Default::default()
        }
    }

    /// Discovery parameters for building a pool around `seed`.
    ///
    /// # Arguments
    /// * `seed` - Full details of the seed movie
    /// * `keyword_limit` - How many of the seed's keywords to search with
    ///
    /// # Returns
    /// The controls' filter set, plus the seed's genres (OR) when no genres
    /// were picked, plus the seed's first keywords (OR) when neither genres
    /// nor people were picked.
    pub fn for_seed(&self, seed: &RawMovie, keyword_limit: usize) -> FilterSet {
        let mut filters = self.to_filter_set();

        let seed_genres = seed.genre_ids();
        if !self.picked_genres() && !seed_genres.is_empty() {
            filters.genres = Some(GenreFilter::new(seed_genres, GenreLogic::Or));
        }

        if !self.picked_genres() && !self.picked_people() {
            filters.keywords = seed.keyword_ids().into_iter().take(keyword_limit).collect();
        }

        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> RawMovie {
        serde_json::from_value(serde_json::json!({
            "id": 694,
            "title": "The Shining",
            "genres": [{"id": 27, "name": "Horror"}, {"id": 53, "name": "Thriller"}],
            "keywords": {"keywords": [
                {"id": 1, "name": "hotel"}, {"id": 2, "name": "winter"},
                {"id": 3, "name": "isolation"}, {"id": 4, "name": "ghost"},
                {"id": 5, "name": "writer"}, {"id": 6, "name": "maze"}
            ]}
        }))
        .unwrap()
    }

    #[test]
    fn test_default_controls() {
        let params = DiscoverOptions::default().to_filter_set().to_params();

        assert_eq!(params["primary_release_date.gte"], "1950-01-01");
        assert_eq!(params["primary_release_date.lte"], "2025-12-31");
        assert_eq!(params["vote_average.gte"], "6.0");
        assert_eq!(params["vote_count.gte"], "0");
        assert_eq!(params["with_runtime.gte"], "70");
        assert_eq!(params["with_runtime.lte"], "200");
        assert_eq!(params["sort_by"], "popularity.desc");
        assert!(!params.contains_key("with_genres"));
        assert!(!params.contains_key("certification"));
    }

    #[test]
    fn test_picked_controls() {
        let options = DiscoverOptions {
            genres: vec![35, 18],
            certification: Some("PG-13".to_string()),
            language: Some(" EN ".to_string()),
            director: Some(42),
            ..Default::default()
        };
        let params = options.to_filter_set().to_params();

        assert_eq!(params["with_genres"], "35,18");
        assert_eq!(params["certification_country"], "US");
        assert_eq!(params["certification"], "PG-13");
        assert_eq!(params["with_original_language"], "en");
        assert_eq!(params["with_crew"], "42");
    }

    #[test]
    fn test_seed_fills_genres_and_keywords() {
        let filters = DiscoverOptions::default().for_seed(&seed(), 5);
        let params = filters.to_params();

        assert_eq!(params["with_genres"], "27|53");
        assert_eq!(params["with_keywords"], "1|2|3|4|5");
    }

    #[test]
    fn test_seed_respects_picked_genres() {
        let options = DiscoverOptions {
            genres: vec![35],
            ..Default::default()
        };
        let params = options.for_seed(&seed(), 5).to_params();

        assert_eq!(params["with_genres"], "35");
        assert!(!params.contains_key("with_keywords"));
    }

    #[test]
    fn test_picked_actor_skips_seed_keywords() {
        let options = DiscoverOptions {
            actor: Some(7),
            ..Default::default()
        };
        let params = options.for_seed(&seed(), 5).to_params();

        assert_eq!(params["with_genres"], "27|53");
        assert_eq!(params["with_cast"], "7");
        assert!(!params.contains_key("with_keywords"));
    }

    #[test]
    fn test_quality_floor_only() {
        let floor = DiscoverOptions::default().quality_floor();
        let params = floor.to_params();
        assert_eq!(params.len(), 2);
        assert_eq!(params["vote_average.gte"], "6.0");
    }
}
