//! The Filter Set: structured discovery parameters.
//!
//! Produced by the natural-language parser or by the discovery options,
//! consumed by the metadata provider. Every field is optional; an unset
//! field means "no constraint".

use catalog::{GenreId, KeywordId, PersonId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// How several genre ids combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GenreLogic {
    /// Every genre must be present (comma-joined)
    And,
    /// Any genre may be present (pipe-joined)
    #[default]
    Or,
}

impl GenreLogic {
    pub fn separator(self) -> &'static str {
        match self {
            GenreLogic::And => ",",
            GenreLogic::Or => "|",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreFilter {
    pub ids: Vec<GenreId>,
    pub logic: GenreLogic,
}

impl GenreFilter {
    pub fn new(ids: Vec<GenreId>, logic: GenreLogic) -> Self {
        Self { ids, logic }
    }

    pub fn joined(&self) -> String {
        join_ids(&self.ids, self.logic.separator())
    }
}

/// Certification always travels with its country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    pub country: String,
    pub code: String,
}

impl Certification {
    pub fn us(code: impl Into<String>) -> Self {
        Self {
            country: "US".to_string(),
            code: code.into(),
        }
    }
}

/// Result ordering understood by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    PopularityDesc,
    ReleaseDateDesc,
    ReleaseDateAsc,
    VoteAverageDesc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::PopularityDesc => "popularity.desc",
            SortOrder::ReleaseDateDesc => "primary_release_date.desc",
            SortOrder::ReleaseDateAsc => "primary_release_date.asc",
            SortOrder::VoteAverageDesc => "vote_average.desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popularity.desc" => Ok(SortOrder::PopularityDesc),
            "primary_release_date.desc" => Ok(SortOrder::ReleaseDateDesc),
            "primary_release_date.asc" => Ok(SortOrder::ReleaseDateAsc),
            "vote_average.desc" => Ok(SortOrder::VoteAverageDesc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Typed discovery constraints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    pub release_date_gte: Option<NaiveDate>,
    pub release_date_lte: Option<NaiveDate>,
    pub vote_average_gte: Option<f32>,
    pub vote_average_lte: Option<f32>,
    pub vote_count_gte: Option<u64>,
    pub runtime_gte: Option<u32>,
    pub runtime_lte: Option<u32>,
    pub genres: Option<GenreFilter>,
    /// Matched with OR semantics
    pub keywords: Vec<KeywordId>,
    pub certification: Option<Certification>,
    pub with_cast: Vec<PersonId>,
    pub with_crew: Vec<PersonId>,
    pub original_language: Option<String>,
    pub sort_by: Option<SortOrder>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.to_params().is_empty()
    }

    /// Render as provider query parameters.
    ///
    /// Keys are the provider's discovery keys; unset fields are omitted.
    pub fn to_params(&self) -> BTreeMap<&'static str, String> {
        let mut params = BTreeMap::new();

        if let Some(date) = self.release_date_gte {
            params.insert("primary_release_date.gte", date.format(DATE_FORMAT).to_string());
        }
        if let Some(date) = self.release_date_lte {
            params.insert("primary_release_date.lte", date.format(DATE_FORMAT).to_string());
        }
        if let Some(rating) = self.vote_average_gte {
            params.insert("vote_average.gte", format_float(rating));
        }
        if let Some(rating) = self.vote_average_lte {
            params.insert("vote_average.lte", format_float(rating));
        }
        if let Some(votes) = self.vote_count_gte {
            params.insert("vote_count.gte", votes.to_string());
        }
        if let Some(minutes) = self.runtime_gte {
            params.insert("with_runtime.gte", minutes.to_string());
        }
        if let Some(minutes) = self.runtime_lte {
            params.insert("with_runtime.lte", minutes.to_string());
        }
        if let Some(genres) = self.genres.as_ref().filter(|g| !g.ids.is_empty()) {
            params.insert("with_genres", genres.joined());
        }
        if !self.keywords.is_empty() {
            params.insert("with_keywords", join_ids(&self.keywords, "|"));
        }
        if let Some(cert) = &self.certification {
            params.insert("certification_country", cert.country.clone());
            params.insert("certification", cert.code.clone());
        }
        if !self.with_cast.is_empty() {
            params.insert("with_cast", join_ids(&self.with_cast, ","));
        }
        if !self.with_crew.is_empty() {
            params.insert("with_crew", join_ids(&self.with_crew, ","));
        }
        if let Some(lang) = &self.original_language {
            params.insert("with_original_language", lang.clone());
        }
        if let Some(sort) = self.sort_by {
            params.insert("sort_by", sort.as_str().to_string());
        }

        params
    }

    /// Fill every unset field from `defaults`; fields already set win.
    pub fn merge_missing(&mut self, defaults: &FilterSet) {
        fill(&mut self.release_date_gte, defaults.release_date_gte);
        fill(&mut self.release_date_lte, defaults.release_date_lte);
        fill(&mut self.vote_average_gte, defaults.vote_average_gte);
        fill(&mut self.vote_average_lte, defaults.vote_average_lte);
        fill(&mut self.vote_count_gte, defaults.vote_count_gte);
        fill(&mut self.runtime_gte, defaults.runtime_gte);
        fill(&mut self.runtime_lte, defaults.runtime_lte);
        fill(&mut self.genres, defaults.genres.clone());
        fill(&mut self.certification, defaults.certification.clone());
        fill(&mut self.original_language, defaults.original_language.clone());
        fill(&mut self.sort_by, defaults.sort_by);

        if self.keywords.is_empty() {
            self.keywords = defaults.keywords.clone();
        }
        if self.with_cast.is_empty() {
            self.with_cast = defaults.with_cast.clone();
        }
        if self.with_crew.is_empty() {
            self.with_crew = defaults.with_crew.clone();
        }
    }
}

fn fill<T>(slot: &mut Option<T>, default: Option<T>) {
    if slot.is_none() {
        *slot = default;
    }
}

fn join_ids<T: ToString>(ids: &[T], separator: &str) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Floats always carry a fractional part ("7.0", not "7")
fn format_float(value: f32) -> String {
    format!("{value:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_set_has_no_params() {
        let filters = FilterSet::new();
        assert!(filters.is_empty());
        assert!(filters.to_params().is_empty());
    }

    #[test]
    fn test_to_params_keys_and_formats() {
        let filters = FilterSet {
            release_date_gte: NaiveDate::from_ymd_opt(1980, 1, 1),
            release_date_lte: NaiveDate::from_ymd_opt(1989, 12, 31),
            vote_average_gte: Some(7.0),
            vote_count_gte: Some(1000),
            runtime_lte: Some(110),
            genres: Some(GenreFilter::new(vec![27, 53], GenreLogic::And)),
            keywords: vec![1, 2, 3],
            certification: Some(Certification::us("R")),
            with_cast: vec![500],
            original_language: Some("en".to_string()),
            sort_by: Some(SortOrder::PopularityDesc),
            ..Default::default()
        };

        let params = filters.to_params();
        assert_eq!(params["primary_release_date.gte"], "1980-01-01");
        assert_eq!(params["primary_release_date.lte"], "1989-12-31");
        assert_eq!(params["vote_average.gte"], "7.0");
        assert_eq!(params["vote_count.gte"], "1000");
        assert_eq!(params["with_runtime.lte"], "110");
        assert_eq!(params["with_genres"], "27,53");
        assert_eq!(params["with_keywords"], "1|2|3");
        assert_eq!(params["certification_country"], "US");
        assert_eq!(params["certification"], "R");
        assert_eq!(params["with_cast"], "500");
        assert_eq!(params["with_original_language"], "en");
        assert_eq!(params["sort_by"], "popularity.desc");
        assert!(!params.contains_key("with_crew"));
        assert!(!params.contains_key("vote_average.lte"));
    }

    #[test]
    fn test_or_genres_are_pipe_joined() {
        let genres = GenreFilter::new(vec![35, 10749], GenreLogic::Or);
        assert_eq!(genres.joined(), "35|10749");
    }

    #[test]
    fn test_merge_missing_keeps_existing_values() {
        let mut parsed = FilterSet {
            vote_average_gte: Some(8.0),
            ..Default::default()
        };
        let defaults = FilterSet {
            vote_average_gte: Some(6.0),
            vote_count_gte: Some(0),
            keywords: vec![9],
            ..Default::default()
        };

        parsed.merge_missing(&defaults);
        assert_eq!(parsed.vote_average_gte, Some(8.0));
        assert_eq!(parsed.vote_count_gte, Some(0));
        assert_eq!(parsed.keywords, vec![9]);
    }

    #[test]
    fn test_sort_order_round_trips_through_str() {
        for order in [
            SortOrder::PopularityDesc,
            SortOrder::ReleaseDateDesc,
            SortOrder::ReleaseDateAsc,
            SortOrder::VoteAverageDesc,
        ] {
            assert_eq!(order.as_str().parse::<SortOrder>().unwrap(), order);
        }
        assert!("rating.desc".parse::<SortOrder>().is_err());
    }
}
