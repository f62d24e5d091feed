//! A provider backed by an in-memory catalog.
//!
//! Evaluates filter sets the way the remote discovery endpoint does, so
//! the whole system runs offline against a JSON catalog file.
//!
//! ## Matching
//! - Date, runtime and rating bounds are inclusive
//! - A bound on a field the movie does not have excludes the movie
//! - Genres follow the filter's logic (AND / OR); keywords are OR
//! - Cast and crew ids must all be present
//! - Certification compares against the movie's US certification

use crate::provider::MetadataProvider;
use anyhow::{anyhow, Result};
use catalog::loader::load_raw_records;
use catalog::{extract_certification, MovieId, PersonId, RawMovie};
use chrono::NaiveDate;
use query::{FilterSet, GenreLogic, SortOrder};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, instrument, warn};

/// Results per listing page
pub const PAGE_SIZE: usize = 20;

pub struct LocalCatalogProvider {
    movies: Vec<RawMovie>,
    index: HashMap<MovieId, usize>,
    page_size: usize,
}

impl LocalCatalogProvider {
    /// Build from raw records. Records without an id, and repeated ids,
    /// are skipped.
    pub fn from_records(records: Vec<RawMovie>) -> Self {
        let mut movies = Vec::with_capacity(records.len());
        let mut index = HashMap::with_capacity(records.len());

        for record in records {
            let Some(id) = record.id else {
                warn!("Skipping catalog entry without an id: {:?}", record.title);
                continue;
            };
            if index.contains_key(&id) {
                warn!("Skipping duplicate catalog entry {}", id);
                continue;
            }
            index.insert(id, movies.len());
            movies.push(record);
        }

        debug!("Local catalog holds {} movies", movies.len());
        Self {
            movies,
            index,
            page_size: PAGE_SIZE,
        }
    }

    /// Load a JSON catalog file
    pub fn load(path: &Path) -> Result<Self> {
        let records = load_raw_records(path)?;
        Ok(Self::from_records(records))
    }

    /// Configure the listing page size (default: 20)
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Every movie id, in file order
    pub fn ids(&self) -> Vec<MovieId> {
        self.movies.iter().filter_map(|m| m.id).collect()
    }

    fn get(&self, id: MovieId) -> Option<&RawMovie> {
        self.index.get(&id).map(|&i| &self.movies[i])
    }

    /// Slice one 1-based page out of an ordered listing
    fn page(&self, ids: Vec<MovieId>, page: u32) -> Vec<MovieId> {
        let Some(skip) = (page as usize).checked_sub(1).map(|p| p * self.page_size) else {
            return Vec::new();
        };
        ids.into_iter().skip(skip).take(self.page_size).collect()
    }

    /// Every movie, most popular first
    fn by_popularity(&self) -> Vec<&RawMovie> {
        let mut movies: Vec<&RawMovie> = self.movies.iter().collect();
        movies.sort_by(|a, b| compare_desc(popularity(a), popularity(b)));
        movies
    }
}

impl MetadataProvider for LocalCatalogProvider {
    fn name(&self) -> &str {
        "local-catalog"
    }

    #[instrument(skip(self))]
    fn search(&self, query: &str) -> Result<Vec<MovieId>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let hits: Vec<MovieId> = self
            .by_popularity()
            .into_iter()
            .filter(|m| {
                m.title
                    .as_deref()
                    .is_some_and(|t| t.to_lowercase().contains(&needle))
            })
            .filter_map(|m| m.id)
            .collect();
        debug!("Search matched {} titles", hits.len());
        Ok(self.page(hits, 1))
    }

    /// Cast and crew names across the catalog, most popular movie first.
    /// An exact (case-insensitive) name beats a partial one.
    #[instrument(skip(self))]
    fn search_person(&self, name: &str) -> Result<Option<PersonId>> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }

        let people: Vec<(PersonId, String)> = self
            .by_popularity()
            .into_iter()
            .filter_map(|m| m.credits.as_ref())
            .flat_map(|credits| {
                let cast = credits.cast.iter().flatten().map(|c| (c.id, c.name.as_deref()));
                let crew = credits.crew.iter().flatten().map(|c| (c.id, c.name.as_deref()));
                cast.chain(crew)
            })
            .filter_map(|(id, name)| Some((id?, name?.to_lowercase())))
            .collect();

        let found = people
            .iter()
            .find(|(_, person)| *person == needle)
            .or_else(|| people.iter().find(|(_, person)| person.contains(&needle)))
            .map(|(id, _)| *id);
        debug!("Person search for {:?} resolved to {:?}", name, found);
        Ok(found)
    }

    fn details(&self, id: MovieId) -> Result<RawMovie> {
        self.get(id)
            .cloned()
            .ok_or_else(|| anyhow!("Movie {} not found in local catalog", id))
    }

    #[instrument(skip(self, filters))]
    fn discover(&self, filters: &FilterSet, page: u32) -> Result<Vec<MovieId>> {
        let mut matching: Vec<&RawMovie> = self
            .movies
            .par_iter()
            .filter(|m| matches(filters, m))
            .collect();

        sort_listing(&mut matching, filters.sort_by.unwrap_or(SortOrder::PopularityDesc));
        debug!("Discover matched {} movies", matching.len());

        let ids = matching.into_iter().filter_map(|m| m.id).collect();
        Ok(self.page(ids, page))
    }

    /// Movies sharing genres or keywords with `id`, most overlap first
    #[instrument(skip(self))]
    fn similar(&self, id: MovieId, page: u32) -> Result<Vec<MovieId>> {
        let target = self
            .get(id)
            .ok_or_else(|| anyhow!("Movie {} not found in local catalog", id))?;
        let genres: HashSet<_> = target.genre_ids().into_iter().collect();
        let keywords: HashSet<_> = target.keyword_ids().into_iter().collect();

        let mut scored: Vec<(usize, &RawMovie)> = self
            .by_popularity()
            .into_iter()
            .filter(|m| m.id != Some(id))
            .map(|m| {
                let shared_genres = m.genre_ids().iter().filter(|g| genres.contains(g)).count();
                let shared_keywords = m.keyword_ids().iter().filter(|k| keywords.contains(k)).count();
                (shared_genres + shared_keywords, m)
            })
            .filter(|(overlap, _)| *overlap > 0)
            .collect();
        // Stable sort keeps popularity order within equal overlap
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let ids = scored.into_iter().filter_map(|(_, m)| m.id).collect();
        Ok(self.page(ids, page))
    }

    fn trending(&self) -> Result<Vec<MovieId>> {
        let ids = self.by_popularity().into_iter().filter_map(|m| m.id).collect();
        Ok(self.page(ids, 1))
    }
}

/// Whether a raw movie satisfies every constraint in `filters`
pub fn matches(filters: &FilterSet, movie: &RawMovie) -> bool {
    let released = movie
        .release_date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
    if !within(released, filters.release_date_gte, filters.release_date_lte) {
        return false;
    }

    let rating = movie.vote_average.unwrap_or(0.0);
    if !within(Some(rating), filters.vote_average_gte, filters.vote_average_lte) {
        return false;
    }
    if !within(Some(u64::from(movie.vote_count.unwrap_or(0))), filters.vote_count_gte, None) {
        return false;
    }
    if !within(movie.runtime, filters.runtime_gte, filters.runtime_lte) {
        return false;
    }

    if let Some(genres) = filters.genres.as_ref().filter(|g| !g.ids.is_empty()) {
        let own = movie.genre_ids();
        let ok = match genres.logic {
            GenreLogic::And => genres.ids.iter().all(|g| own.contains(g)),
            GenreLogic::Or => genres.ids.iter().any(|g| own.contains(g)),
        };
        if !ok {
            return false;
        }
    }

    if !filters.keywords.is_empty() {
        let own = movie.keyword_ids();
        if !filters.keywords.iter().any(|k| own.contains(k)) {
            return false;
        }
    }

    if let Some(cert) = &filters.certification {
        let own = extract_certification(movie.release_dates.as_ref());
        if cert.country != "US" || own.as_deref() != Some(cert.code.as_str()) {
            return false;
        }
    }

    if !filters.with_cast.is_empty() {
        let cast = movie.cast_ids();
        if !filters.with_cast.iter().all(|p| cast.contains(p)) {
            return false;
        }
    }
    if !filters.with_crew.is_empty() {
        let crew = movie.crew_ids();
        if !filters.with_crew.iter().all(|p| crew.contains(p)) {
            return false;
        }
    }

    if let Some(lang) = &filters.original_language {
        if movie.original_language.as_deref() != Some(lang.as_str()) {
            return false;
        }
    }

    true
}

/// Inclusive bounds; a missing value fails any bound that is set
fn within<T: PartialOrd>(value: Option<T>, min: Option<T>, max: Option<T>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let Some(value) = value else {
        return false;
    };
    min.is_none_or(|m| value >= m) && max.is_none_or(|m| value <= m)
}

fn popularity(movie: &RawMovie) -> f64 {
    movie.popularity.unwrap_or(0.0)
}

fn compare_desc<T: PartialOrd>(a: T, b: T) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn sort_listing(movies: &mut [&RawMovie], order: SortOrder) {
    match order {
        SortOrder::PopularityDesc => movies.sort_by(|a, b| compare_desc(popularity(a), popularity(b))),
        SortOrder::VoteAverageDesc => {
            movies.sort_by(|a, b| compare_desc(a.vote_average.unwrap_or(0.0), b.vote_average.unwrap_or(0.0)))
        }
        // ISO dates order correctly as strings; undated movies sort last
        SortOrder::ReleaseDateDesc => movies.sort_by(|a, b| {
            compare_desc(a.release_date.as_deref().unwrap_or(""), b.release_date.as_deref().unwrap_or(""))
        }),
        SortOrder::ReleaseDateAsc => movies.sort_by_key(|m| {
            let date = m.release_date.clone().filter(|d| !d.is_empty());
            (date.is_none(), date)
        }),
    }
}
