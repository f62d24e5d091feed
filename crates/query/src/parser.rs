//! Natural-language query parser.
//!
//! Turns free text such as "horror 80s rating over 7 under 110 min" into a
//! [`FilterSet`].
//!
//! ## Algorithm
//! The input is lowercased and trimmed, then every category runs over the
//! same text in a fixed order: genres, dates, rating, votes, runtime,
//! certification, language, sort. Inside a category the rules run in order
//! against the accumulating filter set. A rule either does not match,
//! matches, or matches and ends its category (the remaining rules of that
//! category are skipped). Categories never stop each other, so one query
//! can set genre, date, rating and runtime filters at once.
//!
//! Rules that only "set if absent" check the field before writing; all
//! other rules overwrite whatever an earlier rule in the category wrote.
//!
//! ## Example Usage
//! ```ignore
//! use query::QueryParser;
//!
//! let filters = QueryParser::new().parse("romcom after 2000 under 2 hours");
//! println!("{:?}", filters.to_params());
//! ```

use crate::filter_set::{Certification, FilterSet, GenreFilter, GenreLogic, SortOrder};
use crate::vocab::{CERT_SYNONYMS, GENRE_SYNONYMS, GENRE_WORDS, LANG_SYNONYMS};
use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashSet;
use tracing::debug;

/// Years back that "recent" reaches
const RECENT_YEARS: i32 = 5;
const HIGHLY_RATED_MIN: f32 = 7.5;
const POPULAR_MIN_VOTES: u64 = 1000;
const SHORT_MAX_MINUTES: u32 = 100;
const LONG_MIN_MINUTES: u32 = 140;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

static AND_WORD: Lazy<Regex> = Lazy::new(|| regex(r"\band\b"));
static BETWEEN_YEARS: Lazy<Regex> = Lazy::new(|| regex(r"between\s+(\d{4})\s+and\s+(\d{4})"));
static AFTER_YEAR: Lazy<Regex> = Lazy::new(|| regex(r"(after|since)\s+(\d{4})"));
static BEFORE_YEAR: Lazy<Regex> = Lazy::new(|| regex(r"(before|until)\s+(\d{4})"));
static SHORT_DECADE: Lazy<Regex> = Lazy::new(|| regex(r"\b(\d)0s\b"));
static FULL_DECADE: Lazy<Regex> = Lazy::new(|| regex(r"\b(19\d{2}|20\d{2})s\b"));
static LAST_N_YEARS: Lazy<Regex> = Lazy::new(|| regex(r"last\s+(\d+)\s+years"));
static RATING_AT_LEAST: Lazy<Regex> =
    Lazy::new(|| regex(r"(rating|score)\s*(>=|=>|>|at least|over)\s*(\d+(\.\d+)?)"));
static RATING_AT_MOST: Lazy<Regex> =
    Lazy::new(|| regex(r"(rating|score)\s*(<=|=<|<|under|below)\s*(\d+(\.\d+)?)"));
static BARE_AT_LEAST: Lazy<Regex> =
    Lazy::new(|| regex(r"at least\s*(\d+(\.\d+)?)\s*(stars|rating|score)?"));
static MIN_VOTES: Lazy<Regex> =
    Lazy::new(|| regex(r"(at least|over|>=)\s*(\d{3,})\s*(votes|vote count)"));
static RUNTIME_UNDER: Lazy<Regex> =
    Lazy::new(|| regex(r"(under|below|<=|less than)\s*(\d{2,3})\s*(min|mins|minutes)"));
static RUNTIME_OVER: Lazy<Regex> =
    Lazy::new(|| regex(r"(over|above|>=|more than)\s*(\d{2,3})\s*(min|mins|minutes)"));
static HOURS_UNDER: Lazy<Regex> = Lazy::new(|| regex(r"under\s*(\d+(\.\d+)?)\s*hours"));
static HOURS_OVER: Lazy<Regex> = Lazy::new(|| regex(r"over\s*(\d+(\.\d+)?)\s*hours"));
static CERT_TOKEN: Lazy<Regex> = Lazy::new(|| regex(r"[a-z0-9-]+"));
static EXPLICIT_LANGUAGE: Lazy<Regex> =
    Lazy::new(|| regex(r"\blanguage\s*[:=]?\s*([a-z]{2})\b"));

/// Word-boundary pattern per genre word and synonym, with the genres it implies
static GENRE_PATTERNS: Lazy<Vec<(Regex, Vec<&'static str>)>> = Lazy::new(|| {
    let words = GENRE_WORDS.iter().map(|(word, _)| (*word, vec![*word]));
    let synonyms = GENRE_SYNONYMS
        .iter()
        .map(|(synonym, targets)| (*synonym, targets.to_vec()));
    words
        .chain(synonyms)
        .map(|(phrase, targets)| (word_pattern(phrase), targets))
        .collect()
});

static LANGUAGE_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    LANG_SYNONYMS
        .iter()
        .map(|(name, code)| (word_pattern(name), *code))
        .collect()
});

fn word_pattern(phrase: &str) -> Regex {
    regex(&format!(r"\b{}\b", regex::escape(phrase)))
}

/// What a rule did to the filter set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    NoMatch,
    Matched,
    /// Matched, and the rest of the category is skipped
    Final,
}

/// The text being parsed plus the clock it is parsed against
struct ParseInput<'a> {
    text: &'a str,
    current_year: i32,
}

type RuleFn = fn(&ParseInput<'_>, &mut FilterSet) -> Outcome;

struct Rule {
    name: &'static str,
    apply: RuleFn,
}

struct Category {
    name: &'static str,
    rules: &'static [Rule],
}

const CATEGORIES: &[Category] = &[
    Category {
        name: "genres",
        rules: &[Rule { name: "genre_words", apply: genre_words }],
    },
    Category {
        name: "dates",
        rules: &[
            Rule { name: "between_years", apply: between_years },
            Rule { name: "after_year", apply: after_year },
            Rule { name: "before_year", apply: before_year },
            Rule { name: "short_decade", apply: short_decade },
            Rule { name: "full_decade", apply: full_decade },
            Rule { name: "last_n_years", apply: last_n_years },
            Rule { name: "recent_words", apply: recent_words },
        ],
    },
    Category {
        name: "rating",
        rules: &[
            Rule { name: "rating_at_least", apply: rating_at_least },
            Rule { name: "rating_at_most", apply: rating_at_most },
            Rule { name: "bare_at_least", apply: bare_at_least },
            Rule { name: "highly_rated", apply: highly_rated },
        ],
    },
    Category {
        name: "votes",
        rules: &[
            Rule { name: "min_votes", apply: min_votes },
            Rule { name: "popular", apply: popular },
        ],
    },
    Category {
        name: "runtime",
        rules: &[
            Rule { name: "minutes_under", apply: minutes_under },
            Rule { name: "minutes_over", apply: minutes_over },
            Rule { name: "hours_under", apply: hours_under },
            Rule { name: "hours_over", apply: hours_over },
            Rule { name: "short", apply: short },
            Rule { name: "long", apply: long },
        ],
    },
    Category {
        name: "certification",
        rules: &[Rule { name: "certification_phrase", apply: certification_phrase }],
    },
    Category {
        name: "language",
        rules: &[
            Rule { name: "explicit_language", apply: explicit_language },
            Rule { name: "language_name", apply: language_name },
        ],
    },
    Category {
        name: "sort",
        rules: &[
            Rule { name: "trending", apply: sort_trending },
            Rule { name: "newest", apply: sort_newest },
            Rule { name: "oldest", apply: sort_oldest },
            Rule { name: "top_rated", apply: sort_top_rated },
        ],
    },
];

/// Rule-based parser from free text to a filter set.
#[derive(Debug, Clone, Copy)]
pub struct QueryParser {
    current_year: i32,
}

impl QueryParser {
    /// Parser whose relative rules ("last 10 years", "recent") use today's year
    pub fn new() -> Self {
        Self {
            current_year: Local::now().year(),
        }
    }

    /// Parser pinned to a fixed year
    pub fn with_current_year(current_year: i32) -> Self {
        Self { current_year }
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Parse a query. Never fails: text that matches no rule yields an
    /// empty filter set.
    pub fn parse(&self, query: &str) -> FilterSet {
        let lowered = query.to_lowercase();
        let input = ParseInput {
            text: lowered.trim(),
            current_year: self.current_year,
        };

        let mut filters = FilterSet::new();
        for category in CATEGORIES {
            for rule in category.rules {
                match (rule.apply)(&input, &mut filters) {
                    Outcome::NoMatch => {}
                    Outcome::Matched => {
                        debug!("Query rule matched: {}/{}", category.name, rule.name);
                    }
                    Outcome::Final => {
                        debug!("Query rule matched: {}/{} (final)", category.name, rule.name);
                        break;
                    }
                }
            }
        }
        filters
    }
}

impl Default for QueryParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse with the current year
pub fn parse_query(query: &str) -> FilterSet {
    QueryParser::new().parse(query)
}

fn matched(hit: bool) -> Outcome {
    if hit { Outcome::Matched } else { Outcome::NoMatch }
}

fn year_start(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}

fn year_end(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 12, 31)
}

fn capture<T: std::str::FromStr>(caps: &Captures<'_>, group: usize) -> Option<T> {
    caps.get(group)?.as_str().parse().ok()
}

// ---- genres ----

fn genre_words(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    let found: HashSet<&str> = GENRE_PATTERNS
        .iter()
        .filter(|(pattern, _)| pattern.is_match(input.text))
        .flat_map(|(_, targets)| targets.iter().copied())
        .collect();

    // Table order keeps the rendered id list stable
    let ids: Vec<_> = GENRE_WORDS
        .iter()
        .filter(|(word, _)| found.contains(word))
        .map(|(_, id)| *id)
        .collect();
    if ids.is_empty() {
        return Outcome::NoMatch;
    }

    let logic = if AND_WORD.is_match(input.text) {
        GenreLogic::And
    } else {
        GenreLogic::Or
    };
    filters.genres = Some(GenreFilter::new(ids, logic));
    Outcome::Matched
}

// ---- dates ----

fn between_years(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    let Some(caps) = BETWEEN_YEARS.captures(input.text) else {
        return Outcome::NoMatch;
    };
    let (Some(a), Some(b)) = (capture::<i32>(&caps, 1), capture::<i32>(&caps, 2)) else {
        return Outcome::NoMatch;
    };
    filters.release_date_gte = year_start(a.min(b));
    filters.release_date_lte = year_end(a.max(b));
    Outcome::Final
}

fn after_year(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    let Some(year) = AFTER_YEAR.captures(input.text).and_then(|c| capture::<i32>(&c, 2)) else {
        return Outcome::NoMatch;
    };
    filters.release_date_gte = year_start(year);
    Outcome::Matched
}

fn before_year(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    let Some(year) = BEFORE_YEAR.captures(input.text).and_then(|c| capture::<i32>(&c, 2)) else {
        return Outcome::NoMatch;
    };
    filters.release_date_lte = year_end(year);
    Outcome::Matched
}

/// "80s" is the 1980s, "20s" the 2020s
fn short_decade(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    let Some(digit) = SHORT_DECADE.captures(input.text).and_then(|c| capture::<i32>(&c, 1)) else {
        return Outcome::NoMatch;
    };
    let decade = digit * 10;
    let first = if decade >= 50 { 1900 + decade } else { 2000 + decade };
    filters.release_date_gte = year_start(first);
    filters.release_date_lte = year_end(first + 9);
    Outcome::Matched
}

fn full_decade(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    let Some(first) = FULL_DECADE.captures(input.text).and_then(|c| capture::<i32>(&c, 1)) else {
        return Outcome::NoMatch;
    };
    filters.release_date_gte = year_start(first);
    filters.release_date_lte = year_end(first + 9);
    Outcome::Matched
}

fn last_n_years(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    let Some(n) = LAST_N_YEARS.captures(input.text).and_then(|c| capture::<i32>(&c, 1)) else {
        return Outcome::NoMatch;
    };
    let Some(start) = input.current_year.checked_sub(n).and_then(year_start) else {
        return Outcome::NoMatch;
    };
    filters.release_date_gte = Some(start);
    Outcome::Matched
}

fn recent_words(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    let text = input.text;
    if !(text.contains("recent") || text.contains("new") || text.contains("latest")) {
        return Outcome::NoMatch;
    }
    if filters.release_date_gte.is_none() {
        filters.release_date_gte = year_start(input.current_year - RECENT_YEARS);
    }
    Outcome::Matched
}

// ---- rating ----

fn rating_at_least(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    let Some(rating) = RATING_AT_LEAST.captures(input.text).and_then(|c| capture::<f32>(&c, 3)) else {
        return Outcome::NoMatch;
    };
    filters.vote_average_gte = Some(rating);
    Outcome::Final
}

fn rating_at_most(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    let Some(rating) = RATING_AT_MOST.captures(input.text).and_then(|c| capture::<f32>(&c, 3)) else {
        return Outcome::NoMatch;
    };
    filters.vote_average_lte = Some(rating);
    Outcome::Final
}

fn bare_at_least(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    let Some(rating) = BARE_AT_LEAST.captures(input.text).and_then(|c| capture::<f32>(&c, 1)) else {
        return Outcome::NoMatch;
    };
    filters.vote_average_gte = Some(rating);
    Outcome::Matched
}

fn highly_rated(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    let text = input.text;
    if !(text.contains("highly rated") || text.contains("best rated") || text.contains("top rated")) {
        return Outcome::NoMatch;
    }
    filters.vote_average_gte.get_or_insert(HIGHLY_RATED_MIN);
    Outcome::Matched
}

// ---- votes ----

fn min_votes(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    let Some(votes) = MIN_VOTES.captures(input.text).and_then(|c| capture::<u64>(&c, 2)) else {
        return Outcome::NoMatch;
    };
    filters.vote_count_gte = Some(votes);
    Outcome::Final
}

fn popular(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    if !input.text.contains("popular") {
        return Outcome::NoMatch;
    }
    filters.vote_count_gte.get_or_insert(POPULAR_MIN_VOTES);
    filters.sort_by.get_or_insert(SortOrder::PopularityDesc);
    Outcome::Matched
}

// ---- runtime ----

fn minutes_under(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    let Some(minutes) = RUNTIME_UNDER.captures(input.text).and_then(|c| capture::<u32>(&c, 2)) else {
        return Outcome::NoMatch;
    };
    filters.runtime_lte = Some(minutes);
    Outcome::Matched
}

fn minutes_over(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    let Some(minutes) = RUNTIME_OVER.captures(input.text).and_then(|c| capture::<u32>(&c, 2)) else {
        return Outcome::NoMatch;
    };
    filters.runtime_gte = Some(minutes);
    Outcome::Matched
}

/// Fractional hours are truncated to whole minutes
fn hours_to_minutes(hours: f64) -> u32 {
    (hours * 60.0) as u32
}

fn hours_under(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    let Some(hours) = HOURS_UNDER.captures(input.text).and_then(|c| capture::<f64>(&c, 1)) else {
        return Outcome::NoMatch;
    };
    filters.runtime_lte = Some(hours_to_minutes(hours));
    Outcome::Matched
}

fn hours_over(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    let Some(hours) = HOURS_OVER.captures(input.text).and_then(|c| capture::<f64>(&c, 1)) else {
        return Outcome::NoMatch;
    };
    filters.runtime_gte = Some(hours_to_minutes(hours));
    Outcome::Matched
}

fn short(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    if !input.text.contains("short") {
        return Outcome::NoMatch;
    }
    filters.runtime_lte.get_or_insert(SHORT_MAX_MINUTES);
    Outcome::Matched
}

fn long(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    if !(input.text.contains("long") || input.text.contains("epic")) {
        return Outcome::NoMatch;
    }
    filters.runtime_gte.get_or_insert(LONG_MIN_MINUTES);
    Outcome::Matched
}

// ---- certification ----

/// First synonym (in table order) found as a whole-token phrase.
///
/// Tokens keep hyphens, so "pg" does not fire inside "pg-13" and "g" does
/// not fire inside "rating".
fn certification_phrase(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    let tokens: Vec<&str> = CERT_TOKEN.find_iter(input.text).map(|m| m.as_str()).collect();

    for (phrase, code) in CERT_SYNONYMS {
        let wanted: Vec<&str> = phrase.split_whitespace().collect();
        if tokens.windows(wanted.len()).any(|window| window == wanted.as_slice()) {
            filters.certification = Some(Certification::us(*code));
            return Outcome::Final;
        }
    }
    Outcome::NoMatch
}

// ---- language ----

fn explicit_language(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    let Some(caps) = EXPLICIT_LANGUAGE.captures(input.text) else {
        return Outcome::NoMatch;
    };
    filters.original_language = Some(caps[1].to_string());
    Outcome::Final
}

fn language_name(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    match LANGUAGE_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(input.text))
    {
        Some((_, code)) => {
            filters.original_language = Some(code.to_string());
            Outcome::Final
        }
        None => Outcome::NoMatch,
    }
}

// ---- sort ----

fn sort_trending(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    set_sort(input.text.contains("trending"), SortOrder::PopularityDesc, filters)
}

fn sort_newest(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    set_sort(input.text.contains("newest"), SortOrder::ReleaseDateDesc, filters)
}

fn sort_oldest(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    set_sort(input.text.contains("oldest"), SortOrder::ReleaseDateAsc, filters)
}

fn sort_top_rated(input: &ParseInput<'_>, filters: &mut FilterSet) -> Outcome {
    let hit = input.text.contains("top rated") || input.text.contains("best");
    set_sort(hit, SortOrder::VoteAverageDesc, filters)
}

fn set_sort(hit: bool, order: SortOrder, filters: &mut FilterSet) -> Outcome {
    if hit {
        filters.sort_by = Some(order);
    }
    matched(hit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(query: &str) -> FilterSet {
        QueryParser::with_current_year(2025).parse(query)
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(parse(""), FilterSet::new());
        assert_eq!(parse("   "), FilterSet::new());
        assert_eq!(parse("something to watch"), FilterSet::new());
    }

    #[test]
    fn test_input_is_lowercased() {
        let filters = parse("  HORROR  ");
        assert_eq!(filters.genres.unwrap().ids, vec![27]);
    }

    #[test]
    fn test_genre_and_logic() {
        let filters = parse("action and comedy");
        let genres = filters.genres.unwrap();
        assert_eq!(genres.ids, vec![28, 35]);
        assert_eq!(genres.logic, GenreLogic::And);

        // "and" inside another word does not count
        let filters = parse("action comedy in a sandbox");
        assert_eq!(filters.genres.unwrap().logic, GenreLogic::Or);
    }

    #[test]
    fn test_genre_synonyms_deduplicate() {
        let filters = parse("raunchy comedy");
        assert_eq!(filters.genres.unwrap().ids, vec![35]);

        let filters = parse("sci fi thriller");
        assert_eq!(filters.genres.unwrap().ids, vec![878, 53]);
    }

    #[test]
    fn test_genre_needs_word_boundary() {
        assert!(parse("warriors").genres.is_none());
        assert_eq!(parse("war movies").genres.unwrap().ids, vec![10752]);
    }

    #[test]
    fn test_after_and_before_both_apply() {
        let filters = parse("after 1990 before 2000");
        assert_eq!(filters.release_date_gte, date(1990, 1, 1));
        assert_eq!(filters.release_date_lte, date(2000, 12, 31));
    }

    #[test]
    fn test_between_skips_other_date_rules() {
        let filters = parse("between 2001 and 2005 in the 80s");
        assert_eq!(filters.release_date_gte, date(2001, 1, 1));
        assert_eq!(filters.release_date_lte, date(2005, 12, 31));
    }

    #[test]
    fn test_decades() {
        let filters = parse("90s action");
        assert_eq!(filters.release_date_gte, date(1990, 1, 1));
        assert_eq!(filters.release_date_lte, date(1999, 12, 31));

        let filters = parse("movies from the 20s");
        assert_eq!(filters.release_date_gte, date(2020, 1, 1));

        let filters = parse("1970s");
        assert_eq!(filters.release_date_gte, date(1970, 1, 1));
        assert_eq!(filters.release_date_lte, date(1979, 12, 31));
    }

    #[test]
    fn test_decade_overrides_after() {
        let filters = parse("after 1950 80s");
        assert_eq!(filters.release_date_gte, date(1980, 1, 1));
    }

    #[test]
    fn test_last_n_years() {
        let filters = parse("thrillers from the last 10 years");
        assert_eq!(filters.release_date_gte, date(2015, 1, 1));
        assert_eq!(filters.release_date_lte, None);
    }

    #[test]
    fn test_last_n_years_out_of_range_keeps_earlier_bound() {
        let filters = parse("after 1990 last 300000 years");
        assert_eq!(filters.release_date_gte, date(1990, 1, 1));
    }

    #[test]
    fn test_recent_only_sets_missing_lower_bound() {
        assert_eq!(parse("recent dramas").release_date_gte, date(2020, 1, 1));
        assert_eq!(parse("latest after 1999").release_date_gte, date(1999, 1, 1));
    }

    #[test]
    fn test_rating_comparator_ends_category() {
        let filters = parse("rating >= 7.5 highly rated");
        assert_eq!(filters.vote_average_gte, Some(7.5));

        let filters = parse("score over 6 at least 9");
        assert_eq!(filters.vote_average_gte, Some(6.0));
    }

    #[test]
    fn test_rating_upper_bound() {
        let filters = parse("rating under 5");
        assert_eq!(filters.vote_average_lte, Some(5.0));
        assert_eq!(filters.vote_average_gte, None);
    }

    #[test]
    fn test_bare_at_least_and_qualitative() {
        assert_eq!(parse("at least 8 stars").vote_average_gte, Some(8.0));
        assert_eq!(parse("top rated westerns").vote_average_gte, Some(7.5));
        assert_eq!(parse("at least 6 best rated").vote_average_gte, Some(6.0));
    }

    #[test]
    fn test_votes() {
        let filters = parse("over 5000 votes popular");
        assert_eq!(filters.vote_count_gte, Some(5000));
        assert_eq!(filters.sort_by, None);

        let filters = parse("popular comedies");
        assert_eq!(filters.vote_count_gte, Some(1000));
        assert_eq!(filters.sort_by, Some(SortOrder::PopularityDesc));

        // Needs three digits
        assert_eq!(parse("over 50 votes").vote_count_gte, None);

        assert_eq!(parse("over 5000000000 votes").vote_count_gte, Some(5_000_000_000));
        assert_eq!(
            parse("over 5000000000 votes").to_params().get("vote_count.gte").map(String::as_str),
            Some("5000000000")
        );
    }

    #[test]
    fn test_runtime_minutes_and_hours() {
        let filters = parse("over 90 min under 120 minutes");
        assert_eq!(filters.runtime_gte, Some(90));
        assert_eq!(filters.runtime_lte, Some(120));

        let filters = parse("under 1.5 hours");
        assert_eq!(filters.runtime_lte, Some(90));

        let filters = parse("over 2 hours");
        assert_eq!(filters.runtime_gte, Some(120));
    }

    #[test]
    fn test_runtime_qualitative() {
        assert_eq!(parse("short comedy").runtime_lte, Some(100));
        assert_eq!(parse("epic war").runtime_gte, Some(140));
        assert_eq!(parse("long but under 150 min").runtime_gte, Some(140));
        assert_eq!(parse("short under 80 min").runtime_lte, Some(80));
    }

    #[test]
    fn test_certification_tokens() {
        assert_eq!(parse("pg-13 action").certification, Some(Certification::us("PG-13")));
        assert_eq!(parse("rated r horror").certification, Some(Certification::us("R")));
        assert_eq!(parse("nc17").certification, Some(Certification::us("NC-17")));
        assert_eq!(parse("family friendly").certification, Some(Certification::us("PG")));
        assert_eq!(parse("rating over 7").certification, None);
        assert_eq!(parse("a great story").certification, None);
    }

    #[test]
    fn test_certification_table_order() {
        // "g" comes before "pg" in the table
        assert_eq!(parse("pg or g").certification, Some(Certification::us("G")));
    }

    #[test]
    fn test_language() {
        assert_eq!(parse("language: ko thriller").original_language.as_deref(), Some("ko"));
        assert_eq!(parse("language=fr").original_language.as_deref(), Some("fr"));
        assert_eq!(parse("japanese anime").original_language.as_deref(), Some("ja"));
        assert_eq!(parse("language ja korean").original_language.as_deref(), Some("ja"));
        assert_eq!(parse("englishman").original_language, None);
    }

    #[test]
    fn test_sort_last_match_wins() {
        assert_eq!(parse("trending").sort_by, Some(SortOrder::PopularityDesc));
        assert_eq!(parse("oldest").sort_by, Some(SortOrder::ReleaseDateAsc));
        assert_eq!(parse("newest").sort_by, Some(SortOrder::ReleaseDateDesc));
        assert_eq!(parse("best newest trending").sort_by, Some(SortOrder::VoteAverageDesc));
    }

    #[test]
    fn test_newest_also_counts_as_recent() {
        let filters = parse("newest");
        assert_eq!(filters.release_date_gte, date(2020, 1, 1));
    }
}
