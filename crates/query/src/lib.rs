//! Query side of the recommender: filter sets and how they are produced.
//!
//! This crate provides:
//! - `FilterSet`, the typed discovery parameters and their provider rendering
//! - `QueryParser`, the rule-based natural-language parser
//! - `DiscoverOptions`, hand-set filter controls with seed augmentation
//! - The genre, language and certification vocabularies

pub mod discover;
pub mod filter_set;
pub mod parser;
pub mod vocab;

pub use discover::DiscoverOptions;
pub use filter_set::{Certification, FilterSet, GenreFilter, GenreLogic, SortOrder};
pub use parser::{parse_query, QueryParser};
