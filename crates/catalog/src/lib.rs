//! # Catalog Crate
//!
//! Turns raw metadata-provider records into canonical movie records.
//!
//! ## Main Components
//!
//! - **types**: Raw provider payload (`RawMovie`) and the canonical `MovieRecord`
//! - **normalize**: Raw -> canonical, with every default applied
//! - **soup**: The weighted token string used for text similarity
//! - **pool**: `CandidatePool`, an ordered id-unique record collection
//! - **loader**: Read a catalog file and batch-normalize it
//! - **error**: Error types for loading and normalization
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{loader, normalize};
//! use std::path::Path;
//!
//! let raws = loader::load_raw_records(Path::new("data/catalog.json"))?;
//! let record = normalize(&raws[0])?;
//! println!("{} -> {}", record.title, record.soup);
//! ```

pub mod error;
pub mod loader;
pub mod normalize;
pub mod pool;
pub mod soup;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use normalize::{extract_certification, normalize, top_director};
pub use pool::CandidatePool;
pub use soup::build_soup;
pub use types::{
    // Type aliases
    GenreId,
    KeywordId,
    MovieId,
    PersonId,
    // Core types
    MovieRecord,
    RawMovie,
};
