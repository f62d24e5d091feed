//! # Sources Crate
//!
//! Where recommendation candidates come from.
//!
//! ## Components
//!
//! ### MetadataProvider
//! The collaborator that owns all movie metadata: title search, full
//! details, filtered discovery, similar-to listings and trending.
//!
//! ### LocalCatalogProvider
//! A `MetadataProvider` over an in-memory JSON catalog that evaluates
//! filter sets itself, so everything runs offline.
//!
//! ### Gathering
//! Pages through discovery and similar listings and merges them into a
//! deduplicated, capped list of ids (~160) to hydrate.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{gather_candidate_ids, GatherPlan, LocalCatalogProvider, MetadataProvider};
//! use std::path::Path;
//!
//! let provider = LocalCatalogProvider::load(Path::new("data/sample_catalog.json"))?;
//! let seed = provider.details(694)?;
//! let filters = query::DiscoverOptions::default().for_seed(&seed, 5);
//!
//! let ids = gather_candidate_ids(&provider, &filters, 694, GatherPlan::default())?;
//! ```

// Public modules
pub mod gather;
pub mod local;
pub mod provider;
pub mod types;

// Re-export commonly used types
pub use gather::{
    discover_candidates, gather_candidate_ids, merge_candidates, similar_candidates, GatherPlan,
};
pub use local::LocalCatalogProvider;
pub use provider::MetadataProvider;
pub use types::{Candidate, CandidateSource};
