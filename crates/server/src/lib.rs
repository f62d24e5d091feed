//! Server crate for the CineCompass recommender.
//!
//! This crate contains the orchestrator that coordinates the metadata
//! provider, the pool filters and the engine for each request.

pub mod orchestrator;

pub use orchestrator::{
    MovieRecommendation, OrchestratorConfig, QueryResults, RecommendationOrchestrator,
    RecommendationReport,
};
