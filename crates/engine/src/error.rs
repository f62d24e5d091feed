//! Error types for the engine crate.

use catalog::MovieId;
use thiserror::Error;

/// Errors raised while building a frame or fitting the similarity space
#[derive(Error, Debug, PartialEq)]
pub enum EngineError {
    /// Two records in one frame share an id
    #[error("Duplicate movie id {0} in feature frame")]
    DuplicateId(MovieId),

    /// No document in the frame produced a single term
    ///
    /// Callers should treat this as "no recommendations", not as a crash.
    #[error("Empty vocabulary: no soup in the frame produced any terms")]
    EmptyVocabulary,
}

pub type Result<T> = std::result::Result<T, EngineError>;
