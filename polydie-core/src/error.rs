/// Error types shared by the core library
use thiserror::Error;

/// Errors raised by geometry validation, pairing and model loading
#[derive(Debug, Error)]
pub enum Error {
    /// The polyhedron has no faces, a face with fewer than three
    /// vertices, or a face referencing a vertex that does not exist.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// The face pairing is not an involution over the face indices.
    #[error("invalid pairing: {0}")]
    InvalidPairing(String),

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("model contains no vertices or no faces")]
    EmptyModel,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
