/// Convenience result type used across vidtour.
pub type TourResult<T> = Result<T, TourError>;

/// Top-level error taxonomy for the fallible edges of the crate.
///
/// The sequencing core itself never fails: malformed tutorial data is recovered locally by
/// rendering nothing. Errors only surface from loading, validation and source acquisition.
#[derive(thiserror::Error, Debug)]
pub enum TourError {
    /// Tutorial data violates a structural invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing tutorial data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// A video source could not be turned into a playable handle.
    #[error("source error: {0}")]
    Source(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TourError {
    /// Build a [`TourError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TourError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`TourError::Source`] value.
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
