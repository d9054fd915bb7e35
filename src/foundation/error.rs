/// Convenience result type used across Spherule.
pub type SphereResult<T> = Result<T, SphereError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Steady-state rendering never returns errors; these are reserved for
/// construction and validation time (bad display config, degenerate mesh
/// topology, oversized faces).
#[derive(thiserror::Error, Debug)]
pub enum SphereError {
    /// Invalid display or session configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Rejected geometry: degenerate or out-of-precondition shape input.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Errors raised by the pixel pipeline or a sink collaborator.
    #[error("pipeline error: {0}")]
    Pipeline(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SphereError {
    /// Build a [`SphereError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`SphereError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`SphereError::Pipeline`] value.
    pub fn pipeline(msg: impl Into<String>) -> Self {
        Self::Pipeline(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
