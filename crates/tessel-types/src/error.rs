//! Error types for the Tessel engine.
//!
//! All crates return `TesselResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the Tessel engine.
#[derive(Debug, Error)]
pub enum TesselError {
    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Material parameter is out of valid range.
    #[error("Invalid material parameter: {0}")]
    InvalidMaterial(String),

    /// Configuration value is invalid or unparseable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A required plugin option was not supplied.
    #[error("Missing required option '{0}'")]
    MissingOption(String),

    /// A tetrahedron has (near-)zero volume in the rest pose.
    #[error("Degenerate tetrahedron {element}: volume {volume:.3e}")]
    DegenerateElement {
        element: u32,
        volume: f64,
    },

    /// A caller-supplied edge index disagrees with the recomputed one.
    #[error(
        "Edge index mismatch in element {element}, local edge {local_edge}: \
         supplied {expected}, computed {computed}"
    )]
    EdgeMismatch {
        element: u32,
        local_edge: usize,
        expected: u32,
        computed: u32,
    },

    /// An element references a vertex the model instance does not own.
    #[error("Element {element} references vertex {vertex} which is not owned by this instance")]
    OwnershipViolation {
        element: u32,
        vertex: u32,
    },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A simulation invariant was violated during a step.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl TesselError {
    /// Returns true if the error only invalidates the instance being set up.
    ///
    /// Recoverable errors skip the instance with a warning; everything else
    /// means the host configuration is internally inconsistent and the
    /// simulation must stop.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidMesh(_)
                | Self::InvalidMaterial(_)
                | Self::InvalidConfig(_)
                | Self::MissingOption(_)
                | Self::DegenerateElement { .. }
                | Self::EdgeMismatch { .. }
        )
    }
}

/// Convenience alias for `Result<T, TesselError>`.
pub type TesselResult<T> = Result<T, TesselError>;
