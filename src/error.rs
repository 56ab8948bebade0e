use thiserror::Error;

/// Error types for the clustering engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine was constructed with an unusable configuration,
    /// e.g. k = 0, k larger than the point set, or a zero iteration cap
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Empty-cluster repair could not find a donor cluster with more
    /// than one member. Unreachable when there are at least k points,
    /// but checked explicitly so it can never surface as a NaN centroid.
    #[error("Degenerate clustering state: {0}")]
    DegenerateClusteringState(String),
}
