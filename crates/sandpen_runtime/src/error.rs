//! Error types for the headless runtime

/// Failures of the runtime itself; errors in user code are diagnostics, not these
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The bootstrap or instrumentation scripts failed to evaluate
    #[error("Failed to prepare runtime: {0}")]
    Bootstrap(String),
    /// Forwarding an uncaught error back into the isolate failed
    #[error("Failed to report uncaught error: {0}")]
    Report(String),
}
