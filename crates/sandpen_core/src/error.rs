//! Error types for transient, user-recoverable failures

/// Error type for code generation
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The prompt was empty after trimming
    #[error("Prompt is empty")]
    EmptyPrompt,
    /// The generator is not configured (e.g. no API key)
    #[error("Code generation is not configured: {0}")]
    Unavailable(String),
    /// Network or HTTP failure talking to the generator
    #[error("Failed to generate code: {0}")]
    Request(String),
    /// The generator answered with something that is not the expected shape
    #[error("Failed to generate code: unexpected response ({0})")]
    Response(String),
}

/// Error type for project import
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Failed to load project: Invalid file format ({0})")]
    Parse(#[from] serde_json::Error),
    #[error("Failed to load project: expected a JSON object")]
    NotAnObject,
}
