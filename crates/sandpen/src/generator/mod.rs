//! Remote code generators.

mod gemini;

pub use gemini::GeminiGenerator;
#[cfg(test)]
pub(crate) use gemini::{parse_response, request_body};
