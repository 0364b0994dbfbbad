use async_trait::async_trait;

use crate::error::GenerateError;
use crate::fragment::Fragments;

/// Remote collaborator that turns a prompt into all three fragments.
///
/// Either every fragment comes back or the call fails; partial results are
/// not a thing.
#[async_trait]
pub trait CodeGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Fragments, GenerateError>;
}
