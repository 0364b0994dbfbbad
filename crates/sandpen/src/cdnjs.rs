//! Library lookup on cdnjs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

const SEARCH_URL: &str = "https://api.cdnjs.com/libraries";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tabled)]
pub struct CdnLibrary {
    pub name: String,
    #[serde(default)]
    #[tabled(display_with = "display_or_dash")]
    pub version: Option<String>,
    /// URL of the library's default file
    #[serde(default)]
    #[tabled(display_with = "display_or_dash")]
    pub latest: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<CdnLibrary>,
}

#[allow(clippy::ref_option)]
fn display_or_dash(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".into())
}

/// Search cdnjs for libraries matching `term`
///
/// # Errors
///
/// Fails on network errors or an unexpected response shape
pub async fn search(client: &reqwest::Client, term: &str) -> Result<Vec<CdnLibrary>> {
    let response = client
        .get(SEARCH_URL)
        .query(&[("search", term), ("fields", "version,latest")])
        .send()
        .await
        .context("Failed to reach cdnjs")?
        .error_for_status()
        .context("cdnjs search failed")?;

    let body = response
        .text()
        .await
        .context("Failed to read cdnjs response")?;
    parse_results(&body)
}

pub(crate) fn parse_results(body: &str) -> Result<Vec<CdnLibrary>> {
    let body: SearchResponse = serde_json::from_str(body).context("Failed to parse cdnjs response")?;
    Ok(body.results)
}
