use async_trait::async_trait;
use log::debug;
use sandpen_config::GeneratorConfig;
use sandpen_core::{CodeGenerator, Fragments, GenerateError};
use serde_json::{Value, json};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const SYSTEM_INSTRUCTION: &str = "You are an expert web developer assistant. Your task is to \
generate HTML, CSS, and JavaScript code based on a user's prompt. You must return the code in a \
JSON object with the keys 'html', 'css', and 'javascript'. The code should be clean, efficient, \
and modern.";

/// [`CodeGenerator`] backed by the Gemini `generateContent` API
#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    client: reqwest::Client,
    model: String,
    api_key: String,
}

impl GeminiGenerator {
    pub fn new(model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// # Errors
    ///
    /// Fails with [`GenerateError::Unavailable`] when the API key variable is unset
    pub fn from_config(cfg: &GeneratorConfig) -> Result<Self, GenerateError> {
        let api_key = cfg.api_key().ok_or_else(|| {
            GenerateError::Unavailable(format!(
                "set the {} environment variable to enable generation",
                cfg.api_key_env
            ))
        })?;
        Ok(Self::new(&cfg.model, api_key))
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CodeGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<Fragments, GenerateError> {
        let url = format!("{API_BASE}/models/{}:generateContent", self.model);
        debug!("Requesting generation from {}", self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(prompt))
            .send()
            .await
            .map_err(|e| GenerateError::Request(e.to_string()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| GenerateError::Response(e.to_string()))?;

        if !status.is_success() {
            let message = body
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map_or_else(|| status.to_string(), str::to_string);
            return Err(GenerateError::Request(message));
        }

        parse_response(&body)
    }
}

pub(crate) fn request_body(prompt: &str) -> Value {
    let property = |description: &str| json!({ "type": "STRING", "description": description });

    json!({
        "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
        "contents": [{
            "role": "user",
            "parts": [{
                "text": format!(
                    "Generate web code for this prompt: \"{prompt}\". Provide HTML, CSS, and JavaScript."
                )
            }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "html": property(
                        "The HTML code for the component. It should be a single string, containing only the body content, without <html>, <head>, or <body> tags."
                    ),
                    "css": property(
                        "The CSS code to style the component. It should be a single string, without <style> tags."
                    ),
                    "javascript": property(
                        "The JavaScript code for interactivity. It should be a single string, without <script> tags. It should be vanilla JS that can run directly in the browser."
                    ),
                },
                "required": ["html", "css", "javascript"]
            }
        }
    })
}

/// Pull the generated fragments out of a `generateContent` response.
///
/// Missing keys in the generated object become empty fragments.
pub(crate) fn parse_response(body: &Value) -> Result<Fragments, GenerateError> {
    let text = body
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .ok_or_else(|| GenerateError::Response("no candidate text".into()))?;

    let generated: Value = serde_json::from_str(text.trim())
        .map_err(|e| GenerateError::Response(e.to_string()))?;
    if !generated.is_object() {
        return Err(GenerateError::Response("expected a JSON object".into()));
    }

    let field = |key: &str| {
        generated
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    Ok(Fragments::new(field("html"), field("css"), field("javascript")))
}
