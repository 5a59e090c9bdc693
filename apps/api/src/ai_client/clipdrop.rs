//! ClipDrop text-to-image client. One call: prompt in, PNG bytes out.

use base64::Engine;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const CLIPDROP_API_URL: &str = "https://clipdrop-api.co/text-to-image/v1";
/// ClipDrop rejects prompts longer than this.
pub const MAX_PROMPT_CHARS: usize = 1000;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ClipDrop error (status {status}): {detail}")]
    Api { status: u16, detail: String },
}

/// Credit accounting returned in ClipDrop response headers.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ClipDropMeta {
    pub remaining_credits: Option<String>,
    pub credits_consumed: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClipDropErrorBody {
    error: Option<String>,
}

#[derive(Clone)]
pub struct ClipDropClient {
    client: Client,
    api_key: String,
}

impl ClipDropClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Generates one image and returns it as a `data:image/png;base64,` URL
    /// together with credit metadata from the response headers.
    pub async fn text_to_image(&self, prompt: &str) -> Result<(String, ClipDropMeta), ImageError> {
        let prompt: String = prompt.chars().take(MAX_PROMPT_CHARS).collect();
        let form = reqwest::multipart::Form::new().text("prompt", prompt);

        let response = self
            .client
            .post(CLIPDROP_API_URL)
            .header("x-api-key", &self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = match response.json::<ClipDropErrorBody>().await {
                Ok(body) => body.error.unwrap_or_else(|| "Unknown error".to_string()),
                Err(_) => "Unknown error".to_string(),
            };
            return Err(ImageError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        let meta = ClipDropMeta {
            remaining_credits: header_string(&response, "x-remaining-credits"),
            credits_consumed: header_string(&response, "x-credits-consumed"),
        };

        let bytes = response.bytes().await?;
        debug!("ClipDrop returned {} image bytes", bytes.len());

        let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
        Ok((format!("data:image/png;base64,{encoded}"), meta))
    }
}

fn header_string(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}
