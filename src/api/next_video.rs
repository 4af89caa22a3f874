//! Client for the `/next-video` endpoint.

use crate::api::models::NextVideoResponse;
use crate::error::PlayerError;
use once_cell::sync::Lazy;
use reqwest::Url;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// Something that can name the next video to play.
#[allow(async_fn_in_trait)]
pub trait VideoSource {
    async fn next_video(&self) -> Result<String, PlayerError>;
}

/// Asks the server for a path with `GET <endpoint>`.
pub struct HttpVideoSource {
    endpoint: Url,
}

impl HttpVideoSource {
    pub fn new(endpoint: Url) -> Self {
        Self { endpoint }
    }
}

impl VideoSource for HttpVideoSource {
    async fn next_video(&self) -> Result<String, PlayerError> {
        let response = HTTP_CLIENT.get(self.endpoint.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlayerError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_next_video(&body)
    }
}

/// Extract the video path from a `/next-video` body.
pub fn parse_next_video(body: &str) -> Result<String, PlayerError> {
    let parsed: NextVideoResponse =
        serde_json::from_str(body).map_err(|e| PlayerError::Malformed(e.to_string()))?;

    if parsed.video_path.trim().is_empty() {
        return Err(PlayerError::Malformed("empty videoPath".to_string()));
    }
    Ok(parsed.video_path)
}

/// Resolve `endpoint` against `base` (the page origin). Absolute endpoints are
/// used as they are.
pub fn endpoint_url(base: &str, endpoint: &str) -> Result<Url, PlayerError> {
    if let Ok(url) = Url::parse(endpoint) {
        return Ok(url);
    }
    Url::parse(base)
        .and_then(|base| base.join(endpoint))
        .map_err(|e| PlayerError::Endpoint(format!("{endpoint}: {e}")))
}
