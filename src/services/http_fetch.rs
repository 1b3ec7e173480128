use reqwest::Url;

use crate::error::FetchError;
use crate::models::FetchConfig;

/// Outbound HTTP client shared by the image fetcher and the catalog loader.
///
/// Every request runs under the configured timeout; bodies larger than
/// `max_bytes` are rejected while streaming.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    max_bytes: usize,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            max_bytes: config.max_image_bytes,
        })
    }

    /// Accept only absolute http(s) URLs
    pub fn parse_url(raw: &str) -> Result<Url, FetchError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(FetchError::InvalidUrl("URL is empty".to_string()));
        }

        let url = Url::parse(raw).map_err(|e| FetchError::InvalidUrl(format!("{raw}: {e}")))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(FetchError::InvalidUrl(format!(
                "unsupported scheme '{other}'"
            ))),
        }
    }

    /// GET `raw_url` and return the whole body
    pub async fn get_bytes(&self, raw_url: &str) -> Result<Vec<u8>, FetchError> {
        let url = Self::parse_url(raw_url)?;
        tracing::debug!(%url, "Fetching");

        let mut response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "Upstream request failed");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if let Some(len) = response.content_length() {
            let size = usize::try_from(len).unwrap_or(usize::MAX);
            if size > self.max_bytes {
                return Err(FetchError::TooLarge {
                    size,
                    max: self.max_bytes,
                });
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            let size = body.len() + chunk.len();
            if size > self.max_bytes {
                return Err(FetchError::TooLarge {
                    size,
                    max: self.max_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        tracing::debug!(%url, bytes = body.len(), "Fetched");
        Ok(body)
    }
}
