/// Remote image download
///
/// The built-in items and the placeholder point at `https://` URLs. They are
/// downloaded once per source and handed to the image cache as bytes.
use crate::error::FetchError;

/// Build the shared HTTP client.
///
/// Some image CDNs refuse requests without a user agent.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("⚠️  Falling back to default HTTP client: {e}");
            reqwest::Client::new()
        })
}

/// Download an image and return its raw bytes
pub async fn fetch_image(client: reqwest::Client, url: String) -> Result<Vec<u8>, FetchError> {
    let request_error = |e: reqwest::Error| FetchError::Request {
        url: url.clone(),
        reason: e.to_string(),
    };

    let response = client.get(&url).send().await.map_err(request_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.clone(),
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await.map_err(request_error)?;

    tracing::debug!("🌐 Downloaded {} ({} bytes)", url, bytes.len());

    Ok(bytes.to_vec())
}

/// Whether a source has to be downloaded before it can be shown
pub fn is_remote(source: &str) -> bool {
    source.starts_with("https://") || source.starts_with("http://")
}
