/// Image encoder
///
/// Turns user-selected files into `data:<mime>;base64,<payload>` strings that
/// can be stored in an item record and rendered without touching the
/// filesystem again.

use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use base64::Engine as _;
use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::EncodeError;

/// Used when the extension does not name a known image format
const FALLBACK_MIME: &str = "application/octet-stream";

/// Encode a single file. `None` in gives `None` out.
pub async fn encode_file(path: Option<PathBuf>) -> Result<Option<String>, EncodeError> {
    let Some(path) = path else {
        return Ok(None);
    };

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|source| EncodeError::Read {
            path: path.clone(),
            source: Arc::new(source),
        })?;

    tracing::debug!("🖼️  Encoded {} ({} bytes)", path.display(), bytes.len());

    Ok(Some(to_data_url(mime_for(&path), &bytes)))
}

/// Encode a batch of files concurrently.
///
/// The output keeps the input order. If any file fails, the whole batch
/// fails and no partial result is returned.
pub async fn encode_files(paths: Vec<PathBuf>) -> Result<Vec<String>, EncodeError> {
    let count = paths.len();
    let encoded = try_join_all(paths.into_iter().map(|path| encode_file(Some(path)))).await?;

    tracing::info!("🖼️  Encoded batch of {} images", count);

    // encode_file only returns None for a None input
    Ok(encoded.into_iter().flatten().collect())
}

/// Build a data URL from raw bytes
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64_ENGINE.encode(bytes))
}

/// Split a base64 data URL into its MIME type and decoded bytes.
///
/// Returns `None` for anything that is not a base64 data URL.
pub fn decode_data_url(source: &str) -> Option<(String, Vec<u8>)> {
    let rest = source.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    let bytes = BASE64_ENGINE.decode(payload).ok()?;

    Some((mime.to_string(), bytes))
}

pub fn is_data_url(source: &str) -> bool {
    source.starts_with("data:")
}

fn mime_for(path: &Path) -> &'static str {
    image::ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(FALLBACK_MIME)
}
