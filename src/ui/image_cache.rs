/// Decoded image handles, keyed by image source
///
/// Data URLs are decoded on the spot. Remote sources are reported back to the
/// application for download and marked as loading until the bytes arrive.
use iced::widget::{container, image, text};
use iced::{ContentFit, Element, Length};
use std::collections::{HashMap, HashSet};

use crate::media::{encoder, remote};

#[derive(Debug, Clone)]
pub enum Entry {
    Loading,
    Ready(image::Handle),
    Failed,
}

#[derive(Debug, Default)]
pub struct ImageCache {
    entries: HashMap<String, Entry>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, source: &str) -> Option<&Entry> {
        self.entries.get(source)
    }

    /// Make every source renderable.
    ///
    /// Entries for sources outside this set are dropped. Returns the remote
    /// sources that are not cached yet and must be downloaded (each one once).
    pub fn prepare<'a>(&mut self, sources: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let wanted: HashSet<&str> = sources.into_iter().collect();
        self.entries.retain(|source, _| wanted.contains(source.as_str()));

        let mut missing = Vec::new();

        for source in wanted {
            if self.entries.contains_key(source) {
                continue;
            }

            let entry = if encoder::is_data_url(source) {
                match encoder::decode_data_url(source) {
                    Some((_, bytes)) => Entry::Ready(image::Handle::from_bytes(bytes)),
                    None => Entry::Failed,
                }
            } else if remote::is_remote(source) {
                missing.push(source.to_string());
                Entry::Loading
            } else {
                Entry::Failed
            };

            self.entries.insert(source.to_string(), entry);
        }

        missing
    }

    pub fn insert_bytes(&mut self, source: String, bytes: Vec<u8>) {
        self.entries
            .insert(source, Entry::Ready(image::Handle::from_bytes(bytes)));
    }

    pub fn mark_failed(&mut self, source: String) {
        self.entries.insert(source, Entry::Failed);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Render a cached image at a fixed size, or a text tile while it is
/// loading or if it could not be decoded
pub fn picture<'a, Message: 'a>(
    cache: &ImageCache,
    source: &str,
    width: f32,
    height: f32,
) -> Element<'a, Message> {
    let label = match cache.get(source) {
        Some(Entry::Ready(handle)) => {
            return image(handle.clone())
                .width(width)
                .height(height)
                .content_fit(ContentFit::Cover)
                .into();
        }
        Some(Entry::Failed) => "Image unavailable",
        Some(Entry::Loading) | None => "Loading…",
    };

    container(text(label).size(14))
        .width(width)
        .height(height)
        .center_x(Length::Fixed(width))
        .center_y(Length::Fixed(height))
        .style(container::rounded_box)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_is_decoded_immediately() {
        let mut cache = ImageCache::new();
        let source = "data:image/png;base64,iVBORw==";

        let missing = cache.prepare([source]);

        assert!(missing.is_empty());
        assert!(matches!(cache.get(source), Some(Entry::Ready(_))));
    }

    #[test]
    fn test_remote_sources_are_requested_once() {
        let mut cache = ImageCache::new();
        let url = "https://i.redd.it/wciu6rx0duq41.jpg";

        assert_eq!(cache.prepare([url, url]), vec![url.to_string()]);
        assert!(matches!(cache.get(url), Some(Entry::Loading)));
        assert!(cache.prepare([url]).is_empty());
    }

    #[test]
    fn test_broken_sources_fail() {
        let mut cache = ImageCache::new();

        let missing = cache.prepare(["data:image/png;base64,%%%", "blob:preview-1"]);

        assert!(missing.is_empty());
        assert!(matches!(cache.get("data:image/png;base64,%%%"), Some(Entry::Failed)));
        assert!(matches!(cache.get("blob:preview-1"), Some(Entry::Failed)));
    }

    #[test]
    fn test_download_results_replace_loading() {
        let mut cache = ImageCache::new();
        let ok = "https://example.com/ok.png";
        let bad = "https://example.com/bad.png";
        cache.prepare([ok, bad]);

        cache.insert_bytes(ok.to_string(), vec![0x89, b'P', b'N', b'G']);
        cache.mark_failed(bad.to_string());

        assert!(matches!(cache.get(ok), Some(Entry::Ready(_))));
        assert!(matches!(cache.get(bad), Some(Entry::Failed)));
    }

    #[test]
    fn test_unlisted_sources_are_evicted() {
        let mut cache = ImageCache::new();
        let url = "https://example.com/a.png";
        let old = "data:image/png;base64,iVBORw==";
        let new = "data:image/gif;base64,R0lGOA==";
        cache.prepare([url, old]);

        let missing = cache.prepare([url, new]);

        assert!(missing.is_empty());
        assert!(cache.get(old).is_none());
        assert!(matches!(cache.get(url), Some(Entry::Loading)));
        assert!(matches!(cache.get(new), Some(Entry::Ready(_))));
    }

    #[test]
    fn test_clear_forgets_everything() {
        let mut cache = ImageCache::new();
        let url = "https://example.com/a.png";
        cache.prepare([url]);
        cache.clear();

        assert!(cache.get(url).is_none());
        assert_eq!(cache.prepare([url]).len(), 1);
    }
}
