/// Shared data structures for the application state
///
/// These structs represent the data model that flows from the Add Form,
/// through the item store, into the Carousel View.
use serde::{Deserialize, Serialize};

/// An image attached to an item record.
///
/// The Add Form always stores encoded data URLs. Records can also carry a
/// preview handle object (`{"preview": "..."}`), which the carousel resolves
/// and compares by its preview reference.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum StoredImage {
    Encoded(String),
    Preview { preview: String },
}

impl StoredImage {
    /// Whether this image counts as "given" (an empty string does not)
    pub fn is_present(&self) -> bool {
        match self {
            StoredImage::Encoded(value) => !value.is_empty(),
            StoredImage::Preview { .. } => true,
        }
    }
}

/// The most recently added item, as submitted by the Add Form
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_image: Option<StoredImage>,
    #[serde(default)]
    pub additional_images: Vec<StoredImage>,
}

/// One tile of the carousel
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselItem {
    /// Unique within the current item set ("1".."4" for built-ins, "added-*" otherwise)
    pub id: String,
    pub title: String,
    pub item_type: String,
    /// Data URL, remote URL or the placeholder. Never empty.
    pub image_source: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_field_names() {
        let record = ItemRecord {
            name: "Samosa".into(),
            item_type: "Food".into(),
            description: "Crispy".into(),
            cover_image: Some(StoredImage::Encoded("data:image/png;base64,AA==".into())),
            additional_images: vec![StoredImage::Preview { preview: "blob:1".into() }],
        };

        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["type"], "Food");
        assert_eq!(json["coverImage"], "data:image/png;base64,AA==");
        assert_eq!(json["additionalImages"][0]["preview"], "blob:1");
    }

    #[test]
    fn test_optional_fields_default() {
        let record: ItemRecord = serde_json::from_str(r#"{"name":"Tea","type":"Drink"}"#).unwrap();
        assert_eq!(record.description, "");
        assert!(record.cover_image.is_none());
        assert!(record.additional_images.is_empty());
    }

    #[test]
    fn test_empty_string_is_not_present() {
        assert!(!StoredImage::Encoded(String::new()).is_present());
        assert!(StoredImage::Encoded("x".into()).is_present());
        assert!(StoredImage::Preview { preview: String::new() }.is_present());
    }
}
