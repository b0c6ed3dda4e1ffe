/// Carousel item catalog
///
/// Built-in seed items, derivation of carousel items from the stored record,
/// and merging the two into the set the carousel displays.
use super::data::{CarouselItem, ItemRecord, StoredImage};
use super::store::StoreRead;

/// The four built-in items: (id, title, type, image, description)
const SEED: [(&str, &str, &str, &str, &str); 4] = [
    (
        "1",
        "Jalebi",
        "Food",
        "https://t4.ftcdn.net/jpg/09/76/94/83/360_F_976948359_rtVBTuf4BroTySr70mvosOlrA5etCO6v.jpg",
        "A delicious and sweet treat, made with a unique combination of flavors.",
    ),
    (
        "2",
        "Tea",
        "Drink",
        "https://t4.ftcdn.net/jpg/05/18/98/51/360_F_518985142_7VQYNp8NpIrIDzyd2fOshRszD4hswfk7.jpg",
        "A refreshing and invigorating beverage, perfect for a hot day.",
    ),
    (
        "3",
        "BMW E30",
        "Car",
        "https://i.redd.it/wciu6rx0duq41.jpg",
        "A classic car model, known for its sleek design and powerful engine.",
    ),
    (
        "4",
        "Cat GIF",
        "GIF",
        "https://no-cdn.shortpixel.ai/client/to_avif,q_lossy,ret_wait/https://shortpixel.com/blog/wp-content/uploads/2023/12/nyan-cat.gif",
        "A funny and cute GIF, perfect for a laugh.",
    ),
];

pub fn seed_items() -> Vec<CarouselItem> {
    SEED.iter()
        .map(|&(id, title, item_type, image_source, description)| CarouselItem {
            id: id.to_string(),
            title: title.to_string(),
            item_type: item_type.to_string(),
            image_source: image_source.to_string(),
            description: description.to_string(),
        })
        .collect()
}

/// Pick a renderable source for a stored image
pub fn resolve_source(image: &StoredImage, placeholder: &str) -> String {
    match image {
        StoredImage::Encoded(value) if !value.is_empty() => value.clone(),
        StoredImage::Preview { preview } if !preview.is_empty() => preview.clone(),
        _ => placeholder.to_string(),
    }
}

/// Whether the cover is already one of the additional images.
///
/// Encoded strings compare by value, preview handles by their preview
/// reference. An encoded string never matches a preview handle.
fn cover_already_included(cover: &StoredImage, additional: &[StoredImage]) -> bool {
    additional.iter().any(|image| match (image, cover) {
        (StoredImage::Encoded(a), StoredImage::Encoded(b)) => a == b,
        (StoredImage::Preview { preview: a }, StoredImage::Preview { preview: b }) => {
            !a.is_empty() && a == b
        }
        _ => false,
    })
}

/// Turn the stored record into carousel items.
///
/// One item per additional image, one more for the cover unless it repeats
/// an additional image, and a single placeholder item when the record has no
/// images at all so the title and type still show up.
pub fn derive_items(record: &ItemRecord, placeholder: &str) -> Vec<CarouselItem> {
    let make = |id: String, image_source: String| CarouselItem {
        id,
        title: record.name.clone(),
        item_type: record.item_type.clone(),
        image_source,
        description: record.description.clone(),
    };

    let mut items: Vec<CarouselItem> = record
        .additional_images
        .iter()
        .enumerate()
        .map(|(idx, image)| make(format!("added-multi-{idx}"), resolve_source(image, placeholder)))
        .collect();

    let cover = record.cover_image.as_ref().filter(|cover| cover.is_present());

    if let Some(cover) = cover {
        if !cover_already_included(cover, &record.additional_images) {
            items.push(make("added-single".to_string(), resolve_source(cover, placeholder)));
        }
    }

    if record.additional_images.is_empty() && cover.is_none() {
        items.push(make("added-placeholder".to_string(), placeholder.to_string()));
    }

    items.retain(|item| !item.image_source.is_empty());
    items
}

/// Carousel items for whatever the store currently holds
pub fn added_items(read: StoreRead, placeholder: &str) -> Vec<CarouselItem> {
    match read {
        StoreRead::Present(record) => derive_items(&record, placeholder),
        StoreRead::Empty => Vec::new(),
        StoreRead::Malformed(reason) => {
            tracing::warn!("⚠️  Ignoring malformed stored item: {reason}");
            Vec::new()
        }
    }
}

/// Append added items to the seed set, skipping any whose title exactly
/// matches a seed title
pub fn merge(seed: Vec<CarouselItem>, added: Vec<CarouselItem>) -> Vec<CarouselItem> {
    let seed_titles: Vec<String> = seed.iter().map(|item| item.title.clone()).collect();

    let mut merged = seed;
    merged.extend(
        added
            .into_iter()
            .filter(|item| !seed_titles.contains(&item.title)),
    );
    merged
}
