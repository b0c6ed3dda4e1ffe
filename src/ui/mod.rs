/// User interface module
///
/// - Add Form screen (add.rs)
/// - Carousel View screen (carousel.rs)
/// - Decoded image handles shared by the screens (image_cache.rs)

pub mod add;
pub mod carousel;
pub mod image_cache;
