/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The single-entry item store handed between screens (store.rs)
/// - Built-in items, derivation and merging (catalog.rs)
/// - Carousel index arithmetic and auto-advance clock (carousel.rs)

pub mod carousel;
pub mod catalog;
pub mod data;
pub mod store;
