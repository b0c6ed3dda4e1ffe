/// Image I/O module
///
/// This module handles:
/// - Encoding selected files into self-contained data URLs (encoder.rs)
/// - Decoding data URLs back into bytes for rendering (encoder.rs)
/// - Downloading remote images for the built-in items (remote.rs)

pub mod encoder;
pub mod remote;
