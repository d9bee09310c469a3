/// Decoded-image cache keyed by path and validated by mtime.
pub mod cache;
/// Decoder trait, built-in decoders and their registry.
pub mod decode;
/// Encoder trait, built-in encoders and their registry.
pub mod encode;
/// Container signature sniffing.
pub mod format;
/// Normalized XPM reader and writer.
pub mod xpm;
