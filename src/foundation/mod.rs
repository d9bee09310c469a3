/// Engine configuration (cache sizing, filter, fallback decoding).
pub mod config;
/// Error taxonomy and numeric error codes.
pub mod error;
pub(crate) mod math;
