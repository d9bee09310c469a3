/// Colors and RGB/HSV conversion.
pub mod color;
/// The `RImage` buffer type.
pub mod image;
