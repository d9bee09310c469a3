/// 3x3 box-style blur.
pub mod blur;
/// Alpha compositing and area copies.
pub mod composite;
/// Whole-image clear, fill, light and bevel.
pub mod paint;
