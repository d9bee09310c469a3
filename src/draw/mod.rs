/// Lines, polylines, segments and rectangles.
pub mod line;
/// Pixel combination operators.
pub mod ops;
/// Single pixel and point-list access.
pub mod pixel;
