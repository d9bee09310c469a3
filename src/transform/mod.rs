/// Resampling kernels.
pub mod filters;
/// Mirroring.
pub mod flip;
/// Filtered (convolution) resizing.
pub mod resample;
/// Rotation by arbitrary angles.
pub mod rotate;
/// Nearest-neighbour resizing.
pub mod scale;
/// Tiling and centering on a canvas.
pub mod tile;
