//! wraster is a small raster image engine.
//!
//! It loads images from XPM, PNM, PNG, JPEG, GIF, TIFF and WebP containers through an
//! mtime-validated cache, and works on them as plain [`RImage`] buffers:
//!
//! - resize ([`scale`], [`smooth_scale`]), [`rotate`], [`flip`], tile and center
//! - alpha compositing, area copies and flattening onto a color
//! - pixel, line, polyline and rectangle drawing with an [`Operation`]
//! - linear, multi-stop and interwoven gradients
//! - fill, clear, light, bevel and blur painting
//!
//! State that needs to live across calls (cache, active filter, codecs, last error) is owned by
//! an [`ImageEngine`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Container sniffing, codecs and the decoded-image cache.
pub mod assets;
/// Pixel and line drawing.
pub mod draw;
/// Compositing and painting.
pub mod effects;
/// The engine context object.
pub mod engine;
/// Errors, configuration and fixed-point helpers.
pub mod foundation;
/// Gradient synthesis.
pub mod gradient;
/// Image buffers and colors.
pub mod raster;
/// Geometric transforms.
pub mod transform;

pub use crate::assets::cache::CacheStats;
pub use crate::assets::decode::{Decoder, DecoderRegistry};
pub use crate::assets::encode::{Encoder, EncoderRegistry};
pub use crate::assets::format::{FileFormat, supported_formats};
pub use crate::draw::line::{
    CoordinateMode, Point, Segment, draw_line, draw_lines, draw_segments, operate_line,
    operate_lines, operate_rectangle, operate_segments,
};
pub use crate::draw::ops::Operation;
pub use crate::draw::pixel::{get_pixel, operate_pixel, operate_pixels, put_pixel, put_pixels};
pub use crate::effects::blur::blur_image;
pub use crate::effects::composite::{
    combine_alpha, combine_area, combine_area_with_opaqueness, combine_images,
    combine_with_color, combine_with_opaqueness, copy_area,
};
pub use crate::effects::paint::{BevelKind, bevel_image, clear_image, fill_image, light_image};
pub use crate::engine::ImageEngine;
pub use crate::foundation::config::EngineConfig;
pub use crate::foundation::error::{ErrorCode, RasterError, RasterResult, message_for_error};
pub use crate::gradient::linear::{GradientStyle, render_gradient};
pub use crate::gradient::multi::{render_interwoven_gradient, render_multi_gradient};
pub use crate::raster::color::{Color, HsvColor, hsv_to_rgb, rgb_to_hsv};
pub use crate::raster::image::{PixelFormat, RImage};
pub use crate::transform::filters::Filter;
pub use crate::transform::flip::{FlipMode, flip};
pub use crate::transform::resample::smooth_scale;
pub use crate::transform::rotate::rotate;
pub use crate::transform::scale::scale;
pub use crate::transform::tile::{make_centered, make_tiled};
