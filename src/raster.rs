//! Turns a transferred pixel buffer into a displayable raster.
//!
//! No pixel values are touched here; composing only attaches interpretation
//! metadata (format and stride) to bytes the core already produced.

use crate::{Dimension, Error, PixelFormat, Raster, RasterDescriptor};

/// Builds the descriptor for an output dimension: format from the channel
/// count, stride `width * channels` with no row padding.
pub fn descriptor_for(dimension: Dimension) -> Result<RasterDescriptor, Error> {
    let format = PixelFormat::from_channels(dimension.channels)?;
    Ok(RasterDescriptor {
        width: dimension.width,
        height: dimension.height,
        format,
        stride: dimension.width.max(0) as usize * format.bytes_per_pixel(),
    })
}

/// Composes a raster from an output dimension and its transferred pixels.
///
/// The buffer must be exactly `height * stride` bytes. A mismatch means the
/// native core broke its sizing contract, which is not recoverable, so it
/// panics instead of returning an error.
pub fn compose(dimension: Dimension, pixels: Vec<u8>) -> Result<Raster, Error> {
    let descriptor = descriptor_for(dimension)?;
    assert_eq!(
        pixels.len(),
        descriptor.height.max(0) as usize * descriptor.stride,
        "native core produced a pixel buffer that does not match its own output dimension"
    );
    Ok(Raster { descriptor, pixels })
}

/// Scales a dimension to fit within `max_width` x `max_height`, preserving
/// aspect ratio. Images already inside the bounds are returned as-is; this
/// never upscales.
pub fn fit_within(dimension: Dimension, max_width: u32, max_height: u32) -> (u32, u32) {
    let width = dimension.width.max(0) as u32;
    let height = dimension.height.max(0) as u32;
    if width == 0 || height == 0 {
        return (width, height);
    }
    if width <= max_width && height <= max_height {
        return (width, height);
    }
    let scale = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );
    let fitted_w = ((width as f64 * scale).round() as u32).max(1);
    let fitted_h = ((height as f64 * scale).round() as u32).max(1);
    (fitted_w.min(max_width), fitted_h.min(max_height))
}
