use std::path::Path;

use image::RgbImage;

use crate::error::FaceCropError;

/// A decoded photo held in both channel orders.
///
/// The two buffers are created together from one decode and describe the same
/// pixels: `native` feeds the final crop and write-out, `detector_order` is
/// consumed by the face detector and nothing else.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    /// Pixels in the loader's native RGB order.
    pub native: RgbImage,
    /// The same pixels repacked into the BGR order detectors consume.
    pub detector_order: Vec<u8>,
}

impl PreparedImage {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.native.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.native.height()
    }
}

/// Reorder a native RGB buffer into the detector's BGR layout.
///
/// Pure channel swap: no resize, no normalization, same dimensions.
pub fn prepare(native: RgbImage) -> PreparedImage {
    let mut bgr = native.clone();
    for pixel in bgr.pixels_mut() {
        pixel.0.swap(0, 2);
    }
    PreparedImage {
        native,
        detector_order: bgr.into_raw(),
    }
}

/// Decode the photo at `path` and produce its channel-order pair.
///
/// `file` is the bare filename used to tag a decode failure; an unreadable
/// or unparsable file is a [`FaceCropError::Decode`], never an empty buffer.
pub fn load_prepared(path: &Path, file: &str) -> Result<PreparedImage, FaceCropError> {
    let decoded = image::open(path).map_err(|e| FaceCropError::Decode {
        file: file.to_string(),
        reason: e.to_string(),
    })?;
    Ok(prepare(decoded.to_rgb8()))
}
