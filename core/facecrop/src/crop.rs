use std::cmp::Ordering;

use image::imageops;
use image::RgbImage;

use crate::face_detector::FaceCandidate;

/// Padded crop region within a source image.
///
/// `x` and `y` are always ≥ 0. `width` and `height` stay signed: a strongly
/// negative padding can collapse the region to a nonpositive extent, which
/// is a valid selection result that crops to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    /// Left edge, clamped to the image (pixels).
    pub x: i32,
    /// Top edge, clamped to the image (pixels).
    pub y: i32,
    /// Horizontal extent; zero or negative crops to nothing.
    pub width: i32,
    /// Vertical extent; zero or negative crops to nothing.
    pub height: i32,
}

/// Pick the most confident candidate and compute its padded crop region.
///
/// Returns `None` when `candidates` is empty (no face means no output for
/// that image). Candidates are ranked by confidence alone; equal confidences
/// keep their detection order. The winner's box is expanded by `padding` on
/// every side, the origin is clamped to 0, and the extent is then limited to
/// what remains between the clamped origin and the image edge.
pub fn select_crop(
    candidates: &[FaceCandidate],
    padding: i32,
    image_width: u32,
    image_height: u32,
) -> Option<CropRect> {
    if candidates.is_empty() {
        return None;
    }

    // Stable sort: ties keep detection order.
    let mut ranked: Vec<&FaceCandidate> = candidates.iter().collect();
    ranked.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });
    let top = ranked[0];

    let x = top.x - padding;
    let y = top.y - padding;
    let width = top.width + 2 * padding;
    let height = top.height + 2 * padding;

    let clamped_x = x.max(0);
    let clamped_y = y.max(0);
    let width = width.min(image_width as i32 - clamped_x);
    let height = height.min(image_height as i32 - clamped_y);

    Some(CropRect {
        x: clamped_x,
        y: clamped_y,
        width,
        height,
    })
}

/// Extract `rect` from `image`.
///
/// A nonpositive extent degrades to an empty image; the encoder refuses it
/// later, at write time.
pub fn apply(rect: &CropRect, image: &RgbImage) -> RgbImage {
    imageops::crop_imm(
        image,
        rect.x.max(0) as u32,
        rect.y.max(0) as u32,
        rect.width.max(0) as u32,
        rect.height.max(0) as u32,
    )
    .to_image()
}
