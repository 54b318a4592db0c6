use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::FaceCropError;
use crate::face_detector::{DetectorError, FaceCandidate, FaceDetector};

/// Face detector backed by the `rustface` crate (SeetaFace engine).
///
/// Loads a SeetaFace model file on construction. The engine consumes
/// grayscale pixels, so detection converts the BGR input to luma first.
pub struct RustfaceDetector {
    model: rustface::Model,
}

impl RustfaceDetector {
    /// Load a SeetaFace model from `path`.
    pub fn from_model_file(path: &Path) -> Result<Self, FaceCropError> {
        let file = File::open(path).map_err(|e| FaceCropError::Model {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let model =
            rustface::read_model(BufReader::new(file)).map_err(|e| FaceCropError::Model {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { model })
    }
}

impl FaceDetector for RustfaceDetector {
    fn detect(
        &self,
        bgr: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<FaceCandidate>, DetectorError> {
        let gray = bgr_to_luma(bgr, width, height)?;

        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(20);
        detector.set_score_thresh(2.0);
        detector.set_pyramid_scale_factor(0.8);
        detector.set_slide_window_step(4, 4);

        let faces = detector.detect(&rustface::ImageData::new(&gray, width, height));

        Ok(faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                FaceCandidate {
                    x: bbox.x(),
                    y: bbox.y(),
                    width: bbox.width() as i32,
                    height: bbox.height() as i32,
                    confidence: face.score(),
                }
            })
            .collect())
    }
}

/// BT.601 luma from packed BGR bytes.
fn bgr_to_luma(bgr: &[u8], width: u32, height: u32) -> Result<Vec<u8>, DetectorError> {
    let expected = width as usize * height as usize * 3;
    if bgr.len() != expected {
        return Err(DetectorError(format!(
            "pixel buffer holds {} bytes, expected {} for {width}x{height} BGR",
            bgr.len(),
            expected
        )));
    }
    Ok(bgr
        .chunks_exact(3)
        .map(|px| (0.114 * px[0] as f32 + 0.587 * px[1] as f32 + 0.299 * px[2] as f32) as u8)
        .collect())
}
