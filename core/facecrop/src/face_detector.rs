use thiserror::Error;

/// A candidate face reported by a detector backend.
#[derive(Debug, Clone)]
pub struct FaceCandidate {
    /// X coordinate of the top-left corner (pixels).
    pub x: i32,
    /// Y coordinate of the top-left corner (pixels).
    pub y: i32,
    /// Width of the bounding box (pixels).
    pub width: i32,
    /// Height of the bounding box (pixels).
    pub height: i32,
    /// Detection confidence score; higher ranks stronger candidates.
    pub confidence: f64,
}

/// Error raised inside a detector backend.
///
/// Backends do not know which file they are looking at; the batch layer wraps
/// this into [`crate::FaceCropError::Detection`] with the filename attached.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct DetectorError(
    /// Human-readable reason from the backend.
    pub String,
);

/// Pluggable face detection backend.
///
/// Implement this trait to provide a custom face detector (ONNX, dlib, etc.)
/// and pass it to [`crate::BatchCropper::new`]. Implementations are invoked
/// concurrently from the detection stage's worker pool, one call per image.
pub trait FaceDetector: Send + Sync {
    /// Detect faces in a row-major, 3-bytes-per-pixel BGR buffer of
    /// `width` × `height` pixels.
    ///
    /// Returning an empty vector means "no face found" and is a normal
    /// outcome, not an error.
    fn detect(&self, bgr: &[u8], width: u32, height: u32)
        -> Result<Vec<FaceCandidate>, DetectorError>;
}
