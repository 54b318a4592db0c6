//! Batch face cropping for photo directories: detect the most prominent face
//! in each image and save a padded crop of it.
//!
//! # Example
//!
//! ```no_run
//! use facecrop::{BatchCropper, DetectorError, FaceCandidate, FaceDetector, PipelineConfig};
//!
//! struct CenterDetector;
//!
//! impl FaceDetector for CenterDetector {
//!     fn detect(
//!         &self,
//!         _bgr: &[u8],
//!         width: u32,
//!         height: u32,
//!     ) -> Result<Vec<FaceCandidate>, DetectorError> {
//!         Ok(vec![FaceCandidate {
//!             x: width as i32 / 4,
//!             y: height as i32 / 4,
//!             width: width as i32 / 2,
//!             height: height as i32 / 2,
//!             confidence: 1.0,
//!         }])
//!     }
//! }
//!
//! let config = PipelineConfig::new("photos", "photos/cropped").with_padding(32);
//! let files = facecrop::discover_inputs(&config.input_dir).unwrap();
//! let report = BatchCropper::new(config, Box::new(CenterDetector))
//!     .run(&files)
//!     .unwrap();
//! println!("{} crops written", report.written.len());
//! ```
#![warn(missing_docs)]

mod batch;
/// Channel reordering between decoder output and detector input.
pub mod color;
mod crop;
mod error;
/// Face detection trait and data types.
pub mod face_detector;
#[cfg(feature = "rustface")]
/// Built-in SeetaFace-based face detector backend.
pub mod rustface_backend;

/// Batch coordinator, its per-file report, and input discovery.
pub use batch::{discover_inputs, BatchCropper, BatchReport};
/// Crop rectangle type and face selection.
pub use crop::{select_crop, CropRect};
/// Error type returned by facecrop operations.
pub use error::FaceCropError;
/// Face detection trait, candidate type, and detector error.
pub use face_detector::{DetectorError, FaceCandidate, FaceDetector};
#[cfg(feature = "rustface")]
/// Built-in detector that runs a SeetaFace model from disk.
pub use rustface_backend::RustfaceDetector;

/// Default padding in pixels, added on every side of the selected face box.
pub const DEFAULT_PADDING: i32 = 470;

/// Default number of worker threads per parallel stage.
pub const DEFAULT_WORKERS: usize = 2;

/// Settings for one batch run.
///
/// Built once before the batch starts and read-only afterwards: the
/// coordinator and every worker see the same values for the whole run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory the input photos are read from.
    pub input_dir: std::path::PathBuf,

    /// Directory crops are written into. Created if missing.
    pub output_dir: std::path::PathBuf,

    /// Pixels added on every side of the selected face box.
    /// Negative values shrink the box instead.
    pub padding: i32,

    /// Worker threads for each parallel stage. Must be at least 1.
    pub workers: usize,
}

impl PipelineConfig {
    /// Create a config for the given directories with default padding and
    /// worker count.
    pub fn new(
        input_dir: impl Into<std::path::PathBuf>,
        output_dir: impl Into<std::path::PathBuf>,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            padding: DEFAULT_PADDING,
            workers: DEFAULT_WORKERS,
        }
    }

    /// Set the crop padding in pixels (default: 470).
    pub fn with_padding(mut self, padding: i32) -> Self {
        self.padding = padding;
        self
    }

    /// Set the worker thread count per stage (default: 2).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}
