use thiserror::Error;

/// Errors surfaced by the batch face-crop pipeline.
///
/// The per-file variants (`Decode`, `Detection`, `Write`) carry the offending
/// filename and are captured into the batch report rather than aborting the
/// run; the remaining variants prevent a run from starting at all.
#[derive(Debug, Error)]
pub enum FaceCropError {
    /// A file could not be parsed as an image.
    #[error("failed to decode {file}: {reason}")]
    Decode {
        /// Name of the file that failed to decode.
        file: String,
        /// Decoder message.
        reason: String,
    },

    /// The face detection backend reported an internal error.
    #[error("face detection failed on {file}: {reason}")]
    Detection {
        /// Name of the file the detector choked on.
        file: String,
        /// Backend message.
        reason: String,
    },

    /// A cropped output could not be encoded or written.
    #[error("failed to write crop for {file}: {reason}")]
    Write {
        /// Name of the source file whose crop failed to persist.
        file: String,
        /// Encoder or filesystem message.
        reason: String,
    },

    /// The input directory could not be listed.
    #[error("failed to read input directory {path}: {reason}")]
    InputDir {
        /// Directory that was being scanned.
        path: String,
        /// Filesystem message.
        reason: String,
    },

    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {reason}")]
    OutputDir {
        /// Directory that was being created.
        path: String,
        /// Filesystem message.
        reason: String,
    },

    /// A stage's worker pool could not be built.
    #[error("failed to start worker pool: {0}")]
    WorkerPool(String),

    /// The configured worker count is zero.
    #[error("worker count must be at least 1")]
    InvalidWorkerCount,

    /// The built-in detector's model file could not be loaded.
    #[cfg(feature = "rustface")]
    #[error("failed to load detection model {path}: {reason}")]
    Model {
        /// Path the model was loaded from.
        path: String,
        /// Loader message.
        reason: String,
    },
}
