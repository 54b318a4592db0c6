use std::fs;
use std::path::Path;

use image::RgbImage;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::color::{self, PreparedImage};
use crate::crop::{self, CropRect};
use crate::error::FaceCropError;
use crate::face_detector::FaceDetector;
use crate::PipelineConfig;

/// Extensions accepted by [`discover_inputs`], matched case-insensitively.
const INPUT_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Per-file outcomes of one batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files whose crop was written, in batch order.
    pub written: Vec<String>,
    /// Files where no face was found: no output, not an error.
    pub skipped: Vec<String>,
    /// Files that failed, paired with the error that skipped them.
    pub failed: Vec<(String, FaceCropError)>,
}

/// Runs the batch: prepare all images in parallel, detect and select in
/// parallel, then write every crop sequentially.
///
/// Every unit of work carries its filename through each stage, so results
/// can never be re-paired by completion position. Per-file failures are
/// collected into the [`BatchReport`]; only run-level problems (bad worker
/// count, unusable directories, pool construction) abort the run.
pub struct BatchCropper {
    config: PipelineConfig,
    detector: Box<dyn FaceDetector>,
}

impl BatchCropper {
    /// Create a coordinator from an immutable config and a detector backend.
    pub fn new(config: PipelineConfig, detector: Box<dyn FaceDetector>) -> Self {
        Self { config, detector }
    }

    /// Process `filenames` (bare names, resolved against the configured
    /// input directory) and write crops into the output directory as
    /// `cropped_<name>`, encoded per the name's extension.
    pub fn run(&self, filenames: &[String]) -> Result<BatchReport, FaceCropError> {
        if self.config.workers == 0 {
            return Err(FaceCropError::InvalidWorkerCount);
        }
        fs::create_dir_all(&self.config.output_dir).map_err(|e| FaceCropError::OutputDir {
            path: self.config.output_dir.display().to_string(),
            reason: e.to_string(),
        })?;

        info!(
            files = filenames.len(),
            workers = self.config.workers,
            "starting batch"
        );
        let mut report = BatchReport::default();

        // Stage A: decode every file and build its channel-order pair.
        // The pool lives for this stage only; collect is the barrier.
        let prepared: Vec<(String, Result<PreparedImage, FaceCropError>)> = {
            let pool = worker_pool(self.config.workers)?;
            let input_dir = &self.config.input_dir;
            pool.install(|| {
                filenames
                    .par_iter()
                    .map(|name| {
                        info!(file = %name, "preparing image");
                        let path = input_dir.join(name);
                        (name.clone(), color::load_prepared(&path, name))
                    })
                    .collect()
            })
        };

        let mut ready: Vec<(String, PreparedImage)> = Vec::with_capacity(prepared.len());
        for (name, result) in prepared {
            match result {
                Ok(pair) => ready.push((name, pair)),
                Err(err) => {
                    warn!("{err}");
                    report.failed.push((name, err));
                }
            }
        }

        // Stage B: detect faces and select the crop, one self-contained unit
        // per file. Detector errors stay inside their unit as values.
        type Detected = (String, Result<(RgbImage, Option<CropRect>), FaceCropError>);
        let detected: Vec<Detected> = {
            let pool = worker_pool(self.config.workers)?;
            let detector = self.detector.as_ref();
            let padding = self.config.padding;
            pool.install(|| {
                ready
                    .into_par_iter()
                    .map(|(name, pair)| {
                        debug!(file = %name, "detecting faces");
                        let (width, height) = (pair.width(), pair.height());
                        let outcome = match detector.detect(&pair.detector_order, width, height) {
                            Ok(candidates) => {
                                let rect = crop::select_crop(&candidates, padding, width, height);
                                Ok((pair.native, rect))
                            }
                            Err(err) => Err(FaceCropError::Detection {
                                file: name.clone(),
                                reason: err.to_string(),
                            }),
                        };
                        (name, outcome)
                    })
                    .collect()
            })
        };

        // Stage C: sequential write-out. A failed write is fatal for that
        // file only; earlier outputs stay on disk.
        for (name, outcome) in detected {
            match outcome {
                Ok((native, Some(rect))) => {
                    let out_name = format!("cropped_{name}");
                    let out_path = self.config.output_dir.join(&out_name);
                    let cropped = crop::apply(&rect, &native);
                    match cropped.save(&out_path) {
                        Ok(()) => {
                            info!(file = %name, output = %out_name, "wrote crop");
                            report.written.push(name);
                        }
                        Err(e) => {
                            let err = FaceCropError::Write {
                                file: name.clone(),
                                reason: e.to_string(),
                            };
                            warn!("{err}");
                            report.failed.push((name, err));
                        }
                    }
                }
                Ok((_, None)) => {
                    debug!(file = %name, "no face found");
                    report.skipped.push(name);
                }
                Err(err) => {
                    warn!("{err}");
                    report.failed.push((name, err));
                }
            }
        }

        info!(
            written = report.written.len(),
            no_face = report.skipped.len(),
            failed = report.failed.len(),
            "batch finished"
        );
        Ok(report)
    }
}

/// List the image files directly inside `dir`, sorted by name.
///
/// Keeps regular files with a `jpg`, `jpeg`, or `png` extension in any case,
/// and returns bare filenames for [`BatchCropper::run`] to resolve. Entries
/// that are not files, have other extensions, or carry non-UTF-8 names are
/// skipped (the last with a warning).
pub fn discover_inputs(dir: &Path) -> Result<Vec<String>, FaceCropError> {
    let entries = fs::read_dir(dir).map_err(|e| FaceCropError::InputDir {
        path: dir.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| FaceCropError::InputDir {
            path: dir.display().to_string(),
            reason: e.to_string(),
        })?;
        let file_type = entry.file_type().map_err(|e| FaceCropError::InputDir {
            path: dir.display().to_string(),
            reason: e.to_string(),
        })?;
        if !file_type.is_file() {
            continue;
        }
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(other) => {
                warn!("skipping non-UTF-8 filename {:?}", other);
                continue;
            }
        };
        if has_accepted_extension(&name) {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

fn has_accepted_extension(name: &str) -> bool {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some(ext) => INPUT_EXTENSIONS.contains(&ext),
        None => false,
    }
}

fn worker_pool(workers: usize) -> Result<rayon::ThreadPool, FaceCropError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| FaceCropError::WorkerPool(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_extensions_are_case_insensitive() {
        for name in ["a.jpg", "b.JPG", "c.jpeg", "d.JPEG", "e.png", "f.PNG", "g.JpEg"] {
            assert!(has_accepted_extension(name), "{name} should be accepted");
        }
    }

    #[test]
    fn other_extensions_are_rejected() {
        for name in ["a.txt", "b.bmp", "noext", "png", "archive.png.zip"] {
            assert!(!has_accepted_extension(name), "{name} should be rejected");
        }
    }
}
