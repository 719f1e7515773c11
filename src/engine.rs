//! Per-file and batch processing around the flood fill.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::ImageFormat;

use crate::classify::{WhiteClassifier, DEFAULT_THRESHOLD};
use crate::composite;
use crate::error::{Error, Result};
use crate::flood;
use crate::grid::PixelGrid;

/// Output side length used for custom emoji and sticker thumbnails.
pub const DEFAULT_TARGET_SIZE: u32 = 100;

/// Options controlling how each image is processed.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Channel threshold for background classification.
    pub threshold: u8,
    /// Final `(width, height)`, or `None` to keep the source size.
    pub target_size: Option<(u32, u32)>,
    /// Resampling filter used when resizing.
    pub filter: FilterType,
    /// Clear the outer background. When false the image is only converted
    /// to RGBA and resized.
    pub remove_background: bool,
    /// Enable verbose logging.
    pub verbose: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            target_size: Some((DEFAULT_TARGET_SIZE, DEFAULT_TARGET_SIZE)),
            filter: FilterType::Lanczos3,
            remove_background: true,
            verbose: false,
            quiet: false,
        }
    }
}

/// Result of processing a single image file.
#[derive(Debug)]
pub struct ProcessResult {
    /// Path of the input file.
    pub path: PathBuf,
    /// Path the output was (or would have been) written to.
    pub output: PathBuf,
    /// Whether processing succeeded.
    pub success: bool,
    /// Source dimensions, `(0, 0)` if the file never decoded.
    pub dimensions: (u32, u32),
    /// Number of source pixels made transparent.
    pub removed: usize,
    /// Human-readable status message.
    pub message: String,
}

impl ProcessResult {
    fn pending(input: &Path, output: &Path) -> Self {
        Self {
            path: input.to_path_buf(),
            output: output.to_path_buf(),
            success: false,
            dimensions: (0, 0),
            removed: 0,
            message: String::new(),
        }
    }

    fn failed(input: &Path, output: &Path, message: String) -> Self {
        Self {
            message,
            ..Self::pending(input, output)
        }
    }
}

/// Clears outer white backgrounds and prepares images for export.
///
/// Holds no per-image state, so one instance can serve a whole batch across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct BackgroundRemover {
    opts: ProcessOptions,
}

impl BackgroundRemover {
    /// Create a remover with the given options.
    #[must_use]
    pub fn new(opts: ProcessOptions) -> Self {
        Self { opts }
    }

    /// The options this remover was built with.
    #[must_use]
    pub fn options(&self) -> &ProcessOptions {
        &self.opts
    }

    /// The classifier derived from the configured threshold.
    #[must_use]
    pub fn classifier(&self) -> WhiteClassifier {
        WhiteClassifier::new(self.opts.threshold)
    }

    /// Clear the outer background of `grid` in place.
    ///
    /// Returns the number of pixels made transparent.
    ///
    /// # Errors
    ///
    /// Does not fail in practice; the removal set always matches the grid it
    /// was computed from.
    pub fn remove(&self, grid: &mut PixelGrid) -> Result<usize> {
        let removal = flood::compute_removal_set(grid, &self.classifier());
        composite::apply(grid, &removal)?;
        Ok(removal.len())
    }

    /// Run the full in-memory pipeline: clear (if enabled), then resize.
    ///
    /// Returns the output grid and the number of pixels cleared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for a zero-sided target size.
    pub fn process_grid(&self, mut grid: PixelGrid) -> Result<(PixelGrid, usize)> {
        let removed = if self.opts.remove_background {
            self.remove(&mut grid)?
        } else {
            0
        };

        let grid = match self.opts.target_size {
            Some((w, h)) => grid.resize(w, h, self.opts.filter)?,
            None => grid,
        };

        Ok((grid, removed))
    }

    /// Process a single image file: load, clear, resize, save.
    ///
    /// Never fails outright; errors are reported in the returned
    /// [`ProcessResult`] so batches can continue.
    #[must_use]
    pub fn process_file(&self, input: &Path, output: &Path) -> ProcessResult {
        let mut result = ProcessResult::pending(input, output);

        let grid = match PixelGrid::open(input) {
            Ok(grid) => grid,
            Err(e) => {
                result.message = format!("Failed to load: {e}");
                return result;
            }
        };
        result.dimensions = grid.dimensions();

        let grid = match self.process_grid(grid) {
            Ok((grid, removed)) => {
                result.removed = removed;
                grid
            }
            Err(e) => {
                result.message = format!("Failed to process: {e}");
                return result;
            }
        };

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    result.message = format!("Failed to create output directory: {e}");
                    return result;
                }
            }
        }

        match save_image(&grid, output) {
            Ok(()) => {
                result.success = true;
                result.message = if self.opts.remove_background {
                    format!("{} px cleared", result.removed)
                } else {
                    "Resized".to_string()
                };
            }
            Err(e) => {
                result.message = format!("Failed to save: {e}");
            }
        }

        result
    }

    /// Process all supported images in a directory, writing `{stem}.png`
    /// files into `output_dir`.
    ///
    /// Uses parallel iteration when the `cli` feature is enabled (via rayon).
    /// Results come back sorted by input path. Inputs whose output name
    /// collides with an earlier input (`a.jpg` and `a.png`) are reported as
    /// failures instead of overwriting each other.
    #[must_use]
    pub fn process_directory(&self, input_dir: &Path, output_dir: &Path) -> Vec<ProcessResult> {
        let mut inputs: Vec<PathBuf> = match std::fs::read_dir(input_dir) {
            Ok(rd) => rd
                .filter_map(std::result::Result::ok)
                .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
                .map(|e| e.path())
                .filter(|p| is_supported_image(p))
                .collect(),
            Err(e) => {
                return vec![ProcessResult::failed(
                    input_dir,
                    output_dir,
                    format!("Failed to read directory: {e}"),
                )];
            }
        };
        inputs.sort();

        if !output_dir.exists() {
            if let Err(e) = std::fs::create_dir_all(output_dir) {
                return vec![ProcessResult::failed(
                    output_dir,
                    output_dir,
                    format!("Failed to create output directory: {e}"),
                )];
            }
        }

        let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
        let jobs: Vec<(&Path, PathBuf, Option<&Path>)> = inputs
            .iter()
            .map(|input| {
                let output = batch_output_path(output_dir, input);
                let earlier = claimed.get(&output).copied();
                if earlier.is_none() {
                    claimed.insert(output.clone(), input.as_path());
                }
                (input.as_path(), output, earlier)
            })
            .collect();

        let run = |(input, output, earlier): &(&Path, PathBuf, Option<&Path>)| match earlier {
            Some(first) => ProcessResult::failed(
                input,
                output,
                format!("Output {} already claimed by {}", output.display(), first.display()),
            ),
            None => self.process_file(input, output),
        };

        #[cfg(feature = "cli")]
        {
            use rayon::prelude::*;
            jobs.par_iter().map(run).collect()
        }

        #[cfg(not(feature = "cli"))]
        {
            jobs.iter().map(run).collect()
        }
    }
}

/// Check if a file has a supported input image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(
            ext.to_lowercase().as_str(),
            "jpg" | "jpeg" | "png" | "webp" | "bmp"
        ),
        None => false,
    }
}

/// Save an RGBA grid, keeping its alpha channel.
///
/// The format is chosen from the extension: PNG, WebP, BMP and TIFF are
/// accepted.
///
/// # Errors
///
/// Returns [`Error::UnsupportedFormat`] for unknown extensions and for formats
/// that cannot store alpha (such as JPEG), or an encoding/I/O error.
pub fn save_image(grid: &PixelGrid, path: &Path) -> Result<()> {
    let format =
        ImageFormat::from_path(path).map_err(|e| Error::UnsupportedFormat(e.to_string()))?;

    match format {
        ImageFormat::Png | ImageFormat::WebP | ImageFormat::Bmp | ImageFormat::Tiff => {
            grid.as_image().save_with_format(path, format)?;
        }
        _ => {
            return Err(Error::UnsupportedFormat(format!(
                "{format:?} cannot store an alpha channel"
            )));
        }
    }

    Ok(())
}

/// Generate a default output path from an input path.
///
/// Example: `"smile.jpg"` becomes `"smile_transparent.png"`.
#[must_use]
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let parent = input.parent().unwrap_or(Path::new("."));
    parent.join(format!("{stem}_transparent.png"))
}

/// Output path for `input` inside a batch output directory: `{stem}.png`.
#[must_use]
pub fn batch_output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    output_dir.join(format!("{stem}.png"))
}
