//! Clear the outer white background of emoji-style images.
//!
//! A flood fill seeded at the four image corners walks through 8-connected
//! near-white pixels and marks them transparent. Because the fill stops at
//! the first non-white pixel, white areas enclosed by an outline (eye whites,
//! teeth, highlights) stay opaque.
//!
//! # Quick Start
//!
//! ```no_run
//! use emoji_background_removal::{BackgroundRemover, PixelGrid};
//!
//! let remover = BackgroundRemover::default();
//! let mut grid = PixelGrid::open("smile.png".as_ref()).unwrap();
//! let cleared = remover.remove(&mut grid).unwrap();
//! println!("{cleared} background pixels cleared");
//! ```
//!
//! # Step by step
//!
//! The pipeline is also available as separate pieces: classify, fill, composite.
//!
//! ```
//! use emoji_background_removal::{composite, flood, PixelGrid, WhiteClassifier};
//! use image::Rgba;
//!
//! let mut grid = PixelGrid::filled(8, 8, Rgba([255, 255, 255, 255]));
//! let removal = flood::compute_removal_set(&grid, &WhiteClassifier::default());
//! assert_eq!(removal.len(), 64);
//!
//! composite::apply(&mut grid, &removal).unwrap();
//! assert_eq!(grid.get(3, 3).unwrap(), composite::TRANSPARENT_WHITE);
//! ```

#![deny(missing_docs)]

pub mod classify;
pub mod composite;
mod engine;
pub mod error;
pub mod flood;
mod grid;

pub use classify::{is_background_white, WhiteClassifier, DEFAULT_THRESHOLD};
pub use engine::{
    batch_output_path, default_output_path, is_supported_image, save_image, BackgroundRemover,
    ProcessOptions, ProcessResult, DEFAULT_TARGET_SIZE,
};
pub use error::{Error, Result};
pub use flood::{compute_removal_set, CoordSet, FloodFill, RemovalSet, VisitedSet};
pub use grid::PixelGrid;
