//! Bounds-checked RGBA pixel grid.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};

use crate::error::{Error, Result};

/// A 4-channel, 8-bit image addressed by `(x, y)`.
///
/// Every grid is RGBA regardless of how the source was encoded; conversion
/// happens once, at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    image: RgbaImage,
}

impl PixelGrid {
    /// Create a `width` x `height` grid of fully transparent black pixels.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Create a grid filled with a single pixel value.
    #[must_use]
    pub fn filled(width: u32, height: u32, pixel: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, pixel),
        }
    }

    /// Decode an image file and convert it to RGBA.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Image`] if the file cannot be read or decoded.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::from_image(&image::open(path)?))
    }

    /// Convert any decoded image to an RGBA grid.
    #[must_use]
    pub fn from_image(image: &DynamicImage) -> Self {
        Self {
            image: image.to_rgba8(),
        }
    }

    /// Grid width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Grid height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// `(width, height)`.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Read the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the coordinate lies outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Result<Rgba<u8>> {
        self.image
            .get_pixel_checked(x, y)
            .copied()
            .ok_or_else(|| self.out_of_bounds(x, y))
    }

    /// Overwrite the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the coordinate lies outside the grid.
    pub fn set(&mut self, x: u32, y: u32, pixel: Rgba<u8>) -> Result<()> {
        let (width, height) = self.dimensions();
        match self.image.get_pixel_mut_checked(x, y) {
            Some(slot) => {
                *slot = pixel;
                Ok(())
            }
            None => Err(Error::OutOfBounds {
                x,
                y,
                width,
                height,
            }),
        }
    }

    /// Map a signed coordinate onto the grid.
    ///
    /// Returns `None` for anything outside `[0, width) x [0, height)`,
    /// including negative values.
    #[must_use]
    pub fn resolve(&self, x: i64, y: i64) -> Option<(u32, u32)> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        (x < self.width() && y < self.height()).then_some((x, y))
    }

    /// Resample to `width` x `height` with the given filter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either target side is zero.
    pub fn resize(&self, width: u32, height: u32, filter: FilterType) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self {
            image: imageops::resize(&self.image, width, height, filter),
        })
    }

    /// Borrow the underlying image buffer.
    #[must_use]
    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consume the grid and return the underlying image buffer.
    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn out_of_bounds(&self, x: u32, y: u32) -> Error {
        Error::OutOfBounds {
            x,
            y,
            width: self.width(),
            height: self.height(),
        }
    }
}

impl From<RgbaImage> for PixelGrid {
    fn from(image: RgbaImage) -> Self {
        Self { image }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn get_and_set_round_trip_in_bounds() {
        let mut grid = PixelGrid::new(4, 3);
        grid.set(3, 2, Rgba([1, 2, 3, 4])).unwrap();
        assert_eq!(grid.get(3, 2).unwrap(), Rgba([1, 2, 3, 4]));
        assert_eq!(grid.get(0, 0).unwrap(), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn accessors_reject_out_of_range() {
        let mut grid = PixelGrid::new(4, 3);
        assert!(matches!(
            grid.get(4, 0),
            Err(Error::OutOfBounds {
                x: 4,
                y: 0,
                width: 4,
                height: 3
            })
        ));
        assert!(matches!(
            grid.set(0, 3, Rgba([0, 0, 0, 0])),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn resolve_rejects_negative_and_overflowing_coords() {
        let grid = PixelGrid::new(5, 5);
        assert_eq!(grid.resolve(0, 0), Some((0, 0)));
        assert_eq!(grid.resolve(4, 4), Some((4, 4)));
        assert_eq!(grid.resolve(-1, 0), None);
        assert_eq!(grid.resolve(0, -1), None);
        assert_eq!(grid.resolve(5, 0), None);
        assert_eq!(grid.resolve(0, 5), None);
        assert_eq!(grid.resolve(i64::MAX, 0), None);
    }

    #[test]
    fn resolve_on_empty_grid_is_always_none() {
        let grid = PixelGrid::new(0, 7);
        assert_eq!(grid.resolve(0, 0), None);
    }

    #[test]
    fn from_image_converts_to_rgba() {
        let rgb = RgbImage::from_pixel(2, 2, image::Rgb([10, 20, 30]));
        let grid = PixelGrid::from_image(&DynamicImage::ImageRgb8(rgb));
        assert_eq!(grid.get(1, 1).unwrap(), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn resize_produces_requested_dimensions() {
        let grid = PixelGrid::filled(37, 12, Rgba([255, 255, 255, 0]));
        let resized = grid.resize(100, 100, FilterType::Lanczos3).unwrap();
        assert_eq!(resized.dimensions(), (100, 100));
    }

    #[test]
    fn resize_rejects_zero_target() {
        let grid = PixelGrid::new(4, 4);
        assert!(matches!(
            grid.resize(0, 10, FilterType::Nearest),
            Err(Error::InvalidDimensions {
                width: 0,
                height: 10
            })
        ));
    }
}
