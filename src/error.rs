//! Error types for the emoji-background-removal crate.

/// Errors that can occur while loading, editing, or saving images.
///
/// The flood fill itself never fails; these come from the grid accessors and
/// the file layer around it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A pixel accessor was called with a coordinate outside the grid.
    #[error("pixel ({x}, {y}) out of range for {width}x{height} grid")]
    OutOfBounds {
        /// Requested column.
        x: u32,
        /// Requested row.
        y: u32,
        /// Grid width in pixels.
        width: u32,
        /// Grid height in pixels.
        height: u32,
    },

    /// A coordinate set was applied to a grid of a different size.
    #[error("coordinate set is {set_width}x{set_height} but grid is {grid_width}x{grid_height}")]
    DimensionMismatch {
        /// Grid width in pixels.
        grid_width: u32,
        /// Grid height in pixels.
        grid_height: u32,
        /// Coordinate set width.
        set_width: u32,
        /// Coordinate set height.
        set_height: u32,
    },

    /// A resize target had a zero side.
    #[error("invalid target size {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The output format is unknown or cannot store an alpha channel.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// An error occurred while decoding or encoding an image.
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let io_err = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io_err.to_string().contains("gone"));

        let unsupported = Error::UnsupportedFormat("Jpeg".to_string());
        assert!(unsupported.to_string().contains("Jpeg"));

        let oob = Error::OutOfBounds {
            x: 12,
            y: 3,
            width: 10,
            height: 20,
        };
        let msg = oob.to_string();
        assert!(msg.contains("(12, 3)"));
        assert!(msg.contains("10x20"));

        let mismatch = Error::DimensionMismatch {
            grid_width: 8,
            grid_height: 8,
            set_width: 4,
            set_height: 2,
        };
        assert_eq!(
            mismatch.to_string(),
            "coordinate set is 4x2 but grid is 8x8"
        );

        let invalid = Error::InvalidDimensions {
            width: 0,
            height: 100,
        };
        assert!(invalid.to_string().contains("0x100"));
    }
}
