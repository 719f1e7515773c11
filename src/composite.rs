//! Writing a removal set back into a grid.

use image::Rgba;

use crate::error::{Error, Result};
use crate::flood::RemovalSet;
use crate::grid::PixelGrid;

/// The value written to every removed pixel.
///
/// RGB is normalized to white rather than keeping the original color, so
/// consumers that ignore alpha still see a white background.
pub const TRANSPARENT_WHITE: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Make every pixel in `removal` fully transparent, in place.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if `removal` was computed for a grid
/// of a different size.
pub fn apply(grid: &mut PixelGrid, removal: &RemovalSet) -> Result<()> {
    let (grid_width, grid_height) = grid.dimensions();
    let (set_width, set_height) = removal.dimensions();
    if (grid_width, grid_height) != (set_width, set_height) {
        return Err(Error::DimensionMismatch {
            grid_width,
            grid_height,
            set_width,
            set_height,
        });
    }

    for (x, y) in removal.iter() {
        grid.set(x, y, TRANSPARENT_WHITE)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flood::CoordSet;

    #[test]
    fn marked_pixels_become_transparent_white() {
        let mut grid = PixelGrid::filled(3, 3, Rgba([250, 244, 255, 255]));
        let mut removal = CoordSet::new(3, 3);
        removal.insert(0, 0);
        removal.insert(2, 1);

        apply(&mut grid, &removal).unwrap();

        assert_eq!(grid.get(0, 0).unwrap(), TRANSPARENT_WHITE);
        assert_eq!(grid.get(2, 1).unwrap(), TRANSPARENT_WHITE);
        assert_eq!(grid.get(1, 1).unwrap(), Rgba([250, 244, 255, 255]));
    }

    #[test]
    fn empty_set_leaves_grid_untouched() {
        let mut grid = PixelGrid::filled(4, 2, Rgba([9, 9, 9, 255]));
        let before = grid.clone();
        apply(&mut grid, &CoordSet::new(4, 2)).unwrap();
        assert_eq!(grid, before);
    }

    #[test]
    fn mismatched_set_is_rejected() {
        let mut grid = PixelGrid::new(4, 4);
        let err = apply(&mut grid, &CoordSet::new(4, 5)).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                grid_width: 4,
                grid_height: 4,
                set_width: 4,
                set_height: 5
            }
        ));
    }
}
