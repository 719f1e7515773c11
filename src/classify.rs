//! Near-white pixel classification.

use image::Rgba;

/// Default channel threshold: a channel must exceed this to count as white.
pub const DEFAULT_THRESHOLD: u8 = 240;

/// Returns `true` if red, green and blue all exceed `threshold`.
///
/// Alpha is ignored, so an already-cleared pixel (`255, 255, 255, 0`) still
/// classifies as background.
#[must_use]
pub fn is_background_white(pixel: Rgba<u8>, threshold: u8) -> bool {
    let [r, g, b, _] = pixel.0;
    r > threshold && g > threshold && b > threshold
}

/// Predicate deciding which pixels the flood fill may pass through.
///
/// A higher threshold is stricter (less is cleared); a lower one is more
/// aggressive and may eat faint-white detail inside the subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhiteClassifier {
    /// Per-channel threshold, exclusive.
    pub threshold: u8,
}

impl WhiteClassifier {
    /// Create a classifier with the given threshold.
    #[must_use]
    pub const fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    /// Classify a single pixel.
    #[must_use]
    pub fn is_background_white(&self, pixel: Rgba<u8>) -> bool {
        is_background_white(pixel, self.threshold)
    }
}

impl Default for WhiteClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        let c = WhiteClassifier::default();
        assert!(!c.is_background_white(Rgba([240, 240, 240, 255])));
        assert!(c.is_background_white(Rgba([241, 241, 241, 255])));
        assert!(c.is_background_white(Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn every_channel_must_pass() {
        let c = WhiteClassifier::default();
        assert!(!c.is_background_white(Rgba([255, 255, 200, 255])));
        assert!(!c.is_background_white(Rgba([255, 100, 255, 255])));
        assert!(!c.is_background_white(Rgba([0, 255, 255, 255])));
    }

    #[test]
    fn alpha_is_ignored() {
        let c = WhiteClassifier::default();
        assert!(c.is_background_white(Rgba([255, 255, 255, 0])));
        assert!(!c.is_background_white(Rgba([0, 0, 0, 0])));
    }

    #[test]
    fn lower_threshold_accepts_more() {
        let grey = Rgba([200, 210, 220, 255]);
        assert!(!WhiteClassifier::new(240).is_background_white(grey));
        assert!(WhiteClassifier::new(199).is_background_white(grey));
        // Nothing exceeds 255.
        assert!(!WhiteClassifier::new(255).is_background_white(Rgba([255, 255, 255, 255])));
    }
}
