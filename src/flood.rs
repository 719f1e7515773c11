//! Corner-seeded flood fill over near-white pixels.
//!
//! The fill starts at the four image corners and spreads through
//! 8-connected pixels accepted by a [`WhiteClassifier`]. It never passes a
//! non-white pixel, so white regions enclosed by an outline (eye whites,
//! highlights) are left alone while the outer background is collected.
//!
//! Memory and time are both `O(width * height)`. That is fine for emoji-sized
//! rasters; very large images cost a few bytes per pixel for the bookkeeping.

use std::collections::VecDeque;

use crate::classify::WhiteClassifier;
use crate::grid::PixelGrid;

/// Horizontal, vertical and diagonal neighbor offsets.
const NEIGHBORS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A set of grid coordinates, stored as a dense bitmask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordSet {
    width: u32,
    height: u32,
    bits: Vec<bool>,
    len: usize,
}

/// Coordinates already dequeued during a fill.
pub type VisitedSet = CoordSet;

/// Coordinates whose pixel was classified as background.
pub type RemovalSet = CoordSet;

impl CoordSet {
    /// An empty set sized for a `width` x `height` grid.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width as usize * height as usize],
            len: 0,
        }
    }

    /// Dimensions of the grid this set was built for.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `(x, y)` is a member. Out-of-range coordinates never are.
    #[must_use]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[self.index(x, y)]
    }

    /// Add `(x, y)`; returns `false` if it was already present.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the set's dimensions.
    pub fn insert(&mut self, x: u32, y: u32) -> bool {
        assert!(
            x < self.width && y < self.height,
            "({x}, {y}) outside {}x{} coordinate set",
            self.width,
            self.height
        );
        let idx = self.index(x, y);
        if self.bits[idx] {
            return false;
        }
        self.bits[idx] = true;
        self.len += 1;
        true
    }

    /// Members in row-major order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width as usize;
        self.bits
            .iter()
            .enumerate()
            .filter(|&(_, &set)| set)
            .map(move |(i, _)| ((i % width) as u32, (i / width) as u32))
    }

    /// Whether every member of `self` is also in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &CoordSet) -> bool {
        self.iter().all(|(x, y)| other.contains(x, y))
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// The four corners in fill order: top-left, top-right, bottom-left,
/// bottom-right. Empty when either side is zero.
#[must_use]
pub fn corner_seeds(width: u32, height: u32) -> Vec<(i64, i64)> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let right = i64::from(width) - 1;
    let bottom = i64::from(height) - 1;
    vec![(0, 0), (right, 0), (0, bottom), (right, bottom)]
}

/// Bookkeeping for one fill, shared by every seed walk of that fill.
struct FillState {
    visited: VisitedSet,
    removal: RemovalSet,
}

/// Outcome of a corner flood fill over one grid.
#[derive(Debug, Clone)]
pub struct FloodFill {
    visited: VisitedSet,
    removal: RemovalSet,
}

impl FloodFill {
    /// Run the fill from all four corners of `grid`.
    #[must_use]
    pub fn run(grid: &PixelGrid, classifier: &WhiteClassifier) -> Self {
        let (width, height) = grid.dimensions();
        let mut state = FillState {
            visited: CoordSet::new(width, height),
            removal: CoordSet::new(width, height),
        };

        for seed in corner_seeds(width, height) {
            walk(grid, classifier, seed, &mut state);
        }

        Self {
            visited: state.visited,
            removal: state.removal,
        }
    }

    /// Every coordinate the fill examined.
    #[must_use]
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Coordinates reachable from a corner through background pixels.
    #[must_use]
    pub fn removal(&self) -> &RemovalSet {
        &self.removal
    }

    /// Discard the visited set and keep the removal set.
    #[must_use]
    pub fn into_removal_set(self) -> RemovalSet {
        self.removal
    }
}

/// Compute the set of outer-background pixels of `grid`.
#[must_use]
pub fn compute_removal_set(grid: &PixelGrid, classifier: &WhiteClassifier) -> RemovalSet {
    FloodFill::run(grid, classifier).into_removal_set()
}

/// Breadth-first walk from one seed. Neighbors go on the queue unchecked;
/// range and duplicates are filtered when they come off it.
fn walk(
    grid: &PixelGrid,
    classifier: &WhiteClassifier,
    seed: (i64, i64),
    state: &mut FillState,
) {
    let mut queue = VecDeque::from([seed]);

    while let Some((sx, sy)) = queue.pop_front() {
        let Some((x, y)) = grid.resolve(sx, sy) else {
            continue;
        };
        if !state.visited.insert(x, y) {
            continue;
        }
        let Ok(pixel) = grid.get(x, y) else {
            continue;
        };
        if !classifier.is_background_white(pixel) {
            continue;
        }

        state.removal.insert(x, y);
        queue.extend(NEIGHBORS.iter().map(|&(dx, dy)| (sx + dx, sy + dy)));
    }
}
