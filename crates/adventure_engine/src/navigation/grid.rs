//! Ground-plane grid used for path search

use crate::foundation::math::Vec3;

/// Steps to the eight neighbours of a cell, in search order
///
/// Orthogonal steps come first (N, E, S, W with N towards -z), then the
/// diagonals NE, SE, SW, NW. The order decides which of several equally
/// good routes a search settles on.
pub const NEIGHBOR_STEPS: [(i32, i32); 8] = [
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (1, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
];

/// Integer cell on the xz plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCell {
    /// Column along x
    pub x: i32,
    /// Row along z
    pub z: i32,
}

impl GridCell {
    /// Create a cell from its indices
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Cell containing a world position; height is ignored
    pub fn containing(position: Vec3, cell_size: f32) -> Self {
        Self {
            x: (position.x / cell_size).floor() as i32,
            z: (position.z / cell_size).floor() as i32,
        }
    }

    /// World position of the cell's center at the given height
    pub fn center(self, cell_size: f32, height: f32) -> Vec3 {
        let half = cell_size * 0.5;
        Vec3::new(
            self.x as f32 * cell_size + half,
            height,
            self.z as f32 * cell_size + half,
        )
    }

    /// Cell offset by `(dx, dz)`, saturating at the edge of the grid
    #[must_use]
    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.z.saturating_add(dz))
    }

    /// The eight surrounding cells in [`NEIGHBOR_STEPS`] order
    pub fn neighbors(self) -> impl Iterator<Item = GridCell> {
        NEIGHBOR_STEPS.into_iter().map(move |(dx, dz)| self.offset(dx, dz))
    }

    /// Taxicab distance in cells
    pub fn manhattan(self, other: GridCell) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.z.abs_diff(other.z))
    }

    /// King-move distance in cells
    pub fn chebyshev(self, other: GridCell) -> u32 {
        self.x.abs_diff(other.x).max(self.z.abs_diff(other.z))
    }

    /// Cells exactly `radius` king moves away
    ///
    /// Yields by column from `-radius` to `radius`, each column from low z to
    /// high z. Radius 0 yields only this cell.
    pub fn ring(self, radius: u32) -> impl Iterator<Item = GridCell> {
        let r = radius as i32;
        (-r..=r).flat_map(move |dx| {
            (-r..=r)
                .filter(move |dz| dx.abs() == r || dz.abs() == r)
                .map(move |dz| self.offset(dx, dz))
        })
    }
}
