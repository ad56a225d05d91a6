//! Mapping from cells to world-space placement.
//!
//! The engine itself never uses world coordinates; they are exposed so that a
//! rendering layer can place gems and effects without duplicating the grid
//! geometry.

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldPoint {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
    /// Depth component.
    pub z: f32,
}

impl WorldPoint {
    /// The world origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a point from its components.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Placement of the board in world space: cell size and the origin of cell
/// `(0, 0)`'s lower-left corner.
///
/// # Examples
///
/// ```
/// use gemcascade_core::{Layout, Position, WorldPoint};
///
/// let layout = Layout::new(2.0, WorldPoint::new(10.0, 0.0, 0.0));
/// let center = layout.world_center(Position::new(1, 2));
/// assert_eq!(center, WorldPoint::new(13.0, 5.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    cell_size: f32,
    origin: WorldPoint,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(1.0, WorldPoint::ZERO)
    }
}

impl Layout {
    /// Creates a layout.
    #[must_use]
    pub const fn new(cell_size: f32, origin: WorldPoint) -> Self {
        Self { cell_size, origin }
    }

    /// Returns the edge length of a cell.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Returns the origin of the board.
    #[must_use]
    pub const fn origin(&self) -> WorldPoint {
        self.origin
    }

    /// Returns the world-space center of the cell at `pos`.
    ///
    /// This is a pure function of the layout; positions outside the board map
    /// to points outside the board.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn world_center(&self, pos: crate::Position) -> WorldPoint {
        let half = self.cell_size * 0.5;
        WorldPoint {
            x: self.origin.x + pos.x() as f32 * self.cell_size + half,
            y: self.origin.y + pos.y() as f32 * self.cell_size + half,
            z: self.origin.z,
        }
    }
}
