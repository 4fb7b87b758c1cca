//! Fixed-size tile grid.

use super::Position;

/// Terrain of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum TileKind {
    Floor,
    Wall,
}

impl TileKind {
    pub fn is_passable(self) -> bool {
        matches!(self, TileKind::Floor)
    }
}

/// Rectangular tile map stored row-major.
///
/// # Invariants
///
/// - `tiles.len() == width * height`
/// - every border cell is a wall once the grid has been generated
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<TileKind>,
}

impl Grid {
    /// Creates a grid filled with a single tile kind.
    pub fn filled(width: u32, height: u32, tile: TileKind) -> Self {
        Self {
            width,
            height,
            tiles: vec![tile; (width as usize) * (height as usize)],
        }
    }

    /// Creates an open room: walls on the border, floor everywhere else.
    pub fn walled(width: u32, height: u32) -> Self {
        Self::generate(width, height, |_| false)
    }

    /// Builds a grid whose border is walled and whose interior cells are
    /// walls wherever `is_wall` returns true.
    ///
    /// `is_wall` is called once per interior cell in row-major order, which
    /// keeps generation reproducible for a given random stream.
    pub fn generate(width: u32, height: u32, mut is_wall: impl FnMut(Position) -> bool) -> Self {
        let mut grid = Self::filled(width, height, TileKind::Floor);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let position = Position::new(x, y);
                let wall = grid.is_border(position) || is_wall(position);
                if wall {
                    grid.set(position, TileKind::Wall);
                }
            }
        }
        grid
    }

    /// Reassembles a grid from raw parts, returning `None` when the tile count
    /// does not match the dimensions.
    pub fn from_tiles(width: u32, height: u32, tiles: Vec<TileKind>) -> Option<Self> {
        if tiles.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            tiles,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    pub fn is_border(&self, position: Position) -> bool {
        self.contains(position)
            && (position.x == 0
                || position.y == 0
                || position.x == self.width as i32 - 1
                || position.y == self.height as i32 - 1)
    }

    pub fn tile(&self, position: Position) -> Option<TileKind> {
        self.index(position)
            .and_then(|index| self.tiles.get(index).copied())
    }

    /// In bounds and not a wall.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.tile(position).is_some_and(TileKind::is_passable)
    }

    /// Overwrites a tile. Out-of-bounds positions are ignored.
    pub fn set(&mut self, position: Position, tile: TileKind) {
        if let Some(slot) = self
            .index(position)
            .and_then(|index| self.tiles.get_mut(index))
        {
            *slot = tile;
        }
    }

    /// Returns true when every border cell is a wall.
    pub fn has_walled_border(&self) -> bool {
        self.positions()
            .filter(|position| self.is_border(*position))
            .all(|position| self.tile(position) == Some(TileKind::Wall))
    }

    /// Iterates all positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        Some(position.y as usize * self.width as usize + position.x as usize)
    }
}
