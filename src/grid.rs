use crate::coords::GridCoord;
use crate::tile::{Tile, TileKind};

/// Fixed-size rectangular tile container, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Grid {
    pub fn new(width: i32, height: i32, fill: TileKind) -> Self {
        let size = (width.max(0) as usize) * (height.max(0) as usize);
        Self {
            width,
            height,
            tiles: vec![Tile::new(fill); size],
        }
    }

    /// Builds a grid from rows of kinds. Rows must all share the first row's width.
    pub fn from_rows(rows: &[Vec<TileKind>]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }
        let tiles = rows.iter().flatten().map(|k| Tile::new(*k)).collect();
        Some(Self {
            width: width as i32,
            height: height as i32,
            tiles,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, c: GridCoord) -> bool {
        self.index(c).is_some()
    }

    fn index(&self, c: GridCoord) -> Option<usize> {
        if c.x < 0 || c.y < 0 || c.x >= self.width || c.y >= self.height {
            return None;
        }
        Some((c.y * self.width + c.x) as usize)
    }

    pub fn get(&self, c: GridCoord) -> Option<Tile> {
        self.index(c).map(|i| self.tiles[i])
    }

    pub fn kind_at(&self, c: GridCoord) -> Option<TileKind> {
        self.get(c).map(|t| t.kind())
    }

    /// Swaps in `tile` and hands back the previous occupant.
    /// Out-of-bounds coordinates leave the grid untouched and return `None`.
    pub fn replace(&mut self, c: GridCoord, tile: Tile) -> Option<Tile> {
        let i = self.index(c)?;
        Some(std::mem::replace(&mut self.tiles[i], tile))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width.max(1) as usize)
    }

    /// Kind per cell, row-major, for renderers.
    pub fn snapshot(&self) -> Vec<Vec<TileKind>> {
        self.rows()
            .map(|row| row.iter().map(Tile::kind).collect())
            .collect()
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|t| t.kind() == kind).count()
    }
}
