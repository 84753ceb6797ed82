use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn above(self) -> Self {
        self.step(Direction::Up)
    }

    pub fn below(self) -> Self {
        self.step(Direction::Down)
    }
}

/// Screen-space directions; `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_moves_one_cell() {
        let c = GridCoord::new(3, 5);
        assert_eq!(c.step(Direction::Up), GridCoord::new(3, 4));
        assert_eq!(c.step(Direction::Down), GridCoord::new(3, 6));
        assert_eq!(c.step(Direction::Left), GridCoord::new(2, 5));
        assert_eq!(c.step(Direction::Right), GridCoord::new(4, 5));
    }

    #[test]
    fn above_below() {
        let c = GridCoord::new(0, 0);
        assert_eq!(c.above(), GridCoord::new(0, -1));
        assert_eq!(c.below().below(), GridCoord::new(0, 2));
    }
}
