use log::debug;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coords::GridCoord;
use crate::grid::Grid;
use crate::tile::{Tile, TileKind};

/// Rows `0..SKY_ROWS` are sky; the row right after is the grass top.
pub const SKY_ROWS: i32 = 4;
pub const TOP_ROW: i32 = SKY_ROWS;

const SOIL_SHARE: f64 = 0.80;

/// Placed once each before the random remainder.
const GUARANTEED: [TileKind; 5] = [
    TileKind::Lava,
    TileKind::Diamond,
    TileKind::Emerald,
    TileKind::Amazonite,
    TileKind::Platinum,
];

const FILLER: [TileKind; 6] = [
    TileKind::Diamond,
    TileKind::Emerald,
    TileKind::Amazonite,
    TileKind::Platinum,
    TileKind::Lava,
    TileKind::Soil,
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Grid {width}x{height} is below the minimum playable size")]
    TooSmall { width: i32, height: i32 },
    #[error("Block pool of {pool} cannot fill {slots} interior slots")]
    PoolTooSmall { pool: usize, slots: usize },
}

/// How many tiles go into the shuffled block pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolSizing {
    /// `(height - 1) * (width - 6)`, the fixed formula of the 20x13 layout.
    /// Surplus tiles are discarded after the shuffle.
    Reference,
    /// Exactly the number of interior slots, so every guaranteed tile lands in the grid.
    #[default]
    Interior,
}

impl PoolSizing {
    pub fn pool_size(self, width: i32, height: i32) -> usize {
        match self {
            PoolSizing::Reference => span(height, 1).saturating_mul(span(width, 6)),
            PoolSizing::Interior => interior_slots(width, height),
        }
    }
}

/// Cells below the top row and inside the boulder ring.
pub fn interior_slots(width: i32, height: i32) -> usize {
    span(height, SKY_ROWS + 2).saturating_mul(span(width, 2))
}

/// `side - fixed`, clamped at zero.
fn span(side: i32, fixed: i32) -> usize {
    side.saturating_sub(fixed).max(0) as usize
}

pub fn is_playable(width: i32, height: i32) -> bool {
    width >= 3 && height >= SKY_ROWS + 3 && interior_slots(width, height) >= GUARANTEED.len()
}

/// Builds the shuffled block pool: mostly soil, one of each guaranteed kind,
/// then uniform draws over the filler kinds.
pub fn generate_pool<R: Rng + ?Sized>(total: usize, rng: &mut R) -> Result<Vec<TileKind>, GridError> {
    if total < GUARANTEED.len() {
        return Err(GridError::PoolTooSmall {
            pool: total,
            slots: GUARANTEED.len(),
        });
    }
    let soil = ((total as f64 * SOIL_SHARE) as usize).min(total - GUARANTEED.len());
    let mut pool = Vec::with_capacity(total);
    pool.extend(std::iter::repeat(TileKind::Soil).take(soil));
    pool.extend(GUARANTEED);
    while pool.len() < total {
        pool.push(FILLER[rng.gen_range(0..FILLER.len())]);
    }
    pool.shuffle(rng);
    Ok(pool)
}

pub fn generate_grid<R: Rng + ?Sized>(
    width: i32,
    height: i32,
    sizing: PoolSizing,
    rng: &mut R,
) -> Result<Grid, GridError> {
    if !is_playable(width, height) {
        return Err(GridError::TooSmall { width, height });
    }
    let slots = interior_slots(width, height);
    let pool = generate_pool(sizing.pool_size(width, height), rng)?;
    if pool.len() < slots {
        return Err(GridError::PoolTooSmall {
            pool: pool.len(),
            slots,
        });
    }

    let mut grid = Grid::new(width, height, TileKind::Sky);
    let mut blocks = pool.iter().copied();
    for y in 0..height {
        for x in 0..width {
            let kind = if y < SKY_ROWS {
                TileKind::Sky
            } else if y == TOP_ROW {
                TileKind::Top
            } else if x == 0 || x == width - 1 || y == height - 1 {
                TileKind::Boulder
            } else {
                blocks.next().unwrap_or(TileKind::Soil)
            };
            grid.replace(GridCoord::new(x, y), Tile::new(kind));
        }
    }
    debug!(
        "generated {}x{} grid from a pool of {} ({} lava, {} valuables placed)",
        width,
        height,
        pool.len(),
        grid.count(TileKind::Lava),
        TileKind::VALUABLES.iter().map(|k| grid.count(*k)).sum::<usize>()
    );
    Ok(grid)
}

/// One-shot startup generation with an OS-seeded rng.
pub fn initialize(width: i32, height: i32) -> Result<Grid, GridError> {
    generate_grid(width, height, PoolSizing::default(), &mut rand::thread_rng())
}

pub fn from_seed(width: i32, height: i32, sizing: PoolSizing, seed: u64) -> Result<Grid, GridError> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_grid(width, height, sizing, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_structure(g: &Grid) {
        let (w, h) = (g.width(), g.height());
        for y in 0..h {
            for x in 0..w {
                let k = g.kind_at(GridCoord::new(x, y)).unwrap();
                if y < SKY_ROWS {
                    assert_eq!(k, TileKind::Sky, "({x},{y})");
                } else if y == TOP_ROW {
                    assert_eq!(k, TileKind::Top, "({x},{y})");
                } else if x == 0 || x == w - 1 || y == h - 1 {
                    assert_eq!(k, TileKind::Boulder, "({x},{y})");
                } else {
                    assert!(
                        matches!(k, TileKind::Soil | TileKind::Lava) || k.is_valuable(),
                        "unexpected interior {k:?} at ({x},{y})"
                    );
                }
            }
        }
    }

    #[test]
    fn structure_holds_for_many_sizes_and_seeds() {
        for (w, h) in [(20, 13), (3, 11), (7, 7), (12, 20), (40, 10)] {
            for seed in 0..8 {
                let g = from_seed(w, h, PoolSizing::Interior, seed).unwrap();
                assert_structure(&g);
            }
        }
        for seed in 0..8 {
            assert_structure(&from_seed(20, 13, PoolSizing::Reference, seed).unwrap());
        }
    }

    #[test]
    fn pool_always_holds_each_guaranteed_kind() {
        let mut rng = StdRng::seed_from_u64(7);
        for total in [5, 6, 20, 126, 168] {
            let pool = generate_pool(total, &mut rng).unwrap();
            assert_eq!(pool.len(), total);
            for k in GUARANTEED {
                assert!(pool.contains(&k), "{k:?} missing from pool of {total}");
            }
        }
    }

    #[test]
    fn soil_is_the_majority() {
        let mut rng = StdRng::seed_from_u64(1);
        let pool = generate_pool(168, &mut rng).unwrap();
        let soil = pool.iter().filter(|k| **k == TileKind::Soil).count();
        assert!(soil >= 134);
    }

    #[test]
    fn interior_sizing_places_guaranteed_tiles() {
        for seed in 0..16 {
            let g = from_seed(20, 13, PoolSizing::Interior, seed).unwrap();
            assert!(g.count(TileKind::Lava) >= 1);
            for k in TileKind::VALUABLES {
                assert!(g.count(k) >= 1, "seed {seed}: {k:?} missing");
            }
        }
    }

    #[test]
    fn reference_formula_sizes() {
        assert_eq!(PoolSizing::Reference.pool_size(20, 13), 168);
        assert_eq!(PoolSizing::Interior.pool_size(20, 13), 126);
    }

    #[test]
    fn pool_sizes_saturate_on_extreme_dimensions() {
        assert_eq!(PoolSizing::Reference.pool_size(i32::MIN, i32::MIN), 0);
        assert_eq!(PoolSizing::Interior.pool_size(i32::MIN, 13), 0);
        assert!(PoolSizing::Reference.pool_size(i32::MAX, i32::MAX) > 0);
        assert!(PoolSizing::Interior.pool_size(i32::MAX, i32::MAX) > 0);
        assert!(!is_playable(i32::MIN, i32::MIN));
    }

    #[test]
    fn reference_pool_too_small_for_narrow_grid() {
        let err = from_seed(7, 13, PoolSizing::Reference, 0).unwrap_err();
        assert_eq!(err, GridError::PoolTooSmall { pool: 12, slots: 35 });
    }

    #[test]
    fn rejects_unplayable_sizes() {
        assert_eq!(
            from_seed(2, 13, PoolSizing::Interior, 0).unwrap_err(),
            GridError::TooSmall { width: 2, height: 13 }
        );
        assert!(from_seed(20, 6, PoolSizing::Interior, 0).is_err());
        assert!(!is_playable(3, 7));
        assert!(is_playable(7, 7));
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = from_seed(20, 13, PoolSizing::Interior, 42).unwrap();
        let b = from_seed(20, 13, PoolSizing::Interior, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn initialize_builds_reference_grid() {
        let g = initialize(20, 13).unwrap();
        assert_eq!((g.width(), g.height()), (20, 13));
        assert_structure(&g);
    }
}
