use log::{debug, warn};
use rand::Rng;
use thiserror::Error;

use crate::config::{ConfigError, GameConfig};
use crate::coords::{Direction, GridCoord};
use crate::driller::{Driller, DrillerPose};
use crate::generator::{self, GridError};
use crate::grid::Grid;
use crate::resources::{GameOverCause, ResourceTracker};
use crate::tile::{Tile, TileKind};

#[derive(Debug, Error)]
pub enum EngineError {
	#[error(transparent)]
	Config(#[from] ConfigError),
	#[error(transparent)]
	Grid(#[from] GridError),
	#[error("Spawn ({x}, {y}) is outside the {width}x{height} grid")]
	SpawnOutOfBounds { x: i32, y: i32, width: i32, height: i32 },
}

/// What a movement command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
	/// Game already over; nothing changed.
	Ignored,
	/// No movement, no fuel charged.
	Rejected,
	Moved,
	Dug(TileKind),
	/// Boulder in the way; dig fuel still charged.
	Blocked,
	/// Drove into lava.
	Consumed,
	/// The dig charge emptied the tank before the move completed.
	OutOfFuel,
}

/// Owns the grid, the driller and the resource tracker, and applies every
/// command and tick to them atomically.
#[derive(Debug, Clone)]
pub struct Engine {
	pub grid: Grid,
	pub driller: Driller,
	pub resources: ResourceTracker,
	config: GameConfig,
}

impl Engine {
	/// Wraps a prebuilt grid. The grid's own size wins over the configured
	/// dimensions, but the spawn must lie inside it.
	pub fn new(grid: Grid, config: GameConfig) -> Result<Self, EngineError> {
		config.validate_tuning()?;
		if !grid.in_bounds(config.spawn) {
			return Err(EngineError::SpawnOutOfBounds {
				x: config.spawn.x,
				y: config.spawn.y,
				width: grid.width(),
				height: grid.height(),
			});
		}
		let driller = Driller::new(config.spawn);
		let resources = ResourceTracker::new(config.initial_fuel);
		Ok(Self { grid, driller, resources, config })
	}

	pub fn generate<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self, EngineError> {
		config.validate()?;
		let grid = generator::generate_grid(config.grid_width, config.grid_height, config.pool_sizing, rng)?;
		Self::new(grid, config)
	}

	pub fn from_seed(config: GameConfig, seed: u64) -> Result<Self, EngineError> {
		config.validate()?;
		let grid = generator::from_seed(config.grid_width, config.grid_height, config.pool_sizing, seed)?;
		Self::new(grid, config)
	}

	pub fn config(&self) -> &GameConfig {
		&self.config
	}

	pub fn is_game_over(&self) -> bool {
		self.resources.is_game_over()
	}

	pub fn step(&mut self, dir: Direction) -> MoveOutcome {
		match dir {
			Direction::Up => self.move_up(),
			Direction::Down => self.move_down(),
			Direction::Left => self.move_left(),
			Direction::Right => self.move_right(),
		}
	}

	/// Thrust upward. Never digs.
	pub fn move_up(&mut self) -> MoveOutcome {
		if self.is_game_over() {
			return MoveOutcome::Ignored;
		}
		self.driller.is_flying = true;
		self.driller.pose = DrillerPose::Flying;
		let target = self.driller.pos.above();
		match self.grid.kind_at(target) {
			Some(kind) if kind.is_passable() => {
				self.driller.pos = target;
				MoveOutcome::Moved
			}
			_ => MoveOutcome::Rejected,
		}
	}

	pub fn move_down(&mut self) -> MoveOutcome {
		if self.is_game_over() {
			return MoveOutcome::Ignored;
		}
		self.driller.is_flying = false;
		let target = self.driller.pos.below();
		let Some(tile) = self.grid.get(target) else {
			return MoveOutcome::Rejected;
		};
		self.driller.pose = DrillerPose::Down;
		match tile.kind() {
			TileKind::Boulder => self.blocked(target),
			TileKind::Lava => self.consume(),
			kind if kind.is_passable() => {
				self.driller.pos = target;
				MoveOutcome::Moved
			}
			_ => self.dig(target, tile),
		}
	}

	pub fn move_left(&mut self) -> MoveOutcome {
		self.move_lateral(Direction::Left)
	}

	pub fn move_right(&mut self) -> MoveOutcome {
		self.move_lateral(Direction::Right)
	}

	fn move_lateral(&mut self, dir: Direction) -> MoveOutcome {
		if self.is_game_over() {
			return MoveOutcome::Ignored;
		}
		self.driller.is_flying = false;
		let here = self.driller.pos;
		let target = here.step(dir);
		let Some(tile) = self.grid.get(target) else {
			return MoveOutcome::Rejected;
		};
		let facing = if dir == Direction::Left { DrillerPose::Left } else { DrillerPose::Right };

		match tile.kind() {
			TileKind::Boulder => {
				self.driller.pose = facing;
				self.blocked(target)
			}
			TileKind::Lava => {
				self.driller.pose = facing;
				self.consume()
			}
			kind if self.is_suspended(here) && kind != TileKind::Empty => {
				// Hanging in a shaft it dug: no sideways digging.
				self.driller.pose = DrillerPose::Flying;
				MoveOutcome::Rejected
			}
			kind if kind.is_passable() => {
				let lands = self
					.grid
					.kind_at(target.below())
					.map_or(true, |below| !below.is_passable());
				self.driller.pose = if lands { facing } else { DrillerPose::Flying };
				self.driller.pos = target;
				MoveOutcome::Moved
			}
			_ => {
				self.driller.pose = facing;
				self.dig(target, tile)
			}
		}
	}

	fn is_suspended(&self, c: GridCoord) -> bool {
		self.grid.kind_at(c) == Some(TileKind::Empty) && self.grid.kind_at(c.below()) == Some(TileKind::Empty)
	}

	fn charge_dig(&mut self) {
		let level = self.resources.fuel() - self.config.dig_fuel_cost;
		self.resources.set_fuel(level);
	}

	fn blocked(&mut self, target: GridCoord) -> MoveOutcome {
		debug!("dig blocked by boulder at ({}, {})", target.x, target.y);
		self.charge_dig();
		MoveOutcome::Blocked
	}

	fn consume(&mut self) -> MoveOutcome {
		let here = self.driller.pos;
		warn!("driller hit lava next to ({}, {})", here.x, here.y);
		self.grid.replace(here, Tile::new(TileKind::Lava));
		self.resources.trigger_game_over(GameOverCause::Lava);
		MoveOutcome::Consumed
	}

	fn dig(&mut self, target: GridCoord, tile: Tile) -> MoveOutcome {
		self.charge_dig();
		if self.is_game_over() {
			return MoveOutcome::OutOfFuel;
		}
		self.grid.replace(target, Tile::new(TileKind::Empty));
		self.resources.apply_dig(tile);
		self.driller.pos = target;
		debug!(
			"dug {:?} at ({}, {}); fuel {:.2}",
			tile.kind(),
			target.x,
			target.y,
			self.resources.fuel()
		);
		MoveOutcome::Dug(tile.kind())
	}

	/// Free fall by one cell when grounded over Sky or Empty. Returns whether it fell.
	pub fn on_gravity_tick(&mut self) -> bool {
		if self.is_game_over() || self.driller.is_flying {
			return false;
		}
		let below = self.driller.pos.below();
		if self.grid.kind_at(below).is_some_and(TileKind::is_passable) {
			self.driller.pos = below;
			self.driller.pose = DrillerPose::Falling;
			return true;
		}
		false
	}

	/// Passive drain; may latch `FuelExhausted`.
	pub fn on_fuel_tick(&mut self) {
		if self.is_game_over() {
			return;
		}
		let rate = if self.driller.is_flying {
			self.config.fuel_drain_flying
		} else {
			self.config.fuel_drain
		};
		self.resources.set_fuel(self.resources.fuel() - rate);
	}
}
