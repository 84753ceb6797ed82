pub mod config;
pub mod coords;
pub mod driller;
pub mod engine;
pub mod generator;
pub mod grid;
pub mod hud;
pub mod resources;
pub mod ticker;
pub mod tile;

// Re-exports for convenience in tests and integration users.
pub use config::{ConfigError, GameConfig};
pub use coords::{Direction, GridCoord};
pub use driller::{Driller, DrillerPose};
pub use engine::{Engine, EngineError, MoveOutcome};
pub use generator::{GridError, PoolSizing, initialize};
pub use grid::Grid;
pub use hud::{format_hud, game_over_message};
pub use resources::{GameOverCause, ResourceTracker};
pub use ticker::{TickDriver, TickReport, Ticker};
pub use tile::{Tile, TileKind};
