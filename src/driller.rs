use serde::{Deserialize, Serialize};

use crate::coords::GridCoord;

/// Visual state for renderers. The engine never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrillerPose {
	Flying,
	Falling,
	Down,
	Left,
	Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driller {
	pub pos: GridCoord,
	pub is_flying: bool,
	pub pose: DrillerPose,
}

impl Driller {
	pub fn new(pos: GridCoord) -> Self {
		Self { pos, is_flying: false, pose: DrillerPose::Flying }
	}
}
