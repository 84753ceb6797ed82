use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
	Soil,
	Top,
	Lava,
	Sky,
	Boulder,
	Empty,
	Platinum,
	Emerald,
	Diamond,
	Amazonite,
}

/// Catalog row for a tile kind: (value, haul, asset key).
struct CatalogEntry {
	value: u32,
	haul: u32,
	asset: Option<&'static str>,
}

impl TileKind {
	pub const ALL: [TileKind; 10] = [
		TileKind::Soil,
		TileKind::Top,
		TileKind::Lava,
		TileKind::Sky,
		TileKind::Boulder,
		TileKind::Empty,
		TileKind::Platinum,
		TileKind::Emerald,
		TileKind::Diamond,
		TileKind::Amazonite,
	];

	pub const VALUABLES: [TileKind; 4] = [
		TileKind::Diamond,
		TileKind::Emerald,
		TileKind::Amazonite,
		TileKind::Platinum,
	];

	const fn entry(self) -> CatalogEntry {
		match self {
			TileKind::Soil => CatalogEntry { value: 0, haul: 0, asset: Some("underground/soil_01.png") },
			TileKind::Top => CatalogEntry { value: 0, haul: 0, asset: Some("underground/top_02.png") },
			TileKind::Lava => CatalogEntry { value: 0, haul: 0, asset: Some("underground/lava_01.png") },
			// Sky is drawn as a flat fill.
			TileKind::Sky => CatalogEntry { value: 0, haul: 0, asset: None },
			TileKind::Boulder => CatalogEntry { value: 0, haul: 0, asset: Some("underground/obstacle_01.png") },
			TileKind::Empty => CatalogEntry { value: 0, haul: 0, asset: Some("underground/empty_15.png") },
			TileKind::Platinum => CatalogEntry { value: 750, haul: 30, asset: Some("underground/valuable_platinum.png") },
			TileKind::Emerald => CatalogEntry { value: 5_000, haul: 60, asset: Some("underground/valuable_emerald.png") },
			TileKind::Diamond => CatalogEntry { value: 100_000, haul: 100, asset: Some("underground/valuable_diamond.png") },
			TileKind::Amazonite => CatalogEntry { value: 500_000, haul: 120, asset: Some("underground/valuable_amazonite.png") },
		}
	}

	pub const fn value(self) -> u32 {
		self.entry().value
	}

	pub const fn haul(self) -> u32 {
		self.entry().haul
	}

	pub const fn asset_key(self) -> Option<&'static str> {
		self.entry().asset
	}

	/// Sky and Empty can be flown or fallen through.
	pub fn is_passable(self) -> bool {
		matches!(self, TileKind::Sky | TileKind::Empty)
	}

	pub fn is_valuable(self) -> bool {
		matches!(
			self,
			TileKind::Platinum | TileKind::Emerald | TileKind::Diamond | TileKind::Amazonite
		)
	}

	/// Whether the drill can clear this tile. Lava and Boulder never are.
	pub fn is_diggable(self) -> bool {
		!self.is_passable() && !matches!(self, TileKind::Lava | TileKind::Boulder)
	}
}

/// A grid cell. Cells are replaced wholesale, never edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
	kind: TileKind,
	value: u32,
	haul: u32,
}

impl Tile {
	pub const fn new(kind: TileKind) -> Self {
		Self { kind, value: kind.value(), haul: kind.haul() }
	}

	pub const fn kind(&self) -> TileKind {
		self.kind
	}

	pub const fn value(&self) -> u32 {
		self.value
	}

	pub const fn haul(&self) -> u32 {
		self.haul
	}
}

impl From<TileKind> for Tile {
	fn from(kind: TileKind) -> Self {
		Tile::new(kind)
	}
}
