use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin, EguiPrimaryContextPass};
use drillforge::{
	Direction, DrillerPose, Engine, GameConfig, GameOverCause, Grid, GridCoord, TickDriver, TileKind,
	format_hud, game_over_message,
};
use log::{error, info, warn};

// ---------- Constants ----------
const TILE_SIZE: f32 = 50.0;
const CONFIG_ENV: &str = "DRILLFORGE_CONFIG";

// ---------- Components ----------
#[derive(Component)]
struct TilePos {
	x: i32,
	y: i32,
}

#[derive(Component)]
struct DrillerSprite;

// ---------- Resources ----------
#[derive(Resource)]
struct GameEngine {
	engine: Engine,
	ticks: TickDriver,
}

impl GameEngine {
	fn new(engine: Engine) -> Self {
		let ticks = TickDriver::for_engine(&engine);
		Self { engine, ticks }
	}
}

// ---------- Entry ----------
fn main() {
	env_logger::init();

	let config = load_config();
	let engine = match Engine::generate(config, &mut rand::thread_rng()) {
		Ok(engine) => engine,
		Err(e) => {
			error!("could not start the game: {}", e);
			return;
		}
	};
	info!(
		"starting {}x{} run with {:.2} fuel",
		engine.grid.width(),
		engine.grid.height(),
		engine.resources.fuel()
	);
	let (w, h) = (engine.grid.width() as u32, engine.grid.height() as u32);

	App::new()
		.add_plugins(DefaultPlugins.set(WindowPlugin {
			primary_window: Some(Window {
				title: "Drillforge".to_string(),
				resolution: (w * TILE_SIZE as u32, h * TILE_SIZE as u32).into(),
				resizable: false,
				..Default::default()
			}),
			..Default::default()
		}))
		.add_plugins(EguiPlugin::default())
		.insert_resource(ClearColor(Color::srgb(0.75, 0.49, 0.24)))
		.insert_resource(GameEngine::new(engine))
		.add_systems(Startup, (setup_camera, build_tiles))
		.add_systems(
			Update,
			(
				handle_keys,
				drive_ticks,
				update_tile_colors_from_grid,
				update_driller_sprite,
			)
				.chain(),
		)
		.add_systems(EguiPrimaryContextPass, draw_ui)
		.run();
}

fn load_config() -> GameConfig {
	let Ok(path) = std::env::var(CONFIG_ENV) else {
		return GameConfig::default();
	};
	match GameConfig::load(&path) {
		Ok(config) => config,
		Err(e) => {
			warn!("ignoring {} ({}): {}", CONFIG_ENV, path, e);
			GameConfig::default()
		}
	}
}

// ---------- Setup ----------
fn setup_camera(mut commands: Commands, eng: Res<GameEngine>) {
	let center_x = eng.engine.grid.width() as f32 * TILE_SIZE * 0.5;
	let center_y = eng.engine.grid.height() as f32 * TILE_SIZE * 0.5;
	commands.spawn((Camera2d, Transform::from_xyz(center_x, center_y, 1000.0)));
}

// ---------- Utilities ----------
fn tile_color_for_kind(k: TileKind) -> Color {
	match k {
		TileKind::Sky => Color::srgb(0.53, 0.81, 0.92),
		TileKind::Top => Color::srgb(0.35, 0.6, 0.2),
		TileKind::Soil => Color::srgb(0.55, 0.36, 0.2),
		TileKind::Empty => Color::srgb(0.3, 0.2, 0.12),
		TileKind::Boulder => Color::srgb(0.4, 0.4, 0.42),
		TileKind::Lava => Color::srgb(0.9, 0.25, 0.05),
		TileKind::Platinum => Color::srgb(0.85, 0.85, 0.9),
		TileKind::Emerald => Color::srgb(0.1, 0.75, 0.35),
		TileKind::Diamond => Color::srgb(0.7, 0.95, 1.0),
		TileKind::Amazonite => Color::srgb(0.3, 0.8, 0.75),
	}
}

fn driller_color_for_pose(p: DrillerPose) -> Color {
	match p {
		DrillerPose::Flying => Color::srgb(1.0, 0.85, 0.1),
		DrillerPose::Falling => Color::srgb(0.85, 0.7, 0.1),
		DrillerPose::Down | DrillerPose::Left | DrillerPose::Right => Color::srgb(0.95, 0.55, 0.1),
	}
}

// Grid rows grow downward, bevy's y grows upward.
fn cell_to_world(grid: &Grid, c: GridCoord, z: f32) -> Vec3 {
	Vec3::new(
		c.x as f32 * TILE_SIZE + TILE_SIZE * 0.5,
		(grid.height() - 1 - c.y) as f32 * TILE_SIZE + TILE_SIZE * 0.5,
		z,
	)
}

// ---------- Systems: Grid Rendering ----------
fn build_tiles(mut commands: Commands, eng: Res<GameEngine>) {
	let grid = &eng.engine.grid;
	for y in 0..grid.height() {
		for x in 0..grid.width() {
			let k = grid.kind_at(GridCoord::new(x, y)).unwrap_or(TileKind::Empty);
			commands.spawn((
				Sprite::from_color(tile_color_for_kind(k), Vec2::new(TILE_SIZE, TILE_SIZE)),
				Transform::from_translation(cell_to_world(grid, GridCoord::new(x, y), 0.0)),
				Visibility::Visible,
				TilePos { x, y },
			));
		}
	}
	let d = &eng.engine.driller;
	commands.spawn((
		Sprite::from_color(driller_color_for_pose(d.pose), Vec2::new(TILE_SIZE * 0.7, TILE_SIZE * 0.7)),
		Transform::from_translation(cell_to_world(grid, d.pos, 5.0)),
		Visibility::Visible,
		DrillerSprite,
	));
}

fn update_tile_colors_from_grid(eng: Res<GameEngine>, mut q: Query<(&TilePos, &mut Sprite)>) {
	if !eng.is_changed() {
		return;
	}
	for (pos, mut sprite) in &mut q {
		if let Some(k) = eng.engine.grid.kind_at(GridCoord::new(pos.x, pos.y)) {
			sprite.color = tile_color_for_kind(k);
		}
	}
}

fn update_driller_sprite(
	eng: Res<GameEngine>,
	mut q: Query<(&mut Transform, &mut Sprite, &mut Visibility), With<DrillerSprite>>,
) {
	let Ok((mut transform, mut sprite, mut visibility)) = q.single_mut() else {
		return;
	};
	let d = &eng.engine.driller;
	transform.translation = cell_to_world(&eng.engine.grid, d.pos, 5.0);
	sprite.color = driller_color_for_pose(d.pose);
	if eng.engine.resources.game_over_cause() == Some(GameOverCause::Lava) {
		*visibility = Visibility::Hidden;
	}
}

// ---------- Systems: Input / Ticks ----------
fn handle_keys(keys: Res<ButtonInput<KeyCode>>, mut eng: ResMut<GameEngine>) {
	for (key, dir) in [
		(KeyCode::ArrowUp, Direction::Up),
		(KeyCode::ArrowDown, Direction::Down),
		(KeyCode::ArrowLeft, Direction::Left),
		(KeyCode::ArrowRight, Direction::Right),
	] {
		if keys.just_pressed(key) {
			eng.engine.step(dir);
		}
	}
}

fn drive_ticks(time: Res<Time>, mut eng: ResMut<GameEngine>) {
	let GameEngine { engine, ticks } = &mut *eng;
	if ticks.is_stopped() {
		return;
	}
	ticks.advance(time.delta(), engine);
}

// ---------- Systems: UI ----------
fn draw_ui(mut egui_ctx: EguiContexts, eng: Res<GameEngine>) {
	let Ok(ctx) = egui_ctx.ctx_mut() else {
		return;
	};

	egui::Area::new("hud".into()).fixed_pos(egui::pos2(10.0, 10.0)).show(&*ctx, |ui_area| {
		for line in format_hud(&eng.engine) {
			ui_area.label(egui::RichText::new(line).color(egui::Color32::BLACK));
		}
	});

	if let Some(message) = game_over_message(&eng.engine.resources) {
		let fill = match eng.engine.resources.game_over_cause() {
			Some(GameOverCause::Lava) => egui::Color32::from_rgb(0x88, 0x10, 0x10),
			_ => egui::Color32::from_rgb(0x10, 0x80, 0x10),
		};
		egui::CentralPanel::default()
			.frame(egui::Frame::NONE.fill(fill))
			.show(&*ctx, |ui_center| {
				ui_center.centered_and_justified(|ui_text| {
					ui_text.label(egui::RichText::new(message).size(50.0).color(egui::Color32::WHITE));
				});
			});
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use bevy::prelude::{MinimalPlugins, TransformPlugin};

	fn test_engine() -> Engine {
		let mut grid = Grid::new(4, 8, TileKind::Sky);
		for x in 0..4 {
			grid.replace(GridCoord::new(x, 2), TileKind::Soil.into());
			grid.replace(GridCoord::new(x, 7), TileKind::Boulder.into());
		}
		Engine::new(grid, GameConfig::default()).unwrap()
	}

	#[test]
	fn spawns_one_sprite_per_cell_and_a_driller() {
		let mut app = App::new();
		app.add_plugins((MinimalPlugins, TransformPlugin));
		app.insert_resource(GameEngine::new(test_engine()));
		app.add_systems(Startup, build_tiles);
		app.update();

		let world = app.world_mut();
		let mut tile_query = world.query::<&TilePos>();
		assert_eq!(tile_query.iter(world).count(), 32);
		let mut driller_query = world.query::<&DrillerSprite>();
		let drillers = driller_query.iter(world).count();
		assert_eq!(drillers, 1);
	}

	#[test]
	fn arrow_key_digs_and_recolors_tile() {
		let mut app = App::new();
		app.add_plugins((MinimalPlugins, TransformPlugin));
		app.insert_resource(GameEngine::new(test_engine()));
		let mut keys = ButtonInput::<KeyCode>::default();
		keys.press(KeyCode::ArrowDown);
		app.insert_resource(keys);
		app.add_systems(Startup, build_tiles);
		app.add_systems(Update, (handle_keys, update_tile_colors_from_grid).chain());
		app.update();

		let eng = app.world().resource::<GameEngine>();
		assert_eq!(eng.engine.driller.pos, GridCoord::new(1, 2));
		assert_eq!(eng.engine.grid.kind_at(GridCoord::new(1, 2)), Some(TileKind::Empty));

		let world = app.world_mut();
		let mut sprites = world.query::<(&TilePos, &Sprite)>();
		let dug = sprites
			.iter(world)
			.find(|(p, _)| p.x == 1 && p.y == 2)
			.map(|(_, s)| s.color);
		assert_eq!(dug, Some(tile_color_for_kind(TileKind::Empty)));
	}
}
