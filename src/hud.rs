use crate::engine::Engine;
use crate::resources::ResourceTracker;

pub fn format_fuel(fuel: f64) -> String {
	format!("Fuel: {:.2}", fuel)
}

/// Status lines in display order: fuel, haul, money, flying.
pub fn format_hud(engine: &Engine) -> Vec<String> {
	let r = &engine.resources;
	vec![
		format_fuel(r.fuel()),
		format!("Haul: {}", r.haul),
		format!("Money: {}", r.money),
		format!("Flying: {}", if engine.driller.is_flying { "ON" } else { "OFF" }),
	]
}

/// Banner for the end screen, or `None` while the run is live.
pub fn game_over_message(resources: &ResourceTracker) -> Option<String> {
	resources.game_over_cause()?;
	match resources.final_score() {
		Some(score) => Some(format!("GAME OVER\nScore: {}", score)),
		None => Some("GAME OVER".to_string()),
	}
}
