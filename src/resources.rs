use log::info;
use serde::{Deserialize, Serialize};

use crate::tile::Tile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    Lava,
    FuelExhausted,
}

/// Money, haul, fuel and the game-over latch. Once latched, nothing here changes again.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceTracker {
    pub money: u64,
    pub haul: u64,
    fuel: f64,
    game_over: Option<GameOverCause>,
}

impl ResourceTracker {
    pub fn new(initial_fuel: f64) -> Self {
        Self {
            money: 0,
            haul: 0,
            fuel: initial_fuel,
            game_over: None,
        }
    }

    pub fn fuel(&self) -> f64 {
        self.fuel
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over.is_some()
    }

    pub fn game_over_cause(&self) -> Option<GameOverCause> {
        self.game_over
    }

    /// Credits a dug tile. Only valuables contribute.
    pub fn apply_dig(&mut self, tile: Tile) {
        if self.is_game_over() || !tile.kind().is_valuable() {
            return;
        }
        self.money = self.money.saturating_add(u64::from(tile.value()));
        self.haul = self.haul.saturating_add(u64::from(tile.haul()));
    }

    /// Stores the new fuel level, latching `FuelExhausted` at or below zero.
    pub fn set_fuel(&mut self, level: f64) {
        if self.is_game_over() {
            return;
        }
        self.fuel = level;
        if level <= 0.0 {
            self.trigger_game_over(GameOverCause::FuelExhausted);
        }
    }

    /// Latches game-over. Later calls keep the first cause.
    pub fn trigger_game_over(&mut self, cause: GameOverCause) {
        if self.game_over.is_some() {
            return;
        }
        info!("game over: {:?} (money {}, haul {})", cause, self.money, self.haul);
        self.game_over = Some(cause);
    }

    /// Score shown on the game-over screen. A lava death shows none.
    pub fn final_score(&self) -> Option<u64> {
        match self.game_over {
            Some(GameOverCause::FuelExhausted) => Some(self.money),
            _ => None,
        }
    }
}
