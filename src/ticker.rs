use std::time::Duration;

use log::info;

use crate::engine::Engine;

/// Fixed-interval timer fed with elapsed time. Once stopped it never fires again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticker {
    interval: Duration,
    elapsed: Duration,
    stopped: bool,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
            stopped: false,
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Accumulates `dt` and reports how many full intervals are now due.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.stopped || self.interval.is_zero() {
            return 0;
        }
        self.elapsed += dt;
        let mut due = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            due += 1;
        }
        due
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub gravity_ticks: u32,
    pub fuel_ticks: u32,
    pub falls: u32,
}

/// Drives the gravity and fuel tickers against an engine.
#[derive(Debug, Clone)]
pub struct TickDriver {
    gravity: Ticker,
    fuel: Ticker,
}

impl TickDriver {
    pub fn new(interval: Duration) -> Self {
        Self {
            gravity: Ticker::new(interval),
            fuel: Ticker::new(interval),
        }
    }

    pub fn for_engine(engine: &Engine) -> Self {
        Self::new(engine.config().tick_interval())
    }

    pub fn is_stopped(&self) -> bool {
        self.gravity.is_stopped() && self.fuel.is_stopped()
    }

    /// Fires every due gravity tick, then every due fuel tick. The game-over
    /// latch is checked before each firing; once set, both tickers stop for good.
    pub fn advance(&mut self, dt: Duration, engine: &mut Engine) -> TickReport {
        let mut report = TickReport::default();
        if self.halt_if_over(engine) {
            return report;
        }

        for _ in 0..self.gravity.advance(dt) {
            if self.halt_if_over(engine) {
                return report;
            }
            report.gravity_ticks += 1;
            if engine.on_gravity_tick() {
                report.falls += 1;
            }
        }

        for _ in 0..self.fuel.advance(dt) {
            if self.halt_if_over(engine) {
                return report;
            }
            report.fuel_ticks += 1;
            engine.on_fuel_tick();
        }
        self.halt_if_over(engine);
        report
    }

    fn halt_if_over(&mut self, engine: &Engine) -> bool {
        if !engine.is_game_over() {
            return false;
        }
        if !self.is_stopped() {
            info!("game over latched; stopping gravity and fuel tickers");
            self.gravity.stop();
            self.fuel.stop();
        }
        true
    }
}
