/// SessionState: the complete snapshot of one game session.
///
/// All mutation goes through the transition functions in `sim::step`;
/// the renderer only reads. The toast message pair is cosmetic state
/// that decays on the UI clock and never influences scoring.

use crate::config::RulesConfig;
use crate::domain::round::Round;

/// Cadence of the cosmetic UI clock (blink, toast decay).
/// The countdown itself ticks on a fixed 1-second cadence in main.
pub const UI_TICK_MS: u64 = 100;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Title,
    Playing,
    Over,
}

pub struct SessionState {
    pub phase: Phase,
    pub score: u32,
    pub streak: u32,
    /// Whole seconds left in the current round. Clamped to 0.
    pub time_left: u32,
    /// Present exactly while a game is underway (Playing or Over).
    pub round: Option<Round>,

    pub rules: RulesConfig,

    // ── UI ──
    pub message: String,
    pub message_timer: u32,
    pub anim_tick: u32,
}

impl SessionState {
    pub fn new(rules: RulesConfig) -> Self {
        SessionState {
            phase: Phase::Title,
            score: 0,
            streak: 0,
            time_left: rules.start_secs,
            round: None,
            rules,
            message: String::new(),
            message_timer: 0,
            anim_tick: 0,
        }
    }

    /// Show a transient message for `duration` UI ticks.
    pub fn set_message(&mut self, msg: &str, duration: u32) {
        self.message = msg.to_string();
        self.message_timer = duration;
    }

    /// Advance the cosmetic clock one UI tick. Never touches game state.
    pub fn tick_anim(&mut self) {
        self.anim_tick = self.anim_tick.wrapping_add(1);
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message.clear();
            }
        }
    }
}
