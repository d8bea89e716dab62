use serde::{Deserialize, Serialize};
use tilerun_core::geometry::Rect;

use crate::collision::{self, Axis};
use crate::interactions;
use crate::level::Level;

/// Gravity acceleration per tick. Screen coordinates: +y is down.
pub const GRAVITY: f32 = 0.2;
/// Jump impulse; negative is up.
pub const JUMP_FORCE: f32 = -8.0;
/// Horizontal speed in pixels per tick at full input.
pub const MOVE_SPEED: f32 = 2.0;
/// Player bounding box edge in pixels.
pub const PLAYER_SIZE: f32 = 40.0;
/// Trampoline impulse as a multiple of [`JUMP_FORCE`].
pub const TRAMPOLINE_MULTIPLIER: f32 = 1.9;
/// Invincibility window granted by stomping an enemy, in ticks.
pub const STOMP_INVINCIBILITY_TICKS: u32 = 15;
/// Invincibility window granted after losing a life, in ticks.
pub const HIT_INVINCIBILITY_TICKS: u32 = 90;
/// Cosmetic spin rate while airborne, in degrees per tick.
const ROTATION_SPEED: f32 = 5.0;

/// Discrete interaction outcome of one tick. At most one is reported;
/// the classifier in [`crate::interactions`] fixes the priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    CoinCollected,
    EnemyKilled,
    EnemyCollision,
    GoalReached,
}

/// The player character's full simulation state for one level session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub on_ground: bool,
    pub lives: u32,
    pub respawn_point: (f32, f32),
    pub is_invincible: bool,
    pub invincibility_timer: u32,
    /// Cosmetic spin while airborne, in degrees. No gameplay effect.
    pub angle: f32,
}

impl PlayerState {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            velocity_x: 0.0,
            velocity_y: 0.0,
            on_ground: false,
            lives: 3,
            respawn_point: (x, y),
            is_invincible: false,
            invincibility_timer: 0,
            angle: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_SIZE, PLAYER_SIZE)
    }

    /// Run one full simulation tick: invincibility countdown, gravity,
    /// X displacement and resolution, Y displacement and resolution, then
    /// interaction classification. X always resolves before Y, and both
    /// before classification — the stomp test needs the pre-Y-step bottom
    /// edge but must run against post-resolution positions.
    pub fn update(&mut self, level: &mut Level) -> Option<Outcome> {
        if self.is_invincible {
            self.invincibility_timer = self.invincibility_timer.saturating_sub(1);
            if self.invincibility_timer == 0 {
                self.is_invincible = false;
            }
        }

        self.velocity_y += GRAVITY;

        self.x += self.velocity_x;
        collision::resolve_axis(self, Axis::X, &level.grid);

        let previous_bottom = self.y + PLAYER_SIZE;
        self.y += self.velocity_y;
        collision::resolve_axis(self, Axis::Y, &level.grid);

        let outcome = interactions::classify(self, level, previous_bottom);
        if outcome.is_some() {
            return outcome;
        }

        if self.on_ground {
            self.angle = 0.0;
        } else if self.velocity_x > 0.0 {
            self.angle += ROTATION_SPEED;
        } else if self.velocity_x < 0.0 {
            self.angle -= ROTATION_SPEED;
        } else {
            self.angle += ROTATION_SPEED;
        }

        None
    }

    /// Jump if grounded. Returns whether the jump fired, so the session
    /// can trigger the jump sound on its side of the audio seam.
    pub fn jump(&mut self) -> bool {
        if self.on_ground {
            self.velocity_y = JUMP_FORCE;
            true
        } else {
            false
        }
    }

    /// Return to the respawn point with zeroed velocity.
    pub fn respawn(&mut self) {
        self.x = self.respawn_point.0;
        self.y = self.respawn_point.1;
        self.velocity_x = 0.0;
        self.velocity_y = 0.0;
    }

    /// Lose a life and open an invincibility window. Returns the remaining
    /// lives; the session decides between respawn and game over.
    pub fn take_hit(&mut self, invincibility_ticks: u32) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.is_invincible = true;
        self.invincibility_timer = invincibility_ticks;
        self.lives
    }
}
