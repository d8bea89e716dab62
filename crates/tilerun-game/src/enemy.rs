use serde::{Deserialize, Serialize};
use tilerun_core::geometry::Rect;

/// Enemy bounding box edge in pixels.
pub const ENEMY_SIZE: f32 = 40.0;
/// Default patrol speed in pixels per tick.
const PATROL_SPEED: f32 = 1.0;
/// Default patrol band width in pixels.
const PATROL_RANGE: f32 = 100.0;

/// A patrolling enemy. Walks back and forth across a fixed horizontal
/// band; killed enemies stay in the collection but stop updating, so
/// indices remain stable during iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub initial_x: f32,
    pub move_range: f32,
    pub alive: bool,
}

impl Enemy {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            velocity_x: PATROL_SPEED,
            initial_x: x,
            move_range: PATROL_RANGE,
            alive: true,
        }
    }

    /// Advance one patrol step. The direction reflects at the band edges;
    /// the position may overshoot an edge by one step magnitude.
    pub fn update(&mut self) {
        if !self.alive {
            return;
        }
        self.x += self.velocity_x;
        if self.x >= self.initial_x + self.move_range || self.x <= self.initial_x {
            self.velocity_x = -self.velocity_x;
        }
    }

    /// Permanently mark the enemy dead. Idempotent.
    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, ENEMY_SIZE, ENEMY_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patrol_reaches_far_edge_and_turns() {
        let mut enemy = Enemy::new(0.0, 0.0);
        for _ in 0..100 {
            enemy.update();
        }
        assert_eq!(enemy.x, 100.0);
        assert_eq!(enemy.velocity_x, -1.0, "direction flips at the far edge");
    }

    #[test]
    fn patrol_returns_to_start() {
        let mut enemy = Enemy::new(0.0, 0.0);
        for _ in 0..200 {
            enemy.update();
        }
        assert_eq!(enemy.x, 0.0);
        assert_eq!(enemy.velocity_x, 1.0, "direction flips back at the near edge");
    }

    #[test]
    fn patrol_stays_within_band_at_unit_speed() {
        let mut enemy = Enemy::new(80.0, 0.0);
        for _ in 0..1000 {
            enemy.update();
            assert!(enemy.x >= 80.0);
            assert!(enemy.x <= 180.0);
        }
    }

    #[test]
    fn overshoot_is_bounded_by_step_magnitude() {
        let mut enemy = Enemy::new(0.0, 0.0);
        enemy.velocity_x = 3.0;
        for _ in 0..1000 {
            enemy.update();
            assert!(enemy.x >= -3.0);
            assert!(enemy.x <= 103.0);
        }
    }

    #[test]
    fn dead_enemy_does_not_move() {
        let mut enemy = Enemy::new(10.0, 20.0);
        enemy.kill();
        enemy.update();
        assert_eq!(enemy.x, 10.0);
        assert!(!enemy.alive);
    }

    #[test]
    fn kill_is_idempotent() {
        let mut enemy = Enemy::new(0.0, 0.0);
        enemy.kill();
        enemy.kill();
        assert!(!enemy.alive);
    }

    #[test]
    fn rect_matches_position() {
        let enemy = Enemy::new(40.0, 80.0);
        let rect = enemy.rect();
        assert_eq!(rect.x, 40.0);
        assert_eq!(rect.y, 80.0);
        assert_eq!(rect.w, ENEMY_SIZE);
        assert_eq!(rect.h, ENEMY_SIZE);
    }
}
