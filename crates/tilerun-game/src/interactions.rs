use crate::enemy::Enemy;
use crate::level::{Level, Tile};
use crate::player::{
    JUMP_FORCE, Outcome, PLAYER_SIZE, PlayerState, STOMP_INVINCIBILITY_TICKS,
    TRAMPOLINE_MULTIPLIER,
};

/// Stomp-style approach test: falling, and the pre-Y-step bottom edge was
/// at or above the target's top edge (one pixel of slack).
fn is_stomp(player: &PlayerState, previous_bottom: f32, target_top: f32) -> bool {
    player.velocity_y > 0.0 && previous_bottom <= target_top + 1.0
}

/// Classify this tick's non-solid interactions, in fixed priority order.
///
/// A trampoline bounce applies as a side effect and does not end
/// classification; the first terminal match among enemy, coin, and goal
/// wins and short-circuits the rest of the tick.
pub fn classify(
    player: &mut PlayerState,
    level: &mut Level,
    previous_bottom: f32,
) -> Option<Outcome> {
    bounce_on_trampoline(player, level, previous_bottom);

    if let Some(outcome) = check_enemies(player, &mut level.enemies, previous_bottom) {
        return Some(outcome);
    }
    if collect_coin(player, level) {
        return Some(Outcome::CoinCollected);
    }
    if touching_goal(player, level) {
        return Some(Outcome::GoalReached);
    }
    None
}

fn bounce_on_trampoline(player: &mut PlayerState, level: &mut Level, previous_bottom: f32) {
    for row in 0..level.grid.rows() {
        for col in 0..level.grid.cols() {
            let Ok(tile) = level.grid.get(row, col) else {
                continue;
            };
            if tile != Tile::Trampoline {
                continue;
            }
            let rect = level.grid.tile_rect(row, col);
            if player.rect().overlaps(&rect) && is_stomp(player, previous_bottom, rect.y) {
                player.y = rect.y - PLAYER_SIZE;
                player.velocity_y = JUMP_FORCE * TRAMPOLINE_MULTIPLIER;
                return;
            }
        }
    }
}

fn check_enemies(
    player: &mut PlayerState,
    enemies: &mut [Enemy],
    previous_bottom: f32,
) -> Option<Outcome> {
    for enemy in enemies.iter_mut() {
        if !enemy.alive || !player.rect().overlaps(&enemy.rect()) {
            continue;
        }
        if is_stomp(player, previous_bottom, enemy.y) {
            enemy.kill();
            player.velocity_y = -JUMP_FORCE / 2.0;
            player.is_invincible = true;
            player.invincibility_timer = STOMP_INVINCIBILITY_TICKS;
            return Some(Outcome::EnemyKilled);
        } else if !player.is_invincible {
            return Some(Outcome::EnemyCollision);
        }
        // Invincible side contact: pass through.
    }
    None
}

fn collect_coin(player: &PlayerState, level: &mut Level) -> bool {
    for row in 0..level.grid.rows() {
        for col in 0..level.grid.cols() {
            if level.grid.get(row, col) != Ok(Tile::Coin) {
                continue;
            }
            if player.rect().overlaps(&level.grid.tile_rect(row, col))
                && level.grid.set(row, col, Tile::Empty).is_ok()
            {
                return true;
            }
        }
    }
    false
}

fn touching_goal(player: &PlayerState, level: &Level) -> bool {
    for row in 0..level.grid.rows() {
        for col in 0..level.grid.cols() {
            if level.grid.get(row, col) == Ok(Tile::Goal)
                && player.rect().overlaps(&level.grid.tile_rect(row, col))
            {
                return true;
            }
        }
    }
    false
}
