use crate::level::TileGrid;
use crate::player::PlayerState;

/// The axis a displacement was just applied on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Resolve overlaps between the player and every solid tile, assuming the
/// player was just displaced along `axis`.
///
/// Cells are scanned row-major; when several solids overlap in one pass,
/// later corrections overwrite earlier ones. There is no sub-stepping, so
/// a fast enough actor can tunnel through a thin wall — that matches the
/// reference behavior and is relied on by nothing.
///
/// A Y pass always clears `on_ground` first; only a downward hit in that
/// same pass re-earns it.
pub fn resolve_axis(player: &mut PlayerState, axis: Axis, grid: &TileGrid) {
    if axis == Axis::Y {
        player.on_ground = false;
    }

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            if !grid.solid_at(row, col) {
                continue;
            }
            let tile = grid.tile_rect(row, col);
            if !player.rect().overlaps(&tile) {
                continue;
            }
            match axis {
                Axis::X => {
                    if player.velocity_x > 0.0 {
                        player.x = tile.x - player.rect().w;
                    } else if player.velocity_x < 0.0 {
                        player.x = tile.right();
                    }
                    player.velocity_x = 0.0;
                }
                Axis::Y => {
                    if player.velocity_y > 0.0 {
                        player.y = tile.y - player.rect().h;
                        player.on_ground = true;
                    } else if player.velocity_y < 0.0 {
                        player.y = tile.bottom();
                    }
                    player.velocity_y = 0.0;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{Level, LevelData};
    use crate::player::PlayerState;

    /// 6x6 room with solid borders and an extra solid block at (3, 3).
    fn room_with_block() -> Level {
        Level::load(&LevelData::Grid(vec![
            vec![1, 1, 1, 1, 1, 1],
            vec![1, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 1, 0, 1],
            vec![1, 0, 0, 0, 0, 1],
            vec![1, 1, 1, 1, 1, 1],
        ]))
        .unwrap()
    }

    #[test]
    fn falling_lands_on_tile_top() {
        let level = room_with_block();
        let mut player = PlayerState::new(120.0, 85.0);
        player.velocity_y = 5.0;
        // Block at (3,3) spans y 120..160; the player's bottom is at 125.
        resolve_axis(&mut player, Axis::Y, &level.grid);
        assert_eq!(player.y, 80.0, "bottom snapped to the tile top");
        assert_eq!(player.velocity_y, 0.0);
        assert!(player.on_ground);
    }

    #[test]
    fn rising_snaps_top_to_tile_bottom() {
        let level = room_with_block();
        let mut player = PlayerState::new(120.0, 155.0);
        player.velocity_y = -3.0;
        // Player top (155) pokes into the block (120..160) from below.
        resolve_axis(&mut player, Axis::Y, &level.grid);
        assert_eq!(player.y, 160.0, "top snapped to the tile bottom");
        assert_eq!(player.velocity_y, 0.0);
        assert!(!player.on_ground);
    }

    #[test]
    fn moving_right_snaps_to_tile_left_edge() {
        let level = room_with_block();
        let mut player = PlayerState::new(85.0, 120.0);
        player.velocity_x = 2.0;
        resolve_axis(&mut player, Axis::X, &level.grid);
        assert_eq!(player.x, 80.0, "right edge snapped to the tile left edge");
        assert_eq!(player.velocity_x, 0.0);
    }

    #[test]
    fn moving_left_snaps_to_tile_right_edge() {
        let level = room_with_block();
        let mut player = PlayerState::new(155.0, 120.0);
        player.velocity_x = -2.0;
        resolve_axis(&mut player, Axis::X, &level.grid);
        assert_eq!(player.x, 160.0, "left edge snapped to the tile right edge");
        assert_eq!(player.velocity_x, 0.0);
    }

    #[test]
    fn y_pass_resets_on_ground() {
        let level = room_with_block();
        let mut player = PlayerState::new(80.0, 100.0);
        player.on_ground = true;
        player.velocity_y = -1.0;
        // No overlap anywhere: the pass must still clear the flag.
        resolve_axis(&mut player, Axis::Y, &level.grid);
        assert!(!player.on_ground);
    }

    #[test]
    fn no_overlap_leaves_player_untouched() {
        let level = room_with_block();
        let mut player = PlayerState::new(80.0, 80.0);
        player.velocity_x = 2.0;
        resolve_axis(&mut player, Axis::X, &level.grid);
        assert_eq!(player.x, 80.0);
        assert_eq!(player.velocity_x, 2.0, "velocity survives a clean pass");
    }

    #[test]
    fn resolved_axis_never_ends_overlapping() {
        let level = room_with_block();
        for x in [41, 60, 85, 110, 155] {
            let mut player = PlayerState::new(x as f32, 120.0);
            player.velocity_x = if x < 100 { 2.0 } else { -2.0 };
            resolve_axis(&mut player, Axis::X, &level.grid);
            for row in 0..level.grid.rows() {
                for col in 0..level.grid.cols() {
                    if level.grid.solid_at(row, col) {
                        assert!(
                            !player.rect().overlaps(&level.grid.tile_rect(row, col)),
                            "player at x={x} still overlaps solid ({row},{col})"
                        );
                    }
                }
            }
        }
    }
}
