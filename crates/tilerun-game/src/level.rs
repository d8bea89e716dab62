use serde::{Deserialize, Serialize};
use thiserror::Error;
use tilerun_core::geometry::Rect;

use crate::enemy::Enemy;

/// Pixels per tile edge. The grid is uniform.
pub const TILE_SIZE: f32 = 40.0;

/// Tile type codes for the level grid.
///
/// `EnemySpawn` and `PlayerStart` are markers in on-disk level data only;
/// loading consumes them, so the live grid the physics sees never contains
/// either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Empty,
    Solid,
    Goal,
    Coin,
    EnemySpawn,
    Trampoline,
    PlayerStart,
}

impl TryFrom<u8> for Tile {
    type Error = LevelError;

    fn try_from(code: u8) -> Result<Self, LevelError> {
        match code {
            0 => Ok(Tile::Empty),
            1 => Ok(Tile::Solid),
            2 => Ok(Tile::Goal),
            3 => Ok(Tile::Coin),
            4 => Ok(Tile::EnemySpawn),
            5 => Ok(Tile::Trampoline),
            7 => Ok(Tile::PlayerStart),
            other => Err(LevelError::UnknownTile { code: other }),
        }
    }
}

/// Grid access outside the level bounds.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("tile index out of bounds: row {row}, col {col} in a {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// Malformed level data. All of these degrade to the built-in default
/// level when loading through [`Level::load_or_default`].
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level grid is empty")]
    Empty,
    #[error("level rows have unequal lengths: row {row} has {len} tiles, expected {expected}")]
    RaggedRows {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("unknown tile code {code}")]
    UnknownTile { code: u8 },
    #[error("invalid level JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A rectangular grid of tiles, stored row-major. Constructed once per
/// level session and mutated only by coin collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileGrid {
    tiles: Vec<Tile>,
    rows: usize,
    cols: usize,
    tile_size: f32,
}

impl TileGrid {
    fn from_codes(rows_of_codes: &[Vec<u8>]) -> Result<Self, LevelError> {
        let rows = rows_of_codes.len();
        if rows == 0 || rows_of_codes[0].is_empty() {
            return Err(LevelError::Empty);
        }
        let cols = rows_of_codes[0].len();
        let mut tiles = Vec::with_capacity(rows * cols);
        for (row, codes) in rows_of_codes.iter().enumerate() {
            if codes.len() != cols {
                return Err(LevelError::RaggedRows {
                    row,
                    len: codes.len(),
                    expected: cols,
                });
            }
            for &code in codes {
                tiles.push(Tile::try_from(code)?);
            }
        }
        Ok(Self {
            tiles,
            rows,
            cols,
            tile_size: TILE_SIZE,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if row >= self.rows || col >= self.cols {
            return Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Tile, GridError> {
        Ok(self.tiles[self.index(row, col)?])
    }

    pub fn set(&mut self, row: usize, col: usize, tile: Tile) -> Result<(), GridError> {
        let idx = self.index(row, col)?;
        self.tiles[idx] = tile;
        Ok(())
    }

    /// True iff the cell holds a solid tile. Out-of-bounds cells are not
    /// solid; collision scans bound their loops to the grid shape anyway.
    pub fn solid_at(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Ok(Tile::Solid)
    }

    /// World-space rectangle of a cell.
    pub fn tile_rect(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            col as f32 * self.tile_size,
            row as f32 * self.tile_size,
            self.tile_size,
            self.tile_size,
        )
    }
}

/// Player start cell, in grid coordinates (x = column, y = row). Field
/// names match the on-disk level format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartCell {
    pub x: usize,
    pub y: usize,
}

/// Start cell used when level data carries no player-start marker.
pub const DEFAULT_START: StartCell = StartCell { x: 1, y: 1 };

/// Raw level definition as authored or saved by the editor: either the
/// legacy bare grid (start marked with tile code 7) or the structured form
/// with an explicit start cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelData {
    Grid(Vec<Vec<u8>>),
    Structured {
        tiles: Vec<Vec<u8>>,
        #[serde(rename = "playerStart")]
        player_start: StartCell,
    },
}

impl LevelData {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    fn tiles(&self) -> &[Vec<u8>] {
        match self {
            LevelData::Grid(tiles) => tiles,
            LevelData::Structured { tiles, .. } => tiles,
        }
    }
}

/// A live level session: the mutable grid plus everything spawned from it.
/// Owns its data outright — the source [`LevelData`] is deep-copied at
/// construction and never aliased, so play never mutates the definition.
#[derive(Debug, Clone)]
pub struct Level {
    pub grid: TileGrid,
    pub enemies: Vec<Enemy>,
    pub total_coins: usize,
    pub player_start: StartCell,
}

impl Level {
    pub fn load(data: &LevelData) -> Result<Self, LevelError> {
        let mut grid = TileGrid::from_codes(data.tiles())?;
        let explicit_start = match data {
            LevelData::Grid(_) => None,
            LevelData::Structured { player_start, .. } => Some(*player_start),
        };

        let mut enemies = Vec::new();
        let mut total_coins = 0;
        let mut marker_start = None;
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let Ok(tile) = grid.get(row, col) else {
                    continue;
                };
                match tile {
                    Tile::Coin => total_coins += 1,
                    Tile::EnemySpawn => {
                        enemies.push(Enemy::new(
                            col as f32 * grid.tile_size(),
                            row as f32 * grid.tile_size(),
                        ));
                        let _ = grid.set(row, col, Tile::Empty);
                    }
                    Tile::PlayerStart => {
                        if marker_start.is_none() {
                            marker_start = Some(StartCell { x: col, y: row });
                        }
                        let _ = grid.set(row, col, Tile::Empty);
                    }
                    _ => {}
                }
            }
        }

        let player_start = explicit_start.or(marker_start).unwrap_or(DEFAULT_START);
        Ok(Self {
            grid,
            enemies,
            total_coins,
            player_start,
        })
    }

    /// Load, falling back to the built-in default level on malformed data.
    pub fn load_or_default(data: &LevelData) -> Self {
        match Self::load(data) {
            Ok(level) => level,
            Err(e) => {
                tracing::warn!("failed to load level data: {e}; using built-in default level");
                Self::default_level()
            }
        }
    }

    /// The built-in bordered room.
    pub fn default_level() -> Self {
        Self::load(&crate::levels::default_level())
            .expect("built-in default level must always load")
    }
}
