pub mod collision;
pub mod config;
pub mod enemy;
pub mod interactions;
pub mod level;
pub mod levels;
pub mod player;
pub mod session;

pub use config::SessionConfig;
pub use enemy::Enemy;
pub use level::{GridError, Level, LevelData, LevelError, Tile, TileGrid};
pub use player::{Outcome, PlayerState};
pub use session::{GameSession, SessionEvent};
