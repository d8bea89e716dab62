use serde::{Deserialize, Serialize};

use crate::player::HIT_INVINCIBILITY_TICKS;

/// Tunable session parameters. Physics constants are fixed; these only
/// cover the rules layered on top of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Lives the player starts a session with.
    pub starting_lives: u32,
    /// Invincibility window opened by losing a life, in ticks.
    pub hit_invincibility_ticks: u32,
    /// How long transient messages stay visible, in ticks.
    pub message_ticks: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            hit_invincibility_ticks: HIT_INVINCIBILITY_TICKS,
            message_ticks: 120,
        }
    }
}

impl SessionConfig {
    /// Load from the TOML file named by `TILERUN_CONFIG` (default
    /// `config/tilerun.toml`). A missing or malformed file falls back to
    /// the defaults with a warning rather than failing the session.
    pub fn load() -> Self {
        let path = std::env::var("TILERUN_CONFIG")
            .unwrap_or_else(|_| "config/tilerun.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("failed to parse {path}: {e}; using default config");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("failed to read {path}: {e}; using default config");
                Self::default()
            }
        }
    }
}
