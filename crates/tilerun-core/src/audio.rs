use serde::{Deserialize, Serialize};

/// Sound effects the game can trigger. Playback itself is the shell's
/// concern; the simulation only names what happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sound {
    Jump,
    Coin,
    LifeLost,
    LevelComplete,
    GameOver,
}

/// Audio-trigger seam injected into the session layer. The physics core
/// never touches this; it communicates through its outcome enum only.
pub trait AudioSink {
    fn play(&mut self, sound: Sound);
}

/// Discards every trigger. Useful for headless runs and most tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _sound: Sound) {}
}
