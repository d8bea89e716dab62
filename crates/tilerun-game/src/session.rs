use serde::{Deserialize, Serialize};
use tilerun_core::audio::{AudioSink, Sound};
use tilerun_core::input::TickInput;
use tilerun_core::progress::ProgressStore;

use crate::config::SessionConfig;
use crate::level::{Level, LevelData};
use crate::player::{MOVE_SPEED, Outcome, PlayerState};

/// A gameplay event surfaced by one tick, for the embedding frontend to
/// render or announce. Purely informational; all state changes have
/// already been applied when these are returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    CoinCollected { collected: usize, total: usize },
    EnemyStomped,
    LifeLost { remaining: u32 },
    GoalBlocked { missing: usize },
    LevelComplete,
    GameOver,
}

/// One play-through of one level: player, enemies, score, and the session
/// rules from [`SessionConfig`], wired to an audio sink and a progress
/// store at the seams.
#[derive(Debug)]
pub struct GameSession<A: AudioSink, P: ProgressStore> {
    level: Level,
    player: PlayerState,
    coins_collected: usize,
    level_index: usize,
    config: SessionConfig,
    audio: A,
    progress: P,
    message: Option<String>,
    message_timer: u32,
    finished: bool,
}

impl<A: AudioSink, P: ProgressStore> GameSession<A, P> {
    /// Start a session on the given level data. Malformed data degrades to
    /// the built-in default level rather than failing.
    pub fn new(
        data: &LevelData,
        level_index: usize,
        config: SessionConfig,
        audio: A,
        progress: P,
    ) -> Self {
        let level = Level::load_or_default(data);
        let start = level.player_start;
        let tile_size = level.grid.tile_size();
        let mut player =
            PlayerState::new(start.x as f32 * tile_size, start.y as f32 * tile_size);
        player.lives = config.starting_lives;
        Self {
            level,
            player,
            coins_collected: 0,
            level_index,
            config,
            audio,
            progress,
            message: None,
            message_timer: 0,
            finished: false,
        }
    }

    /// Carry lives over from a previous level's session.
    pub fn with_lives(mut self, lives: u32) -> Self {
        self.player.lives = lives;
        self
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn coins_collected(&self) -> usize {
        self.coins_collected
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Transient on-screen message, if one is currently showing.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn progress(&self) -> &P {
        &self.progress
    }

    /// Advance the session by one tick under the given input. Returns the
    /// events this tick produced, in the order they happened. A finished
    /// session ignores input and produces nothing.
    pub fn tick(&mut self, input: TickInput) -> Vec<SessionEvent> {
        if self.finished {
            return Vec::new();
        }
        let input = input.clamped();
        let mut events = Vec::new();

        self.player.velocity_x = f32::from(input.move_dir) * MOVE_SPEED;
        if input.jump && self.player.jump() {
            self.audio.play(Sound::Jump);
        }

        let outcome = self.player.update(&mut self.level);
        for enemy in &mut self.level.enemies {
            enemy.update();
        }

        match outcome {
            Some(Outcome::CoinCollected) => {
                self.coins_collected += 1;
                self.audio.play(Sound::Coin);
                events.push(SessionEvent::CoinCollected {
                    collected: self.coins_collected,
                    total: self.level.total_coins,
                });
            }
            Some(Outcome::EnemyKilled) => {
                events.push(SessionEvent::EnemyStomped);
            }
            Some(Outcome::EnemyCollision) => {
                let remaining = self.player.take_hit(self.config.hit_invincibility_ticks);
                if remaining > 0 {
                    tracing::debug!(remaining, "life lost, respawning");
                    self.player.respawn();
                    self.audio.play(Sound::LifeLost);
                    events.push(SessionEvent::LifeLost { remaining });
                } else {
                    tracing::info!(level = self.level_index, "game over");
                    self.audio.play(Sound::GameOver);
                    self.finished = true;
                    events.push(SessionEvent::GameOver);
                }
            }
            Some(Outcome::GoalReached) => {
                if self.coins_collected >= self.level.total_coins {
                    tracing::info!(level = self.level_index, "level complete");
                    self.progress.mark_level_complete(self.level_index);
                    self.audio.play(Sound::LevelComplete);
                    self.finished = true;
                    events.push(SessionEvent::LevelComplete);
                } else {
                    let missing = self.level.total_coins - self.coins_collected;
                    self.message = Some(format!("Collect all coins first! {missing} left"));
                    self.message_timer = self.config.message_ticks;
                    events.push(SessionEvent::GoalBlocked { missing });
                }
            }
            None => {}
        }

        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::StartCell;
    use tilerun_core::progress::MemoryProgress;
    use tilerun_core::test_helpers::RecordingAudio;

    type TestSession = GameSession<RecordingAudio, MemoryProgress>;

    fn session(data: &LevelData) -> TestSession {
        GameSession::new(
            data,
            0,
            SessionConfig::default(),
            RecordingAudio::default(),
            MemoryProgress::default(),
        )
    }

    fn idle() -> TickInput {
        TickInput::new(0, false)
    }

    fn walk(dir: i8) -> TickInput {
        TickInput::new(dir, false)
    }

    /// Tick until `wanted` shows up, up to `max_ticks`. Panics if it never
    /// does.
    fn tick_until(
        session: &mut TestSession,
        input: TickInput,
        wanted: fn(&SessionEvent) -> bool,
        max_ticks: usize,
    ) -> SessionEvent {
        for _ in 0..max_ticks {
            if let Some(event) = session.tick(input).into_iter().find(|e| wanted(e)) {
                return event;
            }
        }
        panic!("event did not occur within {max_ticks} ticks");
    }

    /// Open shaft: the player starts high and falls onto an enemy patrolling
    /// the floor below.
    fn stomp_level() -> LevelData {
        LevelData::Structured {
            tiles: vec![
                vec![1, 1, 1, 1, 1, 1],
                vec![1, 0, 0, 0, 0, 1],
                vec![1, 0, 0, 0, 0, 1],
                vec![1, 0, 4, 0, 0, 1],
                vec![1, 1, 1, 1, 1, 1],
            ],
            player_start: StartCell { x: 2, y: 1 },
        }
    }

    /// The player spawns on the floor inside an enemy's patrol band.
    fn hazard_level() -> LevelData {
        LevelData::Structured {
            tiles: vec![
                vec![1, 1, 1, 1, 1, 1, 1, 1],
                vec![1, 0, 0, 0, 0, 0, 0, 1],
                vec![1, 0, 0, 0, 0, 0, 0, 1],
                vec![1, 0, 0, 4, 0, 0, 0, 1],
                vec![1, 1, 1, 1, 1, 1, 1, 1],
            ],
            player_start: StartCell { x: 4, y: 3 },
        }
    }

    /// Coin to the left of the start, goal to the right.
    fn errand_level() -> LevelData {
        LevelData::Structured {
            tiles: vec![
                vec![1, 1, 1, 1, 1, 1, 1, 1],
                vec![1, 0, 0, 0, 0, 0, 0, 1],
                vec![1, 0, 0, 0, 0, 0, 0, 1],
                vec![1, 3, 0, 0, 0, 2, 0, 1],
                vec![1, 1, 1, 1, 1, 1, 1, 1],
            ],
            player_start: StartCell { x: 3, y: 3 },
        }
    }

    #[test]
    fn new_session_places_player_at_the_start_cell() {
        let session = session(&errand_level());
        assert_eq!(session.player().x, 120.0);
        assert_eq!(session.player().y, 120.0);
        assert_eq!(session.player().lives, 3);
        assert!(!session.is_finished());
    }

    #[test]
    fn bad_level_data_degrades_to_the_default_level() {
        let bad = LevelData::Grid(vec![vec![1, 1], vec![1]]);
        let session = session(&bad);
        assert_eq!(session.level().grid.rows(), 15);
        assert_eq!(session.level().grid.cols(), 20);
    }

    #[test]
    fn jump_plays_a_sound_only_from_the_ground() {
        let mut session = session(&errand_level());
        for _ in 0..10 {
            session.tick(idle());
        }
        assert!(session.player().on_ground);
        session.tick(TickInput::new(0, true));
        assert_eq!(session.audio().count(Sound::Jump), 1);
        // Airborne now; a held jump adds nothing.
        session.tick(TickInput::new(0, true));
        assert_eq!(session.audio().count(Sound::Jump), 1);
    }

    #[test]
    fn falling_onto_an_enemy_stomps_it() {
        let mut session = session(&stomp_level());
        let event = tick_until(
            &mut session,
            idle(),
            |e| matches!(e, SessionEvent::EnemyStomped),
            40,
        );
        assert_eq!(event, SessionEvent::EnemyStomped);
        assert!(!session.level().enemies[0].alive);
        assert!(session.player().is_invincible);
        assert_eq!(session.player().lives, 3);
    }

    #[test]
    fn enemy_contact_burns_lives_then_ends_the_game() {
        let mut session = session(&hazard_level());
        let mut life_lost = Vec::new();
        let mut game_over = false;
        for _ in 0..600 {
            for event in session.tick(idle()) {
                match event {
                    SessionEvent::LifeLost { remaining } => life_lost.push(remaining),
                    SessionEvent::GameOver => game_over = true,
                    other => panic!("unexpected event: {other:?}"),
                }
            }
            if game_over {
                break;
            }
        }
        assert_eq!(life_lost, vec![2, 1]);
        assert!(game_over);
        assert!(session.is_finished());
        assert_eq!(session.audio().count(Sound::LifeLost), 2);
        assert_eq!(session.audio().count(Sound::GameOver), 1);
    }

    #[test]
    fn respawn_returns_to_the_start_cell_after_a_hit() {
        let mut session = session(&hazard_level());
        tick_until(
            &mut session,
            idle(),
            |e| matches!(e, SessionEvent::LifeLost { .. }),
            200,
        );
        assert_eq!(session.player().x, 160.0);
        assert_eq!(session.player().y, 120.0);
        assert!(session.player().is_invincible);
    }

    #[test]
    fn goal_is_blocked_until_every_coin_is_collected() {
        let mut session = session(&errand_level());
        let event = tick_until(
            &mut session,
            walk(1),
            |e| matches!(e, SessionEvent::GoalBlocked { .. }),
            100,
        );
        assert_eq!(event, SessionEvent::GoalBlocked { missing: 1 });
        assert!(session.message().is_some());
        assert!(!session.is_finished());

        let event = tick_until(
            &mut session,
            walk(-1),
            |e| matches!(e, SessionEvent::CoinCollected { .. }),
            200,
        );
        assert_eq!(
            event,
            SessionEvent::CoinCollected {
                collected: 1,
                total: 1
            }
        );
        assert_eq!(session.audio().count(Sound::Coin), 1);

        tick_until(
            &mut session,
            walk(1),
            |e| matches!(e, SessionEvent::LevelComplete),
            300,
        );
        assert!(session.is_finished());
        assert!(session.progress().is_level_complete(0));
        assert_eq!(session.audio().count(Sound::LevelComplete), 1);
    }

    #[test]
    fn blocked_goal_message_expires() {
        let mut session = session(&errand_level());
        tick_until(
            &mut session,
            walk(1),
            |e| matches!(e, SessionEvent::GoalBlocked { .. }),
            100,
        );
        // Step off the goal, then let the message run out.
        for _ in 0..40 {
            session.tick(walk(-1));
        }
        let message_ticks = SessionConfig::default().message_ticks as usize;
        for _ in 0..message_ticks {
            session.tick(idle());
        }
        assert!(session.message().is_none());
    }

    #[test]
    fn finished_session_ignores_input() {
        let mut session = session(&errand_level());
        tick_until(
            &mut session,
            walk(-1),
            |e| matches!(e, SessionEvent::CoinCollected { .. }),
            200,
        );
        tick_until(
            &mut session,
            walk(1),
            |e| matches!(e, SessionEvent::LevelComplete),
            400,
        );
        let x = session.player().x;
        assert!(session.tick(walk(1)).is_empty());
        assert_eq!(session.player().x, x, "a finished session never moves");
    }

    #[test]
    fn with_lives_carries_over_a_previous_session() {
        let session = session(&errand_level()).with_lives(1);
        assert_eq!(session.player().lives, 1);
    }

    #[test]
    fn starting_lives_come_from_the_config() {
        let config = SessionConfig {
            starting_lives: 1,
            ..SessionConfig::default()
        };
        let mut session = GameSession::new(
            &hazard_level(),
            0,
            config,
            RecordingAudio::default(),
            MemoryProgress::default(),
        );
        let event = tick_until(
            &mut session,
            idle(),
            |e| matches!(e, SessionEvent::GameOver),
            200,
        );
        assert_eq!(event, SessionEvent::GameOver);
    }
}
