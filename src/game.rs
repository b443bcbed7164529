//! Game state machine
//!
//! Menu -> Playing <-> Paused, Playing -> GameOver -> Playing | Menu.
//! Owns the current session (if any) and the persisted high score.

use serde::{Deserialize, Serialize};

use crate::highscores::HighScoreStore;
use crate::sim::{GameEvent, GameSession, TickInput, tick};
use crate::tuning::Tuning;

/// Spreads successive run seeds apart
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Discrete player commands (buttons, menu keys)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Menu -> Playing
    Start,
    /// Playing <-> Paused
    Pause,
    /// GameOver -> Playing with a fresh session
    Restart,
    /// GameOver -> Menu
    Menu,
    /// Ask the host loop to exit
    Quit,
}

pub struct Game {
    phase: GamePhase,
    session: Option<GameSession>,
    high_scores: HighScoreStore,
    tuning: Tuning,
    base_seed: u64,
    /// Sessions started so far
    runs: u64,
    quit_requested: bool,
    /// Whether the last finished run set a record
    new_record: bool,
}

impl Game {
    pub fn new(mut high_scores: HighScoreStore, tuning: Tuning, base_seed: u64) -> Self {
        let best = high_scores.load();
        log::info!("High score on record: {}", best);
        Self {
            phase: GamePhase::Menu,
            session: None,
            high_scores,
            tuning,
            base_seed,
            runs: 0,
            quit_requested: false,
            new_record: false,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut GameSession> {
        self.session.as_mut()
    }

    /// Stored best score (as of the last load or record)
    pub fn high_score(&self) -> u64 {
        self.high_scores.cached()
    }

    pub fn runs(&self) -> u64 {
        self.runs
    }

    pub fn new_record(&self) -> bool {
        self.new_record
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Apply a command. Returns false when it means nothing in this phase.
    pub fn command(&mut self, command: Command) -> bool {
        let next = match (self.phase, command) {
            (_, Command::Quit) => {
                self.quit_requested = true;
                return true;
            }
            (GamePhase::Menu, Command::Start) | (GamePhase::GameOver, Command::Restart) => {
                self.start_session();
                GamePhase::Playing
            }
            (GamePhase::Playing, Command::Pause) => GamePhase::Paused,
            (GamePhase::Paused, Command::Pause) => GamePhase::Playing,
            (GamePhase::GameOver, Command::Menu) => {
                self.session = None;
                GamePhase::Menu
            }
            _ => return false,
        };

        log::info!("{:?} -> {:?}", self.phase, next);
        self.phase = next;
        true
    }

    fn start_session(&mut self) {
        let seed = self
            .base_seed
            .wrapping_add(self.runs.wrapping_mul(SEED_STRIDE));
        self.runs += 1;
        self.new_record = false;

        let mut session = GameSession::with_tuning(seed, self.tuning.clone());
        session.high_score = self.high_scores.load();
        log::info!("Run {} started (seed {})", self.runs, seed);
        self.session = Some(session);
    }

    /// Advance one fixed step while Playing; returns the tick's events
    pub fn update(&mut self, input: &TickInput, dt: f32) -> &[GameEvent] {
        if self.phase != GamePhase::Playing {
            return &[];
        }
        let Some(session) = self.session.as_mut() else {
            return &[];
        };

        tick(session, input, dt);
        if session.game_over {
            self.end_run();
        }

        match &self.session {
            Some(session) => session.events.as_slice(),
            None => &[],
        }
    }

    /// Close the run in progress and move to GameOver, recording its score.
    ///
    /// Called on death, and by hosts that stop a run early (frame limits,
    /// closing the window). Returns false when no run is in progress.
    pub fn end_run(&mut self) -> bool {
        if !matches!(self.phase, GamePhase::Playing | GamePhase::Paused) {
            return false;
        }
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        self.new_record = self.high_scores.record(session.score);
        session.high_score = session.high_score.max(session.score);
        log::info!(
            "{}: score {}, wave {}, kills {}{}",
            if session.game_over { "Game over" } else { "Run ended" },
            session.score,
            session.wave,
            session.total_kills,
            if self.new_record { " (new record)" } else { "" }
        );
        log::info!("{:?} -> {:?}", self.phase, GamePhase::GameOver);
        self.phase = GamePhase::GameOver;
        true
    }

    /// Start a fresh run from any phase, ending the current one first
    pub fn begin_run(&mut self) -> bool {
        match self.phase {
            GamePhase::Menu => self.command(Command::Start),
            GamePhase::GameOver => self.command(Command::Restart),
            GamePhase::Playing | GamePhase::Paused => {
                self.end_run() && self.command(Command::Restart)
            }
        }
    }
}
