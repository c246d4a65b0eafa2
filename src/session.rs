/// The game session: sole owner and mutator of all simulation state.
///
/// `handle` applies input commands to the state machine and `tick` advances
/// one fixed timestep. Both are synchronous; the caller drives them once per
/// frame from its clock.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::compute::{collides, score_crossings};
use crate::config::GameConfig;
use crate::entities::{Bird, PairId};
use crate::score::ScoreBoard;
use crate::stream::ObstacleStream;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Menu,
    Playing,
    GameOver,
    ConfirmExitFromMenu,
    ConfirmExitFromGameOver,
    /// Exit confirmed or quit requested; the frame loop should stop.
    Exited,
}

/// Discrete input events, already decoded from raw keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Restart,
    Exit,
    Jump,
    ConfirmYes,
    ConfirmNo,
    /// External quit signal (Ctrl-C, Esc while playing).
    Quit,
}

/// What happened during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub scored: u32,
    pub crashed: bool,
}

pub struct Session {
    config: GameConfig,
    status: GameStatus,
    bird: Bird,
    stream: ObstacleStream,
    score: ScoreBoard,
    last_passed: Option<PairId>,
    /// Jump requested since the last tick, applied after integration.
    jump_pending: bool,
    frame: u64,
    rng: StdRng,
}

impl Session {
    /// Validate `config` and build a session sitting in the menu.
    pub fn new(config: GameConfig) -> Result<Self, crate::ConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: GameConfig, mut rng: StdRng) -> Result<Self, crate::ConfigError> {
        config.validate()?;
        let bird = Bird::from_config(&config);
        let stream = ObstacleStream::new(&config, &mut rng);
        Ok(Self {
            config,
            status: GameStatus::Menu,
            bird,
            stream,
            score: ScoreBoard::new(),
            last_passed: None,
            jump_pending: false,
            frame: 0,
            rng,
        })
    }

    // ── State machine ────────────────────────────────────────────────────────

    /// Apply one command. Commands that mean nothing in the current state
    /// are ignored.
    pub fn handle(&mut self, command: Command) {
        let next = match (self.status, command) {
            (GameStatus::Exited, _) => return,
            (_, Command::Quit) => GameStatus::Exited,

            (GameStatus::Menu, Command::Start) => {
                self.reset();
                GameStatus::Playing
            }
            (GameStatus::Menu, Command::Exit) => GameStatus::ConfirmExitFromMenu,

            (GameStatus::Playing, Command::Jump) => {
                self.jump_pending = true;
                return;
            }

            (GameStatus::GameOver, Command::Restart) => {
                self.reset();
                GameStatus::Playing
            }
            (GameStatus::GameOver, Command::Exit) => GameStatus::ConfirmExitFromGameOver,

            (GameStatus::ConfirmExitFromMenu, Command::ConfirmYes)
            | (GameStatus::ConfirmExitFromGameOver, Command::ConfirmYes) => GameStatus::Exited,
            (GameStatus::ConfirmExitFromMenu, Command::ConfirmNo) => GameStatus::Menu,
            (GameStatus::ConfirmExitFromGameOver, Command::ConfirmNo) => GameStatus::GameOver,

            _ => return,
        };
        self.transition(next);
    }

    fn transition(&mut self, next: GameStatus) {
        if next != self.status {
            log::info!("{:?} -> {:?}", self.status, next);
            self.status = next;
        }
    }

    /// Put bird, obstacles and score back to the start of a run.
    fn reset(&mut self) {
        self.bird
            .reset(self.config.bird_start_x, self.config.bird_start_y);
        self.stream.reset(&mut self.rng);
        self.score.reset_score();
        self.last_passed = None;
        self.jump_pending = false;
        self.frame = 0;
        log::debug!("session reset");
    }

    // ── Simulation ───────────────────────────────────────────────────────────

    /// Advance one fixed timestep. Outside `Playing` nothing moves.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Playing {
            return TickOutcome::default();
        }
        self.frame += 1;

        self.bird.integrate();
        // A jump overwrites the velocity this tick produced and first moves
        // the bird on the next one.
        if std::mem::take(&mut self.jump_pending) {
            self.bird.jump();
        }
        self.stream.update(&mut self.rng);

        let bird_rect = self.bird.rect();
        let crossings = score_crossings(&self.stream.marks(), bird_rect.left(), self.last_passed);
        for _ in 0..crossings.points {
            self.score.increment();
        }
        self.last_passed = crossings.last_passed;

        let crashed = collides(&bird_rect, &self.stream.colliders());
        if crashed {
            self.score.update_high_score();
            log::info!(
                "crashed on frame {} with score {} (best {})",
                self.frame,
                self.score.score(),
                self.score.high_score()
            );
            self.transition(GameStatus::GameOver);
        }

        TickOutcome {
            scored: crossings.points,
            crashed,
        }
    }

    // ── Read-only accessors for rendering and tests ──────────────────────────

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_exited(&self) -> bool {
        self.status == GameStatus::Exited
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn stream(&self) -> &ObstacleStream {
        &self.stream
    }

    pub fn score(&self) -> &ScoreBoard {
        &self.score
    }

    pub fn last_passed(&self) -> Option<PairId> {
        self.last_passed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Ticks played since the current run started.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
