//! Game tunables.
//!
//! Every field has a default matching the classic 800x600 layout, so a JSON
//! config file only needs the keys it wants to change.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Spawn interval used when the scroll speed cannot produce one.
pub const FALLBACK_SPAWN_INTERVAL: u32 = 60;

/// Pairs laid out by a fresh or reset stream.
pub const INITIAL_PAIRS: usize = 3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Target tick rate of the frame clock.
    pub fps: u32,

    // ── Bird ─────────────────────────────────────────────────────────────────
    pub bird_size: u32,
    pub bird_start_x: f32,
    pub bird_start_y: f32,
    /// Added to the velocity every tick (units/frame²).
    pub gravity: f32,
    /// Velocity set by a jump (negative is up).
    pub jump_impulse: f32,

    // ── Obstacles ────────────────────────────────────────────────────────────
    /// Vertical opening between the top and bottom pipe of a pair.
    pub gap: u32,
    pub pipe_width: u32,
    /// Neither pipe of a pair is ever shorter than this.
    pub pipe_min_height: u32,
    /// Leftward scroll (units/frame).
    pub speed: f32,
    /// Horizontal distance between consecutive pairs.
    pub spawn_distance: u32,
    /// How far past the right edge new pairs appear.
    pub spawn_margin: u32,

    /// Fixed RNG seed; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            fps: 60,

            bird_size: 50,
            bird_start_x: 70.0,
            bird_start_y: 90.0,
            gravity: 0.5,
            jump_impulse: -7.0,

            gap: 200,
            pipe_width: 80,
            pipe_min_height: 100,
            speed: 4.0,
            spawn_distance: 300,
            spawn_margin: 100,

            seed: None,
        }
    }
}

impl GameConfig {
    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject layouts the simulation cannot satisfy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("fps", self.fps),
            ("pipe_width", self.pipe_width),
            ("pipe_min_height", self.pipe_min_height),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroDimension { name });
            }
        }

        for (name, value) in [
            ("speed", self.speed),
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("bird_start_x", self.bird_start_x),
            ("bird_start_y", self.bird_start_y),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }

        let pipes_min = 2 * u64::from(self.pipe_min_height);
        if u64::from(self.gap) + pipes_min >= u64::from(self.screen_height) {
            return Err(ConfigError::GapTooLarge {
                gap: self.gap,
                screen_height: self.screen_height,
                pipe_min_height: self.pipe_min_height,
            });
        }

        if self.bird_size >= self.screen_height || self.bird_size >= self.screen_width {
            return Err(ConfigError::EntityTooLarge {
                size: self.bird_size,
                screen_width: self.screen_width,
                screen_height: self.screen_height,
            });
        }

        if self.speed <= 0.0 {
            log::warn!(
                "speed {} is not positive, spawning every {} frames",
                self.speed,
                FALLBACK_SPAWN_INTERVAL
            );
        }

        Ok(())
    }

    /// Ticks between pair spawns: floor(spawn_distance / speed).
    pub fn spawn_interval_frames(&self) -> u32 {
        if self.speed > 0.0 {
            (self.spawn_distance as f32 / self.speed).floor() as u32
        } else {
            FALLBACK_SPAWN_INTERVAL
        }
    }

    /// X position of the first pair of a fresh stream.
    pub fn spawn_x(&self) -> f32 {
        (self.screen_width + self.spawn_margin) as f32
    }
}

#[derive(Debug)]
pub enum ConfigError {
    GapTooLarge {
        gap: u32,
        screen_height: u32,
        pipe_min_height: u32,
    },
    ZeroDimension {
        name: &'static str,
    },
    NonFinite {
        name: &'static str,
        value: f32,
    },
    EntityTooLarge {
        size: u32,
        screen_width: u32,
        screen_height: u32,
    },
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GapTooLarge {
                gap,
                screen_height,
                pipe_min_height,
            } => write!(
                f,
                "gap {gap} leaves no room for two pipes of at least {pipe_min_height} on a screen {screen_height} high"
            ),
            Self::ZeroDimension { name } => write!(f, "{name} must be greater than zero"),
            Self::NonFinite { name, value } => write!(f, "{name} must be a finite number, got {value}"),
            Self::EntityTooLarge {
                size,
                screen_width,
                screen_height,
            } => write!(
                f,
                "bird size {size} does not fit on a {screen_width}x{screen_height} screen"
            ),
            Self::Io { path, source } => {
                write!(f, "cannot read config {}: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}
