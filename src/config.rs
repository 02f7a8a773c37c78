//! Rule switches for the two historical game variants.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::generator::{GenerationMode, Generator};
use crate::rules::Strategy;

/// Random draws the generator tries before enumerating every candidate.
pub const DEFAULT_RETRY_LIMIT: usize = 64;

/// When the "Kill Ogres" action becomes available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OgreRule {
    /// Every knight has dropped and every dropped shape is gone.
    #[default]
    AllCleared,
    /// Every knight has dropped, regardless of shapes on the ground.
    UndroppedEmpty,
}

impl fmt::Display for OgreRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OgreRule::AllCleared => "all-cleared",
            OgreRule::UndroppedEmpty => "undropped-empty",
        })
    }
}

impl FromStr for OgreRule {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all-cleared" | "cleared" | "all" => Ok(OgreRule::AllCleared),
            "undropped-empty" | "undropped" => Ok(OgreRule::UndroppedEmpty),
            _ => Err(ParseError::OgreRule(s.to_string())),
        }
    }
}

/// Everything a session needs to know about which rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub generation: GenerationMode,
    /// Strategy active when the session starts.
    pub strategy: Strategy,
    pub ogres: OgreRule,
    /// Whether dropped shapes can be left to expire.
    pub allow_expiry: bool,
    pub retry_limit: usize,
    /// Fixed seed for reproducible puzzles; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            generation: GenerationMode::Paired,
            strategy: Strategy::Mixed,
            ogres: OgreRule::AllCleared,
            allow_expiry: true,
            retry_limit: DEFAULT_RETRY_LIMIT,
            seed: None,
        }
    }
}

impl GameConfig {
    /// The earlier rule set: pooled generation, single-clause correctness,
    /// ogres unlocked as soon as every knight has dropped, no expiry.
    pub fn legacy() -> Self {
        Self {
            generation: GenerationMode::Pooled,
            strategy: Strategy::MixedLegacy,
            ogres: OgreRule::UndroppedEmpty,
            allow_expiry: false,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn generator(&self) -> Generator {
        Generator::new(self.generation, self.retry_limit)
    }
}
