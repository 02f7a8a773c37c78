use thiserror::Error;

use crate::rules::Strategy;
use crate::shapes::ShapeKind;

/// Rejected player actions.
///
/// A rejected action never changes the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no shape is held")]
    NothingHeld,

    #[error("already holding a {0}")]
    AlreadyHolding(ShapeKind),

    #[error("statue position {0} does not exist")]
    PositionOutOfRange(usize),

    #[error("statue {0} is already being dissected")]
    SamePosition(usize),

    #[error("statue {position} holds no {held} to dissect")]
    NotDissectable { position: usize, held: ShapeKind },

    #[error("no dropped shape at index {index} ({len} on the ground)")]
    DroppedOutOfRange { index: usize, len: usize },

    #[error("the {0} knight has already dropped its shape")]
    NotUndropped(ShapeKind),

    #[error("every knight has already dropped its shape")]
    NoKnightsLeft,

    #[error("dropped shapes do not expire in this variant")]
    ExpiryDisabled,

    #[error("the ogres cannot be killed yet")]
    OgresUnavailable,

    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Failures while generating a starting configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("every candidate volume assignment is already solved under {strategy}")]
    Exhausted { strategy: Strategy },
}

/// Text that does not name a known value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown shape: {0:?}")]
    Shape(String),

    #[error("unknown volume: {0:?}")]
    Volume(String),

    #[error("expected exactly three values, got {0:?}")]
    Arity(String),

    #[error("unknown strategy: {0:?}")]
    Strategy(String),

    #[error("unknown generation mode: {0:?}")]
    Mode(String),

    #[error("unknown ogre rule: {0:?}")]
    OgreRule(String),

    #[error("unknown command: {0:?}")]
    Command(String),

    #[error("{command} expects {expected}")]
    Argument {
        command: &'static str,
        expected: &'static str,
    },
}
