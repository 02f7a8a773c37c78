//! Statue Shape Puzzle Library
//!
//! Three statues each call out a 2D shape and hold a 3D volume made of two
//! shapes. The player carries shapes dropped by knights and dissects volumes
//! to trade shapes between statues until the volumes satisfy the active
//! [`rules::Strategy`].
//!
//! [`session::PuzzleSession`] is the entry point; everything it needs is
//! generated from a [`shuffle::Shuffler`] so that seeded sessions replay
//! exactly.

pub mod config;
pub mod display;
pub mod error;
pub mod generator;
pub mod rules;
pub mod session;
pub mod shapes;
pub mod shuffle;

pub use config::{GameConfig, OgreRule};
pub use error::{GenerateError, ParseError, SessionError};
pub use generator::{GenerationMode, Generator};
pub use rules::Strategy;
pub use session::{Action, DissectionMark, DroppedShape, PuzzleSession};
pub use shapes::{ShapeAssignment, ShapeKind, VolumeAssignment, VolumeKind, Weight};
pub use shuffle::Shuffler;
