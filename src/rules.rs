//! Correctness rules.
//!
//! A [`Strategy`] selects which predicate decides whether the statues hold
//! the right volumes. Every predicate is checked per position and the whole
//! assignment is correct only when all three positions are.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::shapes::{ShapeAssignment, ShapeKind, VolumeAssignment, Weight, POSITIONS};

/// Selects the correctness rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// No statue's volume contains its own shape, and no volume is a double.
    #[default]
    Mixed,
    /// Only the first clause of [`Strategy::Mixed`]; doubles are allowed.
    MixedLegacy,
    /// Each statue holds the double of its right-hand neighbour's shape.
    IdealLeft,
    /// Each statue holds the double of its left-hand neighbour's shape.
    IdealRight,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Mixed,
        Strategy::MixedLegacy,
        Strategy::IdealLeft,
        Strategy::IdealRight,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Strategy::Mixed => "mixed",
            Strategy::MixedLegacy => "mixed-legacy",
            Strategy::IdealLeft => "ideal-left",
            Strategy::IdealRight => "ideal-right",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "mixed" | "standard" => Ok(Strategy::Mixed),
            "mixedlegacy" | "legacy" => Ok(Strategy::MixedLegacy),
            "idealleft" | "left" => Ok(Strategy::IdealLeft),
            "idealright" | "right" => Ok(Strategy::IdealRight),
            _ => Err(ParseError::Strategy(s.to_string())),
        }
    }
}

/// True when `value` is `2^k` for some integer `k >= 0`.
///
/// Zero and negative values have no integral base-2 logarithm.
#[inline]
fn is_power_of_two(value: Weight) -> bool {
    value > 0 && (value as u32).is_power_of_two()
}

/// True when `volume` splits into `shape` plus one other shape.
#[inline]
pub fn contains_shape(volume: Weight, shape: ShapeKind) -> bool {
    is_power_of_two(volume - shape.weight())
}

/// Checks a single position under `strategy`.
pub fn is_correct_at(
    shapes: &ShapeAssignment,
    volumes: &VolumeAssignment,
    strategy: Strategy,
    position: usize,
) -> bool {
    let volume = volumes[position];
    match strategy {
        // volume / 2 has an integral log2 exactly when volume is a power of two
        Strategy::Mixed => !contains_shape(volume, shapes[position]) && !is_power_of_two(volume),
        Strategy::MixedLegacy => !contains_shape(volume, shapes[position]),
        Strategy::IdealLeft => volume == shapes[(position + 1) % POSITIONS].weight() * 2,
        Strategy::IdealRight => volume == shapes[(position + 2) % POSITIONS].weight() * 2,
    }
}

/// Whether the whole assignment is solved under `strategy`.
pub fn is_correct(shapes: &ShapeAssignment, volumes: &VolumeAssignment, strategy: Strategy) -> bool {
    (0..POSITIONS).all(|position| is_correct_at(shapes, volumes, strategy, position))
}

/// Whether the held shape can be pulled out of `volumes[position]`.
///
/// `marked` is the position of a dissection already in progress, which cannot
/// be chosen again.
pub fn can_dissect(
    volumes: &VolumeAssignment,
    held: Option<ShapeKind>,
    marked: Option<usize>,
    position: usize,
) -> bool {
    let Some(held) = held else {
        return false;
    };
    position < POSITIONS && marked != Some(position) && contains_shape(volumes[position], held)
}
