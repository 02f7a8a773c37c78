//! Starting-position generator.
//!
//! Candidates are drawn at random and rejected while they are already solved.
//! After `retry_limit` rejections the generator falls back to enumerating the
//! whole candidate space, which is small enough to list exhaustively:
//! - pooled: 21 distinct volume triples
//! - paired: 6 (one per permutation of the draw)

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashSet;
use tracing::{debug, trace, warn};

use crate::error::{GenerateError, ParseError};
use crate::rules::{is_correct, Strategy};
use crate::shapes::{
    ShapeAssignment, ShapeKind, VolumeAssignment, VolumeKind, CANONICAL_SHAPES, POSITIONS,
};
use crate::shuffle::Shuffler;

/// Each shape twice; the pooled generator splits it into three volumes.
const SHAPE_POOL: [ShapeKind; POSITIONS * 2] = [
    ShapeKind::Circle,
    ShapeKind::Triangle,
    ShapeKind::Square,
    ShapeKind::Circle,
    ShapeKind::Triangle,
    ShapeKind::Square,
];

/// How candidate volumes are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GenerationMode {
    /// Shuffle a pool holding every shape twice and pair it off.
    Pooled,
    /// Pair a fresh shape permutation with the statues' shapes.
    #[default]
    Paired,
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GenerationMode::Pooled => "pooled",
            GenerationMode::Paired => "paired",
        })
    }
}

impl FromStr for GenerationMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pooled" | "pool" => Ok(GenerationMode::Pooled),
            "paired" | "pair" => Ok(GenerationMode::Paired),
            _ => Err(ParseError::Mode(s.to_string())),
        }
    }
}

/// Produces unsolved starting volumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generator {
    pub mode: GenerationMode,
    /// Random draws attempted before enumerating every candidate.
    pub retry_limit: usize,
}

impl Generator {
    pub fn new(mode: GenerationMode, retry_limit: usize) -> Self {
        Self { mode, retry_limit }
    }

    /// Generates a volume assignment for `shapes`.
    ///
    /// When `shapes` is `None` the candidate is returned unchecked; this is
    /// only used as a placeholder before any shapes are chosen.
    pub fn generate(
        &self,
        shuffler: &mut Shuffler,
        shapes: Option<&ShapeAssignment>,
        strategy: Strategy,
    ) -> Result<VolumeAssignment, GenerateError> {
        let Some(shapes) = shapes else {
            return Ok(self.draw(shuffler, None));
        };

        for attempt in 0..self.retry_limit {
            let candidate = self.draw(shuffler, Some(shapes));
            if !is_correct(shapes, &candidate, strategy) {
                debug!(?shapes, ?candidate, attempt, %strategy, "generated volumes");
                return Ok(candidate);
            }
            trace!(?candidate, attempt, "rejected solved candidate");
        }

        warn!(
            retry_limit = self.retry_limit,
            %strategy,
            mode = %self.mode,
            "retry limit reached, enumerating candidates"
        );
        let unsolved: Vec<VolumeAssignment> = candidates(self.mode, Some(shapes))
            .into_iter()
            .filter(|candidate| !is_correct(shapes, candidate, strategy))
            .collect();
        if unsolved.is_empty() {
            return Err(GenerateError::Exhausted { strategy });
        }
        Ok(unsolved[shuffler.index(unsolved.len())])
    }

    /// Draws one random candidate without any correctness check.
    fn draw(&self, shuffler: &mut Shuffler, shapes: Option<&ShapeAssignment>) -> VolumeAssignment {
        match self.mode {
            GenerationMode::Pooled => {
                let mut pool = SHAPE_POOL;
                shuffler.shuffle(&mut pool);
                pooled_volumes(&pool)
            }
            GenerationMode::Paired => {
                let draw = shuffler.shapes();
                paired_volumes(&draw, shapes.unwrap_or(&CANONICAL_SHAPES))
            }
        }
    }
}

/// Pairs consecutive pool entries into volumes.
fn pooled_volumes(pool: &[ShapeKind; POSITIONS * 2]) -> VolumeAssignment {
    std::array::from_fn(|i| VolumeKind::from_pair(pool[2 * i], pool[2 * i + 1]).weight())
}

/// Pairs `draw[i]` with `shapes[i]`.
fn paired_volumes(draw: &ShapeAssignment, shapes: &ShapeAssignment) -> VolumeAssignment {
    std::array::from_fn(|i| VolumeKind::from_pair(draw[i], shapes[i]).weight())
}

/// Calls `visit` with every permutation of `items`, using Heap's algorithm
/// iteratively.
fn for_each_permutation<T: Copy, const N: usize>(mut items: [T; N], mut visit: impl FnMut(&[T; N])) {
    let mut counters = [0usize; N];
    visit(&items);

    let mut i = 1;
    while i < N {
        if counters[i] < i {
            if i % 2 == 0 {
                items.swap(0, i);
            } else {
                items.swap(counters[i], i);
            }
            visit(&items);
            counters[i] += 1;
            i = 1;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }
}

/// Lists every distinct volume assignment `mode` can produce, sorted.
///
/// The paired mode pairs against `shapes`, or the canonical triple when none
/// are given; the pooled mode ignores `shapes`.
pub fn candidates(mode: GenerationMode, shapes: Option<&ShapeAssignment>) -> Vec<VolumeAssignment> {
    let mut seen: FxHashSet<VolumeAssignment> = FxHashSet::default();

    match mode {
        GenerationMode::Pooled => {
            for_each_permutation(SHAPE_POOL, |pool| {
                seen.insert(pooled_volumes(pool));
            });
        }
        GenerationMode::Paired => {
            let shapes = shapes.unwrap_or(&CANONICAL_SHAPES);
            for_each_permutation(ShapeKind::ALL, |draw| {
                seen.insert(paired_volumes(draw, shapes));
            });
        }
    }

    let mut listed: Vec<VolumeAssignment> = seen.into_iter().collect();
    listed.sort_unstable();
    listed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeKind::{Circle, Square, Triangle};

    const CTS: ShapeAssignment = [Circle, Triangle, Square];

    #[test]
    fn test_candidate_space_sizes() {
        assert_eq!(candidates(GenerationMode::Pooled, None).len(), 21);
        assert_eq!(candidates(GenerationMode::Paired, Some(&CTS)).len(), 6);
        assert_eq!(candidates(GenerationMode::Paired, None).len(), 6);
    }

    #[test]
    fn test_permutations_are_complete() {
        let mut seen = FxHashSet::default();
        let mut visits = 0;
        for_each_permutation([0, 1, 2, 3], |items| {
            visits += 1;
            seen.insert(*items);
        });
        assert_eq!(visits, 24);
        assert_eq!(seen.len(), 24);
    }

    #[test]
    fn test_pooled_uses_each_shape_twice() {
        let mut shuffler = Shuffler::seeded(11);
        let generator = Generator::new(GenerationMode::Pooled, 64);
        for strategy in Strategy::ALL {
            for _ in 0..100 {
                let shapes = shuffler.shapes();
                let volumes = generator
                    .generate(&mut shuffler, Some(&shapes), strategy)
                    .unwrap();
                // every shape appears twice, so the six weights sum to 14
                assert_eq!(volumes.iter().sum::<i32>(), 14);
                for volume in volumes {
                    assert!(VolumeKind::from_weight(volume).is_some());
                }
            }
        }
    }

    #[test]
    fn test_paired_volumes_contain_statue_shapes() {
        let mut shuffler = Shuffler::seeded(5);
        let generator = Generator::new(GenerationMode::Paired, 64);
        for _ in 0..100 {
            let shapes = shuffler.shapes();
            let volumes = generator
                .generate(&mut shuffler, Some(&shapes), Strategy::Mixed)
                .unwrap();
            for (volume, shape) in volumes.iter().zip(shapes) {
                assert!(crate::rules::contains_shape(*volume, shape));
            }
        }
    }

    #[test]
    fn test_generated_puzzles_are_never_solved() {
        let mut shuffler = Shuffler::seeded(99);
        for mode in [GenerationMode::Pooled, GenerationMode::Paired] {
            let generator = Generator::new(mode, 64);
            for strategy in Strategy::ALL {
                for _ in 0..200 {
                    let shapes = shuffler.shapes();
                    let volumes = generator
                        .generate(&mut shuffler, Some(&shapes), strategy)
                        .unwrap();
                    assert!(
                        !is_correct(&shapes, &volumes, strategy),
                        "{mode} generated a solved {strategy} puzzle: {volumes:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_zero_retries_falls_back_to_enumeration() {
        let mut shuffler = Shuffler::seeded(1);
        let generator = Generator::new(GenerationMode::Pooled, 0);
        for strategy in Strategy::ALL {
            let volumes = generator
                .generate(&mut shuffler, Some(&CTS), strategy)
                .unwrap();
            assert!(!is_correct(&CTS, &volumes, strategy));
            assert!(candidates(GenerationMode::Pooled, None).contains(&volumes));
        }
    }

    #[test]
    fn test_every_configuration_has_an_unsolved_start() {
        // including statue triples with repeated shapes
        for a in ShapeKind::ALL {
            for b in ShapeKind::ALL {
                for c in ShapeKind::ALL {
                    let shapes = [a, b, c];
                    for mode in [GenerationMode::Pooled, GenerationMode::Paired] {
                        for strategy in Strategy::ALL {
                            let unsolved = candidates(mode, Some(&shapes))
                                .into_iter()
                                .filter(|candidate| !is_correct(&shapes, candidate, strategy))
                                .count();
                            assert!(unsolved > 0, "{mode} {strategy} {shapes:?} has no start");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_unchecked_placeholder() {
        let mut shuffler = Shuffler::seeded(8);
        let generator = Generator::new(GenerationMode::Paired, 64);
        let volumes = generator.generate(&mut shuffler, None, Strategy::Mixed).unwrap();
        assert!(candidates(GenerationMode::Paired, None).contains(&volumes));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Pooled".parse(), Ok(GenerationMode::Pooled));
        assert_eq!("paired".parse(), Ok(GenerationMode::Paired));
        assert!("shuffled".parse::<GenerationMode>().is_err());
    }
}
