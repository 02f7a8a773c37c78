//! Puzzle session state machine.
//!
//! A [`PuzzleSession`] owns every piece of mutable game state and applies the
//! player's actions to it. Each action either succeeds or returns a
//! [`SessionError`] without touching the state.

use tracing::debug;

use crate::config::{GameConfig, OgreRule};
use crate::error::SessionError;
use crate::generator::Generator;
use crate::rules::{self, Strategy};
use crate::shapes::{ShapeAssignment, ShapeKind, VolumeAssignment, VolumeKind, POSITIONS};
use crate::shuffle::Shuffler;

/// A dissection in progress: `shape` was pulled out of the volume at
/// `position` and is waiting for a counter-shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DissectionMark {
    pub position: usize,
    pub shape: ShapeKind,
}

/// A shape a knight set down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DroppedShape {
    /// Unique within a session, increasing in drop order.
    pub id: u64,
    pub shape: ShapeKind,
}

/// Every action the player can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Restore the starting volumes.
    Reset,
    /// Draw new shapes and volumes.
    ResetAndRandomize,
    ToggleLetters,
    SetStrategy(Strategy),
    Dissect(usize),
    /// Kill the knight carrying this shape.
    Drop(ShapeKind),
    /// Kill the next knight in line.
    DropNext,
    PickUp(usize),
    LetExpire(usize),
    KillOgres,
}

/// Mutable state of one game.
#[derive(Debug, Clone)]
pub struct PuzzleSession {
    config: GameConfig,
    generator: Generator,
    shuffler: Shuffler,
    strategy: Strategy,
    shapes: ShapeAssignment,
    /// Volumes as generated; restored by a soft reset.
    initial_volumes: VolumeAssignment,
    volumes: VolumeAssignment,
    held: Option<ShapeKind>,
    dissection: Option<DissectionMark>,
    dropped: Vec<DroppedShape>,
    /// Knights still carrying a shape; the last one drops next.
    undropped: Vec<ShapeKind>,
    next_drop_id: u64,
    show_letters: bool,
}

impl PuzzleSession {
    /// Starts a session with a freshly generated puzzle.
    pub fn new(config: GameConfig) -> Result<Self, SessionError> {
        let mut shuffler = Shuffler::new(config.seed);
        let generator = config.generator();
        let shapes = shuffler.shapes();
        let volumes = generator.generate(&mut shuffler, Some(&shapes), config.strategy)?;
        Ok(Self::assemble(config, shuffler, shapes, volumes))
    }

    /// Starts a session on a known puzzle instead of a generated one.
    pub fn with_puzzle(
        config: GameConfig,
        shapes: ShapeAssignment,
        volumes: VolumeAssignment,
    ) -> Self {
        let shuffler = Shuffler::new(config.seed);
        Self::assemble(config, shuffler, shapes, volumes)
    }

    fn assemble(
        config: GameConfig,
        shuffler: Shuffler,
        shapes: ShapeAssignment,
        volumes: VolumeAssignment,
    ) -> Self {
        let mut session = Self {
            generator: config.generator(),
            strategy: config.strategy,
            config,
            shuffler,
            shapes,
            initial_volumes: volumes,
            volumes,
            held: None,
            dissection: None,
            dropped: Vec::new(),
            undropped: Vec::new(),
            next_drop_id: 0,
            show_letters: false,
        };
        session.clear_hands();
        session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn shapes(&self) -> &ShapeAssignment {
        &self.shapes
    }

    pub fn initial_volumes(&self) -> &VolumeAssignment {
        &self.initial_volumes
    }

    pub fn volumes(&self) -> &VolumeAssignment {
        &self.volumes
    }

    /// The named volume at each position, if its weight is one.
    pub fn volume_kinds(&self) -> [Option<VolumeKind>; POSITIONS] {
        self.volumes.map(VolumeKind::from_weight)
    }

    pub fn held(&self) -> Option<ShapeKind> {
        self.held
    }

    pub fn dissection(&self) -> Option<DissectionMark> {
        self.dissection
    }

    pub fn dropped(&self) -> &[DroppedShape] {
        &self.dropped
    }

    pub fn undropped(&self) -> &[ShapeKind] {
        &self.undropped
    }

    pub fn show_letters(&self) -> bool {
        self.show_letters
    }

    /// Whether the current volumes solve the puzzle under the active strategy.
    pub fn is_solved(&self) -> bool {
        rules::is_correct(&self.shapes, &self.volumes, self.strategy)
    }

    /// Whether the "Dissect" button at `position` is enabled.
    pub fn can_dissect(&self, position: usize) -> bool {
        rules::can_dissect(
            &self.volumes,
            self.held,
            self.dissection.map(|mark| mark.position),
            position,
        )
    }

    pub fn can_kill_ogres(&self) -> bool {
        match self.config.ogres {
            OgreRule::AllCleared => self.undropped.is_empty() && self.dropped.is_empty(),
            OgreRule::UndroppedEmpty => self.undropped.is_empty(),
        }
    }

    /// Whether `action` would currently be accepted.
    pub fn available(&self, action: &Action) -> bool {
        match *action {
            Action::Reset
            | Action::ResetAndRandomize
            | Action::ToggleLetters
            | Action::SetStrategy(_) => true,
            Action::Dissect(position) => self.can_dissect(position),
            Action::Drop(shape) => self.undropped.contains(&shape),
            Action::DropNext => !self.undropped.is_empty(),
            Action::PickUp(index) => self.held.is_none() && index < self.dropped.len(),
            Action::LetExpire(index) => self.config.allow_expiry && index < self.dropped.len(),
            Action::KillOgres => self.can_kill_ogres(),
        }
    }

    /// Applies one player action.
    pub fn apply(&mut self, action: Action) -> Result<(), SessionError> {
        let result = match action {
            Action::Reset => {
                self.soft_reset();
                Ok(())
            }
            Action::ResetAndRandomize => self.hard_reset(),
            Action::ToggleLetters => {
                self.toggle_letters();
                Ok(())
            }
            Action::SetStrategy(strategy) => {
                self.set_strategy(strategy);
                Ok(())
            }
            Action::Dissect(position) => self.dissect(position),
            Action::Drop(shape) => self.drop_shape(shape),
            Action::DropNext => self.drop_next().map(|_| ()),
            Action::PickUp(index) => self.pick_up(index),
            Action::LetExpire(index) => self.let_expire(index),
            Action::KillOgres => self.kill_ogres(),
        };
        if let Err(err) = &result {
            debug!(?action, %err, "rejected action");
        }
        result
    }

    /// Draws new shapes and volumes and clears everything else.
    pub fn hard_reset(&mut self) -> Result<(), SessionError> {
        let shapes = self.shuffler.shapes();
        let volumes = self
            .generator
            .generate(&mut self.shuffler, Some(&shapes), self.strategy)?;
        self.shapes = shapes;
        self.initial_volumes = volumes;
        self.volumes = volumes;
        self.clear_hands();
        debug!(?shapes, ?volumes, strategy = %self.strategy, "hard reset");
        Ok(())
    }

    /// Restores the starting volumes and clears everything else.
    pub fn soft_reset(&mut self) {
        self.volumes = self.initial_volumes;
        self.clear_hands();
        debug!(volumes = ?self.volumes, "soft reset");
    }

    fn clear_hands(&mut self) {
        self.held = None;
        self.dissection = None;
        self.dropped.clear();
        self.undropped = self.shuffler.shapes().to_vec();
    }

    pub fn toggle_letters(&mut self) {
        self.show_letters = !self.show_letters;
    }

    /// Changes the strategy for later checks and generations. The current
    /// puzzle is kept.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
        debug!(%strategy, "strategy changed");
    }

    /// Begins a dissection at `position`, or completes the one in progress by
    /// swapping shapes between the two volumes.
    pub fn dissect(&mut self, position: usize) -> Result<(), SessionError> {
        if position >= POSITIONS {
            return Err(SessionError::PositionOutOfRange(position));
        }
        let held = self.held.ok_or(SessionError::NothingHeld)?;
        if let Some(mark) = self.dissection {
            if mark.position == position {
                return Err(SessionError::SamePosition(position));
            }
        }
        if !rules::contains_shape(self.volumes[position], held) {
            return Err(SessionError::NotDissectable { position, held });
        }

        match self.dissection.take() {
            None => {
                self.dissection = Some(DissectionMark {
                    position,
                    shape: held,
                });
                debug!(position, %held, "dissection started");
            }
            Some(mark) => {
                let extracted = mark.shape.weight();
                let inserted = held.weight();
                self.volumes[mark.position] += inserted - extracted;
                self.volumes[position] += extracted - inserted;
                debug!(
                    from = mark.position,
                    to = position,
                    extracted = %mark.shape,
                    inserted = %held,
                    volumes = ?self.volumes,
                    "dissection completed"
                );
            }
        }
        self.held = None;
        Ok(())
    }

    /// Kills the knight carrying `shape`, which drops it on the ground.
    pub fn drop_shape(&mut self, shape: ShapeKind) -> Result<(), SessionError> {
        let index = self
            .undropped
            .iter()
            .position(|&candidate| candidate == shape)
            .ok_or(SessionError::NotUndropped(shape))?;
        self.undropped.remove(index);
        self.push_dropped(shape);
        Ok(())
    }

    /// Kills the next knight in line and returns the shape it dropped.
    pub fn drop_next(&mut self) -> Result<ShapeKind, SessionError> {
        let shape = self.undropped.pop().ok_or(SessionError::NoKnightsLeft)?;
        self.push_dropped(shape);
        Ok(shape)
    }

    fn push_dropped(&mut self, shape: ShapeKind) {
        let id = self.next_drop_id;
        self.next_drop_id += 1;
        self.dropped.push(DroppedShape { id, shape });
        debug!(id, %shape, "shape dropped");
    }

    /// Picks up the dropped shape at `index`. The hand must be empty.
    pub fn pick_up(&mut self, index: usize) -> Result<(), SessionError> {
        if let Some(held) = self.held {
            return Err(SessionError::AlreadyHolding(held));
        }
        self.check_dropped_index(index)?;
        let picked = self.dropped.remove(index);
        self.held = Some(picked.shape);
        debug!(index, shape = %picked.shape, "picked up");
        Ok(())
    }

    /// Discards the dropped shape at `index`.
    pub fn let_expire(&mut self, index: usize) -> Result<(), SessionError> {
        if !self.config.allow_expiry {
            return Err(SessionError::ExpiryDisabled);
        }
        self.check_dropped_index(index)?;
        let expired = self.dropped.remove(index);
        debug!(index, shape = %expired.shape, "dropped shape expired");
        Ok(())
    }

    fn check_dropped_index(&self, index: usize) -> Result<(), SessionError> {
        if index < self.dropped.len() {
            Ok(())
        } else {
            Err(SessionError::DroppedOutOfRange {
                index,
                len: self.dropped.len(),
            })
        }
    }

    /// Brings in a fresh set of knights.
    pub fn kill_ogres(&mut self) -> Result<(), SessionError> {
        if !self.can_kill_ogres() {
            return Err(SessionError::OgresUnavailable);
        }
        self.undropped = self.shuffler.shapes().to_vec();
        debug!(undropped = ?self.undropped, "ogres killed");
        Ok(())
    }
}
