use thiserror::Error;
use util::pos::Pos;

use crate::placed_word::{Direction, PlacedWordId};

/// Why a proposed placement was rejected. Rejections are expected, frequent
/// outcomes and never leave the engine partially mutated.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
  #[error("Cannot place an empty word")]
  EmptyWord,
  #[error("{direction} word of length {length} at {origin} runs off the grid")]
  OutOfBounds {
    origin: Pos,
    length: usize,
    direction: Direction,
  },
  #[error("Conflict at {pos}: '{existing}' != '{required}'")]
  CharacterConflict {
    pos: Pos,
    existing: char,
    required: char,
  },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EditError {
  #[error("No word is being edited")]
  NotEditing,
  #[error("No placed word with id {0}")]
  UnknownWord(PlacedWordId),
  #[error(transparent)]
  Placement(#[from] PlacementError),
}
