use std::{fmt::Display, str::FromStr};

use util::{
  error::XWordError,
  pos::{Diff, Pos},
};

#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum Direction {
  #[default]
  Horizontal,
  Vertical,
}

impl Direction {
  /// Offset between consecutive letters of a word laid out in this direction.
  pub const fn step(self) -> Diff {
    match self {
      Direction::Horizontal => Diff::DCOL,
      Direction::Vertical => Diff::DROW,
    }
  }

  pub const fn toggle(self) -> Self {
    match self {
      Direction::Horizontal => Direction::Vertical,
      Direction::Vertical => Direction::Horizontal,
    }
  }
}

impl Display for Direction {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{}",
      match self {
        Direction::Horizontal => "horizontal",
        Direction::Vertical => "vertical",
      }
    )
  }
}

impl FromStr for Direction {
  type Err = XWordError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "h" | "horizontal" | "across" => Ok(Direction::Horizontal),
      "v" | "vertical" | "down" => Ok(Direction::Vertical),
      _ => Err(XWordError::Parse(format!("Unrecognized direction \"{s}\""))),
    }
  }
}

/// Stable handle to a placed word. Handles are never reused by an engine, so
/// a handle held across a `clear()` simply stops resolving.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlacedWordId(pub(crate) u64);

impl Display for PlacedWordId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "#{}", self.0)
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedWord {
  pub(crate) id: PlacedWordId,
  pub(crate) text: String,
  pub(crate) origin: Pos,
  pub(crate) direction: Direction,
  pub(crate) clue: Option<String>,
}

impl PlacedWord {
  pub fn id(&self) -> PlacedWordId {
    self.id
  }

  pub fn text(&self) -> &str {
    &self.text
  }

  pub fn origin(&self) -> Pos {
    self.origin
  }

  pub fn direction(&self) -> Direction {
    self.direction
  }

  pub fn clue(&self) -> Option<&str> {
    self.clue.as_deref()
  }

  /// Length in characters, not bytes.
  pub fn len(&self) -> usize {
    self.text.chars().count()
  }

  pub fn is_empty(&self) -> bool {
    self.text.is_empty()
  }

  /// Every cell covered by this word, in letter order.
  pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
    span(self.origin, self.direction).take(self.len())
  }

  pub fn letters(&self) -> impl Iterator<Item = (Pos, char)> + '_ {
    span(self.origin, self.direction).zip(self.text.chars())
  }

  pub fn contains(&self, pos: Pos) -> bool {
    let len = self.len() as i32;
    match self.direction {
      Direction::Horizontal => {
        pos.row == self.origin.row && (self.origin.col..self.origin.col + len).contains(&pos.col)
      }
      Direction::Vertical => {
        pos.col == self.origin.col && (self.origin.row..self.origin.row + len).contains(&pos.row)
      }
    }
  }
}

impl Display for PlacedWord {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} {} at {} {}", self.id, self.text, self.origin, self.direction)?;
    if let Some(clue) = &self.clue {
      write!(f, ": {clue}")?;
    }
    Ok(())
  }
}

/// Unbounded run of cells starting at `origin` and stepping along `direction`.
pub fn span(origin: Pos, direction: Direction) -> impl Iterator<Item = Pos> {
  (0..).map(move |idx| origin + idx * direction.step())
}
