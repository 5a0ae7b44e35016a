use log::{debug, info};
use util::{
  grid::{Grid, Gridlike, MutGridlike},
  pos::Pos,
};

use crate::{
  error::{EditError, PlacementError},
  placed_word::{span, Direction, PlacedWord, PlacedWordId},
};

/// A grid cell: a letter, or `None` when nothing has been written there.
pub type Cell = Option<char>;

/// Owns the letter grid and the words placed on it.
///
/// The grid is a projection of `placed_words`: every letter in it was written
/// by some placed word, and `rebuild_from_placed_words` can always recreate it
/// from the word list alone.
#[derive(Clone, Debug)]
pub struct GridEngine {
  grid: Grid<Cell>,
  placed_words: Vec<PlacedWord>,
  direction: Direction,
  editing: Option<PlacedWordId>,
  next_id: u64,
}

impl GridEngine {
  pub fn new(rows: u32, cols: u32) -> Self {
    Self {
      grid: Grid::new(rows, cols),
      placed_words: Vec::new(),
      direction: Direction::default(),
      editing: None,
      next_id: 0,
    }
  }

  pub fn rows(&self) -> u32 {
    self.grid.rows()
  }

  pub fn cols(&self) -> u32 {
    self.grid.cols()
  }

  pub fn grid(&self) -> &Grid<Cell> {
    &self.grid
  }

  pub fn cell(&self, pos: Pos) -> Cell {
    self.grid.get(pos).copied().flatten()
  }

  pub fn placed_words(&self) -> &[PlacedWord] {
    &self.placed_words
  }

  pub fn placed_word(&self, id: PlacedWordId) -> Option<&PlacedWord> {
    self.placed_words.iter().find(|word| word.id == id)
  }

  /// Direction used by callers that don't pick one explicitly.
  pub fn direction(&self) -> Direction {
    self.direction
  }

  pub fn set_direction(&mut self, direction: Direction) {
    self.direction = direction;
  }

  fn assign_new_id(&mut self) -> PlacedWordId {
    let id = PlacedWordId(self.next_id);
    self.next_id += 1;
    id
  }

  /// Cells from `origin`, inclusive, to the edge of the grid along
  /// `direction`. `origin` must be in bounds.
  fn cells_until_edge(&self, origin: Pos, direction: Direction) -> usize {
    match direction {
      Direction::Horizontal => self.cols() as usize - origin.col as usize,
      Direction::Vertical => self.rows() as usize - origin.row as usize,
    }
  }

  /// Validates placing `word` with its first letter at `origin`. Cells covered
  /// by the placed word `ignore` are treated as empty, so a word being edited
  /// never conflicts with itself.
  pub fn check_placement(
    &self,
    word: &str,
    origin: Pos,
    direction: Direction,
    ignore: Option<PlacedWordId>,
  ) -> Result<(), PlacementError> {
    let length = word.chars().count();
    if length == 0 {
      return Err(PlacementError::EmptyWord);
    }

    if !self.grid.in_bounds(origin) || length > self.cells_until_edge(origin, direction) {
      debug!("\"{word}\" at {origin} {direction} does not fit in the grid");
      return Err(PlacementError::OutOfBounds { origin, length, direction });
    }

    let ignore = ignore.and_then(|id| self.placed_word(id));
    for (pos, required) in span(origin, direction).zip(word.chars()) {
      if ignore.is_some_and(|ignored| ignored.contains(pos)) {
        continue;
      }
      match self.cell(pos) {
        Some(existing) if existing != required => {
          debug!("\"{word}\" conflicts at {pos}: {existing} != {required}");
          return Err(PlacementError::CharacterConflict { pos, existing, required });
        }
        _ => {}
      }
    }

    Ok(())
  }

  pub fn can_place(
    &self,
    word: &str,
    origin: Pos,
    direction: Direction,
    ignore: Option<PlacedWordId>,
  ) -> bool {
    self.check_placement(word, origin, direction, ignore).is_ok()
  }

  fn write_word(grid: &mut Grid<Cell>, word: &PlacedWord) {
    for (pos, letter) in word.letters() {
      if let Some(cell) = grid.get_mut(pos) {
        *cell = Some(letter);
      }
    }
  }

  /// Appends a placed word and writes its letters, overwriting whatever is
  /// under them. Nothing is validated and letters past the grid edge are
  /// dropped; use `try_place` to check first.
  pub fn place(
    &mut self,
    word: &str,
    origin: Pos,
    direction: Direction,
    clue: Option<String>,
  ) -> PlacedWordId {
    let id = self.assign_new_id();
    let placed = PlacedWord {
      id,
      text: word.to_owned(),
      origin,
      direction,
      clue,
    };
    Self::write_word(&mut self.grid, &placed);
    info!("Placed {placed}");
    self.placed_words.push(placed);
    id
  }

  pub fn try_place(
    &mut self,
    word: &str,
    origin: Pos,
    direction: Direction,
    clue: Option<String>,
  ) -> Result<PlacedWordId, PlacementError> {
    self.check_placement(word, origin, direction, None)?;
    Ok(self.place(word, origin, direction, clue))
  }

  /// Places `word` at the first position, scanning rows top to bottom and each
  /// row left to right, where it fits. Returns `None` without touching the
  /// grid if there is no such position.
  pub fn auto_place(
    &mut self,
    word: &str,
    direction: Direction,
    clue: Option<String>,
  ) -> Option<PlacedWordId> {
    let origin = self
      .grid
      .positions()
      .find(|&pos| self.can_place(word, pos, direction, None));
    match origin {
      Some(origin) => Some(self.place(word, origin, direction, clue)),
      None => {
        info!("No room for \"{word}\" placed {direction}");
        None
      }
    }
  }

  /// Clears the grid and rewrites every placed word in insertion order. Where
  /// two words disagree on a cell, the later one wins.
  pub fn rebuild_from_placed_words(&mut self) {
    self.grid.reset();
    for word in &self.placed_words {
      Self::write_word(&mut self.grid, word);
    }
  }

  pub fn clear(&mut self) {
    self.placed_words.clear();
    self.editing = None;
    self.rebuild_from_placed_words();
    info!("Cleared grid");
  }

  /// Finds the first placed word covering `pos`, trying words running in
  /// `preferred` first.
  pub fn find_word_at(&self, pos: Pos, preferred: Option<Direction>) -> Option<&PlacedWord> {
    preferred
      .and_then(|preferred| {
        self
          .placed_words
          .iter()
          .find(|word| word.direction == preferred && word.contains(pos))
      })
      .or_else(|| self.placed_words.iter().find(|word| word.contains(pos)))
  }

  pub fn begin_edit(&mut self, id: PlacedWordId) -> Result<(), EditError> {
    if self.placed_word(id).is_none() {
      return Err(EditError::UnknownWord(id));
    }
    self.editing = Some(id);
    Ok(())
  }

  pub fn editing(&self) -> Option<&PlacedWord> {
    self.editing.and_then(|id| self.placed_word(id))
  }

  /// Replaces the text, direction and clue of the word being edited, keeping
  /// its origin. On failure nothing changes and the edit stays open.
  pub fn commit_edit(
    &mut self,
    new_text: &str,
    new_direction: Direction,
    new_clue: Option<String>,
  ) -> Result<PlacedWordId, EditError> {
    let id = self.editing.ok_or(EditError::NotEditing)?;
    let origin = self
      .placed_word(id)
      .map(|word| word.origin)
      .ok_or(EditError::UnknownWord(id))?;

    self.check_placement(new_text, origin, new_direction, Some(id))?;

    let target = self
      .placed_words
      .iter_mut()
      .find(|word| word.id == id)
      .ok_or(EditError::UnknownWord(id))?;
    target.text = new_text.to_owned();
    target.direction = new_direction;
    target.clue = new_clue;
    info!("Edited {target}");

    self.editing = None;
    self.rebuild_from_placed_words();
    Ok(id)
  }

  pub fn end_edit(&mut self) {
    self.editing = None;
  }
}
