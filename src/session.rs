use itertools::Itertools;
use log::debug;
use thiserror::Error;
use util::{grid::Gridlike, pos::Pos};
use xword_bank::word_bank::{WordBank, WordBankEntry};
use xword_grid::{
  engine::GridEngine,
  error::{EditError, PlacementError},
  placed_word::{Direction, PlacedWord, PlacedWordId},
  shared::SharedGridEngine,
};

#[derive(Debug, Error)]
pub enum SessionError {
  #[error("Select a cell in the grid first")]
  NoActiveCell,
  #[error("Enter a word to place")]
  EmptyInput,
  #[error("Cell {0} is outside the grid")]
  OffGrid(Pos),
  #[error("Both a word and a description are required")]
  MissingBankField,
  #[error("No word bank entry at index {0}")]
  NoSuchBankEntry(usize),
  #[error("No room for \"{word}\" placed {direction}")]
  NoRoom { word: String, direction: Direction },
  #[error("Word can't go there: {0}")]
  Placement(#[from] PlacementError),
  #[error("Word can't go there: {0}")]
  Edit(#[from] EditError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
  /// The click landed on a placed word, which is now being edited.
  Editing(PlacedWord),
  /// The click landed on an empty area; the next submitted word goes here.
  Selected(Pos),
}

const DEMO_WORDS: [(&str, &str); 4] = [
  ("cook", "a profession"),
  ("tea", "tasty, makes me human"),
  ("apples", "with pineapples"),
  ("sausages", "breakfast links"),
];

/// Selection, highlight and form state for one user working on a grid and
/// word bank. None of this lives in the engine; the engine only sees the
/// placements and edits this state turns into.
pub struct Session {
  engine: SharedGridEngine,
  bank: WordBank,
  active_cell: Option<Pos>,
  highlighted: Vec<Pos>,
  editing_bank_index: Option<usize>,
}

impl Session {
  pub fn new(rows: u32, cols: u32, direction: Direction) -> Self {
    let mut engine = GridEngine::new(rows, cols);
    engine.set_direction(direction);
    Self {
      engine: SharedGridEngine::new(engine),
      bank: WordBank::new(),
      active_cell: None,
      highlighted: Vec::new(),
      editing_bank_index: None,
    }
  }

  pub fn seed_demo(&mut self) {
    for (word, description) in DEMO_WORDS {
      self.bank.add(word, description);
    }
  }

  pub fn engine(&self) -> &SharedGridEngine {
    &self.engine
  }

  pub fn bank(&self) -> &WordBank {
    &self.bank
  }

  pub fn active_cell(&self) -> Option<Pos> {
    self.active_cell
  }

  pub fn highlighted(&self) -> &[Pos] {
    &self.highlighted
  }

  pub fn editing_bank_index(&self) -> Option<usize> {
    self.editing_bank_index
  }

  fn clear_selection(&mut self) {
    self.active_cell = None;
    self.highlighted.clear();
  }

  /// A click on a placed word starts editing it; a click anywhere else selects
  /// that cell for a new word.
  pub async fn click(&mut self, pos: Pos) -> Result<ClickOutcome, SessionError> {
    let outcome = self
      .engine
      .with(|engine| {
        if !engine.grid().in_bounds(pos) {
          return Err(SessionError::OffGrid(pos));
        }

        match engine.find_word_at(pos, Some(engine.direction())).cloned() {
          Some(word) => {
            engine.begin_edit(word.id())?;
            engine.set_direction(word.direction());
            Ok(ClickOutcome::Editing(word))
          }
          None => {
            engine.end_edit();
            Ok(ClickOutcome::Selected(pos))
          }
        }
      })
      .await?;

    match &outcome {
      ClickOutcome::Editing(word) => {
        debug!("Editing {word}");
        self.active_cell = Some(word.origin());
        self.highlighted = word.cells().collect();
      }
      ClickOutcome::Selected(pos) => {
        self.active_cell = Some(*pos);
        self.highlighted = vec![*pos];
      }
    }
    Ok(outcome)
  }

  pub async fn direction(&self) -> Direction {
    self.engine.direction().await
  }

  pub async fn set_direction(&self, direction: Direction) {
    self.engine.set_direction(direction).await
  }

  pub async fn toggle_direction(&self) -> Direction {
    self
      .engine
      .with(|engine| {
        let direction = engine.direction().toggle();
        engine.set_direction(direction);
        direction
      })
      .await
  }

  /// Places `word` at the selected cell, or rewrites the word being edited,
  /// running in the current direction. The selection is dropped on success
  /// and kept on failure so the user can try again.
  pub async fn submit(&mut self, word: &str) -> Result<PlacedWordId, SessionError> {
    let active_cell = self.active_cell.ok_or(SessionError::NoActiveCell)?;
    let word = word.trim();
    if word.is_empty() {
      return Err(SessionError::EmptyInput);
    }

    let id = self
      .engine
      .with(|engine| match engine.editing() {
        Some(editing) => {
          let clue = editing.clue().map(str::to_owned);
          let direction = engine.direction();
          engine
            .commit_edit(word, direction, clue)
            .map_err(SessionError::from)
        }
        None => {
          let direction = engine.direction();
          engine
            .try_place(word, active_cell, direction, None)
            .map_err(SessionError::from)
        }
      })
      .await?;

    self.clear_selection();
    Ok(id)
  }

  pub async fn cancel(&mut self) {
    self.engine.end_edit().await;
    self.clear_selection();
  }

  pub async fn auto_place(
    &mut self,
    word: &str,
    direction: Direction,
    clue: Option<String>,
  ) -> Result<PlacedWordId, SessionError> {
    let word = word.trim();
    if word.is_empty() {
      return Err(SessionError::EmptyInput);
    }
    self
      .engine
      .auto_place(word, direction, clue)
      .await
      .ok_or_else(|| SessionError::NoRoom { word: word.to_owned(), direction })
  }

  pub async fn clear_grid(&mut self) {
    self.engine.clear().await;
    self.clear_selection();
  }

  /// Adds a word bank entry, or overwrites the selected one.
  pub fn bank_submit(&mut self, word: &str, description: &str) -> Result<(), SessionError> {
    let (word, description) = (word.trim(), description.trim());
    if word.is_empty() || description.is_empty() {
      return Err(SessionError::MissingBankField);
    }

    match self.editing_bank_index.take() {
      Some(index) => {
        self.bank.update(index, word, description);
      }
      None => self.bank.add(word, description),
    }
    Ok(())
  }

  /// Overwrites the entry at `index` itself, whatever other rows share its
  /// contents.
  pub fn bank_update(
    &mut self,
    index: usize,
    word: &str,
    description: &str,
  ) -> Result<(), SessionError> {
    let (word, description) = (word.trim(), description.trim());
    if word.is_empty() || description.is_empty() {
      return Err(SessionError::MissingBankField);
    }
    if !self.bank.update(index, word, description) {
      return Err(SessionError::NoSuchBankEntry(index));
    }
    Ok(())
  }

  /// Selects the entry shown at `index` for editing. The selection resolves to
  /// the first entry with the same word and description, so of two identical
  /// rows the earlier one is the one that gets updated.
  pub fn select_bank_entry(&mut self, index: usize) -> Result<&WordBankEntry, SessionError> {
    let entry = self
      .bank
      .get(index)
      .ok_or(SessionError::NoSuchBankEntry(index))?;
    let resolved = self
      .bank
      .find_index(&entry.word, &entry.description)
      .unwrap_or(index);
    self.editing_bank_index = Some(resolved);
    self
      .bank
      .get(resolved)
      .ok_or(SessionError::NoSuchBankEntry(resolved))
  }

  /// Deletes every bank entry spelled `word`. Words already on the grid stay
  /// there.
  pub fn bank_delete(&mut self, word: &str) -> usize {
    self.editing_bank_index = None;
    self.bank.delete(word)
  }

  /// The grid with `_` for empty cells and brackets around highlighted ones.
  pub async fn render_grid(&self) -> String {
    let grid = self.engine.snapshot().await;
    (0..grid.rows())
      .map(|row| {
        (0..grid.cols())
          .map(|col| {
            let pos = Pos::new(row as i32, col as i32);
            let letter = grid.get(pos).copied().flatten().unwrap_or('_');
            if self.highlighted.contains(&pos) {
              format!("[{letter}]")
            } else {
              format!(" {letter} ")
            }
          })
          .join("")
      })
      .join("\n")
  }

  pub async fn render_placed_words(&self) -> String {
    self
      .engine
      .placed_words()
      .await
      .iter()
      .map(|word| word.to_string())
      .join("\n")
  }

  pub fn render_bank(&self) -> String {
    self
      .bank
      .iter()
      .enumerate()
      .map(|(index, entry)| {
        let marker = if self.editing_bank_index == Some(index) { '*' } else { ' ' };
        format!("{marker}{index:>3} {entry}")
      })
      .join("\n")
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use googletest::prelude::*;
  use util::pos::Pos;
  use xword_grid::placed_word::Direction;

  use super::{ClickOutcome, Session, SessionError};

  #[tokio::test]
  async fn test_click_empty_then_submit() {
    let mut session = Session::new(10, 10, Direction::Horizontal);
    let outcome = session.click(Pos::new(2, 2)).await.unwrap();
    assert_that!(outcome, eq(&ClickOutcome::Selected(Pos::new(2, 2))));
    assert_that!(session.highlighted().to_vec(), container_eq([Pos::new(2, 2)]));

    session.submit("  CAT ").await.unwrap();
    let words = session.engine().placed_words().await;
    assert_that!(words.len(), eq(1));
    assert_that!(words[0].text(), eq("CAT"));
    assert_that!(session.active_cell(), none());
    assert_that!(session.highlighted().is_empty(), eq(true));
  }

  #[tokio::test]
  async fn test_submit_requires_selection_and_word() {
    let mut session = Session::new(5, 5, Direction::Horizontal);
    assert!(matches!(
      session.submit("CAT").await,
      Err(SessionError::NoActiveCell)
    ));

    session.click(Pos::zero()).await.unwrap();
    assert!(matches!(
      session.submit("   ").await,
      Err(SessionError::EmptyInput)
    ));
    assert_that!(session.active_cell(), some(eq(Pos::zero())));
  }

  #[tokio::test]
  async fn test_rejected_submit_keeps_selection() {
    let mut session = Session::new(10, 10, Direction::Horizontal);
    session.click(Pos::new(2, 2)).await.unwrap();
    session.submit("CAT").await.unwrap();

    session.set_direction(Direction::Vertical).await;
    session.click(Pos::new(0, 5)).await.unwrap();
    session.submit("CAR").await.unwrap();

    // (2, 4) holds CAT's 'T'; a vertical "CAR" from (0, 4) needs an 'R' there.
    session.click(Pos::new(0, 4)).await.unwrap();
    assert!(matches!(
      session.submit("CAR").await,
      Err(SessionError::Placement(_))
    ));
    assert_that!(session.active_cell(), some(eq(Pos::new(0, 4))));
    assert_that!(session.engine().placed_words().await.len(), eq(2));
  }

  #[tokio::test]
  async fn test_click_on_word_edits_it() {
    let mut session = Session::new(10, 10, Direction::Vertical);
    let id = session
      .auto_place("DOG", Direction::Horizontal, Some("pet".to_owned()))
      .await
      .unwrap();

    let outcome = session.click(Pos::new(0, 1)).await.unwrap();
    assert!(matches!(outcome, ClickOutcome::Editing(word) if word.id() == id));
    assert_that!(session.direction().await, eq(Direction::Horizontal));
    assert_that!(session.active_cell(), some(eq(Pos::zero())));
    assert_that!(
      session.highlighted().to_vec(),
      container_eq([Pos::new(0, 0), Pos::new(0, 1), Pos::new(0, 2)])
    );

    session.set_direction(Direction::Vertical).await;
    assert_that!(session.submit("DOGS").await.unwrap(), eq(id));

    let words = session.engine().placed_words().await;
    assert_that!(words.len(), eq(1));
    assert_that!(words[0].text(), eq("DOGS"));
    assert_that!(words[0].direction(), eq(Direction::Vertical));
    // The clue survives the edit.
    assert_that!(words[0].clue(), some(eq("pet")));
    assert_that!(session.engine().editing().await.map(|word| word.id()), none());
  }

  #[tokio::test]
  async fn test_click_elsewhere_abandons_edit() {
    let mut session = Session::new(6, 6, Direction::Horizontal);
    session
      .auto_place("TEA", Direction::Horizontal, None)
      .await
      .unwrap();
    session.click(Pos::zero()).await.unwrap();
    assert_that!(session.engine().editing().await.is_some(), eq(true));

    session.click(Pos::new(4, 4)).await.unwrap();
    assert_that!(session.engine().editing().await.map(|word| word.id()), none());
    session.submit("HI").await.unwrap();
    assert_that!(session.engine().placed_words().await.len(), eq(2));
  }

  #[tokio::test]
  async fn test_click_off_grid() {
    let mut session = Session::new(3, 3, Direction::Horizontal);
    assert!(matches!(
      session.click(Pos::new(3, 0)).await,
      Err(SessionError::OffGrid(_))
    ));
    assert_that!(session.active_cell(), none());
  }

  #[tokio::test]
  async fn test_auto_place_no_room() {
    let mut session = Session::new(2, 2, Direction::Horizontal);
    assert!(matches!(
      session.auto_place("TOOLONG", Direction::Vertical, None).await,
      Err(SessionError::NoRoom { .. })
    ));
  }

  #[tokio::test]
  async fn test_cancel_and_clear() {
    let mut session = Session::new(5, 5, Direction::Horizontal);
    session
      .auto_place("ONE", Direction::Horizontal, None)
      .await
      .unwrap();
    session.click(Pos::zero()).await.unwrap();
    session.cancel().await;
    assert_that!(session.active_cell(), none());
    assert_that!(session.engine().editing().await.map(|word| word.id()), none());

    session.click(Pos::new(3, 3)).await.unwrap();
    session.clear_grid().await;
    assert_that!(session.engine().placed_words().await.len(), eq(0));
    assert_that!(session.active_cell(), none());
    assert_that!(
      session.render_grid().await.chars().filter(|&c| c == '_').count(),
      eq(25)
    );
  }

  #[tokio::test]
  async fn test_bank_add_select_update() {
    let mut session = Session::new(5, 5, Direction::Horizontal);
    session.seed_demo();
    assert_that!(session.bank().len(), eq(4));

    assert!(matches!(
      session.bank_submit("tea", " "),
      Err(SessionError::MissingBankField)
    ));

    session.select_bank_entry(1).unwrap();
    assert_that!(session.editing_bank_index(), some(eq(1)));
    session.bank_submit("coffee", "also hot").unwrap();
    assert_that!(session.editing_bank_index(), none());
    assert_that!(
      session.bank().get(1).map(|entry| entry.word.as_str()),
      some(eq("coffee"))
    );
    assert_that!(session.bank().len(), eq(4));

    session.bank_submit(" jam ", " sweet ").unwrap();
    assert_that!(
      session.bank().get(4).map(|entry| entry.description.as_str()),
      some(eq("sweet"))
    );
    assert!(matches!(
      session.select_bank_entry(9),
      Err(SessionError::NoSuchBankEntry(9))
    ));
  }

  #[tokio::test]
  async fn test_selecting_duplicate_row_resolves_to_first() {
    let mut session = Session::new(5, 5, Direction::Horizontal);
    session.bank_submit("tea", "hot drink").unwrap();
    session.bank_submit("tea", "hot drink").unwrap();

    session.select_bank_entry(1).unwrap();
    assert_that!(session.editing_bank_index(), some(eq(0)));
  }

  #[tokio::test]
  async fn test_bank_update_targets_exact_row() {
    let mut session = Session::new(5, 5, Direction::Horizontal);
    session.bank_submit("tea", "hot").unwrap();
    session.bank_submit("tea", "hot").unwrap();

    session.bank_update(1, "coffee", "warm").unwrap();
    assert_that!(
      session.bank().get(0).map(|entry| entry.word.as_str()),
      some(eq("tea"))
    );
    assert_that!(
      session.bank().get(1).map(|entry| entry.word.as_str()),
      some(eq("coffee"))
    );
    assert!(matches!(
      session.bank_update(2, "jam", "sweet"),
      Err(SessionError::NoSuchBankEntry(2))
    ));
    assert!(matches!(
      session.bank_update(0, "jam", ""),
      Err(SessionError::MissingBankField)
    ));
    assert_that!(session.bank().len(), eq(2));
  }

  #[tokio::test]
  async fn test_bank_delete_keeps_grid_word() {
    let mut session = Session::new(5, 5, Direction::Horizontal);
    session.bank_submit("tea", "hot drink").unwrap();
    session
      .auto_place("tea", Direction::Horizontal, Some("hot drink".to_owned()))
      .await
      .unwrap();

    assert_that!(session.bank_delete("tea"), eq(1));
    assert_that!(session.bank().is_empty(), eq(true));
    assert_that!(session.engine().placed_words().await.len(), eq(1));
  }

  #[tokio::test]
  async fn test_render_grid_marks_highlight() {
    let mut session = Session::new(2, 3, Direction::Horizontal);
    session.click(Pos::new(0, 0)).await.unwrap();
    session.submit("AB").await.unwrap();
    session.click(Pos::new(1, 2)).await.unwrap();

    assert_that!(session.render_grid().await, eq(" A  B  _ \n _  _ [_]"));
  }
}
