use std::sync::Arc;

use tokio::sync::Mutex;
use util::{grid::Grid, pos::Pos};

use crate::{
  engine::{Cell, GridEngine},
  error::{EditError, PlacementError},
  placed_word::{Direction, PlacedWord, PlacedWordId},
};

/// A `GridEngine` behind one async mutex. Each method holds the lock for its
/// whole check-then-act sequence, so no other task can mutate the grid between
/// validating a placement and committing it.
#[derive(Clone)]
pub struct SharedGridEngine {
  engine: Arc<Mutex<GridEngine>>,
}

impl SharedGridEngine {
  pub fn new(engine: GridEngine) -> Self {
    Self { engine: Arc::new(Mutex::new(engine)) }
  }

  /// Runs `f` with exclusive access to the engine.
  pub async fn with<F, T>(&self, f: F) -> T
  where
    F: FnOnce(&mut GridEngine) -> T,
  {
    f(&mut *self.engine.lock().await)
  }

  pub async fn try_place(
    &self,
    word: &str,
    origin: Pos,
    direction: Direction,
    clue: Option<String>,
  ) -> Result<PlacedWordId, PlacementError> {
    self
      .with(|engine| engine.try_place(word, origin, direction, clue))
      .await
  }

  pub async fn auto_place(
    &self,
    word: &str,
    direction: Direction,
    clue: Option<String>,
  ) -> Option<PlacedWordId> {
    self
      .with(|engine| engine.auto_place(word, direction, clue))
      .await
  }

  pub async fn begin_edit(&self, id: PlacedWordId) -> Result<(), EditError> {
    self.with(|engine| engine.begin_edit(id)).await
  }

  pub async fn commit_edit(
    &self,
    new_text: &str,
    new_direction: Direction,
    new_clue: Option<String>,
  ) -> Result<PlacedWordId, EditError> {
    self
      .with(|engine| engine.commit_edit(new_text, new_direction, new_clue))
      .await
  }

  pub async fn end_edit(&self) {
    self.with(GridEngine::end_edit).await
  }

  pub async fn clear(&self) {
    self.with(GridEngine::clear).await
  }

  pub async fn direction(&self) -> Direction {
    self.with(|engine| engine.direction()).await
  }

  pub async fn set_direction(&self, direction: Direction) {
    self.with(|engine| engine.set_direction(direction)).await
  }

  pub async fn find_word_at(&self, pos: Pos, preferred: Option<Direction>) -> Option<PlacedWord> {
    self
      .with(|engine| engine.find_word_at(pos, preferred).cloned())
      .await
  }

  pub async fn editing(&self) -> Option<PlacedWord> {
    self.with(|engine| engine.editing().cloned()).await
  }

  pub async fn placed_words(&self) -> Vec<PlacedWord> {
    self.with(|engine| engine.placed_words().to_vec()).await
  }

  /// Copy of the grid as it is right now.
  pub async fn snapshot(&self) -> Grid<Cell> {
    self.with(|engine| engine.grid().clone()).await
  }
}
