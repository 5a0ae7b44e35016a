use std::fmt::Display;

use itertools::Itertools;
use log::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordBankEntry {
  pub word: String,
  pub description: String,
}

impl Display for WordBankEntry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}: {}", self.word, self.description)
  }
}

/// Ordered list of candidate words and their clues.
///
/// Entries are keyed by their word text, and nothing stops two entries from
/// sharing it: `delete` removes every match and `find` returns the first.
#[derive(Clone, Debug, Default)]
pub struct WordBank {
  entries: Vec<WordBankEntry>,
}

impl WordBank {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_entries<W, D>(entries: impl IntoIterator<Item = (W, D)>) -> Self
  where
    W: Into<String>,
    D: Into<String>,
  {
    Self {
      entries: entries
        .into_iter()
        .map(|(word, description)| WordBankEntry {
          word: word.into(),
          description: description.into(),
        })
        .collect(),
    }
  }

  pub fn add(&mut self, word: impl Into<String>, description: impl Into<String>) {
    self.entries.push(WordBankEntry {
      word: word.into(),
      description: description.into(),
    });
  }

  /// Overwrites the entry at `index`. Does nothing and returns false if there
  /// is no such entry.
  pub fn update(
    &mut self,
    index: usize,
    word: impl Into<String>,
    description: impl Into<String>,
  ) -> bool {
    match self.entries.get_mut(index) {
      Some(entry) => {
        *entry = WordBankEntry {
          word: word.into(),
          description: description.into(),
        };
        true
      }
      None => {
        debug!("Ignoring update of missing word bank entry {index}");
        false
      }
    }
  }

  /// Removes every entry whose word is `word`, returning how many went.
  pub fn delete(&mut self, word: &str) -> usize {
    let before = self.entries.len();
    self.entries.retain(|entry| entry.word != word);
    before - self.entries.len()
  }

  pub fn list(&self) -> &[WordBankEntry] {
    &self.entries
  }

  pub fn iter(&self) -> impl Iterator<Item = &WordBankEntry> {
    self.entries.iter()
  }

  pub fn get(&self, index: usize) -> Option<&WordBankEntry> {
    self.entries.get(index)
  }

  pub fn find(&self, word: &str) -> Option<&WordBankEntry> {
    self.entries.iter().find(|entry| entry.word == word)
  }

  /// Index of the first entry matching both fields exactly.
  pub fn find_index(&self, word: &str, description: &str) -> Option<usize> {
    self
      .entries
      .iter()
      .find_position(|entry| entry.word == word && entry.description == description)
      .map(|(index, _)| index)
  }

  pub fn has(&self, word: &str) -> bool {
    self.find(word).is_some()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
