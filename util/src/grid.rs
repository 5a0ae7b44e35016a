use std::fmt::{Debug, Display};

use itertools::Itertools;

use crate::pos::Pos;

pub trait Gridlike<T> {
  fn rows(&self) -> u32;
  fn cols(&self) -> u32;
  fn in_bounds(&self, pos: Pos) -> bool;

  fn get(&self, pos: Pos) -> Option<&T>;

  fn iter_row<'a, 'b>(&'a self, row: u32) -> impl Iterator<Item = &'b T>
  where
    'a: 'b,
    T: 'a;
}

pub trait MutGridlike<T>: Gridlike<T> {
  fn get_mut(&mut self, pos: Pos) -> Option<&mut T>;

  /// Resets every cell to `T::default()`.
  fn reset(&mut self)
  where
    T: Default;
}

/// Row-major `rows x cols` matrix.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid<T> {
  cells: Vec<T>,
  rows: u32,
  cols: u32,
}

impl<T> Grid<T> {
  fn idx(&self, pos: Pos) -> usize {
    debug_assert!(self.in_bounds(pos));
    pos.col as usize + pos.row as usize * self.cols as usize
  }

  pub fn positions(&self) -> impl Iterator<Item = Pos> {
    let cols = self.cols;
    (0..self.rows as i32).flat_map(move |row| (0..cols as i32).map(move |col| Pos { row, col }))
  }

  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self.cells.iter()
  }

  pub fn map<F, U>(&self, f: F) -> Grid<U>
  where
    F: FnMut(&T) -> U,
  {
    Grid {
      cells: self.cells.iter().map(f).collect(),
      rows: self.rows,
      cols: self.cols,
    }
  }
}

impl<T> Grid<T>
where
  T: Default,
{
  pub fn new(rows: u32, cols: u32) -> Self {
    Self {
      cells: (0..rows as usize * cols as usize).map(|_| T::default()).collect(),
      rows,
      cols,
    }
  }
}

impl<T> Gridlike<T> for Grid<T> {
  fn rows(&self) -> u32 {
    self.rows
  }

  fn cols(&self) -> u32 {
    self.cols
  }

  fn in_bounds(&self, pos: Pos) -> bool {
    pos.row >= 0 && pos.row < self.rows as i32 && pos.col >= 0 && pos.col < self.cols as i32
  }

  fn get(&self, pos: Pos) -> Option<&T> {
    self
      .in_bounds(pos)
      .then(|| self.cells.get(self.idx(pos)))
      .flatten()
  }

  fn iter_row<'a, 'b>(&'a self, row: u32) -> impl Iterator<Item = &'b T>
  where
    'a: 'b,
    T: 'a,
  {
    let row = row as i32;
    (0..self.cols).flat_map(move |col| self.get(Pos { row, col: col as i32 }))
  }
}

impl<T> MutGridlike<T> for Grid<T> {
  fn get_mut(&mut self, pos: Pos) -> Option<&mut T> {
    self
      .in_bounds(pos)
      .then(|| {
        let index = self.idx(pos);
        self.cells.get_mut(index)
      })
      .flatten()
  }

  fn reset(&mut self)
  where
    T: Default,
  {
    self.cells.iter_mut().for_each(|cell| *cell = T::default());
  }
}

impl<T: Debug> Debug for Grid<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    (0..self.rows).try_fold((), |_, row| {
      self.iter_row(row).try_fold((), |_, t| write!(f, "{t:?} "))?;
      writeln!(f)
    })
  }
}

impl<T: Display> Display for Grid<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    (0..self.rows).try_fold((), |_, row| writeln!(f, "{}", self.iter_row(row).join(" ")))
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use googletest::prelude::*;

  use crate::pos::Pos;

  use super::{Grid, Gridlike, MutGridlike};

  #[gtest]
  fn test_bounds() {
    let grid: Grid<Option<char>> = Grid::new(2, 3);
    expect_true!(grid.in_bounds(Pos::new(1, 2)));
    expect_false!(grid.in_bounds(Pos::new(2, 0)));
    expect_false!(grid.in_bounds(Pos::new(0, 3)));
    expect_false!(grid.in_bounds(Pos::new(-1, 0)));
    expect_that!(grid.get(Pos::new(0, -1)), none());
  }

  #[gtest]
  fn test_row_major_layout() {
    let mut grid: Grid<char> = Grid::new(2, 3);
    for (pos, letter) in grid.positions().collect::<Vec<_>>().into_iter().zip('a'..) {
      *grid.get_mut(pos).unwrap() = letter;
    }
    expect_that!(grid.get(Pos::new(1, 0)), some(eq(&'d')));
    expect_that!(
      grid.iter_row(0).cloned().collect::<Vec<_>>(),
      container_eq(['a', 'b', 'c'])
    );
    expect_that!(grid.to_string(), eq("a b c\nd e f\n"));
  }

  #[gtest]
  fn test_reset() {
    let mut grid: Grid<Option<char>> = Grid::new(2, 2);
    *grid.get_mut(Pos::new(1, 1)).unwrap() = Some('x');
    expect_that!(grid.get(Pos::new(1, 1)), some(eq(&Some('x'))));

    grid.reset();
    expect_true!(grid.iter().all(|cell| cell.is_none()));
  }

  #[gtest]
  fn test_positions_raster_order() {
    let grid: Grid<u8> = Grid::new(2, 2);
    expect_that!(
      grid.positions().collect::<Vec<_>>(),
      container_eq([Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 0), Pos::new(1, 1)])
    );
  }
}
