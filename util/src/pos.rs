use std::{
  fmt::Display,
  ops::{Add, AddAssign, Mul},
};

/// A cell address, 0-indexed from the top-left corner of a grid.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Pos {
  pub row: i32,
  pub col: i32,
}

impl Pos {
  pub const fn zero() -> Self {
    Self { row: 0, col: 0 }
  }

  pub const fn new(row: i32, col: i32) -> Self {
    Self { row, col }
  }
}

impl Add<Diff> for Pos {
  type Output = Self;

  fn add(self, rhs: Diff) -> Self {
    Self { row: self.row + rhs.row, col: self.col + rhs.col }
  }
}

impl AddAssign<Diff> for Pos {
  fn add_assign(&mut self, rhs: Diff) {
    self.row += rhs.row;
    self.col += rhs.col;
  }
}

impl Display for Pos {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "({}, {})", self.row, self.col)
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Diff {
  pub row: i32,
  pub col: i32,
}

impl Diff {
  /// One step to the right.
  pub const DCOL: Diff = Diff { row: 0, col: 1 };
  /// One step down.
  pub const DROW: Diff = Diff { row: 1, col: 0 };
}

impl Add for Diff {
  type Output = Self;

  fn add(self, rhs: Self) -> Self {
    Self { row: self.row + rhs.row, col: self.col + rhs.col }
  }
}

impl Mul<Diff> for i32 {
  type Output = Diff;

  fn mul(self, rhs: Diff) -> Diff {
    Diff { row: self * rhs.row, col: self * rhs.col }
  }
}

impl Mul<i32> for Diff {
  type Output = Diff;

  fn mul(self, rhs: i32) -> Self {
    Self { row: self.row * rhs, col: self.col * rhs }
  }
}

impl Display for Diff {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "({}, {})", self.row, self.col)
  }
}
