use clap::{Parser, ValueEnum};
use serde::Serialize;
use xword_grid::placed_word::Direction;

#[derive(ValueEnum, Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectionArg {
  #[value(alias = "h", alias = "across")]
  Horizontal,
  #[value(alias = "v", alias = "down")]
  Vertical,
}

impl From<DirectionArg> for Direction {
  fn from(value: DirectionArg) -> Self {
    match value {
      DirectionArg::Horizontal => Direction::Horizontal,
      DirectionArg::Vertical => Direction::Vertical,
    }
  }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
  #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=100))]
  pub rows: u32,

  #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=100))]
  pub cols: u32,

  /// Direction new words run in until changed.
  #[arg(long, default_value = "horizontal")]
  pub direction: DirectionArg,

  /// Start with a few entries in the word bank.
  #[arg(long)]
  pub demo: bool,
}
