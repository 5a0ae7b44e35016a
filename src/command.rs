use std::str::FromStr;

use clap::{Parser, Subcommand};
use util::pos::Pos;
use xword_grid::placed_word::Direction;

use crate::session::Session;

/// One line of input from the form layer.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub struct CommandLine {
  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Select a cell, or start editing the word under it.
  Click { row: u32, col: u32 },
  /// Change the direction new and edited words run in.
  Direction {
    #[arg(value_parser = Direction::from_str)]
    direction: Direction,
  },
  /// Flip between horizontal and vertical.
  Toggle,
  /// Place a word at the selected cell, or replace the word being edited.
  Submit { word: String },
  /// Drop the selection and any edit in progress.
  Cancel,
  /// Place a word at the first position it fits.
  Auto {
    word: String,
    #[arg(long, short, value_parser = Direction::from_str)]
    direction: Option<Direction>,
    #[arg(trailing_var_arg = true)]
    clue: Vec<String>,
  },
  /// Remove every word from the grid.
  Clear,
  /// Print the grid.
  Show,
  /// List the words placed on the grid.
  Words,
  Bank {
    #[command(subcommand)]
    action: BankCommand,
  },
  Quit,
}

#[derive(Subcommand, Debug)]
pub enum BankCommand {
  /// Add an entry, or overwrite the selected one.
  Add {
    word: String,
    #[arg(trailing_var_arg = true, required = true, num_args = 1..)]
    description: Vec<String>,
  },
  /// Select an entry so the next `add` overwrites it.
  Select { index: usize },
  Update {
    index: usize,
    word: String,
    #[arg(trailing_var_arg = true, required = true, num_args = 1..)]
    description: Vec<String>,
  },
  /// Delete every entry with this word.
  Delete { word: String },
  List,
}

pub enum Reply {
  Output(String),
  Quit,
}

impl CommandLine {
  pub fn parse_line(line: &str) -> Result<Self, clap::Error> {
    Self::try_parse_from(line.split_whitespace())
  }
}

fn placed_message(result: Result<impl std::fmt::Display, impl std::fmt::Display>) -> String {
  match result {
    Ok(id) => format!("Placed {id}"),
    Err(err) => format!("Rejected: {err}"),
  }
}

pub async fn execute(session: &mut Session, command: Command) -> Reply {
  let output = match command {
    Command::Click { row, col } => match session.click(Pos::new(row as i32, col as i32)).await {
      Ok(_) => session.render_grid().await,
      Err(err) => format!("Rejected: {err}"),
    },
    Command::Direction { direction } => {
      session.set_direction(direction).await;
      format!("Direction: {direction}")
    }
    Command::Toggle => format!("Direction: {}", session.toggle_direction().await),
    Command::Submit { word } => placed_message(session.submit(&word).await),
    Command::Cancel => {
      session.cancel().await;
      "Selection cleared".to_owned()
    }
    Command::Auto { word, direction, clue } => {
      let direction = match direction {
        Some(direction) => direction,
        None => session.direction().await,
      };
      let clue = (!clue.is_empty()).then(|| clue.join(" "));
      placed_message(session.auto_place(&word, direction, clue).await)
    }
    Command::Clear => {
      session.clear_grid().await;
      "Grid cleared".to_owned()
    }
    Command::Show => session.render_grid().await,
    Command::Words => session.render_placed_words().await,
    Command::Bank { action } => execute_bank(session, action),
    Command::Quit => return Reply::Quit,
  };
  Reply::Output(output)
}

fn execute_bank(session: &mut Session, action: BankCommand) -> String {
  match action {
    BankCommand::Add { word, description } => {
      match session.bank_submit(&word, &description.join(" ")) {
        Ok(()) => session.render_bank(),
        Err(err) => format!("Rejected: {err}"),
      }
    }
    BankCommand::Select { index } => match session.select_bank_entry(index) {
      Ok(entry) => format!("Selected {entry}"),
      Err(err) => format!("Rejected: {err}"),
    },
    BankCommand::Update { index, word, description } => {
      match session.bank_update(index, &word, &description.join(" ")) {
        Ok(()) => session.render_bank(),
        Err(err) => format!("Rejected: {err}"),
      }
    }
    BankCommand::Delete { word } => {
      let removed = session.bank_delete(&word);
      format!("Removed {removed} entries")
    }
    BankCommand::List => session.render_bank(),
  }
}
