#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod args;
mod command;
mod session;

use std::process::ExitCode;

use args::Args;
use clap::Parser;
use command::{execute, CommandLine, Reply};
use log::info;
use session::Session;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use util::error::XWordResult;

async fn run(args: Args) -> XWordResult {
  let mut session = Session::new(args.rows, args.cols, args.direction.into());
  if args.demo {
    session.seed_demo();
  }
  info!("Started {}x{} grid", args.rows, args.cols);

  let mut lines = BufReader::new(stdin()).lines();
  while let Some(line) = lines.next_line().await? {
    if line.trim().is_empty() {
      continue;
    }

    let command = match CommandLine::parse_line(&line) {
      Ok(command_line) => command_line.command,
      Err(err) => {
        println!("{err}");
        continue;
      }
    };

    match execute(&mut session, command).await {
      Reply::Output(output) => println!("{output}"),
      Reply::Quit => break,
    }
  }

  Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
  env_logger::init();
  let args = Args::parse();

  if let Err(err) = run(args).await {
    println!("Error: {err}");
    ExitCode::FAILURE
  } else {
    ExitCode::SUCCESS
  }
}
