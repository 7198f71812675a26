//!
//! Run a program written in blanks, tabs, and line breaks.
//!
//! Usage: `wsvm [PROGRAM] [--assembly] [--emit | --list] [--one-based] [--max-steps N] [--dump]`

use std::fmt::Display;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, EnvFilter};

use wsvm::{assemble, disassemble, Config, IndexOrigin, Machine, Termination};

#[derive(Parser, Debug)]
#[command(name = "wsvm")]
#[command(about = "Interpret a program written in blanks, tabs, and line breaks")]
struct Args {
  /// Program file. Reads standard input when omitted
  program: Option<PathBuf>,

  /// The input is assembly text (`Push(1)`, `OutputNumber`, ...) rather than symbols
  #[arg(long)]
  assembly: bool,

  /// Print the program as symbols instead of running it
  #[arg(long, conflicts_with = "list")]
  emit: bool,

  /// Print the decoded instructions instead of running the program
  #[arg(long)]
  list: bool,

  /// Count CopyNth positions from one instead of zero
  #[arg(long)]
  one_based: bool,

  /// Stop after this many instructions
  #[arg(long)]
  max_steps: Option<u64>,

  /// Print the machine state to standard error when the run ends
  #[arg(long)]
  dump: bool,
}

fn init_logging() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

  fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(io::stderr)
    .init();
}

/// Fatal errors bypass the log filter so that a failed run always says why.
fn report(sink: &mut impl Write, message: impl Display) {
  let _ = writeln!(sink, "error: {}", message);
}

fn fail(message: impl Display) -> ! {
  report(&mut io::stderr(), message);
  process::exit(1);
}

fn read_program(path: &Option<PathBuf>) -> io::Result<String> {
  match path {
    Some(path) => fs::read_to_string(path),
    None => {
      let mut text = String::new();
      io::stdin().read_to_string(&mut text)?;
      Ok(text)
    }
  }
}

fn main() {
  init_logging();

  let args = Args::parse();

  let text = match read_program(&args.program) {
    Ok(text) => text,
    Err(e) => fail(format!("cannot read program: {}", e)),
  };

  let program = match args.assembly {
    true => match assemble(&text) {
      Ok(program) => program,
      Err(e) => fail(e),
    },
    false => text,
  };

  if args.emit {
    print!("{}", program);
    return;
  }

  if args.list {
    match disassemble(&program) {
      Ok(instructions) => {
        for instruction in instructions {
          println!("{}", instruction);
        }
      }
      Err(e) => fail(e),
    }
    return;
  }

  let mut config = Config::default();
  if args.one_based {
    config = config.with_index_origin(IndexOrigin::One);
  }
  if let Some(max_steps) = args.max_steps {
    config = config.with_max_steps(max_steps);
  }

  let stdout = io::stdout();
  let mut machine = Machine::new(&program, BufWriter::new(stdout.lock()), config);
  let result = machine.run();

  if args.dump {
    eprintln!("{}", machine);
  }
  if let Err(e) = machine.output_mut().flush() {
    fail(format!("cannot flush output: {}", e));
  }

  match result {
    Ok(Termination::StepLimit(steps)) => {
      warn!("Stopped after {} instructions.", steps);
      process::exit(2);
    }
    Ok(termination) => {
      debug!(steps = machine.steps(), %termination, "finished");
    }
    Err(e) => fail(e),
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use wsvm::Error;

  #[test]
  fn reports_machine_errors_verbatim() {
    let mut sink = Vec::new();
    report(&mut sink, Error::UnknownLabel(5));
    assert_eq!(String::from_utf8(sink).unwrap(), "error: label 5 not found\n");
  }
}
