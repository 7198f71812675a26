//! Errors raised while decoding or executing a program. Every error is fatal to the run, and a
//! machine that failed keeps reporting the same error.

use std::io;
use std::sync::Arc;

use thiserror::Error;

use crate::bytecode::{AssemblyError, Label, Opcode, Value};
use crate::decoder::Stage;
use crate::symbol::{spell, Symbol};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, Error)]
pub enum Error {
  /// No code word at `stage` begins with `partial`. `partial` holds every symbol of the
  /// instruction read so far, including the offending one.
  #[error("cannot decode {stage}: no instruction begins with {}", spell(.partial))]
  Decode { stage: Stage, partial: Vec<Symbol> },

  #[error("{0} requires a non-empty parameter")]
  MissingParameter(Opcode),

  #[error("parameter of {opcode} has {digits} binary digits and does not fit in 64 bits")]
  ParameterOverflow { opcode: Opcode, digits: usize },

  #[error("labels must be unique, duplicate label: {0}")]
  DuplicateLabel(Label),

  #[error("label {0} not found")]
  UnknownLabel(Label),

  #[error("{0} needs a value but the stack is empty")]
  StackUnderflow(Opcode),

  #[error("stack index {index} is out of range for a stack of {len}")]
  Index { index: Value, len: usize },

  #[error("{0} is not implemented")]
  UnsupportedOperation(Opcode),

  #[error("program ended while reading the {0} of an instruction")]
  UnexpectedEndOfInput(Stage),

  #[error("{0} is not a character")]
  InvalidCharacter(Value),

  #[error(transparent)]
  Assembly(#[from] AssemblyError),

  #[error("cannot write output: {0}")]
  Io(Arc<io::Error>),
}

impl From<io::Error> for Error {
  fn from(error: io::Error) -> Self {
    Error::Io(Arc::new(error))
  }
}
