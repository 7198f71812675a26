use std::fmt::{Display, Formatter};

use super::{Family, Opcode, Value};

/// A decoded instruction: an opcode and, for opcodes that take one, its parameter. The
/// parameter of `Push`, `CopyNth`, and `SlideN` may be absent when the program encodes an
/// empty digit sequence.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Instruction {
  pub opcode    :  Opcode,
  pub parameter :  Option<Value>
}

impl Instruction {

  pub fn new(opcode: Opcode, parameter: Option<Value>) -> Instruction {
    Instruction { opcode, parameter }
  }

  pub fn nullary(opcode: Opcode) -> Instruction {
    Instruction::new(opcode, None)
  }

  pub fn unary(opcode: Opcode, parameter: Value) -> Instruction {
    Instruction::new(opcode, Some(parameter))
  }

  pub fn family(&self) -> Family {
    self.opcode.family()
  }
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self.parameter {
      Some(parameter) => write!(f, "{}({})", self.opcode, parameter),
      None            => write!(f, "{}", self.opcode)
    }
  }
}
