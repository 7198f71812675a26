/*!
  This module is responsible for encoding instructions into symbols. Decoding is the job of the
  `Decoder`, which walks the tries built from the same tables.
*/

use super::{AssemblyError, Family, Instruction, Opcode, Value, FAMILY_TABLE};
use crate::symbol::{self, Symbol};

/// The code word selecting `family`.
pub fn family_code(family: Family) -> &'static [Symbol] {
  FAMILY_TABLE
    .iter()
    .find(|(_, candidate)| *candidate == family)
    .map(|(code, _)| *code)
    .unwrap_or_else(|| unreachable!("{} is missing from the family table.", family))
}

/// The code word selecting `opcode` within its family.
pub fn opcode_code(opcode: Opcode) -> &'static [Symbol] {
  opcode
    .family()
    .table()
    .iter()
    .find(|(_, candidate)| *candidate == opcode)
    .map(|(code, _)| *code)
    .unwrap_or_else(|| unreachable!("{} is missing from the {} table.", opcode, opcode.family()))
}

/**
  Encodes a parameter as binary digits followed by a line break. Zero is written as a single
  blank so that it is not confused with an empty parameter. Negative values have no encoding.
*/
pub fn encode_parameter(value: Value) -> Result<Vec<Symbol>, AssemblyError> {
  if value < 0 {
    return Err(AssemblyError::NegativeParameter(value));
  }
  let mut symbols: Vec<Symbol> =
    format!("{:b}", value)
      .chars()
      .map(|digit| match digit {
        '0' => Symbol::Blank,
        _   => Symbol::Tab
      })
      .collect();
  symbols.push(Symbol::Break);
  Ok(symbols)
}

/**
  Encodes the instruction into symbols. A parameter-taking opcode without a parameter encodes
  an empty digit sequence, which is only meaningful for `Push`, `CopyNth`, and `SlideN`. A
  parameter given to an opcode that takes none is an error.
*/
pub fn encode_instruction(instruction: &Instruction) -> Result<Vec<Symbol>, AssemblyError> {
  let opcode = instruction.opcode;
  let mut symbols = family_code(opcode.family()).to_vec();
  symbols.extend_from_slice(opcode_code(opcode));

  match (opcode.takes_parameter(), instruction.parameter) {

    (true, Some(value)) => {
      symbols.extend(encode_parameter(value)?);
    }

    (true, None) => {
      symbols.push(Symbol::Break);
    }

    (false, Some(_)) => {
      return Err(AssemblyError::UnexpectedParameter(opcode));
    }

    (false, None) => {}

  }
  Ok(symbols)
}

/// Encodes a sequence of instructions as program text.
pub fn encode_program(instructions: &[Instruction]) -> Result<String, AssemblyError> {
  let mut symbols = Vec::new();
  for instruction in instructions {
    symbols.extend(encode_instruction(instruction)?);
  }
  Ok(symbol::to_text(&symbols))
}
