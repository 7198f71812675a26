/*!
  The parse-stage state machine. Symbols are fed in one at a time; each completes at most one
  instruction. The decoder knows nothing about what instructions do, so an opcode without an
  implemented effect still decodes cleanly.

  ```text
        ┌──────────────┐ family terminal ┌──────────────┐ opcode takes parameter ┌───────────────┐
    ──▶ │ SelectFamily │ ──────────────▶ │ SelectOpcode │ ─────────────────────▶ │ ReadParameter │
        └──────────────┘                 └──────────────┘                        └───────────────┘
              ▲  ▲   nullary opcode: instruction complete │                             │
              │  └────────────────────────────────────────┘                             │
              └───────────────────── line break: instruction complete ──────────────────┘
  ```
*/

use strum_macros::Display as StrumDisplay;

use crate::bytecode::{Family, Instruction, Opcode, Parameter, ParameterReader, FAMILY_TRIE};
use crate::error::{Error, Result};
use crate::symbol::Symbol;
use crate::trie::Trie;

/// The stages of decoding, named by what they read.
#[derive(StrumDisplay, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Stage {
  #[strum(serialize = "family")]
  SelectFamily,
  #[strum(serialize = "opcode")]
  SelectOpcode,
  #[strum(serialize = "parameter")]
  ReadParameter,
}

#[derive(Clone, Debug)]
enum State {
  SelectFamily {
    node    :  &'static Trie<Family>,
    partial :  Vec<Symbol>
  },
  SelectOpcode {
    node    :  &'static Trie<Opcode>,
    partial :  Vec<Symbol>
  },
  ReadParameter {
    opcode  :  Opcode,
    reader  :  ParameterReader
  },
}

impl State {
  fn idle() -> State {
    State::SelectFamily {
      node    : &FAMILY_TRIE,
      partial : Vec::new()
    }
  }
}

#[derive(Clone, Debug)]
pub struct Decoder {
  state: State
}

impl Default for Decoder {
  fn default() -> Self {
    Decoder::new()
  }
}

impl Decoder {

  pub fn new() -> Decoder {
    Decoder { state: State::idle() }
  }

  pub fn stage(&self) -> Stage {
    match self.state {
      State::SelectFamily  { .. } => Stage::SelectFamily,
      State::SelectOpcode  { .. } => Stage::SelectOpcode,
      State::ReadParameter { .. } => Stage::ReadParameter,
    }
  }

  /// True between instructions, i.e. no symbol of the next instruction has been read.
  pub fn is_idle(&self) -> bool {
    match &self.state {
      State::SelectFamily { partial, .. } => partial.is_empty(),
      _                                   => false
    }
  }

  /// Abandons any partially read instruction.
  pub fn reset(&mut self) {
    self.state = State::idle();
  }

  /**
    Consumes one symbol. Returns the instruction this symbol completes, if any.

    A symbol with no transition out of the current trie node is a decode error carrying every
    symbol of the instruction read so far.
  */
  pub fn feed(&mut self, symbol: Symbol) -> Result<Option<Instruction>> {
    match &mut self.state {

      State::SelectFamily { node, partial } => {
        partial.push(symbol);
        let current: &'static Trie<Family> = *node;
        let next = current.child(symbol).ok_or_else(|| {
          Error::Decode { stage: Stage::SelectFamily, partial: partial.clone() }
        })?;
        match next.identifier() {
          None         => *node = next,
          Some(family) => {
            let partial = std::mem::take(partial);
            self.state  = State::SelectOpcode { node: family.opcode_trie(), partial };
          }
        }
        Ok(None)
      }

      State::SelectOpcode { node, partial } => {
        partial.push(symbol);
        let current: &'static Trie<Opcode> = *node;
        let next = current.child(symbol).ok_or_else(|| {
          Error::Decode { stage: Stage::SelectOpcode, partial: partial.clone() }
        })?;
        match next.identifier() {

          None => {
            *node = next;
            Ok(None)
          }

          Some(opcode) if opcode.takes_parameter() => {
            self.state = State::ReadParameter { opcode, reader: ParameterReader::new() };
            Ok(None)
          }

          Some(opcode) => {
            self.state = State::idle();
            Ok(Some(Instruction::nullary(opcode)))
          }

        }
      }

      State::ReadParameter { opcode, reader } => {
        match reader.feed(symbol) {
          None            => Ok(None),
          Some(parameter) => {
            let opcode = *opcode;
            self.state = State::idle();
            complete(opcode, parameter).map(Some)
          }
        }
      }

    }
  }

  /// Called when the symbol stream ends. Ending between instructions is fine; ending inside
  /// one is an error naming the stage that was interrupted.
  pub fn finish(&self) -> Result<()> {
    match self.is_idle() {
      true  => Ok(()),
      false => Err(Error::UnexpectedEndOfInput(self.stage()))
    }
  }
}

fn complete(opcode: Opcode, parameter: Parameter) -> Result<Instruction> {
  match parameter {
    Parameter::Number(value)       => Ok(Instruction::unary(opcode, value)),
    Parameter::Overflow { digits } => Err(Error::ParameterOverflow { opcode, digits }),
    Parameter::Empty if opcode.takes_label() => Err(Error::MissingParameter(opcode)),
    Parameter::Empty               => Ok(Instruction::nullary(opcode)),
  }
}

/**
  Decodes a whole program without executing it. Because labels only matter at run time, this
  lists every instruction in text order, including ones that execution would jump over.
*/
pub fn disassemble(program: &str) -> Result<Vec<Instruction>> {
  let mut decoder = Decoder::new();
  let mut instructions = Vec::new();
  for symbol in crate::symbol::SymbolIter::new(program) {
    if let Some(instruction) = decoder.feed(symbol)? {
      instructions.push(instruction);
    }
  }
  decoder.finish()?;
  Ok(instructions)
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::symbol::{from_letters, SymbolIter};
  use crate::symbol::Symbol::{Blank as S, Break as L, Tab as T};

  fn decode(letters: &str) -> Result<Vec<Instruction>> {
    disassemble(&from_letters(letters))
  }

  #[test]
  fn decodes_nullary_and_parameter_instructions() {
    let decoded = decode("SSTSL.SLS.TLST.LLL").unwrap();
    assert_eq!(
      decoded,
      vec![
        Instruction::unary(Opcode::Push, 2),
        Instruction::nullary(Opcode::Duplicate),
        Instruction::nullary(Opcode::OutputNumber),
        Instruction::nullary(Opcode::EndProgram),
      ]
    );
  }

  #[test]
  fn unimplemented_opcodes_still_decode() {
    let decoded = decode("TSSS.TTT.TLTT").unwrap();
    assert_eq!(
      decoded,
      vec![
        Instruction::nullary(Opcode::Add),
        Instruction::nullary(Opcode::Retrieve),
        Instruction::nullary(Opcode::ReadNumber),
      ]
    );
  }

  #[test]
  fn stages_advance() {
    let mut decoder = Decoder::new();
    assert!(decoder.is_idle());
    assert_eq!(decoder.feed(L).unwrap(), None);
    assert_eq!(decoder.stage(), Stage::SelectOpcode);
    assert_eq!(decoder.feed(S).unwrap(), None);
    assert_eq!(decoder.feed(L).unwrap(), None);
    assert_eq!(decoder.stage(), Stage::ReadParameter);
    assert_eq!(decoder.feed(T).unwrap(), None);
    assert_eq!(decoder.feed(L).unwrap(), Some(Instruction::unary(Opcode::Jump, 1)));
    assert!(decoder.is_idle());
  }

  #[test]
  fn partial_family_is_not_idle() {
    let mut decoder = Decoder::new();
    decoder.feed(T).unwrap();
    assert_eq!(decoder.stage(), Stage::SelectFamily);
    assert!(!decoder.is_idle());
    match decoder.finish() {
      Err(Error::UnexpectedEndOfInput(Stage::SelectFamily)) => {}
      other => panic!("unexpected {:?}", other),
    }
    decoder.reset();
    assert!(decoder.finish().is_ok());
  }

  #[test]
  fn opcode_decode_error_carries_partial_sequence() {
    // Heap family (TT) has no opcode starting with a line break.
    match decode("TTL") {
      Err(Error::Decode { stage: Stage::SelectOpcode, partial }) => {
        assert_eq!(partial, vec![T, T, L]);
      }
      other => panic!("unexpected {:?}", other),
    }
  }

  #[test]
  fn empty_label_parameter_is_missing() {
    match decode("LSSL") {
      Err(Error::MissingParameter(Opcode::Mark)) => {}
      other => panic!("unexpected {:?}", other),
    }
  }

  #[test]
  fn empty_push_parameter_decodes_without_value() {
    assert_eq!(decode("SSL").unwrap(), vec![Instruction::nullary(Opcode::Push)]);
  }

  #[test]
  fn end_of_input_inside_parameter() {
    match decode("SSTT") {
      Err(Error::UnexpectedEndOfInput(Stage::ReadParameter)) => {}
      other => panic!("unexpected {:?}", other),
    }
  }

  #[test]
  fn overflowing_parameter() {
    let letters = format!("SS{}L", "T".repeat(70));
    match decode(&letters) {
      Err(Error::ParameterOverflow { opcode: Opcode::Push, digits: 70 }) => {}
      other => panic!("unexpected {:?}", other),
    }
  }

  #[test]
  fn commentary_is_ignored() {
    let text = from_letters("push[SSTSL]two,then,end[LLL].");
    let symbols: Vec<Symbol> = SymbolIter::new(&text).collect();
    assert_eq!(symbols.len(), 8);
    assert_eq!(
      disassemble(&text).unwrap(),
      vec![Instruction::unary(Opcode::Push, 2), Instruction::nullary(Opcode::EndProgram)]
    );
  }
}
