//! Reads the binary parameter that follows some opcodes.

use super::Value;
use crate::symbol::Symbol;

/**
  The result of reading one parameter.

  The digits are an unsigned binary number, most significant digit first. In particular the
  leading digit is an ordinary bit, not a sign: `TSL` reads as 2, not as -0 or 0.
*/
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Parameter {
  /// The terminating line break arrived before any digit.
  Empty,
  Number(Value),
  /// The digits do not fit in a `Value`.
  Overflow { digits: usize },
}

/// Accumulates digits until a line break ends the parameter.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParameterReader {
  value      :  Value,
  digits     :  usize,
  overflowed :  bool
}

impl ParameterReader {

  pub fn new() -> ParameterReader {
    ParameterReader::default()
  }

  /// Consumes one symbol. Returns the finished parameter once a line break is fed.
  pub fn feed(&mut self, symbol: Symbol) -> Option<Parameter> {
    let digit = match symbol {
      Symbol::Blank => 0,
      Symbol::Tab   => 1,
      Symbol::Break => return Some(self.finish()),
    };
    self.digits += 1;
    self.value = match self.value.checked_mul(2).and_then(|v| v.checked_add(digit)) {
      Some(value) => value,
      None => {
        self.overflowed = true;
        0
      }
    };
    None
  }

  /// Number of digits consumed so far.
  pub fn digits(&self) -> usize {
    self.digits
  }

  fn finish(&mut self) -> Parameter {
    let parameter =
      match (self.digits, self.overflowed) {
        (0, _)         => Parameter::Empty,
        (digits, true) => Parameter::Overflow { digits },
        (_, false)     => Parameter::Number(self.value)
      };
    *self = ParameterReader::default();
    parameter
  }
}
