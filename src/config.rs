//! Run-time options of the machine.

use strum_macros::{Display as StrumDisplay, EnumString};

use crate::bytecode::Value;

/// Where `CopyNth` starts counting from the bottom of the stack.
#[derive(StrumDisplay, EnumString, Clone, Copy, Eq, PartialEq, Debug, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum IndexOrigin {
  Zero,
  One,
}

impl Default for IndexOrigin {
  fn default() -> Self {
    IndexOrigin::Zero
  }
}

impl IndexOrigin {
  /// Converts a `CopyNth` parameter into a zero-based stack index. With a one-based origin, a
  /// parameter of 0 becomes -1, which no stack position matches.
  pub fn to_index(&self, parameter: Value) -> Value {
    match self {
      IndexOrigin::Zero => parameter,
      IndexOrigin::One  => parameter - 1,
    }
  }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Config {
  pub index_origin :  IndexOrigin,
  /// `Machine::run` stops after this many instructions.
  pub max_steps    :  Option<u64>,
}

impl Config {
  pub fn with_index_origin(mut self, index_origin: IndexOrigin) -> Config {
    self.index_origin = index_origin;
    self
  }

  pub fn with_max_steps(mut self, max_steps: u64) -> Config {
    self.max_steps = Some(max_steps);
    self
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use std::str::FromStr;

  #[test]
  fn defaults_to_zero_based_and_unbounded() {
    let config = Config::default();
    assert_eq!(config.index_origin, IndexOrigin::Zero);
    assert_eq!(config.max_steps, None);
  }

  #[test]
  fn origin_parses_from_text() {
    assert_eq!(IndexOrigin::from_str("one"), Ok(IndexOrigin::One));
    assert_eq!(IndexOrigin::One.to_string(), "one");
    assert_eq!(IndexOrigin::One.to_index(1), 0);
    assert_eq!(IndexOrigin::Zero.to_index(1), 1);
  }
}
