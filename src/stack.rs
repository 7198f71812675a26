/*!
  The runtime stack. It holds data values and, because `Call` pushes its return position here as
  well, return positions. Nothing distinguishes the two: a subroutine that leaves extra values
  on the stack, or consumes too many, will see a data value where it expected a position.
*/

use std::convert::TryFrom;
use std::fmt::{Debug, Formatter};

use crate::bytecode::Value;
use crate::error::{Error, Result};

#[derive(Clone, Default, Eq, PartialEq)]
pub struct RuntimeStack {
  vec: Vec<Value>
}

impl Debug for RuntimeStack {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{:?}", self.vec)
  }
}

impl RuntimeStack {

  pub fn new() -> RuntimeStack {
    RuntimeStack { vec: vec![] }
  }

  pub fn push(&mut self, value: Value) {
    self.vec.push(value);
  }

  pub fn pop(&mut self) -> Option<Value> {
    self.vec.pop()
  }

  /// Reads the top without removing it.
  pub fn top(&self) -> Option<Value> {
    self.vec.last().copied()
  }

  /// Pushes a copy of the element `index` places from the bottom.
  pub fn copy_nth(&mut self, index: Value) -> Result<()> {
    let len = self.vec.len();
    let value = match usize::try_from(index).ok() {
      Some(i) if i < len => self.vec[i],
      _                  => return Err(Error::Index { index, len })
    };
    self.vec.push(value);
    Ok(())
  }

  /**
    Removes up to `n` values from just below the top, keeping the top. Stops early once only the
    top remains. Does nothing to an empty stack.
  */
  pub fn slide(&mut self, n: Value) {
    if let Some(top) = self.vec.pop() {
      let keep = match usize::try_from(n).ok() {
        Some(n) => self.vec.len().saturating_sub(n),
        None    => self.vec.len()
      };
      self.vec.truncate(keep);
      self.vec.push(top);
    }
  }

  pub fn len(&self) -> usize {
    self.vec.len()
  }

  pub fn is_empty(&self) -> bool {
    self.vec.is_empty()
  }

  /// Bottom first.
  pub fn as_slice(&self) -> &[Value] {
    &self.vec
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Value> {
    self.vec.iter()
  }
}
