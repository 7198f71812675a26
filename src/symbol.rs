/*!
  Classification of raw program text into `Symbol`s. Only blanks, tabs, and line breaks carry
  meaning. Every other character is commentary and is skipped before it reaches the decoder.

  Positions count characters, not bytes, so commentary in any script advances the position by
  one per character.
*/

use std::convert::TryFrom;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::Display as StrumDisplay;

/// A program position: the character offset of the next symbol to be read.
pub type Position = usize;

#[derive(
StrumDisplay, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,             Eq,            PartialEq, Ord, PartialOrd, Debug, Hash
)]
#[repr(u8)]
pub enum Symbol {
  Blank = 0x20,
  Tab   = 0x09,
  Break = 0x0A,
}

impl Symbol {
  /// The pure classifier. Returns `None` for commentary.
  pub fn classify(byte: u8) -> Option<Symbol> {
    Symbol::try_from(byte).ok()
  }

  pub fn from_char(c: char) -> Option<Symbol> {
    match c.is_ascii() {
      true  => Symbol::classify(c as u8),
      false => None
    }
  }

  pub fn as_char(&self) -> char {
    Into::<u8>::into(*self) as char
  }

  /// The conventional one letter mnemonic: S(pace), T(ab), L(inefeed).
  pub fn letter(&self) -> char {
    match self {
      Symbol::Blank => 'S',
      Symbol::Tab   => 'T',
      Symbol::Break => 'L',
    }
  }
}

/// Spells a symbol sequence with mnemonic letters, e.g. `TSL`.
pub fn spell(symbols: &[Symbol]) -> String {
  symbols.iter().map(Symbol::letter).collect()
}

/// Renders a symbol sequence as program text.
pub fn to_text(symbols: &[Symbol]) -> String {
  symbols.iter().map(Symbol::as_char).collect()
}

/**
  Iterates over the symbols of a program text while tracking the program position. The
  position can be moved with `seek`, which is how jumps are carried out.
*/
#[derive(Clone, Debug)]
pub struct SymbolIter<'p> {
  text     :  &'p str,
  offset   :  usize,    // Byte offset matching `position`
  position :  Position
}

impl<'p> Iterator for SymbolIter<'p> {
  type Item = Symbol;

  fn next(&mut self) -> Option<Symbol> {
    while let Some(c) = self.forward() {
      if let Some(symbol) = Symbol::from_char(c) {
        return Some(symbol);
      }
    }
    None
  }
}

impl<'p> SymbolIter<'p> {

  pub fn new(text: &'p str) -> Self {
    SymbolIter {
      text,
      offset   : 0,
      position : 0
    }
  }

  /// The number of characters consumed so far.
  pub fn position(&self) -> Position {
    self.position
  }

  /// Moves the cursor. Positions past the end leave the iterator exhausted.
  pub fn seek(&mut self, position: Position) {
    while self.position > position && self.backward().is_some() {}
    while self.position < position && self.forward().is_some() {}
  }

  /// True when no symbol remains, ignoring trailing commentary.
  pub fn is_exhausted(&self) -> bool {
    self.clone().next().is_none()
  }

  /// Length of the program text in characters.
  pub fn len(&self) -> usize {
    self.text.chars().count()
  }

  pub fn is_empty(&self) -> bool {
    self.text.is_empty()
  }

  fn forward(&mut self) -> Option<char> {
    let c = self.text[self.offset..].chars().next()?;
    self.offset   += c.len_utf8();
    self.position += 1;
    Some(c)
  }

  fn backward(&mut self) -> Option<char> {
    let c = self.text[..self.offset].chars().next_back()?;
    self.offset   -= c.len_utf8();
    self.position -= 1;
    Some(c)
  }
}

/// Translates mnemonic letters (`S`, `T`, `L`) into program text. Other characters pass
/// through unchanged, so punctuation can be used to separate instructions.
#[cfg(test)]
pub(crate) fn from_letters(letters: &str) -> String {
  letters
    .chars()
    .map(|c| match c {
      'S' => ' ',
      'T' => '\t',
      'L' => '\n',
      other => other
    })
    .collect()
}
