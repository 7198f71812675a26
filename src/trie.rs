/*!
  A prefix trie over `Symbol`s. Each level of the instruction encoding (family, then opcode) is a
  prefix-free code, so a walk through the trie from the root ends on a node carrying an
  identifier exactly when the last symbol of a code word has been read.

  Tries are built once from static tables and never mutated afterward.
*/

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use crate::symbol::Symbol;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Trie<T> {
  /// The symbol on the edge into this node. The root has none.
  symbol     :  Option<Symbol>,
  children   :  BTreeMap<Symbol, Trie<T>>,
  identifier :  Option<T>
}

impl<T: Copy> Trie<T> {

  fn new(symbol: Option<Symbol>) -> Trie<T> {
    Trie {
      symbol,
      children   : BTreeMap::new(),
      identifier : None
    }
  }

  /**
    Builds a trie from a table of code words. The table must be prefix-free: no code word may be
    a prefix of another, and no code word may be empty.
  */
  pub fn from_table(table: &[(&[Symbol], T)]) -> Trie<T> {
    let mut root = Trie::new(None);
    for (code, identifier) in table {
      root.insert(code, *identifier);
    }
    root
  }

  fn insert(&mut self, code: &[Symbol], identifier: T) {
    debug_assert!(!code.is_empty(), "Empty code words are not decodable.");
    let mut node = self;
    for symbol in code {
      debug_assert!(node.identifier.is_none(), "Code table is not prefix-free.");
      node = node.children.entry(*symbol).or_insert_with(|| Trie::new(Some(*symbol)));
    }
    debug_assert!(node.children.is_empty(), "Code table is not prefix-free.");
    node.identifier = Some(identifier);
  }

  /// Follows the edge labeled `symbol`, if there is one.
  pub fn child(&self, symbol: Symbol) -> Option<&Trie<T>> {
    self.children.get(&symbol)
  }

  pub fn identifier(&self) -> Option<T> {
    self.identifier
  }

  pub fn symbol(&self) -> Option<Symbol> {
    self.symbol
  }

  pub fn is_terminal(&self) -> bool {
    self.identifier.is_some()
  }

  /// Walks the entire `code` from this node and returns the identifier at the node reached.
  pub fn lookup(&self, code: &[Symbol]) -> Option<T> {
    let mut node = self;
    for symbol in code {
      node = node.child(*symbol)?;
    }
    node.identifier
  }
}

// Renders as nested `{symbol:[children]}` with identifiers at the leaves. Children appear in
// byte order of their symbols: tab, line break, blank.
impl<T: Display> Display for Trie<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self.symbol {
      Some(symbol) => write!(f, "{{{}:[", symbol.letter())?,
      None         => write!(f, "{{^:[")?
    }
    match &self.identifier {

      Some(identifier) => {
        write!(f, "{}", identifier)?;
      }

      None => {
        let children =
          self.children
              .values()
              .map(|child| format!("{}", child))
              .collect::<Vec<String>>()
              .join(",");
        write!(f, "{}", children)?;
      }

    }
    write!(f, "]}}")
  }
}
