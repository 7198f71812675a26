use bimap::BiMap;

use crate::bytecode::Label;
use crate::error::{Error, Result};
use crate::symbol::Position;

/**
  The label table maps labels to the program position just past the `Mark` that defined them. It
  is really just a convenience wrapper around a BiMap, so that a position can be named by its
  label when displaying the machine.

  Labels are registered only when execution reaches their `Mark`. There is no pre-scan, so a
  jump to a label whose `Mark` appears later in the text, but has not yet run, fails.
*/
#[derive(Debug)]
pub struct LabelTable {
  table: BiMap<Label, Position>
}

impl Default for LabelTable {
  fn default() -> Self {
    LabelTable::new()
  }
}

impl LabelTable {

  pub fn new() -> LabelTable {
    LabelTable {
      table: BiMap::new()
    }
  }

  /// Registers `label`. Each label may be marked once.
  pub fn mark(&mut self, label: Label, position: Position) -> Result<()> {
    self.table
        .insert_no_overwrite(label, position)
        .map_err(|_| Error::DuplicateLabel(label))
  }

  pub fn resolve(&self, label: Label) -> Result<Position> {
    self.table
        .get_by_left(&label)
        .copied()
        .ok_or(Error::UnknownLabel(label))
  }

  /// The label marked at `position`, if any.
  pub fn label_at(&self, position: Position) -> Option<Label> {
    self.table.get_by_right(&position).copied()
  }

  pub fn contains(&self, label: Label) -> bool {
    self.table.contains_left(&label)
  }

  pub fn len(&self) -> usize {
    self.table.len()
  }

  pub fn is_empty(&self) -> bool {
    self.table.is_empty()
  }

  /// Labels and their positions, sorted by label.
  pub fn entries(&self) -> Vec<(Label, Position)> {
    let mut entries: Vec<(Label, Position)> =
      self.table.iter().map(|(label, position)| (*label, *position)).collect();
    entries.sort();
    entries
  }
}
