/*!
  An interpreter for programs written in three symbols: blank, tab, and line break. Everything
  else in the program text is commentary.

  The program text is decoded one symbol at a time, with no separate parsing pass. A two-level
  prefix code selects an instruction family and then an opcode. Some opcodes are followed by a
  binary parameter. Each instruction is executed as soon as its last symbol is read, against a
  single integer stack and a table of labels that fills in as `Mark` instructions execute.

  ```
  use wsvm::{Config, Machine, Termination};

  // Push(1) Push(2) OutputNumber EndProgram
  let program = "   \t\n   \t \n\t\n \t\n\n\n";
  let mut machine = Machine::new(program, Vec::new(), Config::default());

  assert_eq!(machine.run().unwrap(), Termination::EndProgram);
  assert_eq!(machine.stack().as_slice(), &[1, 2]);
  assert_eq!(machine.output().as_slice(), b"2");
  ```
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod symbol;
pub mod trie;
pub mod bytecode;
pub mod decoder;
pub mod stack;
pub mod labels;
pub mod config;
pub mod error;
pub mod machine;

pub use bytecode::{assemble, parse_assembly, Family, Instruction, Label, Opcode, Value};
pub use config::{Config, IndexOrigin};
pub use decoder::{disassemble, Decoder, Stage};
pub use error::{Error, Result};
pub use labels::LabelTable;
pub use machine::{Machine, Termination};
pub use stack::RuntimeStack;
pub use symbol::{Position, Symbol, SymbolIter};
