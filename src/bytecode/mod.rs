/*!

  Instructions are encoded with a two-level prefix code over the three symbols. The first code
  word selects a `Family`, the second selects an `Opcode` within that family. Within each level
  the code words are prefix-free, so the decoder knows it has finished a level the moment the
  trie walk lands on a terminal node. Opcodes that take a parameter are followed by a binary
  number, one digit per symbol (blank is 0, tab is 1), terminated by a line break.

  Written with the mnemonic letters S (blank), T (tab), and L (line break):

  ```text
  Stack        S    Push S  Duplicate LS  Swap LT  Discard LL  CopyNth TS  SlideN TL
  Arithmetic   TS   Add SS  Subtract ST  Multiply SL  Divide TS  Modulo TT
  Heap         TT   Store S  Retrieve T
  FlowControl  L    Mark SS  Call ST  Jump SL  JumpIfZero TS  JumpIfNegative TT
                    EndSub TL  EndProgram LL
  IO           TL   OutputChar SS  OutputNumber ST  ReadChar TS  ReadNumber TT
  ```

  The tables below are the single source of truth for both decoding (through the tries) and
  encoding (through `encoding`).

*/

mod instruction;
mod parameter;
mod encoding;
pub mod assembly;

pub use instruction::Instruction;
pub use parameter::{Parameter, ParameterReader};
pub use encoding::{encode_instruction, encode_parameter, encode_program, family_code, opcode_code};
pub use assembly::{assemble, parse_assembly, AssemblyError};

use strum_macros::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};

use crate::symbol::Symbol;
use crate::symbol::Symbol::{Blank as S, Break as L, Tab as T};
use crate::trie::Trie;

/// Every stack entry, parameter, and label is a `Value`.
pub type Value = i64;
pub type Label = Value;

#[derive(
StrumDisplay, IntoStaticStr, EnumString, EnumIter,
Clone,        Copy,          Eq,         PartialEq, Ord, PartialOrd, Debug, Hash
)]
pub enum Family {
  Stack,
  Arithmetic,
  Heap,
  FlowControl,
  IO,
}

/**
  Opcodes of the virtual machine. Each opcode belongs to exactly one `Family`, and the same
  code word may mean different opcodes in different families.
*/
#[derive(
StrumDisplay, IntoStaticStr, EnumString, EnumIter,
Clone,        Copy,          Eq,         PartialEq, Ord, PartialOrd, Debug, Hash
)]
pub enum Opcode {
  // Stack //
  Push,              // push( n )
  Duplicate,
  Swap,
  Discard,
  CopyNth,           // copy_nth( n )
  SlideN,            // slide_n( n )

  // Arithmetic //
  Add,
  Subtract,
  Multiply,
  Divide,
  Modulo,

  // Heap //
  Store,
  Retrieve,

  // Flow control //
  Mark,              // mark( label )
  Call,              // call( label )
  Jump,              // jump( label )
  JumpIfZero,        // jump_if_zero( label )
  JumpIfNegative,    // jump_if_negative( label )
  EndSub,
  EndProgram,

  // IO //
  OutputChar,
  OutputNumber,
  ReadChar,
  ReadNumber,
}

impl Opcode {
  pub fn family(&self) -> Family {
    match self {
      | Opcode::Push
      | Opcode::Duplicate
      | Opcode::Swap
      | Opcode::Discard
      | Opcode::CopyNth
      | Opcode::SlideN         => Family::Stack,

      | Opcode::Add
      | Opcode::Subtract
      | Opcode::Multiply
      | Opcode::Divide
      | Opcode::Modulo         => Family::Arithmetic,

      | Opcode::Store
      | Opcode::Retrieve       => Family::Heap,

      | Opcode::Mark
      | Opcode::Call
      | Opcode::Jump
      | Opcode::JumpIfZero
      | Opcode::JumpIfNegative
      | Opcode::EndSub
      | Opcode::EndProgram     => Family::FlowControl,

      | Opcode::OutputChar
      | Opcode::OutputNumber
      | Opcode::ReadChar
      | Opcode::ReadNumber     => Family::IO,
    }
  }

  /// Whether a parameter follows the opcode in the symbol stream.
  pub fn takes_parameter(&self) -> bool {
    match self {
      | Opcode::Push
      | Opcode::CopyNth
      | Opcode::SlideN => true,
      _                => self.takes_label()
    }
  }

  pub fn arity(&self) -> usize {
    match self.takes_parameter() {
      true  => 1,
      false => 0
    }
  }

  /// Opcodes whose parameter names a label. Their parameter may not be empty.
  pub fn takes_label(&self) -> bool {
    match self {
      | Opcode::Mark
      | Opcode::Call
      | Opcode::Jump
      | Opcode::JumpIfZero
      | Opcode::JumpIfNegative => true,
      _                        => false
    }
  }
}


pub const FAMILY_TABLE: &[(&[Symbol], Family)] = &[
  (&[S],    Family::Stack),
  (&[T, S], Family::Arithmetic),
  (&[T, T], Family::Heap),
  (&[L],    Family::FlowControl),
  (&[T, L], Family::IO),
];

pub const STACK_TABLE: &[(&[Symbol], Opcode)] = &[
  (&[S],    Opcode::Push),
  (&[L, S], Opcode::Duplicate),
  (&[L, T], Opcode::Swap),
  (&[L, L], Opcode::Discard),
  (&[T, S], Opcode::CopyNth),
  (&[T, L], Opcode::SlideN),
];

pub const ARITHMETIC_TABLE: &[(&[Symbol], Opcode)] = &[
  (&[S, S], Opcode::Add),
  (&[S, T], Opcode::Subtract),
  (&[S, L], Opcode::Multiply),
  (&[T, S], Opcode::Divide),
  (&[T, T], Opcode::Modulo),
];

pub const HEAP_TABLE: &[(&[Symbol], Opcode)] = &[
  (&[S], Opcode::Store),
  (&[T], Opcode::Retrieve),
];

pub const FLOW_CONTROL_TABLE: &[(&[Symbol], Opcode)] = &[
  (&[S, S], Opcode::Mark),
  (&[S, T], Opcode::Call),
  (&[S, L], Opcode::Jump),
  (&[T, S], Opcode::JumpIfZero),
  (&[T, T], Opcode::JumpIfNegative),
  (&[T, L], Opcode::EndSub),
  (&[L, L], Opcode::EndProgram),
];

pub const IO_TABLE: &[(&[Symbol], Opcode)] = &[
  (&[S, S], Opcode::OutputChar),
  (&[S, T], Opcode::OutputNumber),
  (&[T, S], Opcode::ReadChar),
  (&[T, T], Opcode::ReadNumber),
];

impl Family {
  /// The opcode code words of this family.
  pub fn table(&self) -> &'static [(&'static [Symbol], Opcode)] {
    match self {
      Family::Stack       => STACK_TABLE,
      Family::Arithmetic  => ARITHMETIC_TABLE,
      Family::Heap        => HEAP_TABLE,
      Family::FlowControl => FLOW_CONTROL_TABLE,
      Family::IO          => IO_TABLE,
    }
  }

  /// The root of this family's opcode trie.
  pub fn opcode_trie(&self) -> &'static Trie<Opcode> {
    match self {
      Family::Stack       => &STACK_TRIE,
      Family::Arithmetic  => &ARITHMETIC_TRIE,
      Family::Heap        => &HEAP_TRIE,
      Family::FlowControl => &FLOW_CONTROL_TRIE,
      Family::IO          => &IO_TRIE,
    }
  }
}

lazy_static! {
  pub static ref FAMILY_TRIE       : Trie<Family> = Trie::from_table(FAMILY_TABLE);
  static ref STACK_TRIE            : Trie<Opcode> = Trie::from_table(STACK_TABLE);
  static ref ARITHMETIC_TRIE       : Trie<Opcode> = Trie::from_table(ARITHMETIC_TABLE);
  static ref HEAP_TRIE             : Trie<Opcode> = Trie::from_table(HEAP_TABLE);
  static ref FLOW_CONTROL_TRIE     : Trie<Opcode> = Trie::from_table(FLOW_CONTROL_TABLE);
  static ref IO_TRIE               : Trie<Opcode> = Trie::from_table(IO_TABLE);
}
