//! The execution engine. A `Machine` is one execution context: it owns the cursor into the
//! program text, the decoder, the runtime stack, the label table, and the output sink. Nothing
//! is shared between machines except the immutable tries.

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::io::Write;

use prettytable::{format as TableFormat, Table};
use tracing::{debug, trace};

use crate::bytecode::{Instruction, Label, Opcode, Value};
use crate::config::Config;
use crate::decoder::{Decoder, Stage};
use crate::error::{Error, Result};
use crate::labels::LabelTable;
use crate::stack::RuntimeStack;
use crate::symbol::{Position, SymbolIter};

/// Why a run stopped without an error.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Termination {
  /// An `EndProgram` instruction executed.
  EndProgram,
  /// The program text ran out between instructions.
  EndOfInput,
  /// `Config::max_steps` instructions executed. The machine can be resumed with `step`.
  StepLimit(u64),
}

impl Display for Termination {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Termination::EndProgram       => write!(f, "end of program"),
      Termination::EndOfInput       => write!(f, "end of input"),
      Termination::StepLimit(steps) => write!(f, "step limit of {} reached", steps),
    }
  }
}

pub struct Machine<'p, W: Write> {
  config     :  Config,

  // Decoding //
  source     :  SymbolIter<'p>, // The instruction pointer lives here
  decoder    :  Decoder,

  // Memory stores //
  stack      :  RuntimeStack,
  labels     :  LabelTable,

  output     :  W,

  // Bookkeeping //
  steps      :  u64,
  last       :  Option<Instruction>,
  terminated :  Option<Termination>,
  failure    :  Option<Error>,
}

impl<'p, W: Write> Machine<'p, W> {

  // region Display methods

  fn make_register_table<T> (
      name      : char,
      registers : &[T],
      highlight : Option<usize>
    ) -> Table
    where T: Display
  {

    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Address", ubl->"Contents"]);

    for (i, cell) in registers.iter().enumerate() {
      match Some(i) == highlight {

        true  => {
          table.add_row(
            row![r->format!("* --> {}[{}] =", name, i), format!("{}", cell)]
          );
        }

        false => {
          table.add_row(
            row![r->format!("{}[{}] =", name, i), format!("{}", cell)]
          );
        }

      } // end match on highlight
    } // end for
    table
  }

  fn make_label_table(&self) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Label", ubl->"Position"]);

    for (label, position) in self.labels.entries() {
      table.add_row(row![r->format!("{} =", label), format!("{}", position)]);
    }
    table
  }

  // endregion

  pub fn new(program: &'p str, output: W, config: Config) -> Machine<'p, W> {
    Machine {
      config,
      source     :  SymbolIter::new(program),
      decoder    :  Decoder::new(),
      stack      :  RuntimeStack::new(),
      labels     :  LabelTable::new(),
      output,
      steps      :  0,
      last       :  None,
      terminated :  None,
      failure    :  None,
    }
  }

  // region Accessors

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn stack(&self) -> &RuntimeStack {
    &self.stack
  }

  pub fn labels(&self) -> &LabelTable {
    &self.labels
  }

  /// The instruction pointer: the character offset of the next symbol to be read.
  pub fn position(&self) -> Position {
    self.source.position()
  }

  pub fn stage(&self) -> Stage {
    self.decoder.stage()
  }

  /// Number of instructions executed so far.
  pub fn steps(&self) -> u64 {
    self.steps
  }

  pub fn last_instruction(&self) -> Option<Instruction> {
    self.last
  }

  pub fn termination(&self) -> Option<Termination> {
    self.terminated
  }

  /// The error that aborted the run, if any.
  pub fn failure(&self) -> Option<&Error> {
    self.failure.as_ref()
  }

  /// True once the run has ended, normally or by an error.
  pub fn is_halted(&self) -> bool {
    self.terminated.is_some() || self.failure.is_some()
  }

  pub fn output(&self) -> &W {
    &self.output
  }

  pub fn output_mut(&mut self) -> &mut W {
    &mut self.output
  }

  pub fn into_output(self) -> W {
    self.output
  }

  // endregion

  // region Execution

  /// Runs until the program ends, fails, or exceeds `Config::max_steps`.
  pub fn run(&mut self) -> Result<Termination> {
    loop {
      if let Some(limit) = self.config.max_steps {
        if !self.is_halted() && self.steps >= limit {
          debug!(steps = self.steps, "step limit reached");
          return Ok(Termination::StepLimit(limit));
        }
      }
      if let Some(termination) = self.step()? {
        return Ok(termination);
      }
    }
  }

  /**
    Reads symbols until one instruction has been decoded and executed. Returns the termination
    if the run ended, either by `EndProgram` or by running out of symbols between instructions.
    Once terminated, further calls return the same termination. Once an error has occurred,
    further calls return the same error and execute nothing.
  */
  pub fn step(&mut self) -> Result<Option<Termination>> {
    if let Some(failure) = &self.failure {
      return Err(failure.clone());
    }
    if let Some(termination) = self.terminated {
      return Ok(Some(termination));
    }

    let result = self.advance();
    if let Err(e) = &result {
      debug!(steps = self.steps, position = self.source.position(), error = %e, "run aborted");
      self.failure = Some(e.clone());
    }
    result
  }

  fn advance(&mut self) -> Result<Option<Termination>> {
    while let Some(symbol) = self.source.next() {
      if let Some(instruction) = self.decoder.feed(symbol)? {
        self.steps += 1;
        self.last   = Some(instruction);
        trace!(position = self.source.position(), %instruction, "execute");

        let result = self.execute(instruction);

        #[cfg(feature = "trace_computation")] eprintln!("{}", self);

        return result;
      }
    }

    self.decoder.finish()?;
    Ok(Some(self.terminate(Termination::EndOfInput)))
  }

  fn terminate(&mut self, termination: Termination) -> Termination {
    debug!(steps = self.steps, %termination, "run finished");
    self.terminated = Some(termination);
    termination
  }

  fn execute(&mut self, instruction: Instruction) -> Result<Option<Termination>> {
    let opcode = instruction.opcode;

    match opcode {

      Opcode::Push => {
        if let Some(value) = instruction.parameter {
          self.stack.push(value);
        }
      }

      Opcode::CopyNth => {
        if let Some(n) = instruction.parameter {
          self.stack.copy_nth(self.config.index_origin.to_index(n))?;
        }
      }

      Opcode::SlideN => {
        if let Some(n) = instruction.parameter {
          self.stack.slide(n);
        }
      }

      Opcode::OutputChar => {
        let value = self.top(opcode)?;
        let c = u32::try_from(value)
          .ok()
          .and_then(std::char::from_u32)
          .ok_or(Error::InvalidCharacter(value))?;
        write!(self.output, "{}", c)?;
      }

      Opcode::OutputNumber => {
        let value = self.top(opcode)?;
        write!(self.output, "{}", value)?;
      }

      Opcode::Mark => {
        let label    = label_of(&instruction)?;
        let position = self.source.position();
        self.labels.mark(label, position)?;
        debug!(label, position, "label marked");
      }

      Opcode::Jump => {
        let target = self.labels.resolve(label_of(&instruction)?)?;
        self.jump(target);
      }

      Opcode::Call => {
        let target = self.labels.resolve(label_of(&instruction)?)?;
        // The return position shares the stack with data.
        self.stack.push(self.source.position() as Value);
        self.jump(target);
      }

      Opcode::JumpIfZero => {
        let target = self.labels.resolve(label_of(&instruction)?)?;
        if self.stack.top() == Some(0) {
          self.jump(target);
        }
      }

      Opcode::JumpIfNegative => {
        let target = self.labels.resolve(label_of(&instruction)?)?;
        if matches!(self.stack.top(), Some(value) if value < 0) {
          self.jump(target);
        }
      }

      Opcode::EndProgram => {
        return Ok(Some(self.terminate(Termination::EndProgram)));
      }

      | Opcode::Duplicate
      | Opcode::Swap
      | Opcode::Discard
      | Opcode::Add
      | Opcode::Subtract
      | Opcode::Multiply
      | Opcode::Divide
      | Opcode::Modulo
      | Opcode::Store
      | Opcode::Retrieve
      | Opcode::EndSub
      | Opcode::ReadChar
      | Opcode::ReadNumber => {
        return Err(Error::UnsupportedOperation(opcode));
      }

    } // end match on opcode

    Ok(None)
  }

  fn top(&self, opcode: Opcode) -> Result<Value> {
    self.stack.top().ok_or(Error::StackUnderflow(opcode))
  }

  fn jump(&mut self, target: Position) {
    trace!(
      from  = self.source.position(),
      to    = target,
      label = ?self.labels.label_at(target),
      "jump"
    );
    self.source.seek(target);
  }

  // endregion

}

fn label_of(instruction: &Instruction) -> Result<Label> {
  instruction.parameter.ok_or(Error::MissingParameter(instruction.opcode))
}


lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

impl<'p, W: Write> Display for Machine<'p, W> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let top         = self.stack.len().checked_sub(1);
    let stack_table = Self::make_register_table('S', self.stack.as_slice(), top);
    let label_table = self.make_label_table();

    let mut combined_table = table!([stack_table, label_table]);

    combined_table.set_titles(row![ub->"Stack", ub->"Labels"]);
    combined_table.set_format(*TABLE_DISPLAY_FORMAT);

    let last = match self.last {
      Some(instruction) => instruction.to_string(),
      None              => "none".to_string()
    };

    write!(
      f,
      "Position: {}\tStage: {}\tSteps: {}\tLast: {}\n{}",
      self.source.position(), self.decoder.stage(), self.steps, last, combined_table
    )
  }
}
