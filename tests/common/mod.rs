#![allow(dead_code)]

use wsvm::{assemble, Config, Label, Machine, Position, Result, Termination, Value};

/// The outcome of running a program to completion.
pub struct Run {
  pub result : Result<Termination>,
  pub output : String,
  pub stack  : Vec<Value>,
  pub labels : Vec<(Label, Position)>,
}

/// Translates the mnemonic letters S, T, and L into program text. Anything else is kept, so
/// lowercase words and punctuation act as commentary.
pub fn letters(text: &str) -> String {
  text
    .chars()
    .map(|c| match c {
      'S' => ' ',
      'T' => '\t',
      'L' => '\n',
      other => other
    })
    .collect()
}

pub fn exec(program: &str) -> Run {
  exec_with(program, Config::default().with_max_steps(5000))
}

pub fn exec_with(program: &str, config: Config) -> Run {
  let mut machine = Machine::new(program, Vec::new(), config);
  let result = machine.run();
  let stack  = machine.stack().as_slice().to_vec();
  let labels = machine.labels().entries();
  let output = String::from_utf8(machine.into_output()).unwrap();
  Run { result, output, stack, labels }
}

pub fn exec_asm(assembly: &str) -> Run {
  exec(&assemble(assembly).unwrap())
}

pub fn exec_asm_with(assembly: &str, config: Config) -> Run {
  exec_with(&assemble(assembly).unwrap(), config)
}

/// Byte length of the encoding of `assembly`, for computing program positions.
pub fn encoded_len(assembly: &str) -> usize {
  assemble(assembly).unwrap().len()
}
