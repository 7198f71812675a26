/*!
  The human readable textual form of a program is called assembly. One instruction per line,
  written the way `Instruction` displays itself:

  ```text
  Push(72)       # comments start with `#` or `;`
  OutputChar
  EndProgram
  ```

  Opcode names are resolved through the `strum` derives on `Opcode`. Parameters are unsigned
  decimal numbers, since the symbol encoding has no sign.
*/

use std::str::FromStr;

use nom::{
  IResult,
  branch::alt,
  bytes::complete::is_not,
  character::complete::{alpha1, char as one_char, digit1, space0},
  combinator::{all_consuming, opt},
  sequence::{delimited, pair, preceded, terminated, tuple},
};
use thiserror::Error;

use super::{encode_program, Instruction, Opcode, Value};

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum AssemblyError {
  #[error("Error on line {line}: cannot parse `{text}`.")]
  Syntax { line: usize, text: String },

  #[error("Error on line {line}: {name} is not an operation.")]
  NotAnOperation { line: usize, name: String },

  #[error("Error on line {line}: {opcode} requires {} arguments.", .opcode.arity())]
  WrongArity { line: usize, opcode: Opcode },

  #[error("Error on line {line}: {digits} does not fit in a parameter.")]
  ParameterOutOfRange { line: usize, digits: String },

  #[error("{0} is negative and has no encoding.")]
  NegativeParameter(Value),

  #[error("{0} does not take a parameter.")]
  UnexpectedParameter(Opcode),
}

// Abbreviated name internally
use AssemblyError as Fault;

/// An operation name and its argument digits, before validation.
type Syntax<'a> = (&'a str, Option<&'a str>);

fn comment(input: &str) -> IResult<&str, Option<&str>> {
  preceded(alt((one_char('#'), one_char(';'))), opt(is_not("\r\n")))(input)
}

fn argument(input: &str) -> IResult<&str, &str> {
  delimited(
    terminated(one_char('('), space0),
    digit1,
    preceded(space0, one_char(')')),
  )(input)
}

fn statement(input: &str) -> IResult<&str, Syntax<'_>> {
  pair(alpha1, opt(preceded(space0, argument)))(input)
}

fn line(input: &str) -> IResult<&str, Option<Syntax<'_>>> {
  all_consuming(
    delimited(space0, opt(statement), tuple((space0, opt(comment))))
  )(input)
}

/// Parses assembly text into instructions. Blank and comment-only lines are skipped.
pub fn parse_assembly(text: &str) -> Result<Vec<Instruction>, AssemblyError> {
  let mut instructions = Vec::new();

  for (index, source) in text.lines().enumerate() {
    let line_number = index + 1;

    let syntax = match line(source) {
      Ok((_rest, syntax)) => syntax,
      Err(_e) => {
        return Err(Fault::Syntax { line: line_number, text: source.trim().to_string() });
      }
    };
    let (name, digits) = match syntax {
      Some(syntax) => syntax,
      None         => continue
    };

    let opcode = Opcode::from_str(name).map_err(|_| {
      Fault::NotAnOperation { line: line_number, name: name.to_string() }
    })?;

    let parameter = match digits {
      Some(digits) => {
        let value = digits.parse::<Value>().map_err(|_| {
          Fault::ParameterOutOfRange { line: line_number, digits: digits.to_string() }
        })?;
        Some(value)
      }
      None => None
    };

    if opcode.takes_parameter() != parameter.is_some() {
      return Err(Fault::WrongArity { line: line_number, opcode });
    }
    instructions.push(Instruction::new(opcode, parameter));
  }

  Ok(instructions)
}

/// Translates assembly text directly into program text.
pub fn assemble(text: &str) -> Result<String, AssemblyError> {
  encode_program(&parse_assembly(text)?)
}


#[cfg(test)]
mod tests {
  use super::*;
  use strum::IntoEnumIterator;

  #[test]
  fn parses_instructions_comments_and_blank_lines() {
    let text = "
      # Print 42
      Push ( 42 )   ; the answer
      OutputNumber

      EndProgram
    ";
    assert_eq!(
      parse_assembly(text),
      Ok(vec![
        Instruction::unary(Opcode::Push, 42),
        Instruction::nullary(Opcode::OutputNumber),
        Instruction::nullary(Opcode::EndProgram),
      ])
    );
  }

  #[test]
  fn every_opcode_name_is_accepted() {
    for opcode in Opcode::iter() {
      let text = match opcode.takes_parameter() {
        true  => format!("{}(3)", opcode),
        false => format!("{}", opcode)
      };
      let parsed = parse_assembly(&text).unwrap();
      assert_eq!(parsed.len(), 1);
      assert_eq!(parsed[0].opcode, opcode);
      assert_eq!(parsed[0].to_string(), text);
    }
  }

  #[test]
  fn reports_errors_with_line_numbers() {
    assert_eq!(
      parse_assembly("Push(1)\nShove(2)"),
      Err(Fault::NotAnOperation { line: 2, name: "Shove".to_string() })
    );
    assert_eq!(
      parse_assembly("Jump"),
      Err(Fault::WrongArity { line: 1, opcode: Opcode::Jump })
    );
    assert_eq!(
      parse_assembly("\n\nSwap(1)"),
      Err(Fault::WrongArity { line: 3, opcode: Opcode::Swap })
    );
    assert_eq!(
      parse_assembly("Push(-1)"),
      Err(Fault::Syntax { line: 1, text: "Push(-1)".to_string() })
    );
    assert_eq!(
      parse_assembly("Push(99999999999999999999)"),
      Err(Fault::ParameterOutOfRange { line: 1, digits: "99999999999999999999".to_string() })
    );
  }

  #[test]
  fn wrong_arity_message_names_the_arity() {
    let error = Fault::WrongArity { line: 4, opcode: Opcode::Mark };
    assert_eq!(error.to_string(), "Error on line 4: Mark requires 1 arguments.");
  }

  #[test]
  fn assembles_to_symbols() {
    assert_eq!(assemble("Push(1)\nOutputNumber").unwrap(), "  \t\n\t\n \t");
  }
}
