mod common;
use common::*;
use wsvm::{Config, Error, Machine, Opcode, Termination};

#[test]
fn test_mark_then_jump_loops_until_the_step_limit() {
  let program = assemble_or_panic("
    Push(49)
    Mark(0)
    OutputChar
    Jump(0)
  ");
  // Push, Mark, then (OutputChar, Jump) twice, then one more OutputChar.
  let run = exec_with(&program, Config::default().with_max_steps(7));
  assert_eq!(run.result.unwrap(), Termination::StepLimit(7));
  assert_eq!(run.output, "111");
  assert_eq!(run.labels, vec![(0, encoded_len("Push(49)\nMark(0)"))]);
}

#[test]
fn test_jump_to_label_never_marked() {
  let run = exec_asm("
    Mark(1)
    Push(1)
    JumpIfZero(1)
    Jump(2)
  ");
  // Label 2 has never been marked.
  match run.result {
    Err(Error::UnknownLabel(2)) => {}
    other => panic!("unexpected {:?}", other),
  }
  assert_eq!(run.stack, vec![1]);
}

#[test]
fn test_forward_jump_before_mark_fails() {
  let run = exec_asm("
    Jump(7)
    Push(1)
    Mark(7)
    EndProgram
  ");
  match run.result {
    Err(Error::UnknownLabel(7)) => {}
    other => panic!("unexpected {:?}", other),
  }
  assert!(run.stack.is_empty());
  assert!(run.labels.is_empty());
}

#[test]
fn test_duplicate_mark() {
  let run = exec_asm("
    Mark(3)
    Push(1)
    Mark(3)
  ");
  match run.result {
    Err(Error::DuplicateLabel(3)) => {}
    other => panic!("unexpected {:?}", other),
  }
  assert_eq!(run.labels, vec![(3, encoded_len("Mark(3)"))]);
}

#[test]
fn test_reexecuting_a_mark_is_a_duplicate() {
  let run = exec_asm("
    Mark(0)
    Mark(1)
    Jump(0)
  ");
  // The jump lands after Mark(0), so Mark(1) runs a second time.
  match run.result {
    Err(Error::DuplicateLabel(1)) => {}
    other => panic!("unexpected {:?}", other),
  }
}

#[test]
fn test_call_pushes_return_position_and_jumps() {
  let program = assemble_or_panic("
    Push(65)
    Mark(4)
    OutputNumber
    Call(4)
  ");
  let mark_end = encoded_len("Push(65)\nMark(4)");
  let call_end = program.len();

  // Push, Mark, OutputNumber, Call, OutputNumber.
  let run = exec_with(&program, Config::default().with_max_steps(5));
  assert_eq!(run.result.unwrap(), Termination::StepLimit(5));
  assert_eq!(run.labels, vec![(4, mark_end)]);
  // The return position lands on the shared stack, so the second OutputNumber prints it.
  assert_eq!(run.stack, vec![65, call_end as i64]);
  assert_eq!(run.output, format!("65{}", call_end));
}

#[test]
fn test_positions_count_characters_of_commentary() {
  // One two-byte character of commentary, then Mark(0) and Call(0), five symbols each.
  let program = format!("é{}", assemble_or_panic("Mark(0)\nCall(0)"));
  let run = exec_with(&program, Config::default().with_max_steps(2));
  assert_eq!(run.result.unwrap(), Termination::StepLimit(2));
  assert_eq!(run.labels, vec![(0, 6)]);
  assert_eq!(run.stack, vec![11]);
}

#[test]
fn test_failed_machine_stays_failed() {
  let program = assemble_or_panic("
    Jump(5)
    Push(1)
    EndProgram
  ");
  let mut machine = Machine::new(&program, Vec::new(), Config::default());
  for _ in 0..2 {
    match machine.run() {
      Err(Error::UnknownLabel(5)) => {}
      other => panic!("unexpected {:?}", other),
    }
  }
  assert!(machine.stack().is_empty());
  assert_eq!(machine.termination(), None);
}

#[test]
fn test_call_unknown_label() {
  let run = exec_asm("Push(1)\nCall(9)");
  match run.result {
    Err(Error::UnknownLabel(9)) => {}
    other => panic!("unexpected {:?}", other),
  }
  // Nothing was pushed.
  assert_eq!(run.stack, vec![1]);
}

#[test]
fn test_jump_if_zero_taken() {
  let program = assemble_or_panic("
    Mark(0)
    Push(0)
    OutputNumber
    JumpIfZero(0)
  ");
  let run = exec_with(&program, Config::default().with_max_steps(7));
  assert_eq!(run.result.unwrap(), Termination::StepLimit(7));
  assert_eq!(run.output, "00");
  assert_eq!(run.stack, vec![0, 0]);
}

#[test]
fn test_jump_if_zero_not_taken() {
  let run = exec_asm("
    Mark(0)
    Push(5)
    JumpIfZero(0)
    OutputNumber
    EndProgram
  ");
  assert_eq!(run.result.unwrap(), Termination::EndProgram);
  assert_eq!(run.output, "5");
}

#[test]
fn test_jump_if_zero_on_empty_stack_falls_through() {
  let run = exec_asm("
    Mark(0)
    JumpIfZero(0)
    EndProgram
  ");
  assert_eq!(run.result.unwrap(), Termination::EndProgram);
}

#[test]
fn test_conditional_jump_resolves_label_even_when_not_taken() {
  let run = exec_asm("Push(1)\nJumpIfZero(8)");
  match run.result {
    Err(Error::UnknownLabel(8)) => {}
    other => panic!("unexpected {:?}", other),
  }
  let run = exec_asm("Push(1)\nJumpIfNegative(8)");
  match run.result {
    Err(Error::UnknownLabel(8)) => {}
    other => panic!("unexpected {:?}", other),
  }
}

#[test]
fn test_jump_if_negative_never_taken_on_unsigned_values() {
  let run = exec_asm("
    Mark(0)
    Push(0)
    JumpIfNegative(0)
    Push(7)
    JumpIfNegative(0)
    OutputNumber
    EndProgram
  ");
  assert_eq!(run.result.unwrap(), Termination::EndProgram);
  assert_eq!(run.output, "7");
  assert_eq!(run.stack, vec![0, 7]);
}

#[test]
fn test_label_opcode_without_parameter() {
  // Mark with an immediately terminated parameter.
  let run = exec(&letters("LSSL"));
  match run.result {
    Err(Error::MissingParameter(Opcode::Mark)) => {}
    other => panic!("unexpected {:?}", other),
  }
}

#[test]
fn test_end_program_stops_before_trailing_text() {
  // Everything after EndProgram is never decoded, even an incomplete instruction.
  let run = exec(&letters("SSTL|LLL|ST"));
  assert_eq!(run.result.unwrap(), Termination::EndProgram);
  assert_eq!(run.stack, vec![1]);
}

fn assemble_or_panic(assembly: &str) -> String {
  wsvm::assemble(assembly).unwrap()
}
