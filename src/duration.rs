//! # Duration Evaluator
//!
//! Computes how many time units a command or subtree takes:
//!
//! - `D,n` and `RAMP,...,n` take `n`
//! - `L,count` takes `count` times the sum of its body
//! - everything else is instantaneous
//!
//! `TIME` has no duration of its own. Reaching one here means it sits where
//! time resolution cannot remove it (inside a block).

use crate::ast::*;
use crate::error::ScriptError;
use crate::parser::{arg, parse_count};

/// Duration of a single command, including its body.
pub fn duration(command: &Command) -> Result<i64, ScriptError> {
    let line = command.line_number;
    match command.opcode() {
        DELAY => parse_count(arg(command, 0)?, line),
        RAMP => match command.fields.last() {
            Some(n) if command.fields.len() > 1 => parse_count(n, line),
            _ => Err(ScriptError::parse(line, "RAMP is missing its duration")),
        },
        LOOP => {
            let count = parse_count(arg(command, 0)?, line)?;
            count
                .checked_mul(total_duration(command.children())?)
                .ok_or_else(|| ScriptError::out_of_range(line))
        }
        TIME => Err(ScriptError::TimeInDuration { line }),
        opcode => {
            if command.is_block() {
                return Err(ScriptError::InternalError {
                    line,
                    message: format!("unexpected sub-commands in {}", opcode),
                });
            }
            Ok(0)
        }
    }
}

/// Sum of the durations of a command sequence, in order.
pub fn total_duration(commands: &[Command]) -> Result<i64, ScriptError> {
    commands.iter().try_fold(0i64, |total, command| {
        total
            .checked_add(duration(command)?)
            .ok_or_else(|| ScriptError::out_of_range(command.line_number))
    })
}
