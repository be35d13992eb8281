//! # Time Resolution
//!
//! `TIME,<t>` says "be at absolute time `t` now". Walking the top level while
//! summing durations, every jump is replaced by the delay that gets there:
//!
//! ```text
//! D,100        D,100
//! TIME,300  →  D,200
//! D,50         D,50
//! ```
//!
//! Runs after specialization and label resolution, so targets are numbers
//! and no `CLUBS` block is left to confuse the duration count.

use crate::ast::*;
use crate::duration::duration;
use crate::error::ScriptError;
use crate::parser::{arg, parse_number};

/// Replace top-level `TIME` jumps with delays.
pub fn resolve_time(commands: &[Command]) -> Result<Program, ScriptError> {
    let mut resolved = Vec::with_capacity(commands.len());
    let mut time: i64 = 0;
    for command in commands {
        if command.opcode() != TIME {
            resolved.push(command.clone());
            time = time
                .checked_add(duration(command)?)
                .ok_or_else(|| ScriptError::out_of_range(command.line_number))?;
            continue;
        }

        let line = command.line_number;
        let target = parse_number(arg(command, 0)?, line)?;
        if target < time {
            return Err(ScriptError::BackInTime { line, time });
        }
        if target == time {
            log::trace!("line {}: already at {}", line, time);
            continue;
        }
        let delay = target
            .checked_sub(time)
            .ok_or_else(|| ScriptError::out_of_range(line))?;
        resolved.push(Command::synthesized(
            line,
            vec![DELAY.to_string(), delay.to_string()],
        ));
        time = target;
    }
    log::debug!("resolved time jumps, program ends at {}", time);
    Ok(resolved)
}
