//! # Emitter
//!
//! Writes a program back out as text: every command's source line, the body
//! of blocks, then the block's closing line. [`annotate`] additionally follows
//! each top-level command that takes time with a comment holding the total
//! time so far:
//!
//! ```text
//! D,100
//!     ; time 100
//! ```

use std::io::Write;

use crate::ast::Command;
use crate::duration::duration;
use crate::error::ScriptError;

/// Write `commands` with cumulative time comments.
///
/// Lines already written stay written if a later command fails.
pub fn annotate<W: Write>(commands: &[Command], out: &mut W) -> Result<(), ScriptError> {
    let mut time: i64 = 0;
    for command in commands {
        write_command(command, out)?;
        let d = duration(command)?;
        if d > 0 {
            time = time
                .checked_add(d)
                .ok_or_else(|| ScriptError::out_of_range(command.line_number))?;
            writeln!(out, "    ; time {}", time)?;
        }
    }
    Ok(())
}

/// [`annotate`] into a string.
pub fn annotate_to_string(commands: &[Command]) -> Result<String, ScriptError> {
    let mut out = Vec::new();
    annotate(commands, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Write `commands` with time comments, or without them when `plain`.
/// Output is flushed even when a command fails.
pub fn emit<W: Write>(commands: &[Command], out: &mut W, plain: bool) -> Result<(), ScriptError> {
    let result = if plain {
        write_program(commands, out).map_err(ScriptError::from)
    } else {
        annotate(commands, out)
    };
    out.flush()?;
    result
}

/// Write `commands` without annotations.
pub fn write_program<W: Write>(commands: &[Command], out: &mut W) -> std::io::Result<()> {
    for command in commands {
        write_command(command, out)?;
    }
    Ok(())
}

/// Source text of `commands`, one line each.
pub fn render(commands: &[Command]) -> String {
    let mut text = String::new();
    for command in commands {
        render_command(command, &mut text);
    }
    text
}

fn render_command(command: &Command, text: &mut String) {
    text.push_str(&command.source_line);
    text.push('\n');
    if let Some(block) = &command.block {
        for child in &block.children {
            render_command(child, text);
        }
        text.push_str(&block.closing_line);
        text.push('\n');
    }
}

fn write_command<W: Write>(command: &Command, out: &mut W) -> std::io::Result<()> {
    let mut text = String::new();
    render_command(command, &mut text);
    out.write_all(text.as_bytes())
}
