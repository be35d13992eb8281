//! # Line Parser
//!
//! Turns clubscript source text into a [`Program`].
//!
//! Every line is one command. Everything after the first `;` is a comment;
//! the remainder is trimmed and split on `,`, and each field is trimmed again.
//! `L` and `CLUBS` open a block that runs until the matching `E` line:
//!
//! ```text
//! COLOR,red,200,100,40
//! L,2            ; twice
//!   C,red 50%
//!   D,100
//! E
//! ```
//!
//! Blank and comment-only lines are kept as commands with an empty opcode so
//! the script can be re-emitted verbatim.

use crate::ast::*;
use crate::error::ScriptError;

/// Parser over the lines of a script
pub struct Parser<'a> {
    lines: Vec<&'a str>,
    position: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines().collect(),
            position: 0,
        }
    }

    /// 1-based number of the line at the current position
    fn line_number(&self) -> usize {
        self.position + 1
    }

    pub fn parse_program(&mut self) -> Result<Program, ScriptError> {
        let commands = self.parse_lines()?;
        if self.position < self.lines.len() {
            return Err(ScriptError::parse(self.line_number(), "E without L"));
        }
        log::debug!(
            "parsed {} top-level commands from {} lines",
            commands.len(),
            self.lines.len()
        );
        Ok(commands)
    }

    /// Parse commands until an `E` line or the end of input. The `E` line is
    /// left for the caller.
    fn parse_lines(&mut self) -> Result<Vec<Command>, ScriptError> {
        let mut commands = Vec::new();
        while let Some(line) = self.lines.get(self.position) {
            let fields = split_line(line);
            if fields[0] == END {
                break;
            }
            commands.push(self.parse_command(fields)?);
        }
        Ok(commands)
    }

    fn parse_command(&mut self, fields: Vec<String>) -> Result<Command, ScriptError> {
        let line_number = self.line_number();
        let mut command = Command::new(self.lines[self.position], line_number, fields);
        validate_fields(&command)?;
        self.position += 1;

        if is_block_opcode(command.opcode()) {
            let children = self.parse_lines()?;
            let Some(closing_line) = self.lines.get(self.position) else {
                return Err(ScriptError::parse(
                    line_number,
                    format!("unterminated {} block", command.opcode()),
                ));
            };
            command.block = Some(Block {
                children,
                closing_line: closing_line.to_string(),
            });
            self.position += 1;
        }

        Ok(command)
    }
}

/// Parse clubscript source into its command tree.
pub fn parse(source: &str) -> Result<Program, ScriptError> {
    Parser::new(source).parse_program()
}

/// Split a line into trimmed fields, dropping any `;` comment.
/// Always returns at least one (possibly empty) field.
pub fn split_line(line: &str) -> Vec<String> {
    let code = match line.find(';') {
        Some(idx) => &line[..idx],
        None => line,
    };
    code.trim_matches(is_blank)
        .split(',')
        .map(|f| f.trim_matches(is_blank).to_string())
        .collect()
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Parse an integer field, reporting `line` on failure
pub(crate) fn parse_number(field: &str, line: usize) -> Result<i64, ScriptError> {
    field
        .parse()
        .map_err(|_| ScriptError::parse(line, format!("expected a number, got '{}'", field)))
}

/// Parse an integer field that must not be zero
pub(crate) fn parse_count(field: &str, line: usize) -> Result<i64, ScriptError> {
    let count = parse_number(field, line)?;
    if count == 0 {
        return Err(ScriptError::parse(line, "count can't be zero"));
    }
    Ok(count)
}

/// True for a non-empty string of ASCII digits
pub(crate) fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Fetch argument `index` (0-based, after the opcode)
pub(crate) fn arg(command: &Command, index: usize) -> Result<&str, ScriptError> {
    command.args().get(index).map(String::as_str).ok_or_else(|| {
        ScriptError::parse(
            command.line_number,
            format!("{} is missing argument {}", command.opcode(), index + 1),
        )
    })
}

fn expect_arity(command: &Command, allowed: &[usize]) -> Result<(), ScriptError> {
    let n = command.args().len();
    if allowed.contains(&n) {
        return Ok(());
    }
    let expected = allowed
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(" or ");
    Err(ScriptError::parse(
        command.line_number,
        format!(
            "{} takes {} argument(s), got {}",
            command.opcode(),
            expected,
            n
        ),
    ))
}

/// Check the fields of opcodes with a fixed shape. Unknown opcodes are
/// carried through untouched.
fn validate_fields(command: &Command) -> Result<(), ScriptError> {
    let line = command.line_number;
    let args = command.args();
    match command.opcode() {
        DELAY => {
            expect_arity(command, &[1])?;
            parse_count(&args[0], line)?;
        }
        LOOP => {
            expect_arity(command, &[1])?;
            parse_count(&args[0], line)?;
        }
        CLUBS => {
            if args.is_empty() {
                return Err(ScriptError::parse(line, "CLUBS needs at least one club id"));
            }
            for id in args {
                parse_count(id, line)?;
            }
        }
        SET_COLOR => {
            expect_arity(command, &[1, 3])?;
            if args.len() == 3 {
                for channel in args {
                    parse_number(channel, line)?;
                }
            }
        }
        RAMP => {
            expect_arity(command, &[2, 4])?;
            if let Some((duration, channels)) = args.split_last() {
                parse_count(duration, line)?;
                if channels.len() == 3 {
                    for channel in channels {
                        parse_number(channel, line)?;
                    }
                }
            }
        }
        DEFINE_COLOR => {
            expect_arity(command, &[2, 4])?;
            if args.len() == 4 {
                for channel in &args[1..] {
                    parse_number(channel, line)?;
                }
            }
        }
        TIME => {
            expect_arity(command, &[1])?;
            if args[0].is_empty() {
                return Err(ScriptError::parse(line, "TIME needs a target"));
            }
        }
        _ => {}
    }
    Ok(())
}
