//! # Color Resolution
//!
//! Scripts name colors once and refer to them by name, optionally dimmed:
//!
//! ```text
//! COLOR,red,200,100,40
//! COLOR,darkred,red 50%
//! C,red
//! RAMP,darkred 10%,100
//! ```
//!
//! Resolution removes the `COLOR` definitions and rewrites every named
//! reference into the numeric form (`C,r,g,b` / `RAMP,r,g,b,n`).
//!
//! ## Scoping
//! Colors are defined only at the top level. The top-level loop owns the
//! [`Palette`] and extends it; block bodies are resolved with a shared
//! reference and therefore cannot define anything. Names must be defined
//! before use and cannot be redefined.

use std::collections::HashMap;

use crate::ast::*;
use crate::error::ScriptError;
use crate::parser::{arg, parse_number};

/// An RGB triple. Channels are not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: i64,
    pub g: i64,
    pub b: i64,
}

impl Color {
    pub fn new(r: i64, g: i64, b: i64) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `percent / 100`, truncating toward zero.
    /// `None` if a channel overflows.
    pub fn scaled(self, percent: i64) -> Option<Self> {
        let scale = |channel: i64| channel.checked_mul(percent).map(|c| c / 100);
        Some(Self {
            r: scale(self.r)?,
            g: scale(self.g)?,
            b: scale(self.b)?,
        })
    }

    fn to_fields(self) -> [String; 3] {
        [self.r.to_string(), self.g.to_string(), self.b.to_string()]
    }
}

/// A color reference: a defined name with an optional brightness percentage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorExpr<'a> {
    pub name: &'a str,
    pub percent: Option<i64>,
}

impl<'a> ColorExpr<'a> {
    /// Parse `<name>` or `<name> <digits>%`.
    pub fn parse(text: &'a str, line: usize) -> Result<Self, ScriptError> {
        let invalid = || ScriptError::parse(line, format!("invalid color expression '{}'", text));

        let Some(body) = text.strip_suffix('%') else {
            if text.is_empty() || text.contains('%') {
                return Err(invalid());
            }
            return Ok(Self { name: text, percent: None });
        };

        let digits_start = body
            .char_indices()
            .rev()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        let (head, digits) = body.split_at(digits_start);
        if digits.is_empty() || !head.ends_with(char::is_whitespace) {
            return Err(invalid());
        }
        let name = head.trim_end();
        if name.is_empty() || name.contains('%') {
            return Err(invalid());
        }
        Ok(Self {
            name,
            percent: Some(parse_number(digits, line)?),
        })
    }
}

/// The color namespace
#[derive(Debug, Clone, Default)]
pub struct Palette {
    colors: HashMap<String, Color>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Look up a color expression appearing on `line`.
    pub fn resolve(&self, text: &str, line: usize) -> Result<Color, ScriptError> {
        let expr = ColorExpr::parse(text, line)?;
        let color = self
            .get(expr.name)
            .ok_or_else(|| ScriptError::UndefinedColor {
                line,
                name: expr.name.to_string(),
            })?;
        Ok(match expr.percent {
            Some(percent) => color.scaled(percent).ok_or_else(|| {
                ScriptError::parse(line, format!("color '{}' out of range", text))
            })?,
            None => color,
        })
    }

    /// Add the color defined by a `COLOR` command.
    fn define(&mut self, command: &Command) -> Result<(), ScriptError> {
        let line = command.line_number;
        let name = arg(command, 0)?;
        if self.colors.contains_key(name) {
            return Err(ScriptError::ColorRedefined {
                line,
                name: name.to_string(),
            });
        }
        let color = match command.args() {
            [_, expr] => self.resolve(expr, line)?,
            [_, r, g, b] => Color::new(
                parse_number(r, line)?,
                parse_number(g, line)?,
                parse_number(b, line)?,
            ),
            _ => {
                return Err(ScriptError::parse(
                    line,
                    "COLOR takes a name and either a color or r,g,b",
                ))
            }
        };
        log::trace!("line {}: color {} = {:?}", line, name, color);
        self.colors.insert(name.to_string(), color);
        Ok(())
    }
}

/// Remove color definitions and replace all named colors by numbers.
pub fn resolve_colors(commands: &[Command]) -> Result<Program, ScriptError> {
    let mut palette = Palette::new();
    let mut resolved = Vec::with_capacity(commands.len());
    for command in commands {
        if command.opcode() == DEFINE_COLOR {
            palette.define(command)?;
        } else {
            resolved.push(resolve_command(command, &palette)?);
        }
    }
    log::debug!("resolved colors with {} definitions", palette.len());
    Ok(resolved)
}

/// Resolve a block body against a palette that can no longer grow.
fn resolve_nested(commands: &[Command], palette: &Palette) -> Result<Program, ScriptError> {
    commands
        .iter()
        .map(|command| {
            if command.opcode() == DEFINE_COLOR {
                return Err(ScriptError::ColorDefinitionNotAllowed {
                    line: command.line_number,
                });
            }
            resolve_command(command, palette)
        })
        .collect()
}

fn resolve_command(command: &Command, palette: &Palette) -> Result<Command, ScriptError> {
    let line = command.line_number;
    match (command.opcode(), command.args()) {
        (SET_COLOR, [expr]) => {
            let [r, g, b] = palette.resolve(expr, line)?.to_fields();
            Ok(command.with_fields(vec![SET_COLOR.to_string(), r, g, b]))
        }
        (RAMP, [expr, duration]) => {
            let [r, g, b] = palette.resolve(expr, line)?.to_fields();
            Ok(command.with_fields(vec![RAMP.to_string(), r, g, b, duration.clone()]))
        }
        _ if command.is_block() => {
            let children = resolve_nested(command.children(), palette)?;
            Ok(command.with_children(children))
        }
        _ => Ok(command.clone()),
    }
}
