//! # clubscript
//!
//! Compiler for club light-sequence scripts. A script is parsed into a
//! command tree and run through five passes:
//!
//! 1. [`specialize_for_club`] - keep only the `CLUBS` blocks of one club
//! 2. [`resolve_colors`] - turn named colors into RGB triples
//! 3. [`resolve_labels`] - turn label names into absolute times
//! 4. [`resolve_time`] - turn absolute `TIME` jumps into delays
//! 5. [`annotate`] - emit the script with running time comments
//!
//! ```rust
//! use clubscript::{compile_to_string, Labels, Options};
//!
//! let source = "COLOR,red,200,100,40\nC,red 50%\nD,100\nTIME,300";
//! let out = compile_to_string(source, &Options::default(), &Labels::new())?;
//! assert_eq!(out, "C,100,50,20\nD,100\n    ; time 100\nD,200\n    ; time 300\n");
//! # Ok::<(), clubscript::ScriptError>(())
//! ```

pub mod annotate;
pub mod ast;
pub mod color;
pub mod config;
pub mod duration;
pub mod error;
pub mod labels;
pub mod parser;
pub mod specialize;
pub mod time;

pub use annotate::{annotate, annotate_to_string, emit, render, write_program};
pub use ast::*;
pub use color::{resolve_colors, Color, Palette};
pub use config::Config;
pub use duration::{duration, total_duration};
pub use error::*;
pub use labels::{load_label_track, parse_label_track, resolve_labels, Label, LabelRecord, Labels};
pub use parser::parse;
pub use specialize::specialize_for_club;
pub use time::resolve_time;

/// Settings for one compilation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Club the script is specialized for
    pub club: i64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            club: config::DEFAULT_CLUB,
        }
    }
}

/// Parse and resolve a script, returning the flat program ready to emit.
pub fn compile(source: &str, options: &Options, labels: &Labels) -> Result<Program, ScriptError> {
    let program = parse(source)?;
    let specialized = specialize_for_club(&program, options.club)?;
    let colored = resolve_colors(&specialized)?;
    let delabeled = resolve_labels(&colored, labels)?;
    resolve_time(&delabeled)
}

/// Compile a script and render it with time annotations.
pub fn compile_to_string(
    source: &str,
    options: &Options,
    labels: &Labels,
) -> Result<String, ScriptError> {
    let program = compile(source, options, labels)?;
    annotate_to_string(&program)
}
