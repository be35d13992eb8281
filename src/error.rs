//! # Error Types
//!
//! Every failure of the clubscript pipeline is a [`ScriptError`]. Passes return
//! them instead of exiting, and the binary turns them into a message on stderr
//! and a nonzero exit status.
//!
//! Errors caused by the script carry the 1-based line number of the offending
//! command. Synthesized commands (the delays produced by time resolution) carry
//! the line of the `TIME` command they replace.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptError {
    /// Syntax error: malformed or missing field, zero count, unterminated
    /// block or stray `E`.
    ///
    /// # Example
    /// ```
    /// # use clubscript::ScriptError;
    /// let err = ScriptError::ParseError {
    ///     line: 4,
    ///     message: "count can't be zero".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Parse error at line 4: count can't be zero");
    /// ```
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Color {name} not defined in line {line}")]
    UndefinedColor { line: usize, name: String },

    #[error("Color {name} redefined in line {line}")]
    ColorRedefined { line: usize, name: String },

    /// `COLOR` may only appear at the top level of a script.
    #[error("Can't define colors inside a block in line {line}")]
    ColorDefinitionNotAllowed { line: usize },

    #[error("Label {name} not defined in line {line}")]
    UndefinedLabel { line: usize, name: String },

    #[error("Label {name} defined more than once")]
    DuplicateLabel { name: String },

    /// A `TIME` command was reached while computing a duration, i.e. inside a
    /// block where it cannot be resolved.
    #[error("TIME not supported here in line {line}")]
    TimeInDuration { line: usize },

    /// # Example
    /// ```
    /// # use clubscript::ScriptError;
    /// let err = ScriptError::BackInTime { line: 7, time: 300 };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Cannot go back in time - it's already 300 - in line 7"
    /// );
    /// ```
    #[error("Cannot go back in time - it's already {time} - in line {line}")]
    BackInTime { line: usize, time: i64 },

    /// A pass produced a tree that violates the command tree invariants.
    /// Never caused by user input alone.
    #[error("Internal error at line {line}: {message}")]
    InternalError { line: usize, message: String },

    #[error("Invalid label track: {0}")]
    LabelTrackError(String),

    #[error("Invalid config: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScriptError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        ScriptError::ParseError {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn out_of_range(line: usize) -> Self {
        Self::parse(line, "duration out of range")
    }

    /// Source line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ScriptError::ParseError { line, .. }
            | ScriptError::UndefinedColor { line, .. }
            | ScriptError::ColorRedefined { line, .. }
            | ScriptError::ColorDefinitionNotAllowed { line }
            | ScriptError::UndefinedLabel { line, .. }
            | ScriptError::TimeInDuration { line }
            | ScriptError::BackInTime { line, .. }
            | ScriptError::InternalError { line, .. } => Some(*line),
            ScriptError::DuplicateLabel { .. }
            | ScriptError::LabelTrackError(_)
            | ScriptError::ConfigError(_)
            | ScriptError::Io(_) => None,
        }
    }
}
