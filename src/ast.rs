//! # Command Tree
//!
//! A clubscript program is a sequence of [`Command`]s. Each command is one
//! source line split into comma-separated fields; block commands (`L` and
//! `CLUBS`) additionally own the commands up to their closing `E` line.
//!
//! ```text
//! Program = Vec<Command>
//!   Command
//!     ├── source_line: verbatim text, re-emitted by the annotator
//!     ├── line_number: 1-based, for error messages
//!     ├── fields: ["L", "2"]          (comment stripped, trimmed)
//!     └── block: Option<Block>
//!           ├── children: Vec<Command>
//!           └── closing_line: "E"
//! ```
//!
//! Commands are values. Passes never modify a command in place; they build a
//! new one with [`Command::with_fields`] or [`Command::with_children`], so every
//! intermediate tree stays usable.

pub const DELAY: &str = "D";
pub const RAMP: &str = "RAMP";
pub const SET_COLOR: &str = "C";
pub const DEFINE_COLOR: &str = "COLOR";
pub const LOOP: &str = "L";
pub const CLUBS: &str = "CLUBS";
pub const TIME: &str = "TIME";
pub const END: &str = "E";

/// Top-level commands in execution order.
pub type Program = Vec<Command>;

/// Opcodes that own a body terminated by an `E` line.
pub fn is_block_opcode(opcode: &str) -> bool {
    opcode == LOOP || opcode == CLUBS
}

#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub source_line: String,
    pub line_number: usize,
    pub fields: Vec<String>,
    pub block: Option<Block>,
}

/// Body of a block command.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub children: Vec<Command>,
    pub closing_line: String,
}

impl Command {
    /// A command without a body.
    pub fn new(source_line: impl Into<String>, line_number: usize, fields: Vec<String>) -> Self {
        Self {
            source_line: source_line.into(),
            line_number,
            fields,
            block: None,
        }
    }

    /// A command synthesized by a pass; its source line is the joined fields.
    pub fn synthesized(line_number: usize, fields: Vec<String>) -> Self {
        Self::new(fields.join(","), line_number, fields)
    }

    pub fn opcode(&self) -> &str {
        self.fields.first().map(String::as_str).unwrap_or("")
    }

    /// Children of a block command, empty for everything else.
    pub fn children(&self) -> &[Command] {
        self.block
            .as_ref()
            .map(|b| b.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_block(&self) -> bool {
        self.block.is_some()
    }

    /// Arguments after the opcode.
    pub fn args(&self) -> &[String] {
        self.fields.get(1..).unwrap_or(&[])
    }

    /// Copy of this command with new fields. The source line is rebuilt from
    /// the fields so the emitted text matches the rewritten command.
    pub fn with_fields(&self, fields: Vec<String>) -> Self {
        Self {
            source_line: fields.join(","),
            line_number: self.line_number,
            fields,
            block: self.block.clone(),
        }
    }

    /// Copy of this block command with a new body. Non-block commands are
    /// returned unchanged.
    pub fn with_children(&self, children: Vec<Command>) -> Self {
        Self {
            source_line: self.source_line.clone(),
            line_number: self.line_number,
            fields: self.fields.clone(),
            block: self.block.as_ref().map(|b| Block {
                children,
                closing_line: b.closing_line.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(s: &[&str]) -> Vec<String> {
        s.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_opcode_and_args() {
        let c = Command::new("D,100 ; wait", 3, fields(&["D", "100"]));
        assert_eq!(c.opcode(), "D");
        assert_eq!(c.args(), &["100".to_string()]);
        assert!(c.children().is_empty());
        assert!(!c.is_block());
    }

    #[test]
    fn test_with_fields_rebuilds_source_line() {
        let c = Command::new("C, red  ; comment", 1, fields(&["C", "red"]));
        let resolved = c.with_fields(fields(&["C", "200", "100", "40"]));
        assert_eq!(resolved.source_line, "C,200,100,40");
        assert_eq!(resolved.line_number, 1);
        // Original untouched
        assert_eq!(c.source_line, "C, red  ; comment");
    }

    #[test]
    fn test_with_children_keeps_closing_line() {
        let mut l = Command::new("L,2", 1, fields(&["L", "2"]));
        l.block = Some(Block {
            children: vec![],
            closing_line: "E ; end".to_string(),
        });
        let child = Command::new("D,5", 2, fields(&["D", "5"]));
        let rebuilt = l.with_children(vec![child.clone()]);
        assert_eq!(rebuilt.children(), &[child]);
        assert_eq!(rebuilt.block.unwrap().closing_line, "E ; end");
        assert!(l.children().is_empty());
    }

    #[test]
    fn test_block_opcodes() {
        assert!(is_block_opcode("L"));
        assert!(is_block_opcode("CLUBS"));
        assert!(!is_block_opcode("D"));
        assert!(!is_block_opcode("E"));
    }
}
