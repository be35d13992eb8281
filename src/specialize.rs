//! # Club Specialization
//!
//! A script drives several clubs at once; `CLUBS` blocks hold the parts meant
//! for only some of them:
//!
//! ```text
//! CLUBS,1,3
//!   C,red
//! E
//! ```
//!
//! Specializing for one club removes every `CLUBS` block. Blocks listing the
//! club are replaced by their (specialized) body, spliced into the parent
//! sequence. All other blocks are dropped with their body.

use crate::ast::*;
use crate::error::ScriptError;
use crate::parser::parse_count;

/// Resolve all `CLUBS` blocks for `club`.
pub fn specialize_for_club(commands: &[Command], club: i64) -> Result<Program, ScriptError> {
    let mut specialized = Vec::with_capacity(commands.len());
    for command in commands {
        match command.opcode() {
            CLUBS => {
                if lists_club(command, club)? {
                    specialized.extend(specialize_for_club(command.children(), club)?);
                } else {
                    log::trace!("line {}: dropped for club {}", command.line_number, club);
                }
            }
            _ if command.is_block() => {
                let children = specialize_for_club(command.children(), club)?;
                specialized.push(command.with_children(children));
            }
            _ => specialized.push(command.clone()),
        }
    }
    Ok(specialized)
}

fn lists_club(command: &Command, club: i64) -> Result<bool, ScriptError> {
    for id in command.args() {
        if parse_count(id, command.line_number)? == club {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::render;
    use crate::parser::parse;

    const SOURCE: &str = "\
D,1
CLUBS,1,2
  D,2
  CLUBS,2
    D,3
  E
E
L,2
  CLUBS,3
    D,4
  E
  D,5
E";

    #[test]
    fn test_listed_club_is_flattened() {
        let program = parse(SOURCE).unwrap();
        let specialized = specialize_for_club(&program, 1).unwrap();
        assert_eq!(render(&specialized), "D,1\n  D,2\nL,2\n  D,5\nE\n");
    }

    #[test]
    fn test_nested_clubs() {
        let program = parse(SOURCE).unwrap();
        let specialized = specialize_for_club(&program, 2).unwrap();
        assert_eq!(render(&specialized), "D,1\n  D,2\n    D,3\nL,2\n  D,5\nE\n");
    }

    #[test]
    fn test_clubs_inside_loop() {
        let program = parse(SOURCE).unwrap();
        let specialized = specialize_for_club(&program, 3).unwrap();
        assert_eq!(render(&specialized), "D,1\nL,2\n    D,4\n  D,5\nE\n");
    }

    #[test]
    fn test_unlisted_club_drops_everything() {
        let program = parse("CLUBS,1\nD,2\nE").unwrap();
        assert!(specialize_for_club(&program, 9).unwrap().is_empty());
    }

    #[test]
    fn test_idempotent() {
        let program = parse(SOURCE).unwrap();
        let once = specialize_for_club(&program, 2).unwrap();
        for club in [1, 2, 3, 42] {
            assert_eq!(specialize_for_club(&once, club).unwrap(), once);
        }
    }

    #[test]
    fn test_input_tree_unchanged() {
        let program = parse(SOURCE).unwrap();
        let before = program.clone();
        specialize_for_club(&program, 1).unwrap();
        assert_eq!(program, before);
    }

    #[test]
    fn test_loop_keeps_line_and_count() {
        let program = parse("L,4 ; four\nCLUBS,1\nD,1\nE\nE").unwrap();
        let specialized = specialize_for_club(&program, 1).unwrap();
        assert_eq!(specialized[0].source_line, "L,4 ; four");
        assert_eq!(specialized[0].fields, vec!["L", "4"]);
        assert_eq!(specialized[0].children()[0].fields, vec!["D", "1"]);
    }
}
