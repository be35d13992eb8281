//! Integration tests for the clubscript compiler
//!
//! Tests the full pipeline from script source to annotated output.

use clubscript::labels::labels_from_records;
use clubscript::{compile, compile_to_string, parse, render, LabelRecord, Labels, Options, ScriptError};

fn club(id: i64) -> Options {
    Options { club: id }
}

fn labels(entries: &[(&str, f64, f64)]) -> Labels {
    labels_from_records(entries.iter().map(|(title, start, end)| LabelRecord {
        title: title.to_string(),
        start: *start,
        end: *end,
    }))
    .unwrap()
}

#[test]
fn test_loop_color_and_time_jump() {
    let source = "\
COLOR,red,200,100,40
L,2
C,red 50%
D,100
E
TIME,300
D,50
";
    let program = compile(source, &club(1), &Labels::new()).unwrap();
    assert_eq!(program.len(), 3);
    assert_eq!(program[0].children()[0].fields, vec!["C", "100", "50", "20"]);
    assert_eq!(program[1].fields, vec!["D", "100"]);

    let out = compile_to_string(source, &club(1), &Labels::new()).unwrap();
    assert_eq!(
        out,
        "\
L,2
C,100,50,20
D,100
E
    ; time 200
D,100
    ; time 300
D,50
    ; time 350
"
    );
}

#[test]
fn test_time_annotations_accumulate() {
    let source = "COLOR,red,200,100,40\nC,red 50%\nD,100\nC,red 50%\nD,100\nTIME,300\nD,50";
    let out = compile_to_string(source, &club(1), &Labels::new()).unwrap();
    let times: Vec<&str> = out.lines().filter(|l| l.starts_with("    ; time")).collect();
    assert_eq!(
        times,
        vec!["    ; time 100", "    ; time 200", "    ; time 300", "    ; time 350"]
    );
}

#[test]
fn test_show_for_two_clubs() {
    let source = "\
COLOR,blue,0,0,200   ; shared palette
COLOR,white,255,255,255
C,blue
CLUBS,1
  COLOR_FLASH
  RAMP,white,50
E
CLUBS,2,3
  D,20
  RAMP,blue 50%,30
E
TIME,intro_end
C,white 10%
D,25
";
    let labels = labels(&[("intro_end", 1.0, 4.0)]);

    let one = compile_to_string(source, &club(1), &labels).unwrap();
    assert_eq!(
        one,
        "\
C,0,0,200
  COLOR_FLASH
RAMP,255,255,255,50
    ; time 50
D,50
    ; time 100
C,25,25,25
D,25
    ; time 125
"
    );

    let two = compile_to_string(source, &club(2), &labels).unwrap();
    assert_eq!(
        two,
        "\
C,0,0,200
  D,20
    ; time 20
RAMP,0,0,100,30
    ; time 50
D,50
    ; time 100
C,25,25,25
D,25
    ; time 125
"
    );
}

#[test]
fn test_label_jump() {
    let labels = labels(&[("chorus", 12.5, 30.0)]);
    let out = compile_to_string("D,250\nTIME,chorus\nD,1", &club(1), &labels).unwrap();
    assert_eq!(out, "D,250\n    ; time 250\nD,1000\n    ; time 1250\nD,1\n    ; time 1251\n");
}

#[test]
fn test_round_trip_without_passes() {
    let source = "; show\nL,3 ; repeat\n  CLUBS,1\n    D,5\n  E\nE\nTIME,chorus\n";
    assert_eq!(render(&parse(source).unwrap()), source);
}

#[test]
fn test_comments_and_blank_lines_survive() {
    let out = compile_to_string("; intro\n\nD,10 ; wait", &club(1), &Labels::new()).unwrap();
    assert_eq!(out, "; intro\n\nD,10 ; wait\n    ; time 10\n");
}

#[test]
fn test_errors_carry_line_numbers() {
    let cases: Vec<(&str, usize)> = vec![
        ("D,1\nD,x", 2),
        ("D,1\nL,0\nE", 2),
        ("D,1\nL,2\nD,1", 2),
        ("D,1\nE", 2),
        ("D,1\nC,purple", 2),
        ("COLOR,a,1,1,1\nCOLOR,a,2,2,2", 2),
        ("L,1\nCOLOR,a,1,1,1\nE", 2),
        ("D,1\n\nTIME,nowhere", 3),
        ("D,100\nTIME,50", 2),
        ("L,2\nTIME,50\nE", 2),
    ];
    for (source, line) in cases {
        let err = compile(source, &club(1), &Labels::new()).unwrap_err();
        assert_eq!(err.line(), Some(line), "{:?} for {:?}", err, source);
    }
}

#[test]
fn test_back_in_time_message() {
    let err = compile("TIME,100\nTIME,50", &club(1), &Labels::new()).unwrap_err();
    assert!(matches!(err, ScriptError::BackInTime { line: 2, time: 100 }));
    assert_eq!(err.to_string(), "Cannot go back in time - it's already 100 - in line 2");
}

#[test]
fn test_dropped_clubs_block_skips_its_errors() {
    // Undefined colors inside another club's block never get resolved
    let out = compile_to_string("CLUBS,2\nC,nope\nE\nD,5", &club(1), &Labels::new()).unwrap();
    assert_eq!(out, "D,5\n    ; time 5\n");
}
