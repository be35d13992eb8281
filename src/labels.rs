//! # Labels
//!
//! `TIME` commands may jump to a named point of the soundtrack instead of an
//! absolute time:
//!
//! ```text
//! TIME,chorus
//! ```
//!
//! The names come from the label track of an Audacity project. This module
//! reads that track ([`parse_label_track`], [`load_label_track`]) and rewrites
//! `TIME,<label>` into `TIME,<start>` ([`resolve_labels`]).
//!
//! Times in the project are fractional seconds; the script counts in
//! centiseconds, so every time is multiplied by 100 and truncated.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::ast::*;
use crate::error::ScriptError;
use crate::parser::{arg, is_all_digits};

/// A named interval in centiseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub start: i64,
    pub end: i64,
}

impl Label {
    pub fn from_seconds(start: f64, end: f64) -> Self {
        Self {
            start: to_centiseconds(start),
            end: to_centiseconds(end),
        }
    }
}

fn to_centiseconds(seconds: f64) -> i64 {
    (seconds * 100.0) as i64
}

/// Label name to interval
pub type Labels = HashMap<String, Label>;

/// One label as stored in the label track, times in seconds
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelRecord {
    #[serde(rename = "@title")]
    pub title: String,
    #[serde(rename = "@t")]
    pub start: f64,
    #[serde(rename = "@t1")]
    pub end: f64,
}

/// The parts of an Audacity project we care about
#[derive(Debug, Deserialize)]
struct RawProject {
    #[serde(rename = "labeltrack", default)]
    label_tracks: Vec<RawLabelTrack>,
}

#[derive(Debug, Deserialize)]
struct RawLabelTrack {
    #[serde(rename = "label", default)]
    labels: Vec<LabelRecord>,
}

/// Build the label map. Label names must be unique.
pub fn labels_from_records<I>(records: I) -> Result<Labels, ScriptError>
where
    I: IntoIterator<Item = LabelRecord>,
{
    let mut labels = Labels::new();
    for record in records {
        if labels.contains_key(&record.title) {
            return Err(ScriptError::DuplicateLabel { name: record.title });
        }
        labels.insert(record.title, Label::from_seconds(record.start, record.end));
    }
    Ok(labels)
}

/// Read the labels of every label track in an Audacity project document.
pub fn parse_label_track(xml: &str) -> Result<Labels, ScriptError> {
    let project: RawProject =
        quick_xml::de::from_str(xml).map_err(|e| ScriptError::LabelTrackError(e.to_string()))?;
    let labels = labels_from_records(
        project
            .label_tracks
            .into_iter()
            .flat_map(|track| track.labels),
    )?;
    log::debug!("read {} labels", labels.len());
    Ok(labels)
}

/// Read an Audacity project file and return its labels.
pub fn load_label_track(path: &Path) -> Result<Labels, ScriptError> {
    let xml = fs::read_to_string(path).map_err(|e| {
        ScriptError::LabelTrackError(format!("cannot read '{}': {}", path.display(), e))
    })?;
    parse_label_track(&xml)
}

/// Replace label names in `TIME` commands by the label's start time.
/// Numeric targets are left alone.
pub fn resolve_labels(commands: &[Command], labels: &Labels) -> Result<Program, ScriptError> {
    commands
        .iter()
        .map(|command| match command.opcode() {
            TIME => {
                let target = arg(command, 0)?;
                if is_all_digits(target) {
                    return Ok(command.clone());
                }
                let label = labels.get(target).ok_or_else(|| ScriptError::UndefinedLabel {
                    line: command.line_number,
                    name: target.to_string(),
                })?;
                log::trace!(
                    "line {}: label {} at {}",
                    command.line_number,
                    target,
                    label.start
                );
                Ok(command.with_fields(vec![TIME.to_string(), label.start.to_string()]))
            }
            _ if command.is_block() => {
                let children = resolve_labels(command.children(), labels)?;
                Ok(command.with_children(children))
            }
            _ => Ok(command.clone()),
        })
        .collect()
}
