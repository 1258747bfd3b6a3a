use crate::log::row::{EventRow, MachineLog};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fixed preamble emitted by the client before the first event line.
const HEADER_LINES: usize = 5;
/// Fixed summary emitted by the client after the last event line.
const FOOTER_LINES: usize = 4;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("read timing log {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(
        "timing log {} has {} lines, too short for its header and footer",
        .path.display(),
        .lines
    )]
    Truncated { path: PathBuf, lines: usize },

    #[error(
        "timing log {}:{}: event line {:?} has no `: ` value marker",
        .path.display(),
        .line,
        .text
    )]
    MissingMarker {
        path: PathBuf,
        line: usize,
        text: String,
    },

    #[error(
        "timing log {}:{}: value {:?} does not parse as a number",
        .path.display(),
        .line,
        .field
    )]
    BadValue {
        path: PathBuf,
        line: usize,
        field: String,
    },
}

impl ParseError {
    /// Format violations on an event line abort the whole run; files that
    /// cannot be read or cannot hold the fixed framing are skipped by the
    /// caller instead.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ParseError::MissingMarker { .. } | ParseError::BadValue { .. }
        )
    }
}

/// Parse one machine's timing log into its ordered event rows.
///
/// File structure: 5 header lines, one line per event, 4 footer lines. Each
/// event line carries the raw time in microseconds immediately after the
/// first `: ` marker, terminated by the next space or end of line.
///
/// Example event line:
/// Run 17: 23408.6 usec on batch 10
pub fn parse_log_file(path: &Path) -> Result<MachineLog, ParseError> {
    let text = fs::read_to_string(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_log_text(path, &text)
}

fn parse_log_text(path: &Path, text: &str) -> Result<MachineLog, ParseError> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() < HEADER_LINES + FOOTER_LINES {
        return Err(ParseError::Truncated {
            path: path.to_path_buf(),
            lines: lines.len(),
        });
    }

    let event_lines = &lines[HEADER_LINES..lines.len() - FOOTER_LINES];

    let mut events = Vec::with_capacity(event_lines.len());
    for (offset, line) in event_lines.iter().enumerate() {
        let lno = HEADER_LINES + offset + 1;

        let Some((_, rest)) = line.split_once(": ") else {
            return Err(ParseError::MissingMarker {
                path: path.to_path_buf(),
                line: lno,
                text: (*line).to_string(),
            });
        };
        let field = match rest.find(' ') {
            Some(end) => &rest[..end],
            None => rest,
        };

        let micros: f64 = field.parse().map_err(|_| ParseError::BadValue {
            path: path.to_path_buf(),
            line: lno,
            field: field.to_string(),
        })?;

        events.push(EventRow {
            latency_ms: micros / 1000.0,
            throughput_per_sec: 1_000_000.0 / micros,
        });
    }

    Ok(MachineLog {
        path: path.to_path_buf(),
        events,
    })
}
