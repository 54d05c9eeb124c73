//! Roster loading.
//!
//! A roster is a sequence of records `code x y name`. `code`, `x` and `y`
//! are whitespace-separated integers and may be spread over any number of
//! lines. The name is whatever follows `y` on its line, trimmed; if
//! nothing does, it is the next non-empty line.
//!
//! Records with an unknown kind code are consumed in full and reported in
//! [`LoadReport::skipped`]. Anything else that does not parse stops the
//! load with [`RosterError::Malformed`].

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::Lines;

use skirmish_core::{ActorSet, Kind, Position};

use crate::error::RosterError;

/// A record dropped because its kind code is not recognised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Line of the record's kind code.
    pub line: usize,
    /// The unrecognised code.
    pub code: i64,
    /// The record's name.
    pub name: String,
}

/// Result of a successful load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Every recognised record, alive, in file order.
    pub actors: ActorSet,
    /// Records skipped for an unknown kind code.
    pub skipped: Vec<SkippedRecord>,
}

/// Token cursor over the roster text with line tracking.
struct Cursor<'a> {
    lines: Lines<'a>,
    line: usize,
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line: 0,
            rest: "",
        }
    }

    fn advance_line(&mut self) -> Option<()> {
        self.rest = self.lines.next()?;
        self.line += 1;
        Some(())
    }

    /// Next whitespace-delimited token, crossing line breaks.
    fn token(&mut self) -> Option<(usize, &'a str)> {
        loop {
            let trimmed = self.rest.trim_start();
            if !trimmed.is_empty() {
                let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
                let (tok, rest) = trimmed.split_at(end);
                self.rest = rest;
                return Some((self.line, tok));
            }
            self.advance_line()?;
        }
    }

    /// Remainder of the current line, or the next non-empty line.
    fn name(&mut self) -> Option<(usize, &'a str)> {
        loop {
            let here = self.rest.trim();
            self.rest = "";
            if !here.is_empty() {
                return Some((self.line, here));
            }
            self.advance_line()?;
        }
    }

    fn coordinate(&mut self, field: &str, record_line: usize) -> Result<i32, RosterError> {
        let (line, tok) = self.token().ok_or_else(|| {
            RosterError::malformed(record_line, format!("record ends before {field}"))
        })?;
        tok.parse().map_err(|_| {
            RosterError::malformed(line, format!("{field} {tok:?} is not a 32-bit integer"))
        })
    }
}

/// Parse roster text.
pub fn parse_roster(text: &str) -> Result<LoadReport, RosterError> {
    let mut cursor = Cursor::new(text);
    let mut report = LoadReport::default();

    while let Some((line, code_tok)) = cursor.token() {
        let code: i64 = code_tok.parse().map_err(|_| {
            RosterError::malformed(line, format!("kind code {code_tok:?} is not an integer"))
        })?;
        let x = cursor.coordinate("x", line)?;
        let y = cursor.coordinate("y", line)?;
        let (_, name) = cursor
            .name()
            .ok_or_else(|| RosterError::malformed(line, "record ends before name"))?;

        match Kind::from_code(code) {
            Ok(kind) => {
                report.actors.spawn(kind, name, Position::new(x, y));
            }
            Err(err) => {
                tracing::warn!(line, name, %err, "skipping roster record");
                report.skipped.push(SkippedRecord {
                    line,
                    code,
                    name: name.to_string(),
                });
            }
        }
    }
    Ok(report)
}

/// Read and parse a roster from any `Read` source.
pub fn read_roster<R: Read>(mut reader: R) -> Result<LoadReport, RosterError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_roster(&text)
}

/// Load a roster file.
pub fn load_file(path: impl AsRef<Path>) -> Result<LoadReport, RosterError> {
    read_roster(File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(report: &LoadReport) -> Vec<String> {
        report.actors.iter().map(|a| a.name().to_string()).collect()
    }

    #[test]
    fn four_line_records() {
        let report = parse_roster("1\n10\n20\nKnight_0\n2\n30\n40\nDragon_1\n").unwrap();
        assert_eq!(names(&report), ["Knight_0", "Dragon_1"]);
        let first = report.actors.get_index(0).unwrap();
        assert_eq!(first.kind(), Kind::Melee);
        assert_eq!(first.position(), Position::new(10, 20));
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn name_on_same_line_as_coordinates() {
        let report = parse_roster("3 5 6 Pegasus of the Dawn\n").unwrap();
        let a = report.actors.get_index(0).unwrap();
        assert_eq!(a.name(), "Pegasus of the Dawn");
        assert_eq!(a.position(), Position::new(5, 6));
    }

    #[test]
    fn blank_lines_before_name_are_skipped() {
        let report = parse_roster("2 1 1\n\n   \nSmaug\n").unwrap();
        assert_eq!(names(&report), ["Smaug"]);
    }

    #[test]
    fn crlf_line_endings() {
        let report = parse_roster("1\r\n0\r\n0\r\nArthur\r\n").unwrap();
        assert_eq!(names(&report), ["Arthur"]);
    }

    #[test]
    fn unknown_code_is_skipped_not_fatal() {
        let report = parse_roster("9\n1\n2\nGhost\n1\n3\n4\nLancelot\n0 5 5 Nobody\n").unwrap();
        assert_eq!(names(&report), ["Lancelot"]);
        assert_eq!(
            report.skipped,
            vec![
                SkippedRecord {
                    line: 1,
                    code: 9,
                    name: "Ghost".into()
                },
                SkippedRecord {
                    line: 9,
                    code: 0,
                    name: "Nobody".into()
                },
            ]
        );
    }

    #[test]
    fn non_numeric_coordinate_is_malformed() {
        match parse_roster("1\nten\n20\nKnight\n") {
            Err(RosterError::Malformed { line: 2, detail }) => assert!(detail.contains("x")),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn truncated_record_is_malformed() {
        for text in ["1\n", "1\n2\n", "1\n2\n3\n", "1 2 3\n\n"] {
            assert!(
                matches!(parse_roster(text), Err(RosterError::Malformed { line: 1, .. })),
                "{text:?}"
            );
        }
    }

    #[test]
    fn empty_input_is_empty_roster() {
        let report = parse_roster("\n \n").unwrap();
        assert!(report.actors.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn loaded_actors_are_alive() {
        let report = read_roster("1 0 0 A\n2 0 0 B\n".as_bytes()).unwrap();
        assert_eq!(report.actors.alive_count(), 2);
    }
}
