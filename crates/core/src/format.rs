// Box text format
//
//   #network
//   host 127.0.0.1
//   port 8080
//   --comment, ignored
//
// A `#` line opens a box, `--` lines are ignored, and every other line is
// split at its first space into a pair name and value. Lines that do not fit
// are skipped; only IO errors abort a read.

use std::borrow::Cow;
use std::fmt;
use std::io::{self, BufRead, Write};

use crate::settings::Settings;

/// Why a line contributed nothing during [`Settings::read`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than two bytes (includes blank lines).
    TooShort,
    /// Starts with `--`.
    Separator,
    /// A pair line before any `#` header.
    OutsideBox,
    /// No space to split the pair name from its value.
    MissingDelimiter,
}

impl SkipReason {
    /// Blank lines and separators are normal layout; the rest usually mean
    /// the file was edited by hand and something was lost.
    pub fn is_anomaly(&self) -> bool {
        matches!(self, SkipReason::OutsideBox | SkipReason::MissingDelimiter)
    }

    pub fn describe(&self) -> &'static str {
        match self {
            SkipReason::TooShort => "line too short",
            SkipReason::Separator => "separator",
            SkipReason::OutsideBox => "pair line before any #box header",
            SkipReason::MissingDelimiter => "no space between name and value",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number within the stream.
    pub line: usize,
    pub reason: SkipReason,
}

/// What a single [`Settings::read`] call did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadReport {
    pub lines: usize,
    pub headers: usize,
    pub assignments: usize,
    pub skipped: Vec<SkippedLine>,
    /// 1-based numbers of applied lines that were not valid UTF-8. Their
    /// invalid bytes were replaced with U+FFFD in the tree, so writing the
    /// tree back would not reproduce them.
    pub lossy_lines: Vec<usize>,
}

impl ReadReport {
    /// Skipped lines that were not blank lines or separators.
    pub fn anomalies(&self) -> impl Iterator<Item = &SkippedLine> {
        self.skipped.iter().filter(|s| s.reason.is_anomaly())
    }

    pub fn is_clean(&self) -> bool {
        self.anomalies().next().is_none() && self.lossy_lines.is_empty()
    }

    /// Whether writing the tree back would lose bytes from the input.
    pub fn is_lossy(&self) -> bool {
        !self.lossy_lines.is_empty()
    }

    fn skip(&mut self, line: usize, reason: SkipReason) {
        log::debug!("line {}: skipped ({})", line, reason.describe());
        self.skipped.push(SkippedLine { line, reason });
    }

    fn lossy(&mut self, line: usize) {
        log::debug!("line {}: invalid UTF-8 replaced", line);
        self.lossy_lines.push(line);
    }
}

enum Line<'a> {
    Skip(SkipReason),
    Header(&'a str),
    Body(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    if line.starts_with("--") {
        return Line::Skip(SkipReason::Separator);
    }
    match line.strip_prefix('#') {
        Some(name) => Line::Header(name),
        None => Line::Body(line),
    }
}

impl Settings {
    /// Parse the box format from `input` into this tree.
    ///
    /// Existing boxes and pairs are kept; names seen in the input are
    /// find-or-created and their values overwritten. Each call starts
    /// outside any box, so pair lines before the first header are ignored
    /// even if a previous read ended inside one.
    pub fn read<R: BufRead>(&mut self, mut input: R) -> io::Result<ReadReport> {
        let mut report = ReadReport::default();
        let mut current: Option<usize> = None;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            report.lines += 1;
            let line_no = report.lines;

            // Only `\n` ends a line; a `\r` before it belongs to the content
            if buf.last() == Some(&b'\n') {
                buf.pop();
            }
            if buf.len() < 2 {
                report.skip(line_no, SkipReason::TooShort);
                continue;
            }
            let text = String::from_utf8_lossy(&buf);
            let lossy = matches!(text, Cow::Owned(_));

            match classify(&text) {
                Line::Skip(reason) => report.skip(line_no, reason),
                Line::Header(name) => {
                    current = Some(self.section_index(name));
                    report.headers += 1;
                    if lossy {
                        report.lossy(line_no);
                    }
                }
                Line::Body(body) => {
                    let Some(idx) = current else {
                        report.skip(line_no, SkipReason::OutsideBox);
                        continue;
                    };
                    let Some((key, value)) = body.split_once(' ') else {
                        report.skip(line_no, SkipReason::MissingDelimiter);
                        continue;
                    };
                    self.sections[idx].entry(key).set(value);
                    report.assignments += 1;
                    if lossy {
                        report.lossy(line_no);
                    }
                }
            }
        }

        log::debug!(
            "read {} lines: {} headers, {} assignments, {} skipped",
            report.lines,
            report.headers,
            report.assignments,
            report.skipped.len()
        );
        Ok(report)
    }

    /// Serialize every box in order: a blank line, `#name`, then one
    /// `name value` line per pair.
    ///
    /// Names and values are written verbatim; a value containing a newline
    /// will not read back the same.
    pub fn write<W: Write>(&self, mut output: W) -> io::Result<()> {
        write!(output, "{}", self)?;
        log::debug!("wrote {} boxes", self.len());
        Ok(())
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in self.sections() {
            write!(f, "\n#{}\n", section.name())?;
            for pair in section.pairs() {
                writeln!(f, "{} {}", pair.name(), pair.as_str())?;
            }
        }
        Ok(())
    }
}
