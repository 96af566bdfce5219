//! certdata.txt record parser
//!
//! A line-oriented state machine. Everything before `BEGINDATA` is license
//! preamble; after it, objects are runs of `NAME TYPE [VALUE]` lines separated
//! by blank lines. `MULTILINE_OCTAL` values span the following lines as `\ooo`
//! escapes up to a line starting with `END`.

use crate::models::{Record, Value, CKA_CLASS};
use crate::utils::{CertdataError, ParseError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::BufRead;
use tracing::debug;

const BEGIN_DATA: &str = "BEGINDATA";
const MULTILINE_OCTAL: &str = "MULTILINE_OCTAL";
const END: &str = "END";

static OCTAL_ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\([0-7]{3})").expect("valid octal escape pattern"));

/// Where the parser is within the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserState {
    /// Skipping the header until `BEGINDATA`
    PreData,
    /// Reading `NAME TYPE VALUE` lines
    Scanning,
    /// Collecting octal escapes for `field`
    InMultiline { field: String },
}

/// Incremental parser; feed it lines, then call [`Parser::finish`].
#[derive(Debug)]
pub struct Parser {
    state: ParserState,
    current: Record,
    blob: Vec<u8>,
    line: usize,
    record_start: usize,
    records: Vec<Record>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            state: ParserState::PreData,
            current: Record::new(),
            blob: Vec::new(),
            line: 0,
            record_start: 0,
            records: Vec::new(),
        }
    }

    pub fn state(&self) -> &ParserState {
        &self.state
    }

    /// Records completed so far
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consume one input line, without its line terminator
    pub fn feed_line(&mut self, line: &str) -> Result<(), ParseError> {
        self.line += 1;

        if self.state == ParserState::PreData {
            if line.starts_with(BEGIN_DATA) {
                debug!(line = self.line, "start of data");
                self.state = ParserState::Scanning;
            }
            return Ok(());
        }

        if line.starts_with('#') {
            return Ok(());
        }

        if matches!(self.state, ParserState::InMultiline { .. }) {
            self.feed_multiline(line)
        } else {
            self.feed_field(line)
        }
    }

    /// Close the final object and return every record in input order
    pub fn finish(mut self) -> Result<Vec<Record>, ParseError> {
        if let ParserState::InMultiline { field } = self.state {
            return Err(ParseError::UnterminatedBlob {
                line: self.line,
                field,
            });
        }
        if self.state == ParserState::PreData {
            debug!("input ended before {}", BEGIN_DATA);
        }
        self.close_record()?;
        Ok(self.records)
    }

    fn feed_field(&mut self, line: &str) -> Result<(), ParseError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return self.close_record();
        }

        let (field, type_tag, value) =
            split_tokens(trimmed).ok_or_else(|| ParseError::MalformedRecord {
                line: self.line,
                content: trimmed.to_string(),
            })?;

        if self.current.is_empty() {
            self.record_start = self.line;
        }
        if field == CKA_CLASS {
            debug!(line = self.line, class = value, "object");
        }

        if type_tag == MULTILINE_OCTAL {
            self.blob.clear();
            self.state = ParserState::InMultiline {
                field: field.to_string(),
            };
        } else {
            self.current.insert(field, Value::Scalar(value.to_string()));
        }
        Ok(())
    }

    fn feed_multiline(&mut self, line: &str) -> Result<(), ParseError> {
        if line.starts_with(END) {
            if let ParserState::InMultiline { field } =
                std::mem::replace(&mut self.state, ParserState::Scanning)
            {
                let bytes = std::mem::take(&mut self.blob);
                debug!(line = self.line, field = %field, len = bytes.len(), "binary value");
                self.current.insert(field, Value::Binary(bytes));
            }
            return Ok(());
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || decode_octal_line(trimmed, &mut self.blob) {
            return Ok(());
        }

        let field = match &self.state {
            ParserState::InMultiline { field } => field.clone(),
            _ => String::new(),
        };
        Err(ParseError::InvalidOctal {
            line: self.line,
            field,
            content: trimmed.to_string(),
        })
    }

    fn close_record(&mut self) -> Result<(), ParseError> {
        if self.current.is_empty() {
            return Ok(());
        }
        let record = std::mem::take(&mut self.current);
        if record.class().is_none() {
            return Err(ParseError::MissingClass {
                line: self.record_start,
            });
        }
        self.records.push(record);
        Ok(())
    }
}

/// Split a data line into name, type tag and the untouched remainder.
///
/// Returns `None` when the line has fewer than two tokens.
pub fn split_tokens(line: &str) -> Option<(&str, &str, &str)> {
    let (field, rest) = line.trim().split_once(char::is_whitespace)?;
    let rest = rest.trim_start();
    if rest.is_empty() {
        return None;
    }
    match rest.split_once(char::is_whitespace) {
        Some((type_tag, value)) => Some((field, type_tag, value.trim_start())),
        None => Some((field, rest, "")),
    }
}

/// Append the bytes of every `\ooo` escape on `text` to `out`.
///
/// Returns false, leaving `out` untouched, if the line holds anything besides
/// escapes and whitespace or an escape exceeds one byte.
pub fn decode_octal_line(text: &str, out: &mut Vec<u8>) -> bool {
    let start = out.len();
    let mut cursor = 0;

    for caps in OCTAL_ESCAPE.captures_iter(text) {
        let (Some(whole), Some(digits)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let byte = u8::from_str_radix(digits.as_str(), 8).ok();
        match byte {
            Some(byte) if text[cursor..whole.start()].trim().is_empty() => out.push(byte),
            _ => {
                out.truncate(start);
                return false;
            }
        }
        cursor = whole.end();
    }

    if !text[cursor..].trim().is_empty() {
        out.truncate(start);
        return false;
    }
    true
}

/// Parse a whole certdata document held in memory
pub fn parse_str(text: &str) -> Result<Vec<Record>, ParseError> {
    let mut parser = Parser::new();
    for line in text.lines() {
        parser.feed_line(line)?;
    }
    parser.finish()
}

/// Parse a certdata document from a buffered reader
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Vec<Record>, CertdataError> {
    let mut parser = Parser::new();
    for line in reader.lines() {
        parser.feed_line(&line?)?;
    }
    Ok(parser.finish()?)
}
