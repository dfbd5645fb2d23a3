use std::io::{self, Read};
use std::iter::Peekable;
use std::path::Path;

use ical::property::Property;
use ical::{LineReader, PropertyParser};

use crate::record::{FileRecord, RecordError};

pub const BEGIN_EVENT: &str = "BEGIN:VEVENT";
pub const END_EVENT: &str = "END:VEVENT";

const BYTE_ORDER_MARK: char = '\u{feff}';

pub(crate) fn is_ics_path(path: &Path) -> bool {
    path.extension()
        .and_then(|value| value.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ics"))
}

/// Category of every event in an `.ics` file: the file name without extension.
pub fn category_for_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// A logical (unfolded, trimmed) content line and its 1-based physical line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    pub number: usize,
    pub text: String,
}

/// Reads all content lines of one file.
///
/// Indented lines that read as their own property (`NAME:` or `NAME;`) are
/// pulled back to the margin first; any other indented line is a folded
/// continuation and is joined by [`LineReader`].
pub fn read_content_lines<R: Read>(mut reader: R) -> io::Result<Vec<ContentLine>> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    let raw = raw.strip_prefix(BYTE_ORDER_MARK).unwrap_or(&raw);
    let aligned = align_indented_properties(raw);
    Ok(LineReader::new(aligned.as_bytes())
        .map(|line| ContentLine {
            number: line.number(),
            text: line.as_str().trim().to_string(),
        })
        .filter(|line| !line.text.is_empty())
        .collect())
}

fn align_indented_properties(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            // blank lines stay blank so line numbers hold
        } else if line.starts_with([' ', '\t']) && looks_like_property(trimmed) {
            out.push_str(trimmed);
        } else {
            out.push_str(line.trim_end());
        }
        out.push('\n');
    }
    out
}

/// `NAME` made of upper-case letters, digits and `-`, followed by `:` or `;`.
fn looks_like_property(text: &str) -> bool {
    let Some(end) = text.find([':', ';']) else {
        return false;
    };
    let name = &text[..end];
    name.starts_with(|ch: char| ch.is_ascii_uppercase())
        && name
            .chars()
            .all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit() || ch == '-')
}

/// Lazily yields one record per VEVENT block of a single file.
pub struct IcsEvents {
    category: String,
    lines: Peekable<std::vec::IntoIter<ContentLine>>,
}

impl IcsEvents {
    pub fn new(category: impl Into<String>, lines: Vec<ContentLine>) -> Self {
        Self {
            category: category.into(),
            lines: lines.into_iter().peekable(),
        }
    }

    pub fn from_reader<R: Read>(category: impl Into<String>, reader: R) -> io::Result<Self> {
        Ok(Self::new(category, read_content_lines(reader)?))
    }

    fn read_block(&mut self, begin_line: usize) -> Result<FileRecord, RecordError> {
        let mut fields = BlockFields::default();
        let mut depth = 0usize;
        let mut terminated = false;
        while let Some(next) = self.lines.peek() {
            if next.text == BEGIN_EVENT {
                break;
            }
            let Some(line) = self.lines.next() else {
                break;
            };
            if line.text == END_EVENT {
                terminated = true;
                break;
            }
            if line.text.starts_with("BEGIN:") {
                depth += 1;
                continue;
            }
            if line.text.starts_with("END:") {
                depth = depth.saturating_sub(1);
                continue;
            }
            if depth == 0
                && let Some(property) = parse_property(&line.text)
            {
                fields.record(property);
            }
        }
        if !terminated {
            return Err(malformed(begin_line, format!("missing {}", END_EVENT)));
        }
        let end_text = fields
            .dtend
            .ok_or_else(|| malformed(begin_line, "missing DTEND"))?;
        let start_text = fields
            .dtstart
            .ok_or_else(|| malformed(begin_line, "missing DTSTART"))?;
        Ok(FileRecord {
            category: self.category.clone(),
            start_text,
            end_text,
            label: fields.summary.map(|value| unescape_text(&value)).unwrap_or_default(),
        })
    }
}

impl Iterator for IcsEvents {
    type Item = Result<FileRecord, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            if line.text == BEGIN_EVENT {
                return Some(self.read_block(line.number));
            }
        }
    }
}

#[derive(Default)]
struct BlockFields {
    dtstart: Option<String>,
    dtend: Option<String>,
    summary: Option<String>,
}

impl BlockFields {
    fn record(&mut self, property: Property) {
        let slot = if property.name.eq_ignore_ascii_case("DTSTART") {
            &mut self.dtstart
        } else if property.name.eq_ignore_ascii_case("DTEND") {
            &mut self.dtend
        } else if property.name.eq_ignore_ascii_case("SUMMARY") {
            &mut self.summary
        } else {
            return;
        };
        if slot.is_none() {
            *slot = Some(property.value.unwrap_or_default().trim().to_string());
        }
    }
}

/// Parses one unfolded content line into name, parameters and value.
/// Lines without a value delimiter yield `None`.
pub fn parse_property(line: &str) -> Option<Property> {
    PropertyParser::from_reader(line.as_bytes()).next()?.ok()
}

/// Undoes RFC 5545 TEXT escaping, which the property parser leaves in place.
pub fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(next @ (',' | ';' | '\\')) => out.push(next),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn malformed(line: usize, reason: impl Into<String>) -> RecordError {
    RecordError::MalformedBlock {
        line,
        reason: reason.into(),
    }
}
