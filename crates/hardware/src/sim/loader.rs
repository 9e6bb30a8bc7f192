//! Program loader.
//!
//! This module reads programs from disk or text. It supports:
//! 1. **Text format:** One instruction per line as 32 `0`/`1` characters, optionally
//!    followed by `@<line>`, then `#<label>` and/or `!<breakpoint>`. Blank lines and
//!    `;` comments are skipped.
//! 2. **Binary format:** Raw big-endian 32-bit words.
//!
//! Both return the words plus the [`DebugInfo`] built from the annotations.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::common::constants::INSTRUCTION_BYTES;
use crate::sim::debug::DebugInfo;

/// Errors raised while loading a program.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The program file could not be read.
    #[error("cannot read program: {0}")]
    Io(#[from] io::Error),

    /// The instruction field is not 32 binary digits.
    #[error("line {line}: malformed instruction word `{text}`")]
    MalformedWord {
        /// 1-based line in the program file.
        line: usize,
        /// Offending text.
        text: String,
    },

    /// The annotation after the word does not follow `@<line>[#<label>][!<breakpoint>]`.
    #[error("line {line}: malformed annotation `{text}`")]
    MalformedAnnotation {
        /// 1-based line in the program file.
        line: usize,
        /// Offending text.
        text: String,
    },

    /// A label is defined twice.
    #[error("line {line}: duplicate label `{name}`")]
    DuplicateLabel {
        /// 1-based line in the program file.
        line: usize,
        /// The label.
        name: String,
    },

    /// A breakpoint name is defined twice.
    #[error("line {line}: duplicate breakpoint `{name}`")]
    DuplicateBreakpoint {
        /// 1-based line in the program file.
        line: usize,
        /// The breakpoint name.
        name: String,
    },

    /// A binary program whose length is not a whole number of words.
    #[error("binary program length {0} is not a multiple of 4")]
    TruncatedBinary(usize),
}

/// A loaded program.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    /// Instruction words, the first at address zero.
    pub words: Vec<u32>,
    /// Labels, breakpoints and source lines.
    pub debug: DebugInfo,
}

/// Parsed annotation suffix.
#[derive(Debug, Default, PartialEq, Eq)]
struct Annotation<'a> {
    line: Option<u32>,
    label: Option<&'a str>,
    breakpoint: Option<&'a str>,
}

/// Loads a text program from a file.
pub fn load_text_file(path: impl AsRef<Path>) -> Result<Program, LoadError> {
    parse_text(&fs::read_to_string(path)?)
}

/// Loads a raw big-endian binary program from a file.
pub fn load_binary_file(path: impl AsRef<Path>) -> Result<Program, LoadError> {
    parse_binary(&fs::read(path)?)
}

/// Parses the text program format.
///
/// # Returns
///
/// The words and debug maps, or the first error with its 1-based line number.
pub fn parse_text(source: &str) -> Result<Program, LoadError> {
    let mut program = Program::default();
    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let text = raw.split(';').next().unwrap_or_default().trim();
        if text.is_empty() {
            continue;
        }

        let split = text.find(['@', '#', '!', ' ', '\t']).unwrap_or(text.len());
        let (bits, suffix) = text.split_at(split);
        let word = parse_word(bits).ok_or_else(|| LoadError::MalformedWord {
            line: line_no,
            text: bits.to_owned(),
        })?;
        let pc = program.words.len() as u32 * INSTRUCTION_BYTES;
        program.words.push(word);

        let suffix = suffix.trim();
        if suffix.is_empty() {
            continue;
        }
        let note = parse_annotation(suffix).ok_or_else(|| LoadError::MalformedAnnotation {
            line: line_no,
            text: suffix.to_owned(),
        })?;
        if let Some(src_line) = note.line {
            program.debug.set_line(pc, src_line);
        }
        if let Some(name) = note.label {
            if !program.debug.add_label(name, pc) {
                return Err(LoadError::DuplicateLabel {
                    line: line_no,
                    name: name.to_owned(),
                });
            }
        }
        if let Some(name) = note.breakpoint {
            if !program.debug.add_breakpoint(name, pc) {
                return Err(LoadError::DuplicateBreakpoint {
                    line: line_no,
                    name: name.to_owned(),
                });
            }
        }
    }
    Ok(program)
}

/// Parses the raw binary format.
pub fn parse_binary(bytes: &[u8]) -> Result<Program, LoadError> {
    if bytes.len() % INSTRUCTION_BYTES as usize != 0 {
        return Err(LoadError::TruncatedBinary(bytes.len()));
    }
    let words = bytes
        .chunks_exact(INSTRUCTION_BYTES as usize)
        .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    Ok(Program {
        words,
        debug: DebugInfo::new(),
    })
}

fn parse_word(bits: &str) -> Option<u32> {
    if bits.len() != 32 || !bits.bytes().all(|b| b == b'0' || b == b'1') {
        return None;
    }
    u32::from_str_radix(bits, 2).ok()
}

fn parse_annotation(text: &str) -> Option<Annotation<'_>> {
    let rest = text.strip_prefix('@')?;
    let digits_end = rest.find(['#', '!']).unwrap_or(rest.len());
    let (digits, mut rest) = rest.split_at(digits_end);
    let mut note = Annotation {
        line: Some(digits.parse().ok()?),
        ..Annotation::default()
    };

    if let Some(after) = rest.strip_prefix('#') {
        let end = after.find('!').unwrap_or(after.len());
        let (label, tail) = after.split_at(end);
        note.label = Some(identifier(label)?);
        rest = tail;
    }
    if let Some(after) = rest.strip_prefix('!') {
        note.breakpoint = Some(identifier(after)?);
        rest = "";
    }
    rest.is_empty().then_some(note)
}

fn identifier(text: &str) -> Option<&str> {
    let ok = !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    ok.then_some(text)
}
