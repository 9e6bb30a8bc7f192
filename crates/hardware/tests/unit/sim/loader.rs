//! Program Loader Tests.
//!
//! Loads programs from temporary files in both formats and checks the debug maps
//! built from the text annotations.

use std::io::Write;

use crate::common::builder::{InstructionBuilder, asm};
use dualsim_core::isa::{InstKind, encode};
use dualsim_core::sim::LoadError;
use dualsim_core::sim::loader::{load_binary_file, load_text_file, parse_text};
use tempfile::NamedTempFile;

fn bits(word: u32) -> String {
    format!("{word:032b}")
}

fn text_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn text_program_with_annotations() {
    let addi = asm::addi(1, 0, 5);
    let bne = InstructionBuilder::new(InstKind::Bne).rs1(1).imm(-1).encode();
    let source = format!(
        "; countdown\n{}@1#start\n\n{}@2#loop!top ; decrement\n{}@3\n",
        bits(encode(&addi)),
        bits(encode(&asm::addi(1, 1, -1))),
        bits(bne),
    );
    let file = text_file(&source);

    let program = load_text_file(file.path()).unwrap();
    assert_eq!(program.words.len(), 3);
    assert_eq!(program.words[0], 0x1000_2028);
    assert_eq!(program.debug.label_pc("start"), Some(0));
    assert_eq!(program.debug.label_pc("loop"), Some(4));
    assert_eq!(program.debug.breakpoint_pc("top"), Some(4));
    assert_eq!(program.debug.breakpoint_at(4), Some("top"));
    assert_eq!(program.debug.line_of(8), Some(3));
    assert!(program.debug.has_breakpoints());
}

#[test]
fn binary_program_is_big_endian() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&[0x10, 0x00, 0x20, 0x28, 0xF0, 0, 0, 0]).unwrap();
    let program = load_binary_file(file.path()).unwrap();
    assert_eq!(program.words, vec![0x1000_2028, 0xF000_0000]);
    assert!(!program.debug.has_breakpoints());
}

#[test]
fn truncated_binary_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&[1, 2, 3, 4, 5]).unwrap();
    assert!(matches!(
        load_binary_file(file.path()),
        Err(LoadError::TruncatedBinary(5))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_text_file(dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
    assert!(err.to_string().starts_with("cannot read program"));
}

#[test]
fn errors_carry_line_numbers() {
    let word = bits(0x1000_2028);
    let err = parse_text(&format!("{word}\n0101\n")).unwrap_err();
    assert!(matches!(err, LoadError::MalformedWord { line: 2, .. }), "{err}");

    let err = parse_text(&format!("{word}@1#a\n{word}@2#a\n")).unwrap_err();
    assert!(matches!(err, LoadError::DuplicateLabel { line: 2, ref name } if name == "a"));

    let err = parse_text(&format!("{word} #nolinenumber\n")).unwrap_err();
    assert!(matches!(err, LoadError::MalformedAnnotation { line: 1, .. }));
}
