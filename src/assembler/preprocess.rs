//! Pass 1 of the assembler: a single linear scan that turns raw source
//! text into an ordered instruction list and a completed symbol table.
//!
//! Comment handling:
//!   - `#` starts a line comment; everything after it is discarded.
//!   - A line containing the marker `###` toggles a block-comment region
//!     and is itself discarded. Every line inside the region is discarded
//!     regardless of content.
//!
//! A `name:` prefix binds `name` to the address the next emitted
//! instruction will occupy, even when the labeled line carries no
//! instruction text. Blank lines, comments, and label-only lines are
//! address-neutral: the address counter advances once per instruction.

use regex::Regex;
use std::io::{BufRead, BufReader, Read};

use super::error::AsmError;
use super::symbols::SymbolTable;

pub const LABEL_PATTERN: &str = "^[A-Za-z_][A-Za-z0-9_]*$";

/// One surviving instruction line: its original 1-based physical line
/// number and its text with comments and any label prefix stripped.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SourceLine {
    pub line: usize,
    pub text: String,
}

/// Pass 1 output. The symbol table is final before pass 2 reads it.
#[derive(Clone, Debug)]
pub struct Program {
    pub instructions: Vec<SourceLine>,
    pub symbols: SymbolTable,
}

/// Runs pass 1 over `reader`. The only fatal condition is a malformed
/// label (`InvalidLabel`); unreadable physical lines are reported and
/// skipped.
pub fn preprocess<T: Read + ?Sized>(reader: Box<T>) -> Result<Program, AsmError> {
    let label_re = Regex::new(LABEL_PATTERN).expect("label pattern is valid");

    let mut instructions: Vec<SourceLine> = Vec::with_capacity(64);
    let mut symbols = SymbolTable::new();
    let mut address: usize = 0;
    let mut in_block_comment = false;

    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line_no = index + 1;
        let raw = match line {
            Ok(s) => s,
            Err(e) => {
                error!("Error reading line {}: {}", line_no, e);
                continue;
            }
        };

        // The block toggle is checked before comment stripping, otherwise
        // the `###` marker would be eaten by its own leading `#`.
        if raw.contains("###") {
            in_block_comment = !in_block_comment;
            continue;
        }
        if in_block_comment {
            continue;
        }

        let mut text = strip_comment(&raw).trim().to_owned();
        if text.is_empty() {
            continue;
        }

        if let Some(colon) = text.find(':') {
            let label = text[..colon].trim().to_owned();
            let rest = text[colon + 1..].trim().to_owned();
            if !label_re.is_match(&label) {
                return Err(AsmError::InvalidLabel {
                    label,
                    line: line_no,
                });
            }
            symbols.define(&label, address);
            if rest.is_empty() {
                continue;
            }
            text = rest;
        }

        instructions.push(SourceLine {
            line: line_no,
            text,
        });
        address += 1;
    }

    Ok(Program {
        instructions,
        symbols,
    })
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(at) => &line[..at],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(src: &str) -> Program {
        preprocess(Box::new(src.as_bytes())).unwrap()
    }

    #[test]
    fn test_comments_and_blanks_are_address_neutral() {
        let program = run("add x1, x2, x3\n\n# a comment\n  sub x1, x2, x3  # trailing\n");
        assert_eq!(
            program.instructions,
            vec![
                SourceLine {
                    line: 1,
                    text: "add x1, x2, x3".to_owned()
                },
                SourceLine {
                    line: 4,
                    text: "sub x1, x2, x3".to_owned()
                },
            ]
        );
        assert!(program.symbols.is_empty());
    }

    #[test]
    fn test_block_comments_toggle() {
        let program = run("###\nthis is not code\nneither : is this\n###\nadd x1, x2, x3\n");
        assert_eq!(program.instructions.len(), 1);
        assert_eq!(program.instructions[0].line, 5);
    }

    #[test]
    fn test_block_comment_marker_with_text() {
        // Any line containing the marker toggles, not just bare `###`.
        let program = run("### begin\nadd x1, x2, x3\n### end\nsub x1, x2, x3\n");
        assert_eq!(program.instructions.len(), 1);
        assert_eq!(program.instructions[0].text, "sub x1, x2, x3");
    }

    #[test]
    fn test_label_binds_next_instruction_address() {
        let program = run("add x1, x2, x3\nloop: sub x1, x2, x3\nbeq x1, x2, loop\n");
        assert_eq!(program.symbols.address_of("loop"), Some(1));
        assert_eq!(program.instructions.len(), 3);
    }

    #[test]
    fn test_label_only_line_consumes_no_address() {
        let program = run("loop:\n# noise\nadd x1, x2, x3\n");
        assert_eq!(program.symbols.address_of("loop"), Some(0));
        assert_eq!(program.instructions.len(), 1);
        assert_eq!(program.instructions[0].line, 3);
    }

    #[test]
    fn test_trailing_label_points_past_the_end() {
        let program = run("add x1, x2, x3\nend:\n");
        assert_eq!(program.symbols.address_of("end"), Some(1));
        assert_eq!(program.instructions.len(), 1);
    }

    #[test]
    fn test_invalid_label_is_fatal() {
        let err = preprocess(Box::new("add x1, x2, x3\n2nd: sub x1, x2, x3\n".as_bytes()))
            .unwrap_err();
        assert_eq!(
            err,
            AsmError::InvalidLabel {
                label: "2nd".to_owned(),
                line: 2
            }
        );
    }

    #[test]
    fn test_underscore_labels_are_valid() {
        let program = run("_start: add x1, x2, x3\n");
        assert_eq!(program.symbols.address_of("_start"), Some(0));
        assert_eq!(program.instructions[0].text, "add x1, x2, x3");
    }
}
