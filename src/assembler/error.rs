//! Error values produced by the assembly pipeline.
//!
//! Only `InvalidLabel` aborts a run, since a bad label leaves the symbol
//! table unreliable. Every other kind is local to one instruction: the
//! pipeline reports it with its line number and keeps assembling.

use std::fmt;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AsmError {
    /// Label text that does not match `[A-Za-z_][A-Za-z0-9_]*`.
    InvalidLabel { label: String, line: usize },
    /// Mnemonic not present in the instruction catalog.
    UnknownMnemonic(String),
    /// Fewer operand tokens than the instruction's shape requires.
    TooFewOperands {
        mnemonic: String,
        expected: usize,
        found: usize,
    },
    /// A register or immediate token that is neither decimal nor `0x` hex.
    InvalidLiteral(String),
    /// A field layout whose widths do not sum to the 24-bit word.
    WidthOverflow { width: usize },
    /// A `jump` through a register other than 0 naming a label; the
    /// immediate cannot be computed, so it degrades to a warning and zero.
    UnresolvedLabelReference { label: String, register: String },
}

impl fmt::Display for AsmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use AsmError::*;
        match self {
            InvalidLabel { label, line } => {
                write!(f, "invalid label `{}` on line {}", label, line)
            }
            UnknownMnemonic(op) => write!(f, "unknown operation `{}`", op),
            TooFewOperands {
                mnemonic,
                expected,
                found,
            } => write!(
                f,
                "`{}` expects {} operand(s), got {}",
                mnemonic, expected, found
            ),
            InvalidLiteral(token) => write!(f, "invalid numeric literal `{}`", token),
            WidthOverflow { width } => {
                write!(f, "field layout packs {} bits into a 24-bit word", width)
            }
            UnresolvedLabelReference { label, register } => write!(
                f,
                "`jump` through register {} cannot compute an immediate for label `{}`; using 0",
                register, label
            ),
        }
    }
}
