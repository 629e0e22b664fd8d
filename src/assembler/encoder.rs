//! Packs parsed operands into a 24-bit word and renders it as six
//! uppercase hex digits.
//!
//! Each instruction shape has an explicit field layout, listed MSB first
//! and always ending mod-tag then task-id at the LSB. Field values are
//! reduced into their width by two's-complement modular arithmetic:
//! `bits(v, w) = v mod 2^w`.
//!
//! The historical ISA24 tables for `pcset` (25 bits), `jump` (29 bits in
//! the file assembler, 24 in the interactive one) and `break` (26 bits)
//! did not sum to the 24-bit word. The layouts here carry the corrections:
//! pcset's pad shrinks to 3 bits, jump's immediate is 11 bits, break's pad
//! is 18 bits. `layout()` still checks the sum, so a defective table is a
//! `WidthOverflow` error and never a silently truncated word.

use std::fmt;

use super::catalog::{InstructionSpec, Shape};
use super::error::AsmError;
use super::operands::Operands;

pub const WORD_BITS: u32 = 24;

/// The bit segments a layout may contain.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Seg {
    Pad,
    Imm,
    Rd,
    Rs1,
    Rs2,
    ModTag,
    TaskId,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Field {
    pub seg: Seg,
    pub width: u32,
}

const fn field(seg: Seg, width: u32) -> Field {
    Field { seg, width }
}

#[rustfmt::skip]
mod layouts {
    use super::{field, Field, Seg::*};

    pub const MEMORY: &[Field]    = &[field(Imm, 12), field(Rs1, 4), field(Rd, 4), field(ModTag, 2), field(TaskId, 2)];
    pub const PCSET: &[Field]     = &[field(Imm, 12), field(Pad, 3), field(Rs1, 4), field(ModTag, 3), field(TaskId, 2)];
    pub const JUMP: &[Field]      = &[field(Imm, 11), field(Rs1, 4), field(Rd, 4), field(ModTag, 3), field(TaskId, 2)];
    pub const BRANCH: &[Field]    = &[field(Imm, 11), field(Rs2, 4), field(Rs1, 4), field(ModTag, 3), field(TaskId, 2)];
    pub const ARITH_IMM: &[Field] = &[field(Imm, 10), field(Rs1, 4), field(Rd, 4), field(ModTag, 4), field(TaskId, 2)];
    pub const ARITH_REG: &[Field] = &[field(Pad, 6), field(Rs2, 4), field(Rs1, 4), field(Rd, 4), field(ModTag, 4), field(TaskId, 2)];
    pub const ZERO_OP: &[Field]   = &[field(Pad, 18), field(ModTag, 4), field(TaskId, 2)];
}

fn fields(shape: Shape) -> &'static [Field] {
    match shape {
        Shape::Memory => layouts::MEMORY,
        Shape::PcSet => layouts::PCSET,
        Shape::Jump => layouts::JUMP,
        Shape::Branch => layouts::BRANCH,
        Shape::ArithImm => layouts::ARITH_IMM,
        Shape::ArithReg => layouts::ARITH_REG,
        Shape::ZeroOp => layouts::ZERO_OP,
    }
}

/// The field layout for `shape`, checked against the 24-bit word
/// invariant. A layout whose widths do not sum to 24 is a declared ISA
/// defect and is rejected before any word is built from it.
pub fn layout(shape: Shape) -> Result<&'static [Field], AsmError> {
    checked(fields(shape))
}

fn checked(fields: &'static [Field]) -> Result<&'static [Field], AsmError> {
    let width: u32 = fields.iter().map(|f| f.width).sum();
    if width != WORD_BITS {
        return Err(AsmError::WidthOverflow {
            width: width as usize,
        });
    }
    Ok(fields)
}

/// A packed 24-bit instruction word. Displays as exactly six uppercase
/// hex digits, zero-padded.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct EncodedWord(u32);

impl EncodedWord {
    pub fn value(&self) -> u32 {
        self.0
    }

    /// The full word as a 24-digit binary string, MSB first.
    pub fn to_binary(&self) -> String {
        format!("{:024b}", self.0)
    }
}

impl fmt::Display for EncodedWord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:06X}", self.0)
    }
}

/// Two's-complement reduction of `value` into `width` bits.
pub fn bits(value: i64, width: u32) -> u32 {
    value.rem_euclid(1i64 << width) as u32
}

/// Parses a decimal (optionally negative) or `0x`-prefixed hexadecimal
/// immediate literal.
pub fn literal(token: &str) -> Result<i64, AsmError> {
    let parsed = if let Some(hex) = token.strip_prefix("0x") {
        i64::from_str_radix(hex, 16)
    } else {
        token.parse::<i64>()
    };
    parsed.map_err(|_| AsmError::InvalidLiteral(token.to_owned()))
}

/// Packs `operands` into the word layout of `spec`, MSB first.
pub fn encode(operands: &Operands, spec: &InstructionSpec) -> Result<EncodedWord, AsmError> {
    let (rd, rs1, rs2, imm) = match operands {
        Operands::Memory { rd, rs1, imm } => (*rd, *rs1, 0, literal(imm)?),
        Operands::PcSet { rs1, imm } => (0, *rs1, 0, literal(imm)?),
        Operands::Jump { rd, rs1, imm } => (*rd, *rs1, 0, literal(imm)?),
        Operands::Branch { rs1, rs2, imm } => (0, *rs1, *rs2, literal(imm)?),
        Operands::ArithReg { rd, rs1, rs2 } => (*rd, *rs1, *rs2, 0),
        Operands::ArithImm { rd, rs1, imm } => (*rd, *rs1, 0, literal(imm)?),
        Operands::ZeroOp => (0, 0, 0, 0),
    };

    let mut word: u32 = 0;
    for f in layout(spec.shape())? {
        let value = match f.seg {
            Seg::Pad => 0,
            Seg::Imm => imm,
            Seg::Rd => rd as i64,
            Seg::Rs1 => rs1 as i64,
            Seg::Rs2 => rs2 as i64,
            Seg::ModTag => spec.mod_tag as i64,
            Seg::TaskId => spec.task_id as i64,
        };
        word = (word << f.width) | bits(value, f.width);
    }
    Ok(EncodedWord(word))
}

/// One labeled bit range of an encoded word, e.g. `IMM[23-12]` with its
/// binary digits. The breakdown mirrors the encode layout exactly since
/// both walk the same field table.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Segment {
    pub name: String,
    pub bits: String,
}

/// Splits `word` into the labeled per-field segments of its layout.
pub fn segments(word: EncodedWord, spec: &InstructionSpec) -> Result<Vec<Segment>, AsmError> {
    let mut out = Vec::new();
    let mut hi = WORD_BITS;
    for f in layout(spec.shape())? {
        let lo = hi - f.width;
        let chunk = (word.value() >> lo) & ((1u32 << f.width) - 1);
        out.push(Segment {
            name: format!("{}[{}-{}]", seg_name(f.seg), hi - 1, lo),
            bits: format!("{:0width$b}", chunk, width = f.width as usize),
        });
        hi = lo;
    }
    Ok(out)
}

fn seg_name(seg: Seg) -> &'static str {
    match seg {
        Seg::Pad => "PADDING",
        Seg::Imm => "IMM",
        Seg::Rd => "RD",
        Seg::Rs1 => "RS1",
        Seg::Rs2 => "RS2",
        Seg::ModTag => "MODTAG",
        Seg::TaskId => "TASK_ID",
    }
}
