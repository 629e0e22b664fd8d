//! Positional operand extraction.
//!
//! Tokenization splits on whitespace. Register tokens lose a trailing
//! comma and their single-character sigil (`x1,` -> `1`) before
//! conversion; immediate tokens are carried as raw text and parsed by the
//! encoder, since by this point the resolver has already rewritten label
//! references into decimal immediates.

use super::catalog::{InstructionSpec, Shape};
use super::error::AsmError;

/// Operand fields for one instruction. Only the fields an instruction
/// shape actually encodes exist on its variant; everything a layout pads
/// or defaults is absent here and encodes as zero.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Operands {
    Memory { rd: u8, rs1: u8, imm: String },
    PcSet { rs1: u8, imm: String },
    Jump { rd: u8, rs1: u8, imm: String },
    Branch { rs1: u8, rs2: u8, imm: String },
    ArithReg { rd: u8, rs1: u8, rs2: u8 },
    ArithImm { rd: u8, rs1: u8, imm: String },
    ZeroOp,
}

/// Extracts the operand fields of `text` according to the shape of
/// `spec`. Missing tokens are a local `TooFewOperands` error; surplus
/// tokens are ignored.
pub fn parse(text: &str, spec: &InstructionSpec) -> Result<Operands, AsmError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    match spec.shape() {
        Shape::Memory => {
            let args = expect(&tokens, 3, spec)?;
            Ok(Operands::Memory {
                rd: register(args[0])?,
                rs1: register(args[1])?,
                imm: args[2].to_owned(),
            })
        }
        Shape::PcSet => {
            let args = expect(&tokens, 2, spec)?;
            Ok(Operands::PcSet {
                rs1: register(args[0])?,
                imm: args[1].to_owned(),
            })
        }
        Shape::Jump => {
            let args = expect(&tokens, 3, spec)?;
            Ok(Operands::Jump {
                rd: register(args[0])?,
                rs1: register(args[1])?,
                imm: args[2].to_owned(),
            })
        }
        Shape::Branch => {
            let args = expect(&tokens, 3, spec)?;
            Ok(Operands::Branch {
                rs1: register(args[0])?,
                rs2: register(args[1])?,
                imm: args[2].to_owned(),
            })
        }
        Shape::ArithReg => {
            let args = expect(&tokens, 3, spec)?;
            Ok(Operands::ArithReg {
                rd: register(args[0])?,
                rs1: register(args[1])?,
                rs2: register(args[2])?,
            })
        }
        Shape::ArithImm => {
            let args = expect(&tokens, 3, spec)?;
            Ok(Operands::ArithImm {
                rd: register(args[0])?,
                rs1: register(args[1])?,
                imm: args[2].to_owned(),
            })
        }
        Shape::ZeroOp => Ok(Operands::ZeroOp),
    }
}

/// Returns the `count` tokens after the mnemonic, or `TooFewOperands`.
fn expect<'a>(
    tokens: &'a [&'a str],
    count: usize,
    spec: &InstructionSpec,
) -> Result<&'a [&'a str], AsmError> {
    if tokens.len() < count + 1 {
        return Err(AsmError::TooFewOperands {
            mnemonic: spec.mnemonic.to_owned(),
            expected: count,
            found: tokens.len().saturating_sub(1),
        });
    }
    Ok(&tokens[1..count + 1])
}

/// Strips a trailing comma and the leading register sigil, then converts
/// the remaining digits. `x12,` parses to 12.
pub fn register(token: &str) -> Result<u8, AsmError> {
    digits(token)
        .parse::<u8>()
        .map_err(|_| AsmError::InvalidLiteral(token.to_owned()))
}

/// The digit text of a register token after comma and sigil stripping.
pub fn digits(token: &str) -> &str {
    let trimmed = token.trim_end_matches(',');
    let mut chars = trimmed.chars();
    chars.next();
    chars.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::catalog::lookup;

    fn parse_as(mnemonic: &str, text: &str) -> Result<Operands, AsmError> {
        parse(text, lookup(mnemonic).unwrap())
    }

    #[test]
    fn test_register_stripping() {
        assert_eq!(register("x1"), Ok(1));
        assert_eq!(register("x15,"), Ok(15));
        assert_eq!(register("r0,"), Ok(0));
        assert!(register("x1x").is_err());
        assert!(register("x").is_err());
    }

    #[test]
    fn test_memory_takes_rd_rs1_imm() {
        assert_eq!(
            parse_as("ld", "ld x1, x2, 4"),
            Ok(Operands::Memory {
                rd: 1,
                rs1: 2,
                imm: "4".to_owned()
            })
        );
    }

    #[test]
    fn test_arithmetic_register_form() {
        assert_eq!(
            parse_as("add", "add x1, x2, x3"),
            Ok(Operands::ArithReg {
                rd: 1,
                rs1: 2,
                rs2: 3
            })
        );
    }

    #[test]
    fn test_arithmetic_immediate_form() {
        assert_eq!(
            parse_as("addi", "addi x1, x2, -3"),
            Ok(Operands::ArithImm {
                rd: 1,
                rs1: 2,
                imm: "-3".to_owned()
            })
        );
    }

    #[test]
    fn test_branch_takes_rs1_rs2_imm() {
        assert_eq!(
            parse_as("beq", "beq x1, x2, -2"),
            Ok(Operands::Branch {
                rs1: 1,
                rs2: 2,
                imm: "-2".to_owned()
            })
        );
    }

    #[test]
    fn test_pcset_takes_rs1_imm() {
        assert_eq!(
            parse_as("pcset", "pcset x1, 7"),
            Ok(Operands::PcSet {
                rs1: 1,
                imm: "7".to_owned()
            })
        );
    }

    #[test]
    fn test_jump_takes_rd_rs1_imm() {
        assert_eq!(
            parse_as("jump", "jump x1, x0, 3"),
            Ok(Operands::Jump {
                rd: 1,
                rs1: 0,
                imm: "3".to_owned()
            })
        );
    }

    #[test]
    fn test_zero_operand_consumes_nothing() {
        assert_eq!(parse_as("break", "break"), Ok(Operands::ZeroOp));
        // Surplus tokens after a zero-operand mnemonic are ignored.
        assert_eq!(parse_as("break", "break x1"), Ok(Operands::ZeroOp));
    }

    #[test]
    fn test_too_few_operands() {
        assert_eq!(
            parse_as("ld", "ld x1, x2"),
            Err(AsmError::TooFewOperands {
                mnemonic: "ld".to_owned(),
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            parse_as("pcset", "pcset"),
            Err(AsmError::TooFewOperands {
                mnemonic: "pcset".to_owned(),
                expected: 2,
                found: 0
            })
        );
    }
}
