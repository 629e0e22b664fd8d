//! The static ISA24 instruction catalog.
//!
//! One row per mnemonic, fixed at compile time and never modified. The
//! 2-bit task id selects the instruction class; the mod-tag distinguishes
//! instructions within a class and its encoded width depends on the class.
//!
//! ```text
//! Arithmetic (task 0b11): add addi sub subi mul muli div divi
//! Memory     (task 0b01): st ld lui ldm
//! Flow       (task 0b10): beq bne blt bge bgt ble pcset jump
//! ZeroOp     (task 0b00): break
//! ```

/// Instruction class, encoded as the 2-bit task id at the word's LSB.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Class {
    Arithmetic,
    Memory,
    Flow,
    ZeroOperand,
}

/// The operand/field shape of an instruction. Memory and ZeroOperand map
/// one-to-one from the class; Arithmetic splits on the `i` suffix and Flow
/// singles out `pcset` and `jump`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Shape {
    Memory,
    PcSet,
    Jump,
    Branch,
    ArithReg,
    ArithImm,
    ZeroOp,
}

/// One catalog row. `mod_tag` is stored right-aligned; only its low
/// `mod_tag_width()` bits are encoded.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct InstructionSpec {
    pub mnemonic: &'static str,
    pub class: Class,
    pub task_id: u8,
    pub mod_tag: u8,
}

const fn row(mnemonic: &'static str, class: Class, task_id: u8, mod_tag: u8) -> InstructionSpec {
    InstructionSpec {
        mnemonic,
        class,
        task_id,
        mod_tag,
    }
}

#[rustfmt::skip]
const CATALOG: &[InstructionSpec] = &[
    row("add",   Class::Arithmetic,  0b11, 0b0000),
    row("addi",  Class::Arithmetic,  0b11, 0b1000),
    row("sub",   Class::Arithmetic,  0b11, 0b0001),
    row("subi",  Class::Arithmetic,  0b11, 0b1001),
    row("mul",   Class::Arithmetic,  0b11, 0b0010),
    row("muli",  Class::Arithmetic,  0b11, 0b1010),
    row("div",   Class::Arithmetic,  0b11, 0b0011),
    row("divi",  Class::Arithmetic,  0b11, 0b1011),
    row("st",    Class::Memory,      0b01, 0b00),
    row("ld",    Class::Memory,      0b01, 0b01),
    row("lui",   Class::Memory,      0b01, 0b10),
    row("ldm",   Class::Memory,      0b01, 0b11),
    row("beq",   Class::Flow,        0b10, 0b000),
    row("bne",   Class::Flow,        0b10, 0b001),
    row("blt",   Class::Flow,        0b10, 0b010),
    row("bge",   Class::Flow,        0b10, 0b011),
    row("bgt",   Class::Flow,        0b10, 0b100),
    row("ble",   Class::Flow,        0b10, 0b101),
    row("pcset", Class::Flow,        0b10, 0b110),
    row("jump",  Class::Flow,        0b10, 0b111),
    row("break", Class::ZeroOperand, 0b00, 0b1111),
];

/// Looks up a mnemonic in the catalog. Matching is case-insensitive; the
/// input is lower-cased before comparison.
pub fn lookup(mnemonic: &str) -> Option<&'static InstructionSpec> {
    let lowered = mnemonic.to_ascii_lowercase();
    CATALOG.iter().find(|spec| spec.mnemonic == lowered)
}

impl InstructionSpec {
    /// Encoded width of the mod-tag field for this instruction's class.
    pub fn mod_tag_width(&self) -> u32 {
        match self.class {
            Class::Arithmetic | Class::ZeroOperand => 4,
            Class::Memory => 2,
            Class::Flow => 3,
        }
    }

    pub fn shape(&self) -> Shape {
        match self.class {
            Class::Memory => Shape::Memory,
            Class::ZeroOperand => Shape::ZeroOp,
            Class::Arithmetic => {
                if self.mnemonic.ends_with('i') {
                    Shape::ArithImm
                } else {
                    Shape::ArithReg
                }
            }
            Class::Flow => match self.mnemonic {
                "pcset" => Shape::PcSet,
                "jump" => Shape::Jump,
                _ => Shape::Branch,
            },
        }
    }
}
