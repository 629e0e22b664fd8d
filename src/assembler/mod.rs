//! The assembler module turns ISA24 source text into packed 24-bit
//! machine words rendered as hex.
//!
//! It is a two-pass pipeline: pass 1 (preprocess) strips comments, splits
//! labels off and assigns instruction addresses; pass 2 resolves label
//! operands, extracts the per-class fields and packs each instruction
//! into its word. The symbol table is complete before pass 2 starts, so
//! forward references always resolve.

pub mod catalog;
pub mod encoder;
pub mod error;
pub mod operands;
pub mod preprocess;
pub mod resolver;
pub mod symbols;

use std::io::Read;

use self::encoder::{EncodedWord, Segment};
use self::error::AsmError;
use self::symbols::SymbolTable;

/// The result of a batch assembly run. `error_count` counts instructions
/// that were reported and skipped; their words are absent from `words`.
#[derive(Clone, Debug)]
pub struct Assembly {
    pub words: Vec<EncodedWord>,
    pub symbols: SymbolTable,
    pub error_count: usize,
}

impl Assembly {
    /// The program image: space-separated 6-digit uppercase hex words in
    /// program order.
    pub fn image(&self) -> String {
        self.words
            .iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Assembles a whole source text. Only a malformed label aborts the run;
/// per-instruction failures are logged with their source line number and
/// assembly continues with the remaining instructions.
pub fn assemble<T: Read + ?Sized>(reader: Box<T>) -> Result<Assembly, AsmError> {
    let program = preprocess::preprocess(reader)?;

    let mut words = Vec::with_capacity(program.instructions.len());
    let mut error_count = 0;
    for (index, source) in program.instructions.iter().enumerate() {
        match assemble_line(source, index, &program.symbols) {
            Ok(word) => words.push(word),
            Err(e) => {
                error_count += 1;
                error!("Error on line {}: {}", source.line, e);
            }
        }
    }

    Ok(Assembly {
        words,
        symbols: program.symbols,
        error_count,
    })
}

/// Pass 2 for one instruction: catalog lookup, label resolution, operand
/// extraction, bitfield packing.
fn assemble_line(
    source: &preprocess::SourceLine,
    index: usize,
    symbols: &SymbolTable,
) -> Result<EncodedWord, AsmError> {
    let mut tokens: Vec<String> = source.text.split_whitespace().map(str::to_owned).collect();
    let mnemonic = tokens.first().cloned().unwrap_or_default();
    let spec =
        catalog::lookup(&mnemonic).ok_or_else(|| AsmError::UnknownMnemonic(mnemonic.clone()))?;

    for warning in resolver::resolve(&mut tokens, spec, index, symbols) {
        warn!("Warning on line {}: {}", source.line, warning);
    }

    let text = tokens.join(" ");
    let ops = operands::parse(&text, spec)?;
    encoder::encode(&ops, spec)
}

/// Encodes one bare instruction line with no label support, returning the
/// word together with its per-field bit segments. This is the core of the
/// interactive single-instruction prompt.
pub fn encode_single(text: &str) -> Result<(EncodedWord, Vec<Segment>), AsmError> {
    let mnemonic = text.split_whitespace().next().unwrap_or_default().to_owned();
    let spec = catalog::lookup(&mnemonic).ok_or(AsmError::UnknownMnemonic(mnemonic))?;
    let ops = operands::parse(text, spec)?;
    let word = encoder::encode(&ops, spec)?;
    let segments = encoder::segments(word, spec)?;
    Ok((word, segments))
}
