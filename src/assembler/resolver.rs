//! Rewrites operand tokens that name a label into computed immediates.
//!
//! Runs per instruction between pass 1 and operand extraction, mutating
//! the token list in place. Addressing depends on the instruction:
//!
//!   - branches: relative to the *next* instruction,
//!     `label - (index + 1)`
//!   - `pcset`: the absolute label address (it sets the PC directly)
//!   - `jump` through register 0: `label - index`; through any other
//!     register the immediate cannot be computed, so it degrades to a
//!     warning and 0
//!   - every non-Flow class: `label - (index + 1)`, a generic relative
//!     value

use super::catalog::{Class, InstructionSpec};
use super::error::AsmError;
use super::operands;
use super::symbols::SymbolTable;

/// Rewrites any label-naming operand token of `tokens` (index 0 is the
/// mnemonic) into a decimal immediate. Returns the warnings produced by
/// uncomputable `jump` references; the build never fails here.
pub fn resolve(
    tokens: &mut [String],
    spec: &InstructionSpec,
    index: usize,
    symbols: &SymbolTable,
) -> Vec<AsmError> {
    let mut warnings = Vec::new();

    for i in 1..tokens.len() {
        let name = clean(&tokens[i]);
        let target = match symbols.address_of(&name) {
            Some(addr) => addr as i64,
            None => continue,
        };
        let here = index as i64;

        let imm = match spec.class {
            Class::Flow => match spec.mnemonic {
                "jump" => {
                    let source = tokens
                        .get(2)
                        .map(|t| operands::digits(t).to_owned())
                        .unwrap_or_default();
                    if source == "0" {
                        target - here
                    } else {
                        warnings.push(AsmError::UnresolvedLabelReference {
                            label: name,
                            register: source,
                        });
                        0
                    }
                }
                "pcset" => target,
                _ => target - (here + 1),
            },
            _ => target - (here + 1),
        };
        tokens[i] = imm.to_string();
    }

    warnings
}

/// Drops the punctuation that may surround a label use, e.g. `(loop)` or
/// `loop,`.
fn clean(token: &str) -> String {
    token
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | ','))
        .collect()
}
