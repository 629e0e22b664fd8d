//! Label -> instruction-address map.
//!
//! Built once during pass 1 and read-only for the rest of the run, so
//! forward references are always resolvable by the time pass 2 starts.
//! Addresses are zero-based instruction ordinals, not physical line
//! numbers.

use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    addresses: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            addresses: HashMap::new(),
        }
    }

    /// Binds `label` to `address`. A repeated definition rebinds; the last
    /// one wins.
    pub fn define(&mut self, label: &str, address: usize) {
        self.addresses.insert(label.to_owned(), address);
    }

    pub fn address_of(&self, label: &str) -> Option<usize> {
        self.addresses.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.addresses.iter().map(|(label, addr)| (label.as_str(), *addr))
    }
}
