use indexmap::IndexMap;

use arch::sym;

use crate::error::Error;

/// Symbol-to-address map plus the variable allocation cursor.
///
/// Seeded with the architecture's predefined symbols. An address, once
/// assigned, never changes for the lifetime of the run; insertion order is
/// preserved, so variables iterate in first-reference order.
pub struct SymbolTable {
    table: IndexMap<String, u16>,
    next_var: u16,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            table: sym::BUILTINS.clone(),
            next_var: sym::VAR_BASE,
        }
    }

    /// Insert or overwrite. A label declared twice keeps the later address.
    pub fn define(&mut self, name: &str, addr: u16) {
        self.table.insert(name.to_string(), addr);
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.table.get(name).copied()
    }

    /// Address of `name`, allocating the next variable slot on first use.
    /// The cursor only ever moves forward; slots are never reused.
    pub fn resolve_or_allocate(&mut self, name: &str, index: usize) -> Result<u16, Error> {
        if let Some(addr) = self.get(name) {
            return Ok(addr);
        }
        if self.next_var > sym::ADDR_MAX {
            return Err(Error::AddressOverflow {
                index,
                text: name.to_string(),
            });
        }
        let addr = self.next_var;
        self.table.insert(name.to_string(), addr);
        self.next_var += 1;
        Ok(addr)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_with_builtins() {
        let table = SymbolTable::new();
        assert_eq!(table.get("R0"), Some(0));
        assert_eq!(table.get("R15"), Some(15));
        assert_eq!(table.get("SP"), Some(0));
        assert_eq!(table.get("SCREEN"), Some(16384));
        assert_eq!(table.get("KBD"), Some(24576));
        assert_eq!(table.get("counter"), None);
    }

    #[test]
    fn allocates_in_first_use_order() {
        let mut table = SymbolTable::new();
        assert_eq!(table.resolve_or_allocate("foo", 0).unwrap(), 16);
        assert_eq!(table.resolve_or_allocate("bar", 1).unwrap(), 17);
        assert_eq!(table.resolve_or_allocate("foo", 2).unwrap(), 16);
        assert_eq!(table.resolve_or_allocate("baz", 3).unwrap(), 18);
    }

    #[test]
    fn resolving_a_builtin_does_not_allocate() {
        let mut table = SymbolTable::new();
        assert_eq!(table.resolve_or_allocate("KBD", 0).unwrap(), 24576);
        assert_eq!(table.resolve_or_allocate("fresh", 1).unwrap(), 16);
    }

    #[test]
    fn label_defined_first_shadows_allocation() {
        let mut table = SymbolTable::new();
        table.define("LOOP", 7);
        assert_eq!(table.resolve_or_allocate("LOOP", 0).unwrap(), 7);
    }

    #[test]
    fn later_definition_wins() {
        let mut table = SymbolTable::new();
        table.define("L", 3);
        table.define("L", 9);
        assert_eq!(table.get("L"), Some(9));
    }
}
