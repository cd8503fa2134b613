use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// First address handed out to a newly allocated variable.
pub const VAR_BASE: u16 = 16;

/// Highest address an address-form word can carry (15 bits).
pub const ADDR_MAX: u16 = 0x7FFF;

/// Base of the memory-mapped screen.
pub const SCREEN: u16 = 0x4000;

/// The memory-mapped keyboard register.
pub const KBD: u16 = 0x6000;

/// Symbols every program starts with: the virtual registers `R0`..`R15`,
/// the VM pointers, and the I/O maps. `SP`..`THAT` alias `R0`..`R4`.
pub static BUILTINS: Lazy<IndexMap<String, u16>> = Lazy::new(|| {
    let mut map = IndexMap::new();
    for i in 0u16..16 {
        map.insert(format!("R{i}"), i);
    }
    map.insert("SP".to_string(), 0);
    map.insert("LCL".to_string(), 1);
    map.insert("ARG".to_string(), 2);
    map.insert("THIS".to_string(), 3);
    map.insert("THAT".to_string(), 4);
    map.insert("SCREEN".to_string(), SCREEN);
    map.insert("KBD".to_string(), KBD);
    map
});

#[test]
fn test() {
    assert_eq!(BUILTINS.get("R0"), Some(&0));
    assert_eq!(BUILTINS.get("R15"), Some(&15));
    assert_eq!(BUILTINS.get("SP"), Some(&0));
    assert_eq!(BUILTINS.get("THAT"), Some(&4));
    assert_eq!(BUILTINS.get("SCREEN"), Some(&16384));
    assert_eq!(BUILTINS.get("KBD"), Some(&24576));
    assert_eq!(BUILTINS.len(), 23);
    assert!(BUILTINS.get("LOOP").is_none());
}
