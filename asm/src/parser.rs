use std::cell::Cell;

use arch::{comp::Comp, dest::Dest, inst::Inst, jump::Jump, sym};
use color_print::cformat;

use crate::{error::Error, symbols::SymbolTable, Mode};

// ----------------------------------------------------------------------------
// Statement

/// A parsed statement. Labels bind a name to the pc of the next instruction
/// and produce no output; instructions encode to exactly one word.
#[derive(Debug, Clone)]
pub enum Stmt {
    Label(String),
    Inst {
        pc: u16,
        op: Op,
        bin: Cell<Option<u16>>,
    },
}

impl Stmt {
    /// `code` must be normalized and non-empty. A malformed label line
    /// falls through to the instruction path and surfaces as a mnemonic
    /// error during the encode pass.
    pub fn parse(code: &str, pc: u16) -> Stmt {
        if let Some(name) = code
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Stmt::Label(name.trim().to_string());
        }
        Stmt::Inst {
            pc,
            op: Op::parse(code),
            bin: Cell::new(None),
        }
    }
}

impl Stmt {
    pub fn cformat(&self) -> String {
        match self {
            Stmt::Label(name) => {
                format!("     | {:16} | {}", "", cformat!("<green>({name})</>"))
            }
            Stmt::Inst { pc, op, bin } => {
                let pc = cformat!("<green>{:0>4X}</>", pc);
                match bin.get() {
                    Some(bin) => {
                        format!("{} | {:016b} | {}", pc, bin, Inst::from_bin(bin).cformat())
                    }
                    None => format!("{} | {:16} | {}", pc, "", op.text()),
                }
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Operation

/// Instruction operands as written in the source. Symbolic references stay
/// textual until the encode pass resolves them against the symbol table.
#[derive(Debug, Clone)]
pub enum Op {
    Addr(String),
    Comp {
        dest: Option<String>,
        comp: String,
        jump: Option<String>,
    },
}

impl Op {
    fn parse(code: &str) -> Op {
        if let Some(operand) = code.strip_prefix('@') {
            return Op::Addr(operand.trim().to_string());
        }
        let (dest, rest) = match code.split_once('=') {
            Some((dest, rest)) => (Some(dest.trim().to_string()), rest),
            None => (None, code),
        };
        let (comp, jump) = match rest.split_once(';') {
            Some((comp, jump)) => (comp.trim().to_string(), Some(jump.trim().to_string())),
            None => (rest.trim().to_string(), None),
        };
        Op::Comp { dest, comp, jump }
    }

    fn text(&self) -> String {
        match self {
            Op::Addr(operand) => format!("@{operand}"),
            Op::Comp { dest, comp, jump } => {
                let dest = dest.as_ref().map(|d| format!("{d}=")).unwrap_or_default();
                let jump = jump.as_ref().map(|j| format!(";{j}")).unwrap_or_default();
                format!("{dest}{comp}{jump}")
            }
        }
    }
}

impl Op {
    /// Resolve symbols and produce the final instruction. `index` is the
    /// instruction's position in the output stream, used in errors.
    pub fn resolve(
        &self,
        index: usize,
        symbols: &mut SymbolTable,
        mode: Mode,
    ) -> Result<Inst, Error> {
        match self {
            Op::Addr(operand) => {
                let addr = if !operand.is_empty() && operand.bytes().all(|b| b.is_ascii_digit()) {
                    match operand.parse::<u32>() {
                        Ok(v) if v <= sym::ADDR_MAX as u32 => v as u16,
                        _ => {
                            return Err(Error::AddressOverflow {
                                index,
                                text: operand.clone(),
                            })
                        }
                    }
                } else if is_symbol(operand) {
                    symbols.resolve_or_allocate(operand, index)?
                } else {
                    return Err(Error::MalformedAddressLiteral {
                        index,
                        text: operand.clone(),
                    });
                };
                Ok(Inst::A(addr))
            }
            Op::Comp { dest, comp, jump } => {
                let dest = lookup(index, mode, "destination", dest.as_deref().unwrap_or(""), Dest::parse)?;
                let comp = lookup(index, mode, "computation", comp, Comp::parse)?;
                let jump = lookup(index, mode, "jump", jump.as_deref().unwrap_or(""), Jump::parse)?;
                Ok(Inst::C(dest, comp, jump))
            }
        }
    }
}

/// Field-table lookup. A miss rejects the instruction in strict mode and
/// substitutes the all-zero field in lenient mode.
fn lookup<T: From<u8>>(
    index: usize,
    mode: Mode,
    field: &'static str,
    token: &str,
    parse: fn(&str) -> Result<T, String>,
) -> Result<T, Error> {
    match parse(token) {
        Ok(value) => Ok(value),
        Err(_) if mode == Mode::Lenient => Ok(T::from(0)),
        Err(_) => Err(Error::UnknownMnemonic {
            index,
            field,
            token: token.to_string(),
        }),
    }
}

/// Symbol names: letters, digits, `_`, `.`, `$`, `:`, not starting with a
/// digit.
fn is_symbol(s: &str) -> bool {
    let special = |c: char| matches!(c, '_' | '.' | '$' | ':');
    match s.chars().next() {
        Some(c) if c.is_ascii_alphabetic() || special(c) => {}
        _ => return false,
    }
    s.chars().all(|c| c.is_ascii_alphanumeric() || special(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_op(code: &str) -> Op {
        match Stmt::parse(code, 0) {
            Stmt::Inst { op, .. } => op,
            stmt => panic!("expected an instruction, got {stmt:?}"),
        }
    }

    #[test]
    fn parses_labels() {
        match Stmt::parse("(LOOP)", 3) {
            Stmt::Label(name) => assert_eq!(name, "LOOP"),
            stmt => panic!("expected a label, got {stmt:?}"),
        }
    }

    #[test]
    fn unterminated_label_falls_through_to_instruction() {
        assert!(matches!(Stmt::parse("(LOOP", 0), Stmt::Inst { .. }));
    }

    #[test]
    fn parses_addr_operand() {
        match parse_op("@sum") {
            Op::Addr(operand) => assert_eq!(operand, "sum"),
            op => panic!("expected an address form, got {op:?}"),
        }
    }

    #[test]
    fn splits_comp_fields() {
        match parse_op("AM=D-1;JGT") {
            Op::Comp { dest, comp, jump } => {
                assert_eq!(dest.as_deref(), Some("AM"));
                assert_eq!(comp, "D-1");
                assert_eq!(jump.as_deref(), Some("JGT"));
            }
            op => panic!("expected a compute form, got {op:?}"),
        }
    }

    #[test]
    fn dest_and_jump_are_optional() {
        match parse_op("D=M") {
            Op::Comp { dest, comp, jump } => {
                assert_eq!(dest.as_deref(), Some("D"));
                assert_eq!(comp, "M");
                assert_eq!(jump, None);
            }
            op => panic!("{op:?}"),
        }
        match parse_op("0;JMP") {
            Op::Comp { dest, comp, jump } => {
                assert_eq!(dest, None);
                assert_eq!(comp, "0");
                assert_eq!(jump.as_deref(), Some("JMP"));
            }
            op => panic!("{op:?}"),
        }
    }

    #[test]
    fn splits_on_first_separator_only() {
        match parse_op("D=M=X") {
            Op::Comp { dest, comp, .. } => {
                assert_eq!(dest.as_deref(), Some("D"));
                assert_eq!(comp, "M=X");
            }
            op => panic!("{op:?}"),
        }
    }

    #[test]
    fn resolves_literal_addr() {
        let mut symbols = SymbolTable::new();
        let inst = parse_op("@2").resolve(0, &mut symbols, Mode::Strict).unwrap();
        assert_eq!(inst, Inst::A(2));
    }

    #[test]
    fn rejects_oversized_literal() {
        let mut symbols = SymbolTable::new();
        let err = parse_op("@32768")
            .resolve(0, &mut symbols, Mode::Strict)
            .unwrap_err();
        assert!(matches!(err, Error::AddressOverflow { .. }));
    }

    #[test]
    fn rejects_malformed_addr_operand() {
        let mut symbols = SymbolTable::new();
        for operand in ["@12ab", "@", "@x+y"] {
            let err = parse_op(operand)
                .resolve(0, &mut symbols, Mode::Strict)
                .unwrap_err();
            assert!(matches!(err, Error::MalformedAddressLiteral { .. }), "{operand}");
        }
    }

    #[test]
    fn strict_rejects_unknown_comp() {
        let mut symbols = SymbolTable::new();
        let err = parse_op("D=X")
            .resolve(4, &mut symbols, Mode::Strict)
            .unwrap_err();
        match err {
            Error::UnknownMnemonic { index, field, token } => {
                assert_eq!(index, 4);
                assert_eq!(field, "computation");
                assert_eq!(token, "X");
            }
            err => panic!("{err:?}"),
        }
    }

    #[test]
    fn lenient_zero_fills_unknown_fields() {
        let mut symbols = SymbolTable::new();
        let inst = parse_op("D=X").resolve(0, &mut symbols, Mode::Lenient).unwrap();
        assert_eq!(inst.to_bin(), 0b1110000000010000);
    }

    #[test]
    fn symbol_names() {
        assert!(is_symbol("loop"));
        assert!(is_symbol("ponggame.0"));
        assert!(is_symbol("$stack:top_"));
        assert!(!is_symbol("2nd"));
        assert!(!is_symbol("a+b"));
        assert!(!is_symbol(""));
    }
}
