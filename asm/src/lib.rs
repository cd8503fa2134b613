pub mod error;
pub mod line;
pub mod msg;
pub mod parser;
pub mod symbols;

use error::Error;
use line::Line;
use parser::Stmt;
use symbols::SymbolTable;

/// What to do with mnemonics missing from the field tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Reject the instruction with `Error::UnknownMnemonic`.
    #[default]
    Strict,
    /// Substitute an all-zero field, as the classic toolchain does.
    Lenient,
}

/// A scanned program: lines normalized, statements parsed, labels bound to
/// the pc of the next instruction. Encoding is a second, separate pass so
/// that forward references always resolve against the complete table.
pub struct Assembly {
    lines: Vec<(Line, Option<Stmt>)>,
    symbols: SymbolTable,
}

impl Assembly {
    /// Pass 1. Label lines do not advance the pc; a label at end of file
    /// binds one past the last instruction, which is valid and only
    /// matters if something references it.
    pub fn scan(source: &str) -> Assembly {
        let mut symbols = SymbolTable::new();
        let mut pc: u16 = 0;
        let mut lines = Vec::new();
        for (idx, raw) in source.lines().enumerate() {
            let line = Line::new(idx, raw);
            let stmt = if line.is_empty() {
                None
            } else {
                Some(Stmt::parse(line.code(), pc))
            };
            match &stmt {
                Some(Stmt::Label(name)) => symbols.define(name, pc),
                Some(Stmt::Inst { .. }) => pc += 1,
                None => {}
            }
            lines.push((line, stmt));
        }
        Assembly { lines, symbols }
    }

    /// Pass 2: resolve or allocate addresses, encode every instruction to
    /// its word, in source order. Stops at the first error; nothing is
    /// emitted for a program that does not fully encode.
    pub fn encode(&mut self, mode: Mode) -> Result<Vec<String>, Error> {
        let mut words = Vec::new();
        for (_, stmt) in &self.lines {
            if let Some(Stmt::Inst { op, bin, .. }) = stmt {
                let word = op.resolve(words.len(), &mut self.symbols, mode)?.to_bin();
                bin.set(Some(word));
                words.push(format!("{word:016b}"));
            }
        }
        Ok(words)
    }

    pub fn lines(&self) -> impl Iterator<Item = &(Line, Option<Stmt>)> {
        self.lines.iter()
    }

    /// Source line of the n-th executable instruction, for diagnostics.
    pub fn line_of(&self, index: usize) -> Option<&Line> {
        self.lines
            .iter()
            .filter(|(_, stmt)| matches!(stmt, Some(Stmt::Inst { .. })))
            .nth(index)
            .map(|(line, _)| line)
    }
}

/// Assemble a source text into one 16-character binary string per
/// executable instruction.
pub fn assemble(source: &str, mode: Mode) -> Result<Vec<String>, Error> {
    Assembly::scan(source).encode(mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_binds_next_instruction() {
        let assembly = Assembly::scan("@1\n(HERE)\n@2\n");
        assert_eq!(assembly.symbols.get("HERE"), Some(1));
    }

    #[test]
    fn label_at_eof_binds_past_the_end() {
        let assembly = Assembly::scan("@1\n@2\n(END)\n");
        assert_eq!(assembly.symbols.get("END"), Some(2));
    }

    #[test]
    fn stacked_labels_share_an_address() {
        let assembly = Assembly::scan("(A_LBL)\n(B_LBL)\n@1\n");
        assert_eq!(assembly.symbols.get("A_LBL"), Some(0));
        assert_eq!(assembly.symbols.get("B_LBL"), Some(0));
    }

    #[test]
    fn line_of_maps_instruction_index_to_source() {
        let assembly = Assembly::scan("// header\n(L)\n@1\nD=A\n");
        assert_eq!(assembly.line_of(0).unwrap().no(), 3);
        assert_eq!(assembly.line_of(1).unwrap().no(), 4);
        assert!(assembly.line_of(2).is_none());
    }
}
