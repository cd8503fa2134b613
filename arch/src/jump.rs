use num_enum::{FromPrimitive, IntoPrimitive};
use serde::{Deserialize, Serialize};
use strum::EnumString;

/// Jump condition field, compared against the ALU result. The empty
/// mnemonic is a valid entry and falls through unconditionally.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Default,
    FromPrimitive,
    IntoPrimitive,
    EnumString,
)]
#[repr(u8)]
pub enum Jump {
    #[strum(disabled)]
    #[default]
    None = 0b000,
    JGT = 0b001,
    JEQ = 0b010,
    JGE = 0b011,
    JLT = 0b100,
    JNE = 0b101,
    JLE = 0b110,
    JMP = 0b111,
}

impl Jump {
    pub fn parse(s: &str) -> Result<Self, String> {
        if s.is_empty() {
            return Ok(Jump::None);
        }
        match s.parse::<Self>() {
            Ok(j) => Ok(j),
            Err(_) => Err(format!("Unknown jump: `{s}`")),
        }
    }
}

impl std::fmt::Display for Jump {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Jump::None => "",
            Jump::JGT => "JGT",
            Jump::JEQ => "JEQ",
            Jump::JGE => "JGE",
            Jump::JLT => "JLT",
            Jump::JNE => "JNE",
            Jump::JLE => "JLE",
            Jump::JMP => "JMP",
        };
        write!(f, "{s}")
    }
}

#[test]
fn test() {
    assert_eq!(Jump::parse(""), Ok(Jump::None));
    assert_eq!(Jump::parse("JMP"), Ok(Jump::JMP));
    assert_eq!(u8::from(Jump::JGT), 0b001);
    assert!(Jump::parse("jmp").is_err());
    assert!(Jump::parse("JXX").is_err());
}
