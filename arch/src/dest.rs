use num_enum::{FromPrimitive, IntoPrimitive};
use serde::{Deserialize, Serialize};
use strum::EnumString;

/// Destination field: a 3-bit presence mask, one bit per target register
/// (`A` = 4, `D` = 2, `M` = 1). The empty mnemonic is a valid entry and
/// stores nothing.
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
pub enum Dest {
    #[strum(disabled)]
    #[default]
    None = 0b000,
    M = 0b001,
    D = 0b010,
    MD = 0b011,
    A = 0b100,
    AM = 0b101,
    AD = 0b110,
    AMD = 0b111,
}

impl Dest {
    pub fn parse(s: &str) -> Result<Self, String> {
        if s.is_empty() {
            return Ok(Dest::None);
        }
        match s.parse::<Self>() {
            Ok(d) => Ok(d),
            Err(_) => Err(format!("Unknown destination: `{s}`")),
        }
    }
}

impl std::fmt::Display for Dest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Dest::None => "",
            Dest::M => "M",
            Dest::D => "D",
            Dest::MD => "MD",
            Dest::A => "A",
            Dest::AM => "AM",
            Dest::AD => "AD",
            Dest::AMD => "AMD",
        };
        write!(f, "{s}")
    }
}

#[test]
fn test() {
    assert_eq!(Dest::parse(""), Ok(Dest::None));
    assert_eq!(Dest::parse("AM"), Ok(Dest::AM));
    assert_eq!(u8::from(Dest::AM), 0b101);
    assert!(Dest::parse("MA").is_err());
    assert!(Dest::parse("None").is_err());
}
