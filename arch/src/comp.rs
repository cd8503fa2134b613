use num_enum::{FromPrimitive, IntoPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// ALU computation field.
///
/// Seven bits: the memory-select bit `a` followed by `c1..c6`. The
/// discriminant of each variant is its encoding, so `u8::from` yields the
/// field directly. The `a=1` bank repeats the `a=0` bank with `M` in place
/// of `A`.
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
    Display,
)]
#[repr(u8)]
pub enum Comp {
    #[strum(serialize = "0")]
    Zero = 0b0101010,
    #[strum(serialize = "1")]
    One = 0b0111111,
    #[strum(serialize = "-1")]
    MinusOne = 0b0111010,
    #[strum(serialize = "D")]
    D = 0b0001100,
    #[strum(serialize = "A")]
    A = 0b0110000,
    #[strum(serialize = "!D")]
    NotD = 0b0001101,
    #[strum(serialize = "!A")]
    NotA = 0b0110001,
    #[strum(serialize = "-D")]
    MinusD = 0b0001111,
    #[strum(serialize = "-A")]
    MinusA = 0b0110011,
    #[strum(serialize = "D+1")]
    DPlusOne = 0b0011111,
    #[strum(serialize = "A+1")]
    APlusOne = 0b0110111,
    #[strum(serialize = "D-1")]
    DMinusOne = 0b0001110,
    #[strum(serialize = "A-1")]
    AMinusOne = 0b0110010,
    #[strum(serialize = "D+A")]
    DPlusA = 0b0000010,
    #[strum(serialize = "D-A")]
    DMinusA = 0b0010011,
    #[strum(serialize = "A-D")]
    AMinusD = 0b0000111,
    #[strum(serialize = "D&A")]
    #[default]
    DAndA = 0b0000000,
    #[strum(serialize = "D|A")]
    DOrA = 0b0010101,

    #[strum(serialize = "M")]
    M = 0b1110000,
    #[strum(serialize = "!M")]
    NotM = 0b1110001,
    #[strum(serialize = "-M")]
    MinusM = 0b1110011,
    #[strum(serialize = "M+1")]
    MPlusOne = 0b1110111,
    #[strum(serialize = "M-1")]
    MMinusOne = 0b1110010,
    #[strum(serialize = "D+M")]
    DPlusM = 0b1000010,
    #[strum(serialize = "D-M")]
    DMinusM = 0b1010011,
    #[strum(serialize = "M-D")]
    MMinusD = 0b1000111,
    #[strum(serialize = "D&M")]
    DAndM = 0b1000000,
    #[strum(serialize = "D|M")]
    DOrM = 0b1010101,
}

impl Comp {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.parse::<Self>() {
            Ok(c) => Ok(c),
            Err(_) => Err(format!("Unknown computation: `{s}`")),
        }
    }
}

#[test]
fn test() {
    assert_eq!(Comp::parse("D+1"), Ok(Comp::DPlusOne));
    assert_eq!(Comp::parse("D&M"), Ok(Comp::DAndM));
    assert_eq!(u8::from(Comp::A), 0b0110000);
    assert_eq!(u8::from(Comp::M), 0b1110000);
    assert_eq!(Comp::DPlusOne.to_string(), "D+1");
    assert!(Comp::parse("D+2").is_err());
    assert!(Comp::parse("d").is_err());
    assert!(Comp::parse("").is_err());
}
