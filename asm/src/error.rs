use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("instruction {index}: cannot parse `{text}` as an address literal or symbol")]
    MalformedAddressLiteral { index: usize, text: String },

    #[error("instruction {index}: unknown {field} mnemonic `{token}`")]
    UnknownMnemonic {
        index: usize,
        field: &'static str,
        token: String,
    },

    #[error("instruction {index}: `{text}` resolves outside the 15-bit address range")]
    AddressOverflow { index: usize, text: String },

    #[error("failed to read {0}: {1}")]
    FileRead(String, #[source] std::io::Error),

    #[error("failed to write {0}: {1}")]
    FileWrite(String, #[source] std::io::Error),
}

impl Error {
    /// Index of the instruction the error refers to, when it came out of
    /// the encode pass.
    pub fn index(&self) -> Option<usize> {
        match self {
            Error::MalformedAddressLiteral { index, .. }
            | Error::UnknownMnemonic { index, .. }
            | Error::AddressOverflow { index, .. } => Some(*index),
            Error::FileRead(..) | Error::FileWrite(..) => None,
        }
    }
}
