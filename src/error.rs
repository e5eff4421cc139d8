//! Error types shared by the engines and storage backends

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Donation cost exceeds the current gold balance
    #[error("not enough gold: need {cost}, have {balance}")]
    InsufficientFunds { cost: u32, balance: u32 },

    /// Donations must cost something
    #[error("donation cost must be positive")]
    ZeroDonation,

    /// Character can only be chosen once
    #[error("character already selected")]
    CharacterAlreadySelected,

    /// Stored blob could not be parsed
    #[error("corrupt persisted state: {0}")]
    CorruptPersistedState(#[from] serde_json::Error),

    /// Storage backend missing or refused the operation
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_funds_message() {
        let err = Error::InsufficientFunds {
            cost: 1000,
            balance: 50,
        };
        assert_eq!(err.to_string(), "not enough gold: need 1000, have 50");
    }

    #[test]
    fn test_corrupt_state_from_serde() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("{not json");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::CorruptPersistedState(_)));
    }
}
