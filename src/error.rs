//! Error types for the card battle engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Cards cannot be merged: {0}")]
    TypeMismatch(String),

    #[error("Not enough coins to buy a new card (balance: {coins})")]
    InsufficientFunds { coins: i64 },

    #[error("Malformed catalog record: {0}")]
    MalformedRecord(String),

    #[error("Invalid game action: {0}")]
    InvalidAction(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
