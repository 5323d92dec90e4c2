//! The module contains the errors the engine can return.
//!
//! Every failed precondition aborts the surrounding transaction with no
//! partial writes; errors are returned as values, never thrown across the
//! engine boundary.
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Requested quantity exceeds the shareable units at commit time.
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),
    /// Attempted transition is not legal from the current status. Also covers
    /// lost races and duplicate actions.
    #[error("Invalid state: {0}")]
    InvalidState(String),
    /// An administrative update would break the ledger invariant.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InsufficientStock(a), Self::InsufficientStock(b)) => a == b,
            (Self::InvalidState(a), Self::InvalidState(b)) => a == b,
            (Self::InvalidQuantity(a), Self::InvalidQuantity(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidId(a), Self::InvalidId(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
