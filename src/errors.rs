use rust_decimal::Decimal;
use thiserror::Error as ThisError;

/// Errors of the membership store
#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("Store is not initialized")]
    NotInitialized,
    #[error("Store is already initialized")]
    AlreadyInitialized,
    #[error("A member with last name {0:?} already exists")]
    DuplicateName(String),
    #[error("Member {0} not found")]
    NotFound(u32),
    #[error("Member {0} already has an active membership")]
    AlreadyMember(u32),
    #[error("Member {0} has no active membership")]
    NoActiveMembership(u32),
    #[error("Invalid deposit amount {0}, amounts must be positive")]
    InvalidAmount(Decimal),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}
