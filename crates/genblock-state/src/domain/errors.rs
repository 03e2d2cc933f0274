use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("store lock poisoned")]
    LockPoisoned,

    #[error("store write failed: {0}")]
    StoreFailed(String),
}
