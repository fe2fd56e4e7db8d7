use thiserror::Error;

use crate::entities::{EnemyId, EnemyTier};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("enemy {0:?} is already inactive")]
    AlreadyInactive(EnemyId),
    #[error("enemy {0:?} is not checked out of this pool")]
    Untracked(EnemyId),
    #[error("{tier:?} pool reached its hard cap of {hard_max}")]
    Exhausted { tier: EnemyTier, hard_max: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RevivalError {
    #[error("a revival is already in flight")]
    AlreadyPending,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("level database has no levels")]
    Empty,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("hi-score file unreadable: {0}")]
    Io(#[from] std::io::Error),
    #[error("hi-score file holds {0:?}, not an integer")]
    Parse(String),
}
