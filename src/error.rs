use thiserror::Error;

use crate::errors::domain::DomainError;
use crate::store::StoreError;

/// Top-level error type returned from engine and service entry points.
///
/// Domain rejections keep their kind/detail so transport glue can map them
/// to reason codes; store failures are wrapped so the scheduler's stall
/// policy can distinguish liveness faults from input errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("session not found")]
    SessionNotFound,
}

impl EngineError {
    /// True for failures the scheduler should treat as retryable liveness
    /// faults rather than input rejections.
    pub fn is_liveness_fault(&self) -> bool {
        matches!(
            self,
            EngineError::Store(_) | EngineError::Domain(DomainError::Infra(_, _))
        )
    }
}
