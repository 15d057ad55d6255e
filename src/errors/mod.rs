//! Error handling for the nocturne session engine.

pub mod domain;

pub use domain::DomainError;
