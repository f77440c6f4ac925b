//! Core domain concepts shared across all subdomains.
//!
//! - [`adapter`]: adapter identifiers and static provider metadata
//! - [`language`]: language registry, families and scripts
//! - [`error::DomainError`]: domain-level errors

pub mod adapter;
pub mod error;
pub mod language;
pub mod string;
