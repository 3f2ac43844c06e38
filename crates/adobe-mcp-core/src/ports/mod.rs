//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the dispatch core expects from infrastructure.
//! They contain no implementation details and use only command-model types.
//!
//! # Design Rules
//!
//! - No HTTP or socket types in any signature
//! - Transports report failures through [`TransportError`] only
//! - Application-level `status=error` replies are successful exchanges

pub mod transport;

pub use transport::{Transport, TransportError};
