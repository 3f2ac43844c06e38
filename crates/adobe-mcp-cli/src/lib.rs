//! Command-line front end for the Adobe command bridge.
//!
//! `main` is the composition root: it loads endpoint settings, registers a
//! client per application and hands off to [`handlers`].

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tokio_test as _;

// Used by the binary only
use tokio as _;
use tracing_subscriber as _;

pub mod handlers;
pub mod parser;

pub use parser::{Cli, Commands};
