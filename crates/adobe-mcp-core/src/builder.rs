//! Command construction with fresh correlation identities.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::command::{Command, CommandId, Parameters};

/// Produces commands with identities unique for the builder's lifetime.
///
/// Identities come from an atomic counter starting at 1, so a builder shared
/// between tasks never hands out the same id twice.
#[derive(Debug)]
pub struct CommandBuilder {
    next_id: AtomicU64,
}

impl CommandBuilder {
    pub const fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
        }
    }

    /// Build a command for `name` carrying `parameters`.
    pub fn build(&self, name: impl Into<String>, parameters: Parameters) -> Command {
        let id = CommandId(self.next_id.fetch_add(1, Ordering::Relaxed));
        Command {
            name: name.into(),
            id,
            parameters,
        }
    }
}

impl Default for CommandBuilder {
    fn default() -> Self {
        Self::new()
    }
}
