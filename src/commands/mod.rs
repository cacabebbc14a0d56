//! Statically declared commands.

pub mod init;

use crate::{registry::CommandSpec, settings::Settings};

/// The commands compiled into mycli, in registration order.
pub fn builtin_specs(settings: &Settings) -> Vec<CommandSpec> {
    vec![init::spec(settings.clone())]
}
