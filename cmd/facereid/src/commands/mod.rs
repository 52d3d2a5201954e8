//! CLI commands module.

mod config;
mod resolve;
mod store;
mod util;

pub use config::ConfigCommand;
pub use resolve::ResolveCommand;
pub use store::{CheckCommand, InfoCommand, RepairCommand};

pub(crate) use util::*;
