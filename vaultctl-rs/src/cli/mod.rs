//! CLI command implementations.

pub mod args;
pub mod output;

pub mod init;
pub mod list;
pub mod mount;

pub use args::{Cli, Commands};
pub use output::Output;
