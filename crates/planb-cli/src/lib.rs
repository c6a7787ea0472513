mod args;
mod commands;
mod logging;
mod render;
pub mod types;

pub use args::{Cli, Commands, ConfigCommand};
pub use commands::run;
