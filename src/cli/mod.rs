//! Command line interface for tubefront

pub mod args;
pub mod output;

pub use args::{Args, Command, ModeArg, VerbosityLevel};
pub use output::OutputFormatter;
