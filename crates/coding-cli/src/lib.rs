//! Library components for the `coding` command-line tool.

pub mod choices;
pub mod logging;
