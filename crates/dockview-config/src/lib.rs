//! Configuration for dockview
//!
//! dockview reads no config file. Every setting arrives from the command
//! line (with environment fallbacks resolved by the CLI) and is checked
//! here before any request is made.

mod dashboard;
mod error;

pub use dashboard::*;
pub use error::*;
