//! Core logic for dockview
//!
//! Turns raw daemon records into display rows, and turns a selected row
//! into the text shown in the details and logs panes. Every request made
//! from here is bounded by the configured timeout.

mod dashboard;
mod error;
pub mod format;
mod panes;
mod summary;
#[cfg(feature = "test-support")]
pub mod test_support;

pub use dashboard::{Dashboard, Selection};
pub use error::*;
pub use panes::*;
pub use summary::{build_summaries, ContainerSummary};
