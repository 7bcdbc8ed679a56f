//! Display rows for the container table

use crate::format::{format_ports, primary_name};
use dockview_provider::{ContainerId, ContainerRecord};
use std::cmp::Ordering;

/// State string the daemon reports for a running container
const RUNNING: &str = "running";

/// One row of the container table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSummary {
    pub id: ContainerId,
    /// First name without the leading `/`, empty when the daemon sent none
    pub name: String,
    pub image: String,
    pub state: String,
    pub status: String,
    /// Pre-formatted port list, `-` when there are none
    pub ports: String,
}

impl ContainerSummary {
    pub fn is_running(&self) -> bool {
        self.state == RUNNING
    }
}

impl From<ContainerRecord> for ContainerSummary {
    fn from(record: ContainerRecord) -> Self {
        Self {
            name: primary_name(&record.names),
            ports: format_ports(&record.ports),
            id: record.id,
            image: record.image,
            state: record.state,
            status: record.status,
        }
    }
}

/// Build the table rows: running containers first, then by name.
///
/// The sort is stable, so rows with the same state class and name keep the
/// daemon's order.
pub fn build_summaries(records: Vec<ContainerRecord>) -> Vec<ContainerSummary> {
    let mut summaries: Vec<ContainerSummary> =
        records.into_iter().map(ContainerSummary::from).collect();
    summaries.sort_by(compare_rows);
    summaries
}

fn compare_rows(a: &ContainerSummary, b: &ContainerSummary) -> Ordering {
    b.is_running()
        .cmp(&a.is_running())
        .then_with(|| a.name.cmp(&b.name))
}
