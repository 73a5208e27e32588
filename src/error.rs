//! Error taxonomy for the parts of the system allowed to fail with an `Err`.
//!
//! The routing kernel itself never returns `Err` (spec §7): a request that
//! cannot be satisfied comes back as `found: false`. This enum covers the
//! ambient collaborators — ingestion, fetch, and CLI validation — where a
//! hard failure is the correct outcome.

use thiserror::Error;

use crate::types::NodeId;

#[derive(Debug, Error)]
pub enum CgrError {
    #[error("failed to read contact plan from {path}: {source}")]
    PlanIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch contact plan from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("contact plan is empty")]
    EmptyPlan,

    #[error("node {0} is out of range for this plan")]
    InvalidNode(NodeId),

    #[error("invalid command-line argument: {0}")]
    InvalidArgument(String),
}
