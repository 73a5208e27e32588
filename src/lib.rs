//! Contact Graph Routing engine for delay/disruption-tolerant space
//! networks.
//!
//! The routing kernel (contact store, feasibility arithmetic, the
//! time-dependent search, and the two K-route variants) never fails with
//! an `Err`; every other module here is the ambient collaborator layer
//! around it — ingestion, optional HTTP fetch, synthetic plan generation,
//! reporting, and the CLI.

pub mod cli;
pub mod contact;
pub mod dijkstra;
pub mod error;
pub mod ewma;
pub mod feasibility;
pub mod heap;
pub mod ingest;
pub mod k_consume;
pub mod k_yen;
pub mod live_loop;
pub mod periodize;
pub mod plan;
pub mod report;
pub mod route;
pub mod synth;
pub mod types;

#[cfg(feature = "http")]
pub mod fetch;
