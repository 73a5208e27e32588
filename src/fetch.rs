//! Remote contact-plan fetch, behind the `http` feature (spec §1,
//! "external collaborator" boundary).
//!
//! Grounded on `other_examples/.../khx02-vrp`'s blocking `reqwest` usage
//! for pulling structured input over HTTP; kept as an optional feature so
//! the routing core never pulls in a network stack by default, matching
//! the teacher's own default-feature discipline (`debug`, `node_rx`, etc.
//! are all opt-in Cargo features in its manifest).

use crate::error::CgrError;
use crate::ingest::IngestReport;

/// Fetches a contact plan from `url` over HTTP and parses it with the
/// same tolerant rules as [`crate::ingest::from_reader`].
pub fn fetch_plan(url: &str) -> Result<IngestReport, CgrError> {
    let body = reqwest::blocking::get(url)
        .and_then(|resp| resp.error_for_status())
        .and_then(|resp| resp.text())
        .map_err(|source| CgrError::Fetch { url: url.to_string(), source: Box::new(source) })?;
    Ok(crate::ingest::from_reader(body.as_bytes()))
}
