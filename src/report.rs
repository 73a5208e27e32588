//! Rendering planning results for a collaborator (spec §6, "Planning
//! response").
//!
//! Grounded on the teacher's `utils::pretty_print` (`src/utils/mod.rs`),
//! which walks a route's contacts and prints a human-readable back-trace;
//! generalized here into two renderers (JSON via `serde_json`, matching
//! the teacher's own `serde_json` dependency, and a plain-text form in the
//! teacher's terse style) and widened to cover multi-route results.

use crate::live_loop::Snapshot;
use crate::route::{MultiRoute, Route};

/// Six decimal places is sufficient precision for downstream consumers
/// (spec §6).
fn fmt_seconds(s: f64) -> String {
    format!("{s:.6}")
}

pub fn route_to_json(route: &Route) -> serde_json::Result<String> {
    serde_json::to_string_pretty(route)
}

pub fn multi_route_to_json(result: &MultiRoute) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

pub fn snapshot_to_json(snapshot: &Snapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}

/// Renders a route as the teacher's own back-trace style: one line per hop,
/// arrow-joined, or a "no route" line.
pub fn route_to_text(route: &Route) -> String {
    if !route.found {
        return "no route found".to_string();
    }
    let ids: Vec<String> = route.contact_ids.iter().map(|id| format!("c{id}")).collect();
    format!(
        "eta={} latency={} hops={} route={}",
        fmt_seconds(route.eta),
        fmt_seconds(route.latency),
        route.hops,
        ids.join(" -> ")
    )
}

pub fn multi_route_to_text(result: &MultiRoute) -> String {
    if !result.found {
        return "no routes found".to_string();
    }
    result
        .routes
        .iter()
        .enumerate()
        .map(|(i, r)| format!("[{i}] {}", route_to_text(r)))
        .collect::<Vec<_>>()
        .join("\n")
}
