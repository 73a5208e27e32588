//! K-route-by-consumption (spec §4.E).
//!
//! Grounded on the teacher's `Cgr` retry loop (`src/routing/cgr.rs`), which
//! reruns the underlying SPSN search against a mutated contact state after
//! each attempt until either `K` routes are produced or a dry run fails.
//! Here the mutation is concrete: each route's contacts have their
//! `residual_bytes` reduced by the bundle size via [`Contact::consumed`]
//! on a private plan copy, and the next search runs against that copy.

use tracing::debug;

use crate::dijkstra::shortest_path;
use crate::plan::ContactPlan;
use crate::route::{Filters, MultiRoute, Route, RouteRequest};

/// Computes up to `k` routes by repeatedly finding the current shortest
/// path and then consuming its capacity from a private copy of the plan
/// before searching again (spec §4.E).
///
/// The caller's `plan` is never mutated; this function works against a
/// clone and discards it on return.
pub fn k_routes_by_consumption(plan: &ContactPlan, req: &RouteRequest, filters: &Filters, k: usize) -> MultiRoute {
    let mut working = plan.clone();
    let mut routes = Vec::with_capacity(k);

    for attempt in 0..k {
        let route = shortest_path(&working, req, filters);
        if !route.found {
            debug!(attempt, "k-consume search exhausted: no further route");
            break;
        }
        apply_consumption(&mut working, &route, req.bundle_bytes);
        routes.push(route);
    }

    MultiRoute::from_routes(routes)
}

/// Reduces `residual_bytes` on every contact the route used, by
/// `bundle_bytes`, in place. Membership is unchanged so the plan's
/// neighbor index stays valid (spec §4.B).
fn apply_consumption(plan: &mut ContactPlan, route: &Route, bundle_bytes: f64) {
    for id in &route.contact_ids {
        if let Some(c) = plan.contacts.iter_mut().find(|c| c.id == *id) {
            *c = c.consumed(bundle_bytes);
        }
    }
}
