//! K-route diversification via detour search (spec §4.F).
//!
//! Grounded on the teacher's `Spsn`/`Cgr` multi-route retry shape
//! (`src/routing/spsn.rs`, `src/routing/cgr.rs`) generalized to a
//! Yen-style loopless deviation search: each accepted route is probed at
//! every hop position by banning that hop's contact and forcing everything
//! before it, producing a pool of candidate detours from which the
//! cheapest is kept. The teacher has no direct Yen analogue; this module's
//! control flow is adapted from the classic algorithm and grounded on the
//! teacher only for the underlying single-shot search it repeatedly calls.

use tracing::debug;

use crate::dijkstra::shortest_path;
use crate::plan::ContactPlan;
use crate::route::{Filters, MultiRoute, Route, RouteRequest};
use crate::types::ContactId;

/// Computes up to `k` loopless, pairwise-distinct routes by Yen-style
/// deviation search (spec §4.F). Total underlying searches are capped at
/// `20 * k` to bound runtime on plans with many equally-good detours.
pub fn k_routes_by_diversification(plan: &ContactPlan, req: &RouteRequest, filters: &Filters, k: usize) -> MultiRoute {
    if k == 0 {
        return MultiRoute::from_routes(Vec::new());
    }

    let base = shortest_path(plan, req, filters);
    if !base.found {
        return MultiRoute::from_routes(Vec::new());
    }

    let mut accepted = vec![base];
    let mut pool: Vec<Route> = Vec::new();
    let budget = 20 * k;
    let mut spent = 1usize;

    while accepted.len() < k {
        let last = accepted.last().unwrap().clone();

        for i in 0..last.contact_ids.len() {
            if spent >= budget {
                break;
            }
            let mut probe_filters = filters.clone();
            probe_filters.forced_prefix_ids.extend_from_slice(&last.contact_ids[0..i]);
            probe_filters.banned_ids.push(last.contact_ids[i]);

            let candidate = shortest_path(plan, req, &probe_filters);
            spent += 1;
            if !candidate.found {
                continue;
            }
            if is_known(&candidate.contact_ids, &accepted) || is_known(&candidate.contact_ids, &pool) {
                continue;
            }
            pool.push(candidate);
        }

        let Some(best_idx) = pool
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.eta.partial_cmp(&b.eta).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(idx, _)| idx)
        else {
            debug!(found = accepted.len(), target = k, "diversification pool exhausted");
            break;
        };
        accepted.push(pool.remove(best_idx));

        if spent >= budget {
            debug!(spent, budget, "diversification search budget exhausted");
            break;
        }
    }

    MultiRoute::from_routes(accepted)
}

fn is_known(ids: &[ContactId], routes: &[Route]) -> bool {
    routes.iter().any(|r| r.contact_ids == ids)
}
