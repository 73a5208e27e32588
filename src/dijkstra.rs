//! Time-dependent shortest path with banned/forced-prefix filters (spec §4.D).
//!
//! Grounded on the teacher's node-graph Dijkstra variants
//! (`src/pathfinding/node_graph.rs`'s `define_node_graph!` macro, and the
//! contact-graph variant in the wider pack,
//! `other_examples/.../pathfinding-contact_graph.rs.rs`): both pop a
//! frontier ordered by a distance key, relax out-edges of the popped
//! node/contact, and push an updated label when a proposition beats the
//! stored one. Here the graph is flattened to indices into one owned
//! `Vec<Contact>` (spec §9: no `Rc<RefCell>` parenting), and the early-exit
//! condition is generalized with the forced-prefix completion check from
//! spec §4.D step 4 — the spec explicitly prescribes this early-exit form
//! with no speculative fallback full search.

use tracing::trace;

use crate::contact::Contact;
use crate::feasibility::{quick_prune, relax};
use crate::heap::Frontier;
use crate::plan::ContactPlan;
use crate::route::{Filters, Label, Route, RouteRequest};
use crate::types::EPS_TIME;

/// Runs the time-dependent Dijkstra search described in spec §4.D.
///
/// `labels[i]` is the state for `plan.contacts[i]`; the function owns this
/// buffer and the frontier for the duration of the call (spec §5) and
/// releases both on every exit path by simply dropping them at return.
pub fn shortest_path(plan: &ContactPlan, req: &RouteRequest, filters: &Filters) -> Route {
    if plan.is_empty() {
        return Route::not_found();
    }

    let contacts = &plan.contacts;
    let mut labels = vec![Label::unreached(); contacts.len()];
    let mut frontier = Frontier::new();
    let expiry_abs = req.expiry_abs();

    seed(plan, req, filters, &mut labels, &mut frontier, expiry_abs);

    while let Some((idx, eta)) = frontier.pop_min() {
        // Stale-label filtering (spec §4.D step 3): the label may have been
        // improved after this entry was pushed.
        if eta > labels[idx].eta + EPS_TIME {
            continue;
        }

        let contact = &contacts[idx];
        if contact.to == req.dst_node && prefix_satisfied(idx, &labels, contacts, filters) {
            return reconstruct(idx, &labels, contacts, req.t0);
        }

        expand(plan, req, filters, idx, &mut labels, &mut frontier, expiry_abs);
    }

    Route::not_found()
}

fn seed(
    plan: &ContactPlan,
    req: &RouteRequest,
    filters: &Filters,
    labels: &mut [Label],
    frontier: &mut Frontier,
    expiry_abs: Option<f64>,
) {
    let contacts = &plan.contacts;
    let candidates = plan.index().from_node(req.src_node);

    if let Some(&first_forced) = filters.forced_prefix_ids.first() {
        if filters.is_banned(first_forced) {
            return;
        }
        let Some(&idx) = candidates.iter().find(|&&idx| contacts[idx].id == first_forced) else {
            return;
        };
        try_relax(idx, req.t0, req.bundle_bytes, expiry_abs, &contacts[idx], labels, frontier);
        return;
    }

    for &idx in candidates {
        let c = &contacts[idx];
        if filters.is_banned(c.id) {
            continue;
        }
        try_relax(idx, req.t0, req.bundle_bytes, expiry_abs, c, labels, frontier);
    }
}

fn expand(
    plan: &ContactPlan,
    req: &RouteRequest,
    filters: &Filters,
    popped_idx: usize,
    labels: &mut [Label],
    frontier: &mut Frontier,
    expiry_abs: Option<f64>,
) {
    let contacts = &plan.contacts;
    let next_node = contacts[popped_idx].to;
    let eta_here = labels[popped_idx].eta;
    let owed = forced_id_owed_after(popped_idx, labels, contacts, filters);

    for &idx in plan.index().from_node(next_node) {
        let c = &contacts[idx];
        if let Some(required) = owed {
            if c.id != required {
                continue;
            }
        }
        if filters.is_banned(c.id) {
            continue;
        }
        if !quick_prune(c, eta_here, req.bundle_bytes) {
            continue;
        }
        if let Some(result) = relax(c, eta_here, req.bundle_bytes, expiry_abs) {
            if result.eta + EPS_TIME < labels[idx].eta {
                labels[idx] = Label { eta: result.eta, prev_idx: popped_idx as i64 };
                frontier.push(idx, result.eta);
                trace!(contact = c.id, eta = result.eta, "relaxed");
            }
        }
    }
}

fn try_relax(
    idx: usize,
    t_in: f64,
    bundle_bytes: f64,
    expiry_abs: Option<f64>,
    c: &Contact,
    labels: &mut [Label],
    frontier: &mut Frontier,
) {
    if let Some(result) = relax(c, t_in, bundle_bytes, expiry_abs) {
        if result.eta + EPS_TIME < labels[idx].eta {
            labels[idx] = Label { eta: result.eta, prev_idx: -1 };
            frontier.push(idx, result.eta);
        }
    }
}

/// Walks `prev_idx` back to the root, collecting contact ids in root-first
/// order. Capped defensively: the graph is time-monotone and each contact
/// is used at most once per path, so cycles cannot occur in valid paths
/// (spec §4.D) — the cap only guards against corrupted label state.
fn path_ids(mut idx: usize, labels: &[Label], contacts: &[Contact]) -> Vec<u32> {
    let cap = contacts.len() + 1;
    let mut rev = Vec::new();
    loop {
        rev.push(contacts[idx].id);
        if rev.len() > cap {
            break;
        }
        let prev = labels[idx].prev_idx;
        if prev < 0 {
            break;
        }
        idx = prev as usize;
    }
    rev.reverse();
    rev
}

/// Number of leading `forced_prefix_ids` entries matched by the path ending
/// at `idx`, used to know which forced id (if any) the next hop owes
/// (spec §4.D step 5, "Prefix tracking").
fn forced_id_owed_after(idx: usize, labels: &[Label], contacts: &[Contact], filters: &Filters) -> Option<u32> {
    if filters.forced_prefix_ids.is_empty() {
        return None;
    }
    let path = path_ids(idx, labels, contacts);
    let consumed = path
        .iter()
        .zip(filters.forced_prefix_ids.iter())
        .take_while(|(a, b)| a == b)
        .count();
    filters.forced_prefix_ids.get(consumed).copied()
}

/// True once every id in `forced_prefix_ids` has been consumed by the path
/// ending at `idx` (spec §4.D step 4).
fn prefix_satisfied(idx: usize, labels: &[Label], contacts: &[Contact], filters: &Filters) -> bool {
    if filters.forced_prefix_ids.is_empty() {
        return true;
    }
    let path = path_ids(idx, labels, contacts);
    path.len() >= filters.forced_prefix_ids.len()
        && path[..filters.forced_prefix_ids.len()] == filters.forced_prefix_ids[..]
}

fn reconstruct(idx: usize, labels: &[Label], contacts: &[Contact], t0: f64) -> Route {
    let mut rev = Vec::new();
    let mut cur = idx;
    loop {
        rev.push(contacts[cur]);
        let prev = labels[cur].prev_idx;
        if prev < 0 {
            break;
        }
        cur = prev as usize;
    }
    rev.reverse();
    Route::from_contacts(&rev, labels[idx].eta, t0)
}
