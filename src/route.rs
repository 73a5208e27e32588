//! Planning requests, filters, labels, and results (spec §3, §6).
//!
//! Grounded on the teacher's `Bundle` (request-ish struct passed into
//! `Router::route`, see `src/routing/mod.rs`) and `RouteStage` (the
//! per-contact label with a `prev`/`via` back-pointer, see
//! `src/route_stage.rs` usage throughout `src/routing/*.rs`). Both are
//! reshaped here to the spec's concrete fields: `RouteStage`'s `Rc<RefCell<..>>`
//! parent chain becomes a plain `prev_idx: i64` per the Design Notes
//! (index-based, not pointer-linked).

use serde::{Deserialize, Serialize};

use crate::contact::Contact;
use crate::types::{Bytes, ContactId, NodeId, Seconds};

/// A planning request, immutable for the duration of one call (spec §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub src_node: NodeId,
    pub dst_node: NodeId,
    pub t0: Seconds,
    pub bundle_bytes: Bytes,
    /// `0` means no TTL; otherwise the bundle must arrive by `t0 + expiry_rel`.
    pub expiry_rel: Seconds,
}

impl RouteRequest {
    pub fn new(src_node: NodeId, dst_node: NodeId, t0: Seconds, bundle_bytes: Bytes) -> Self {
        RouteRequest { src_node, dst_node, t0, bundle_bytes, expiry_rel: 0.0 }
    }

    pub fn with_expiry(mut self, expiry_rel: Seconds) -> Self {
        self.expiry_rel = expiry_rel;
        self
    }

    /// Absolute expiry bound, or `None` if the request carries no TTL.
    pub fn expiry_abs(&self) -> Option<Seconds> {
        if self.expiry_rel > 0.0 {
            Some(self.t0 + self.expiry_rel)
        } else {
            None
        }
    }
}

/// Constraints on which contacts a route may use (spec §3, used by
/// component F and by the "forced prefix + ban" scenario in spec §8).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub banned_ids: Vec<ContactId>,
    pub forced_prefix_ids: Vec<ContactId>,
}

impl Filters {
    pub fn none() -> Self {
        Filters::default()
    }

    pub fn is_banned(&self, id: ContactId) -> bool {
        self.banned_ids.contains(&id)
    }
}

/// Per-contact Dijkstra state, transient within one search (spec §3).
/// `prev_idx` is the index (into the plan's contact `Vec`) of the
/// predecessor contact in the best known path, or `-1` if this contact is
/// reached directly from `src_node`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Label {
    pub eta: Seconds,
    pub prev_idx: i64,
}

impl Label {
    pub fn unreached() -> Self {
        Label { eta: Seconds::INFINITY, prev_idx: -1 }
    }
}

/// A single computed route (spec §3, §6).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub found: bool,
    pub eta: Seconds,
    pub latency: Seconds,
    pub hops: usize,
    pub contact_ids: Vec<ContactId>,
}

impl Route {
    pub fn not_found() -> Self {
        Route::default()
    }

    /// Builds a found route from an ordered list of contacts (root-first)
    /// and the request's `t0`, filling in `latency = eta - t0` (spec §6).
    pub fn from_contacts(contacts: &[Contact], eta: Seconds, t0: Seconds) -> Self {
        Route {
            found: true,
            eta,
            latency: eta - t0,
            hops: contacts.len(),
            contact_ids: contacts.iter().map(|c| c.id).collect(),
        }
    }
}

/// The result of a K-route query (spec §6).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiRoute {
    pub found: bool,
    pub routes: Vec<Route>,
}

impl MultiRoute {
    pub fn from_routes(routes: Vec<Route>) -> Self {
        MultiRoute { found: !routes.is_empty(), routes }
    }
}
