//! The contact store and its neighbor index (spec §3, §4.B).
//!
//! Grounded on the teacher's `Multigraph`/`contact_plan` split: the teacher
//! builds a per-node `senders[node].receivers[...]` structure keyed by node
//! id (see `src/pathfinding/node_graph.rs`, `src/contact_plan/mod.rs`). The
//! Design Notes (spec §9) ask for a direct index-based table instead of
//! that pointer-linked tree, so `NeighborIndex` here is a flat
//! `Vec<Vec<ContactId-as-index>>` keyed by node id — the contacts
//! themselves stay in one owned `Vec<Contact>` and are referred to by
//! position, never by `Rc`.

use tracing::debug;

use crate::contact::Contact;
use crate::types::NodeId;

/// Maps `node -> indices (into the owning plan's contact Vec) of contacts
/// with `from == node`` (spec §3, §4.B).
///
/// Valid as long as the plan's *membership* doesn't change; residual-byte
/// mutation (as performed by the K-consume search on its private copy)
/// does not invalidate it, since membership and per-origin fan-out are
/// unaffected.
#[derive(Debug, Clone, Default)]
pub struct NeighborIndex {
    by_from: Vec<Vec<usize>>,
}

impl NeighborIndex {
    /// Rebuilds the index from scratch in `O(N)` over `contacts` (spec
    /// §4.B). The table size is the maximum referenced node id plus one;
    /// node ids are assumed dense per spec §9.
    pub fn build(contacts: &[Contact]) -> Self {
        let max_node = contacts
            .iter()
            .flat_map(|c| [c.from, c.to])
            .max()
            .map(|n| n as usize + 1)
            .unwrap_or(0);

        let mut by_from = vec![Vec::new(); max_node];
        for (idx, c) in contacts.iter().enumerate() {
            by_from[c.from as usize].push(idx);
        }
        debug!(contacts = contacts.len(), nodes = max_node, "built neighbor index");
        NeighborIndex { by_from }
    }

    /// Contact indices (positions in the owning plan) whose origin is `node`.
    /// Empty slice for a node beyond the table or with no outgoing contacts.
    pub fn from_node(&self, node: NodeId) -> &[usize] {
        self.by_from
            .get(node as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of node slots in the table (the densest referenced node id + 1).
    pub fn node_count(&self) -> usize {
        self.by_from.len()
    }
}

/// An owned contact plan: the flat contact array plus its derived
/// neighbor index (spec §3's "Lifecycles").
#[derive(Debug, Clone, Default)]
pub struct ContactPlan {
    pub contacts: Vec<Contact>,
    index: NeighborIndex,
}

impl ContactPlan {
    pub fn new(contacts: Vec<Contact>) -> Self {
        let index = NeighborIndex::build(&contacts);
        ContactPlan { contacts, index }
    }

    /// Rebuilds the neighbor index. Call after adding or removing contacts;
    /// not needed after only mutating `residual_bytes` in place.
    pub fn reindex(&mut self) {
        self.index = NeighborIndex::build(&self.contacts);
    }

    pub fn index(&self) -> &NeighborIndex {
        &self.index
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Highest node id referenced anywhere in the plan, or `None` if empty.
    pub fn max_node(&self) -> Option<NodeId> {
        self.contacts.iter().flat_map(|c| [c.from, c.to]).max()
    }
}
