//! The `Contact`: a single directed transmission window (spec §3).
//!
//! Grounded on the teacher's `Contact`/`ContactInfo` split
//! (`src/contact.rs` in the teacher, kept here as `contact.rs`), but
//! flattened: the teacher parameterizes `Contact` over a generic
//! `ContactManager` that computes transmission feasibility through a trait
//! object tree. The spec's data model is concrete (nine plain fields, no
//! per-contact strategy object), so the manager abstraction is dropped and
//! the feasibility arithmetic lives in `crate::feasibility` instead,
//! operating directly on this struct.

use serde::{Deserialize, Serialize};

use crate::types::{Bytes, ContactId, DataRate, NodeId, Seconds};

/// A scheduled, directed transmission window between two nodes.
///
/// Invariants (spec §3): `t_end > t_start`, and the contact is only ever
/// usable if `t_end - t_start > setup_s`; `residual_bytes` never goes
/// negative (the K-consume search saturates at zero, see
/// [`crate::k_consume`]); `id` is unique within a plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Stable identifier, unique within a plan.
    pub id: ContactId,
    /// Transmitting node.
    pub from: NodeId,
    /// Receiving node.
    pub to: NodeId,
    /// Window open time, seconds.
    pub t_start: Seconds,
    /// Window close time, seconds.
    pub t_end: Seconds,
    /// One-way light time, seconds.
    pub owlt: Seconds,
    /// Throughput, bits per second.
    pub rate_bps: DataRate,
    /// Per-contact overhead before payload transmission begins, seconds.
    pub setup_s: Seconds,
    /// Remaining unreserved capacity, bytes.
    pub residual_bytes: Bytes,
}

impl Contact {
    /// Builds a contact, rejecting a window that can never be used: one
    /// where the end is not strictly after the start, or where the setup
    /// overhead alone would consume the whole window (spec §3).
    pub fn try_new(
        id: ContactId,
        from: NodeId,
        to: NodeId,
        t_start: Seconds,
        t_end: Seconds,
        owlt: Seconds,
        rate_bps: DataRate,
        setup_s: Seconds,
        residual_bytes: Bytes,
    ) -> Option<Self> {
        if t_end <= t_start || t_end - t_start <= setup_s {
            return None;
        }
        if owlt < 0.0 || rate_bps <= 0.0 || setup_s < 0.0 || residual_bytes < 0.0 {
            return None;
        }
        Some(Contact {
            id,
            from,
            to,
            t_start,
            t_end,
            owlt,
            rate_bps,
            setup_s,
            residual_bytes,
        })
    }

    /// Returns a copy with `residual_bytes` reduced by `used`, saturating
    /// at zero (spec §4.E, §8 consumption monotonicity).
    pub fn consumed(&self, used: Bytes) -> Self {
        let mut c = *self;
        c.residual_bytes = (c.residual_bytes - used).max(0.0);
        c
    }
}
