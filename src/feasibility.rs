//! Single-hop feasibility and ETA arithmetic (spec §4.C).
//!
//! Grounded on the teacher's `ContactManager::dry_run_tx` family
//! (`src/contact_manager/mod.rs`'s `generate_basic_volume_manager!` macro):
//! the same `tx_start = max(at_time, contact.start)`, `tx_end = tx_start +
//! size/rate`, and window/volume checks reappear here, generalized to the
//! spec's explicit setup-time and residual-capacity terms and flattened
//! out of the generic `ContactManager` trait object since this crate has
//! exactly one contact shape.

use crate::contact::Contact;
use crate::types::{Bytes, Seconds, EPS_BYTES, EPS_TIME};

/// Outcome of relaxing a bundle across one contact, starting from arrival
/// time `t_in` at the contact's origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HopResult {
    /// Time transmission actually begins (after waiting for the window to open).
    pub start_tx: Seconds,
    /// Earliest arrival at the contact's destination node.
    pub eta: Seconds,
}

/// Full feasibility and ETA computation for sending `bundle_bytes` across
/// `contact`, having arrived at its origin node at `t_in` (spec §4.C).
///
/// `expiry_abs`, if `Some`, is the absolute bundle expiry
/// (`t0 + expiry_rel`); a hop whose ETA would exceed it is infeasible.
pub fn relax(contact: &Contact, t_in: Seconds, bundle_bytes: Bytes, expiry_abs: Option<Seconds>) -> Option<HopResult> {
    let rate = contact.rate_bps.max(1.0);

    let start_tx = t_in.max(contact.t_start);
    let effective_window = contact.t_end - start_tx - contact.setup_s;
    if effective_window <= 0.0 {
        return None;
    }

    let window_bytes = effective_window * rate;
    let capacity = contact.residual_bytes.min(window_bytes);
    if capacity + EPS_BYTES < bundle_bytes {
        return None;
    }

    let tx_time = bundle_bytes / rate;
    let finish = start_tx + contact.setup_s + tx_time;
    if finish > contact.t_end + EPS_TIME {
        return None;
    }

    let eta = finish + contact.owlt;
    if let Some(expiry) = expiry_abs {
        if eta > expiry + EPS_TIME {
            return None;
        }
    }

    Some(HopResult { start_tx, eta })
}

/// Cheap pre-check mirroring [`relax`] without computing `finish`/`eta`,
/// used to prune candidate relaxations before doing the full arithmetic
/// (spec §4.C, §4.D step 5).
pub fn quick_prune(contact: &Contact, t_in: Seconds, bundle_bytes: Bytes) -> bool {
    let rate = contact.rate_bps.max(1.0);
    let start_tx = t_in.max(contact.t_start);
    let effective_window = contact.t_end - start_tx - contact.setup_s;
    if effective_window <= 0.0 {
        return false;
    }
    let window_bytes = effective_window * rate;
    let capacity = contact.residual_bytes.min(window_bytes);
    capacity + EPS_BYTES >= bundle_bytes
}
