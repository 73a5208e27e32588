//! Orbital periodization: replicating a short contact plan across a longer
//! simulation horizon (spec §4.G).
//!
//! The teacher has no periodization concept (its contact plans are taken
//! as given, static graphs); this module is grounded on the teacher's
//! contact-id-assignment discipline in `src/contact.rs`'s `ContactInfo`
//! (ids stay stable across distinct `Contact` instances) generalized to
//! time-shifted duplicates, and on spec §9's resolution that periodized
//! copies keep duplicate contact ids rather than being renumbered.

use tracing::debug;

use crate::contact::Contact;
use crate::plan::ContactPlan;
use crate::types::Seconds;

/// Infers the plan's period as the span between its earliest `t_start` and
/// latest `t_end` (spec §4.G), or `None` for an empty plan.
pub fn infer_period(plan: &ContactPlan) -> Option<Seconds> {
    if plan.is_empty() {
        return None;
    }
    let min_start = plan.contacts.iter().map(|c| c.t_start).fold(Seconds::INFINITY, f64::min);
    let max_end = plan.contacts.iter().map(|c| c.t_end).fold(Seconds::NEG_INFINITY, f64::max);
    Some(max_end - min_start)
}

/// Builds the working plan for one live-loop cycle at clock time `now`:
/// two whole-period shifted copies of `base`'s contacts, at offsets
/// `k*period` and `(k+1)*period` where `k = floor(now / period)` (spec
/// §4.G). This guarantees a window surrounding `now` even when `base`'s
/// own temporal span is much shorter than the simulation horizon.
///
/// The two copies keep `base`'s original contact ids (spec §9 open
/// question resolution, recorded in `DESIGN.md`); the search distinguishes
/// them by index, not id, so this does not cause ambiguity internally —
/// callers aggregating results by id should be aware periodized output
/// may repeat an id.
pub fn periodize(base: &ContactPlan, period: Seconds, now: Seconds) -> ContactPlan {
    if period <= 0.0 || base.is_empty() {
        return base.clone();
    }

    let k = (now / period).floor();
    let mut contacts = Vec::with_capacity(base.len() * 2);
    for cycle in [k, k + 1.0] {
        let shift = cycle * period;
        contacts.extend(base.contacts.iter().map(|c| shift_contact(c, shift)));
    }

    debug!(period, now, cycle = k, "periodized contact plan");
    ContactPlan::new(contacts)
}

fn shift_contact(c: &Contact, shift: Seconds) -> Contact {
    let mut shifted = *c;
    shifted.t_start += shift;
    shifted.t_end += shift;
    shifted
}
