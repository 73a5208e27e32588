//! Per-contact EWMA wait-penalty learning (spec §4.H).
//!
//! No teacher analogue exists (the teacher's contact managers are
//! stateless across calls); this is grounded on the teacher's pattern of
//! keyed per-contact auxiliary state living alongside the contact array
//! itself (`ContactManagerTxData` in `src/contact_manager/mod.rs`, which
//! the teacher's `Contact` carries per-instance), adapted to a standalone
//! map kept by the live loop across cycles rather than embedded in
//! `Contact`.

use std::collections::HashMap;

use crate::contact::Contact;
use crate::plan::ContactPlan;
use crate::types::{ContactId, Seconds};

/// Smoothed per-contact first-hop wait observations, keyed by contact id
/// so the penalty survives periodization's id-preserving shifted copies
/// (spec §4.G, §4.H).
#[derive(Debug, Clone, Default)]
pub struct WaitPenalties {
    penalty: HashMap<ContactId, Seconds>,
}

impl WaitPenalties {
    pub fn new() -> Self {
        WaitPenalties::default()
    }

    /// Updates the smoothed penalty for `contact_id` given one observed
    /// wait `w = max(0, start_tx - t0)` (spec §4.H).
    pub fn observe(&mut self, contact_id: ContactId, w: Seconds, alpha: f64) {
        let w = w.max(0.0);
        let prev = self.penalty.get(&contact_id).copied().unwrap_or(0.0);
        self.penalty.insert(contact_id, (1.0 - alpha) * prev + alpha * w);
    }

    pub fn get(&self, contact_id: ContactId) -> Seconds {
        self.penalty.get(&contact_id).copied().unwrap_or(0.0)
    }

    /// Builds a planning copy of `plan` with every contact's `setup_s`
    /// augmented by `lambda * penalty[id]` (spec §4.H). The true plan and
    /// its true feasibility arithmetic (spec §4.C) are untouched; this
    /// copy exists for exactly one planning call.
    pub fn apply(&self, plan: &ContactPlan, lambda: f64) -> ContactPlan {
        let contacts: Vec<Contact> = plan
            .contacts
            .iter()
            .map(|c| {
                let mut biased = *c;
                biased.setup_s += lambda * self.get(c.id);
                biased
            })
            .collect();
        ContactPlan::new(contacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_penalty_is_zero() {
        let p = WaitPenalties::new();
        assert_eq!(p.get(42), 0.0);
    }

    #[test]
    fn observe_smooths_toward_wait() {
        let mut p = WaitPenalties::new();
        p.observe(0, 10.0, 0.5);
        assert_eq!(p.get(0), 5.0);
        p.observe(0, 10.0, 0.5);
        assert_eq!(p.get(0), 7.5);
    }

    #[test]
    fn negative_wait_is_clamped_to_zero() {
        let mut p = WaitPenalties::new();
        p.observe(0, -5.0, 1.0);
        assert_eq!(p.get(0), 0.0);
    }

    #[test]
    fn apply_augments_setup_s_only_on_copy() {
        let c = Contact::try_new(9, 1, 2, 0.0, 40.0, 0.0, 1e6, 0.1, 1e9).unwrap();
        let plan = ContactPlan::new(vec![c]);
        let mut p = WaitPenalties::new();
        p.observe(9, 4.0, 1.0);
        let biased = p.apply(&plan, 2.0);
        assert!((biased.contacts[0].setup_s - (0.1 + 8.0)).abs() < 1e-9);
        assert_eq!(plan.contacts[0].setup_s, 0.1);
    }
}
