//! Synthetic contact plan generation for demos and benchmarks (spec §1,
//! "synthetic plan generator for demos" as an external collaborator).
//!
//! Grounded on the teacher's `main.rs` demo, which hand-builds a small
//! fixed contact set to exercise the router; generalized here into a
//! parameterized generator using `rand`, the crate the wider pack reaches
//! for synthetic data (`other_examples/.../khx02-vrp` seeds `rand_chacha`
//! for reproducible synthetic instances). Models a LEO ring: `n` satellites
//! in a cycle, each with a contact to its two neighbors per orbital period,
//! plus one ground station reachable from every satellite once per period.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::contact::Contact;
use crate::plan::ContactPlan;
use crate::types::{ContactId, NodeId, Seconds};

/// Parameters for a synthetic LEO-ring contact plan.
#[derive(Debug, Clone)]
pub struct LeoRingConfig {
    pub satellites: u32,
    pub period: Seconds,
    /// Fraction of the period each inter-satellite link stays open.
    pub link_duty_cycle: f64,
    pub rate_bps: f64,
    pub setup_s: Seconds,
    pub owlt_s: Seconds,
    pub residual_bytes: f64,
    pub seed: u64,
}

impl Default for LeoRingConfig {
    fn default() -> Self {
        LeoRingConfig {
            satellites: 6,
            period: 5700.0,
            link_duty_cycle: 0.4,
            rate_bps: 2e7,
            setup_s: 0.5,
            owlt_s: 0.01,
            residual_bytes: 5e8,
            seed: 0,
        }
    }
}

/// Node id of the single ground station every satellite can reach once
/// per orbit, for a ring of `satellites` satellites occupying node ids
/// `0..satellites`. Node ids stay dense (spec §9) so the ground station
/// takes the very next id rather than a sentinel like `u32::MAX`, which
/// would force the neighbor index to size itself to that value.
pub fn ground_station_id(cfg: &LeoRingConfig) -> NodeId {
    cfg.satellites.max(1)
}

/// Builds one period's worth of contacts for a ring of `cfg.satellites`
/// satellites, each linked to its two ring neighbors and to a ground
/// station, with jittered window placement seeded from `cfg.seed` for
/// reproducibility.
pub fn leo_ring(cfg: &LeoRingConfig) -> ContactPlan {
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let mut contacts = Vec::new();
    let mut next_id: ContactId = 0;
    let n = cfg.satellites.max(1);
    let ground = ground_station_id(cfg);
    let window_len = cfg.period * cfg.link_duty_cycle;

    for sat in 0..n {
        let neighbor = (sat + 1) % n;
        let jitter = rng.gen_range(0.0..(cfg.period - window_len).max(1.0));
        push_contact(&mut contacts, &mut next_id, sat, neighbor, jitter, jitter + window_len, cfg);
        push_contact(&mut contacts, &mut next_id, neighbor, sat, jitter, jitter + window_len, cfg);

        let ground_jitter = rng.gen_range(0.0..(cfg.period - window_len).max(1.0));
        push_contact(&mut contacts, &mut next_id, sat, ground, ground_jitter, ground_jitter + window_len, cfg);
    }

    ContactPlan::new(contacts)
}

fn push_contact(contacts: &mut Vec<Contact>, next_id: &mut ContactId, from: NodeId, to: NodeId, t_start: Seconds, t_end: Seconds, cfg: &LeoRingConfig) {
    if let Some(c) = Contact::try_new(*next_id, from, to, t_start, t_end, cfg.owlt_s, cfg.rate_bps, cfg.setup_s, cfg.residual_bytes) {
        contacts.push(c);
        *next_id += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_ring_and_ground_links_per_satellite() {
        let cfg = LeoRingConfig { satellites: 4, ..LeoRingConfig::default() };
        let plan = leo_ring(&cfg);
        // Each satellite contributes 2 inter-satellite + 1 ground contact.
        assert_eq!(plan.len(), 12);
    }

    #[test]
    fn same_seed_is_reproducible() {
        let cfg = LeoRingConfig { satellites: 5, seed: 42, ..LeoRingConfig::default() };
        let a = leo_ring(&cfg);
        let b = leo_ring(&cfg);
        assert_eq!(a.contacts, b.contacts);
    }

    #[test]
    fn different_seeds_typically_differ() {
        let cfg_a = LeoRingConfig { satellites: 5, seed: 1, ..LeoRingConfig::default() };
        let cfg_b = LeoRingConfig { satellites: 5, seed: 2, ..LeoRingConfig::default() };
        assert_ne!(leo_ring(&cfg_a).contacts, leo_ring(&cfg_b).contacts);
    }
}
