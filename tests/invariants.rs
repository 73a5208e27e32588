//! Property-based checks for the invariants in spec §8 ("Testable
//! Properties"), run over randomly generated linear contact chains.

use proptest::prelude::*;

use cgr_engine::contact::Contact;
use cgr_engine::dijkstra::shortest_path;
use cgr_engine::feasibility::relax;
use cgr_engine::plan::ContactPlan;
use cgr_engine::route::{Filters, RouteRequest};

#[derive(Debug, Clone)]
struct HopSpec {
    t_start: f64,
    span: f64,
    rate: f64,
    setup: f64,
    owlt: f64,
    residual: f64,
}

fn hop_spec_strategy() -> impl Strategy<Value = HopSpec> {
    (0.0..500.0f64, 1.0..200.0f64, 1e4..1e8f64, 0.0..2.0f64, 0.0..0.5f64, 1e4..1e9f64)
        .prop_map(|(t_start, span, rate, setup, owlt, residual)| HopSpec { t_start, span, rate, setup, owlt, residual })
}

fn build_chain(specs: &[HopSpec]) -> Option<ContactPlan> {
    let mut contacts = Vec::with_capacity(specs.len());
    for (i, s) in specs.iter().enumerate() {
        let t_end = s.t_start + s.span + s.setup + 0.1;
        let contact = Contact::try_new(i as u32, i as u32, i as u32 + 1, s.t_start, t_end, s.owlt, s.rate, s.setup, s.residual)?;
        contacts.push(contact);
    }
    Some(ContactPlan::new(contacts))
}

proptest! {
    #[test]
    fn temporal_coherence_and_capacity_hold(specs in prop::collection::vec(hop_spec_strategy(), 1..6), bundle in 1.0..5000.0f64, t0 in 0.0..100.0f64) {
        let Some(plan) = build_chain(&specs) else { return Ok(()); };
        let dst = specs.len() as u32;
        let req = RouteRequest::new(0, dst, t0, bundle);
        let route = shortest_path(&plan, &req, &Filters::none());

        if route.found {
            // Temporal coherence: consecutive hops share a node, and each
            // hop's relax succeeds from the arrival time implied by the
            // previous hop (recomputed independently here).
            let mut t_in = t0;
            for (idx, id) in route.contact_ids.iter().enumerate() {
                let contact = plan.contacts.iter().find(|c| c.id == *id).unwrap();
                if idx > 0 {
                    let prev_id = route.contact_ids[idx - 1];
                    let prev = plan.contacts.iter().find(|c| c.id == prev_id).unwrap();
                    prop_assert_eq!(prev.to, contact.from);
                }
                let result = relax(contact, t_in, bundle, None);
                prop_assert!(result.is_some(), "hop {} infeasible on replay", id);
                let result = result.unwrap();

                // Capacity respect.
                let effective_window = contact.t_end - result.start_tx - contact.setup_s;
                let window_bytes = effective_window * contact.rate_bps.max(1.0);
                prop_assert!(bundle <= contact.residual_bytes.min(window_bytes) + 1e-6);

                t_in = result.eta;
            }
            prop_assert!((t_in - route.eta).abs() < 1e-6);
        }
    }

    #[test]
    fn idempotent_and_non_mutating(specs in prop::collection::vec(hop_spec_strategy(), 1..6), bundle in 1.0..5000.0f64, t0 in 0.0..100.0f64) {
        let Some(plan) = build_chain(&specs) else { return Ok(()); };
        let dst = specs.len() as u32;
        let req = RouteRequest::new(0, dst, t0, bundle);
        let before = plan.contacts.clone();

        let a = shortest_path(&plan, &req, &Filters::none());
        let b = shortest_path(&plan, &req, &Filters::none());

        prop_assert_eq!(a, b);
        prop_assert_eq!(plan.contacts, before);
    }

    #[test]
    fn expiry_never_exceeded(specs in prop::collection::vec(hop_spec_strategy(), 1..6), bundle in 1.0..5000.0f64, t0 in 0.0..100.0f64, expiry_rel in 0.1..2000.0f64) {
        let Some(plan) = build_chain(&specs) else { return Ok(()); };
        let dst = specs.len() as u32;
        let req = RouteRequest::new(0, dst, t0, bundle).with_expiry(expiry_rel);
        let route = shortest_path(&plan, &req, &Filters::none());
        if route.found {
            prop_assert!(route.eta <= t0 + expiry_rel + 1e-6);
        }
    }
}
