//! Regression suite for the six concrete scenarios named in the spec's
//! testable-properties section.

use cgr_engine::contact::Contact;
use cgr_engine::dijkstra::shortest_path;
use cgr_engine::k_consume::k_routes_by_consumption;
use cgr_engine::k_yen::k_routes_by_diversification;
use cgr_engine::plan::ContactPlan;
use cgr_engine::route::{Filters, RouteRequest};

fn c(id: u32, from: u32, to: u32, t_start: f64, t_end: f64, rate: f64, setup: f64, owlt: f64, residual: f64) -> Contact {
    Contact::try_new(id, from, to, t_start, t_end, owlt, rate, setup, residual).unwrap()
}

#[test]
fn scenario_1_linear_chain() {
    let plan = ContactPlan::new(vec![
        c(0, 100, 1, 0.0, 40.0, 1e7, 0.2, 0.02, 1e8),
        c(1, 1, 200, 5.0, 50.0, 1e7, 0.1, 0.02, 1e8),
    ]);
    let req = RouteRequest::new(100, 200, 0.0, 5e7);
    let route = shortest_path(&plan, &req, &Filters::none());
    assert!(route.found);
    assert_eq!(route.hops, 2);
    assert_eq!(route.contact_ids, vec![0, 1]);
    assert!((route.eta - 10.34).abs() < 1e-9);
}

#[test]
fn scenario_2_capacity_infeasibility() {
    let plan = ContactPlan::new(vec![
        c(0, 100, 1, 0.0, 40.0, 1e7, 0.2, 0.02, 1e7),
        c(1, 1, 200, 5.0, 50.0, 1e7, 0.1, 0.02, 1e8),
    ]);
    let req = RouteRequest::new(100, 200, 0.0, 5e7);
    assert!(!shortest_path(&plan, &req, &Filters::none()).found);
}

#[test]
fn scenario_3_diversification_finds_two_disjoint_paths() {
    let plan = ContactPlan::new(vec![
        c(0, 100, 1, 0.0, 40.0, 1e7, 0.2, 0.02, 1e8),
        c(1, 1, 200, 5.0, 50.0, 1e7, 0.1, 0.02, 1e8),
        c(2, 100, 2, 0.0, 40.0, 1e6, 0.2, 0.02, 1e8),
        c(3, 2, 200, 6.0, 60.0, 1e6, 0.1, 0.02, 1e8),
    ]);
    let req = RouteRequest::new(100, 200, 0.0, 1.0);
    let result = k_routes_by_diversification(&plan, &req, &Filters::none(), 2);
    assert!(result.found);
    assert_eq!(result.routes.len(), 2);
    let sequences: Vec<&Vec<u32>> = result.routes.iter().map(|r| &r.contact_ids).collect();
    assert!(sequences.contains(&&vec![0, 1]));
    assert!(sequences.contains(&&vec![2, 3]));
}

#[test]
fn scenario_4_consumption_forces_detour() {
    // Path [0,1] is much faster (rate=1e7) than [2,3] (rate=1e6), so it is
    // always preferred while it has capacity; windows are wide enough that
    // both paths can carry the full bundle on their own.
    let plan = ContactPlan::new(vec![
        c(0, 100, 1, 0.0, 300.0, 1e7, 0.2, 0.02, 5e7),
        c(1, 1, 200, 5.0, 300.0, 1e7, 0.1, 0.02, 5e7),
        c(2, 100, 2, 0.0, 300.0, 1e6, 0.2, 0.02, 1e8),
        c(3, 2, 200, 10.0, 300.0, 1e6, 0.1, 0.02, 1e8),
    ]);
    let req = RouteRequest::new(100, 200, 0.0, 5e7);
    let result = k_routes_by_consumption(&plan, &req, &Filters::none(), 2);
    assert!(result.found);
    assert_eq!(result.routes.len(), 2);
    assert_eq!(result.routes[0].contact_ids, vec![0, 1]);
    assert_eq!(result.routes[1].contact_ids, vec![2, 3]);
}

#[test]
fn scenario_5_expiry_prunes() {
    let plan = ContactPlan::new(vec![c(0, 1, 2, 0.0, 40.0, 1e6, 0.1, 30.0, 1e9)]);
    let req = RouteRequest::new(1, 2, 0.0, 1.0).with_expiry(5.0);
    assert!(!shortest_path(&plan, &req, &Filters::none()).found);
}

#[test]
fn scenario_6_forced_prefix_and_ban() {
    let plan = ContactPlan::new(vec![
        c(0, 0, 1, 0.0, 40.0, 1e7, 0.1, 0.0, 1e9),
        c(1, 1, 9, 0.0, 40.0, 1e7, 0.1, 0.0, 1e9),
        c(2, 0, 2, 0.0, 40.0, 1e7, 0.1, 0.0, 1e9),
        c(3, 2, 9, 0.0, 40.0, 1e7, 0.1, 0.0, 1e9),
        c(4, 0, 3, 0.0, 40.0, 1e7, 0.1, 0.0, 1e9),
        c(5, 3, 9, 0.0, 40.0, 1e7, 0.1, 0.0, 1e9),
    ]);
    let req = RouteRequest::new(0, 9, 0.0, 1.0);
    let filters = Filters { banned_ids: vec![2], forced_prefix_ids: vec![0] };
    let route = shortest_path(&plan, &req, &filters);
    assert!(route.found);
    assert_eq!(route.contact_ids, vec![0, 1]);
    assert!(!route.contact_ids.contains(&2));
    assert!(!route.contact_ids.contains(&3));
}
