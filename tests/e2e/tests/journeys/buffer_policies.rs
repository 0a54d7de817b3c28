//! # Buffer Policy Journey Tests
//!
//! Capacity, eviction, access order and decay observed through whole
//! cycles rather than single phases.

use cogbox_core::{AccessOrder, BufferConfig, Capacity, Decay, ExcessPolicy, MessageKind};
use cogbox_e2e_tests::{Fixtures, ModelHarness};

fn limited(n: usize, excess: ExcessPolicy) -> BufferConfig {
    BufferConfig::new()
        .with_capacity(Capacity::Limited(n))
        .with_excess(excess)
}

// ============================================================================
// CAPACITY AND EVICTION
// ============================================================================

#[test]
fn test_oldest_eviction_keeps_second_term() {
    let mut h = ModelHarness::new_seeded(1)
        .with_buffer("B", 9, limited(1, ExcessPolicy::Oldest))
        .with_script("p", 1, &Fixtures::adds(9, 1, &["first(a)", "second(b)"]));

    h.step_n(2);
    assert_eq!(h.model.count_elements(9), Some(1));
    assert_eq!(h.contents(9), vec!["second(b)"]);
}

#[test]
fn test_youngest_eviction_replaces_head() {
    let mut h = ModelHarness::new_seeded(2)
        .with_buffer("B", 9, limited(2, ExcessPolicy::Youngest))
        .with_script("p", 1, &Fixtures::adds(9, 1, &["a", "b", "c"]));

    h.step_n(3);
    assert_eq!(h.contents(9), vec!["c", "a"]);
}

#[test]
fn test_ignore_drops_incoming() {
    let mut h = ModelHarness::new_seeded(3)
        .with_buffer("B", 9, limited(2, ExcessPolicy::Ignore))
        .with_script("p", 1, &Fixtures::adds(9, 1, &["a", "b", "c", "d"]));

    h.step_n(4);
    assert_eq!(h.contents(9), vec!["b", "a"]);
}

#[test]
fn test_random_eviction_keeps_newest() {
    let mut h = ModelHarness::new_seeded(4)
        .with_buffer("B", 9, limited(3, ExcessPolicy::Random))
        .with_script("p", 1, &Fixtures::adds(9, 1, &["a", "b", "c", "d", "e"]));

    h.step_n(5);
    let contents = h.contents(9);
    assert_eq!(contents.len(), 3);
    assert_eq!(contents[0], "e");
}

#[test]
fn test_capacity_invariant_under_load() {
    for excess in [ExcessPolicy::Random, ExcessPolicy::Oldest, ExcessPolicy::Youngest] {
        for limit in [1, 2, 5] {
            let mut plan = Vec::new();
            for cycle in 1..=40 {
                plan.extend(Fixtures::burst(9, cycle, (cycle % 4) as usize));
                if cycle % 7 == 0 {
                    plan.push(Fixtures::step(cycle, MessageKind::Delete, 9, Some("item(_)")));
                }
            }
            let mut h = ModelHarness::new_seeded(limit as u64)
                .with_buffer("B", 9, limited(limit, excess))
                .with_script("p", 1, &plan);

            for _ in 0..40 {
                h.step();
                assert!(h.count(9) <= limit, "{:?} limit {}", excess, limit);
            }
        }
    }
}

#[test]
fn test_burst_in_one_cycle_respects_capacity() {
    let mut h = ModelHarness::new_seeded(5)
        .with_buffer("B", 9, limited(3, ExcessPolicy::Oldest))
        .with_script("p", 1, &Fixtures::burst(9, 1, 10));

    h.step();
    assert_eq!(h.count(9), 3);
}

// ============================================================================
// ACCESS ORDER
// ============================================================================

#[test]
fn test_fifo_reads_reverse_native_order() {
    let mut h = ModelHarness::new_seeded(6)
        .with_buffer("lifo", 7, BufferConfig::new())
        .with_buffer("fifo", 8, BufferConfig::new().with_access(AccessOrder::Fifo))
        .with_script("p", 1, &{
            let mut plan = Fixtures::adds(7, 1, &["e1", "e2", "e3"]);
            plan.extend(Fixtures::adds(8, 1, &["e1", "e2", "e3"]));
            plan
        });
    h.step_n(3);

    assert_eq!(h.contents(7), vec!["e3", "e2", "e1"]);
    assert_eq!(h.read_order(7), vec!["e3", "e2", "e1"]);
    assert_eq!(h.contents(8), vec!["e3", "e2", "e1"]);
    assert_eq!(h.read_order(8), vec!["e1", "e2", "e3"]);

    assert_eq!(h.matched(7, "E"), Some("e3".to_string()));
    assert_eq!(h.matched(8, "E"), Some("e1".to_string()));
}

#[test]
fn test_random_reads_are_permutations() {
    let mut h = ModelHarness::new_seeded(7)
        .with_buffer("bag", 7, BufferConfig::new().with_access(AccessOrder::Random));
    h.seed(7, &["a", "b", "c", "d"]);

    let mut orders = std::collections::HashSet::new();
    for _ in 0..50 {
        let mut order = h.read_order(7);
        orders.insert(order.clone());
        order.sort();
        assert_eq!(order, vec!["a", "b", "c", "d"]);
    }
    assert!(orders.len() > 1);
    assert_eq!(h.contents(7), vec!["d", "c", "b", "a"]);
}

// ============================================================================
// DECAY
// ============================================================================

#[test]
fn test_decay_none_survives_heavy_traffic() {
    let mut plan = Fixtures::adds(7, 1, &["a", "b", "c"]);
    for cycle in 4..=300 {
        plan.push(Fixtures::step(cycle, MessageKind::Inhibit, 7, Some("X")));
        plan.push(Fixtures::step(cycle, MessageKind::Send, 1, Some("noise")));
    }
    let mut h = ModelHarness::new_seeded(8)
        .with_buffer("B", 7, BufferConfig::new())
        .with_script("p", 1, &plan);

    assert!(h.step_n(1000));
    assert_eq!(h.contents(7), vec!["c", "b", "a"]);
}

#[test]
fn test_linear_and_quadratic_die_by_k() {
    for decay in [Decay::Linear(4), Decay::Quadratic(4)] {
        let mut h = ModelHarness::new_seeded(9)
            .with_buffer("B", 7, BufferConfig::new().with_decay(decay))
            .with_script("p", 1, &Fixtures::burst(7, 1, 50));
        // added at cycle 1; dt reaches k = 4 at cycle 5
        h.step_n(5);
        assert_eq!(h.count(7), 0, "{}", decay);
    }
}

#[test]
fn test_fixed_decay_lifetime() {
    let mut h = ModelHarness::new_seeded(10)
        .with_buffer("B", 7, BufferConfig::new().with_decay(Decay::Fixed(4)))
        .with_script("p", 1, &Fixtures::adds(7, 1, &["x"]));

    h.step_n(3);
    assert_eq!(h.count(7), 1);
    h.step();
    assert_eq!(h.count(7), 0);
}

#[test]
fn test_exponential_decay_thins_buffer() {
    let mut h = ModelHarness::new_seeded(11)
        .with_buffer("B", 7, BufferConfig::new().with_decay(Decay::Exponential(2)))
        .with_script("p", 1, &Fixtures::burst(7, 1, 400));

    h.step();
    let after_one = h.count(7);
    // survival per cycle is 2^(-1/2), about 0.71
    assert!((240..330).contains(&after_one), "{}", after_one);
    h.step_n(30);
    assert!(h.count(7) < after_one / 50);
}

#[test]
fn test_weibull_spares_fresh_elements() {
    let mut h = ModelHarness::new_seeded(12)
        .with_buffer("B", 7, BufferConfig::new().with_decay(Decay::Weibull(1)))
        .with_script("p", 1, &Fixtures::burst(7, 1, 100));

    // dt = 0 on the cycle of the Add
    h.step();
    assert_eq!(h.count(7), 100);
}
