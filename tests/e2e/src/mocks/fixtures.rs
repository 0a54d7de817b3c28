//! Test Data Factory
//!
//! Provides canned test data:
//! - Script steps and multi-cycle plans
//! - Ground terms of every kind for matcher properties
//! - A complete scenario file

use cogbox_core::{ComponentId, MessageKind, Term};
use cogbox_sim::ScriptStep;

/// A script's steps
pub type Plan = Vec<ScriptStep>;

/// Factory for creating test data
pub struct Fixtures;

impl Fixtures {
    pub fn step(cycle: u64, kind: MessageKind, target: ComponentId, payload: Option<&str>) -> ScriptStep {
        ScriptStep {
            cycle,
            kind,
            target,
            payload: payload.map(str::to_string),
        }
    }

    /// One Add per cycle, starting at `first_cycle`
    pub fn adds(target: ComponentId, first_cycle: u64, terms: &[&str]) -> Plan {
        terms
            .iter()
            .enumerate()
            .map(|(i, text)| Self::step(first_cycle + i as u64, MessageKind::Add, target, Some(text)))
            .collect()
    }

    /// `count` Adds of `item(0)..item(count-1)` in a single cycle
    pub fn burst(target: ComponentId, cycle: u64, count: usize) -> Plan {
        (0..count)
            .map(|i| {
                let text = format!("item({})", i);
                Self::step(cycle, MessageKind::Add, target, Some(&text))
            })
            .collect()
    }

    /// Ground terms covering every term kind
    pub fn ground_terms() -> Vec<Term> {
        [
            "a",
            "'Quoted atom'",
            "42",
            "-7",
            "3.25",
            "[]",
            "[1, 2, 3]",
            "f(a)",
            "f(a, b)",
            "g(f(a), [x, y], 1.5)",
            "pair(item(3), response(left))",
        ]
        .iter()
        .map(|text| Term::parse(text).expect("Bad fixture term"))
        .collect()
    }

    /// Buffer 7 seeded with a goal; a strategy adds items on cycles 1-3,
    /// clears on 4 and halts the model on 6
    pub fn demo_scenario_json() -> String {
        r#"{
            "model": { "name": "demo", "seed": 7 },
            "buffers": [
                { "name": "wm", "id": 7,
                  "config": { "capacity": { "kind": "limited", "constant": 2 },
                              "excess": "oldest" },
                  "seed": [{ "term": "goal(start)", "activation": 0.5 }] },
                { "name": "log", "id": 8 }
            ],
            "scripts": [
                { "name": "strategy", "id": 1, "steps": [
                    { "cycle": 1, "kind": "add", "target": 7, "payload": "item(1)" },
                    { "cycle": 2, "kind": "add", "target": 7, "payload": "item(2)" },
                    { "cycle": 3, "kind": "add", "target": 7, "payload": "item(3)" },
                    { "cycle": 3, "kind": "add", "target": 8, "payload": "saw(3)" },
                    { "cycle": 4, "kind": "clear", "target": 7 },
                    { "cycle": 6, "kind": "stop", "target": 0 }
                ]}
            ],
            "max_cycles": 50
        }"#
        .to_string()
    }
}
