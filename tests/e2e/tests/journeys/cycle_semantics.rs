//! # Cycle Semantics Journey Tests
//!
//! Drive whole models cycle by cycle the way an external driver does:
//! messages in, `step`, inspect buffers.

use std::cell::RefCell;
use std::rc::Rc;

use cogbox_core::{BufferConfig, MessageKind, Model, Term};
use cogbox_e2e_tests::{Fixtures, ModelHarness};

// ============================================================================
// ADD / MATCH / CLEAR
// ============================================================================

#[test]
fn test_add_match_clear_round() {
    let mut h = ModelHarness::new_seeded(1).with_buffer("B", 7, BufferConfig::new());

    h.send(MessageKind::Add, 7, Some("foo(1)"));
    assert!(h.step());
    assert_eq!(h.matched(7, "foo(_)"), Some("foo(1)".to_string()));
    assert_eq!(h.model.count_elements(7), Some(1));

    h.send(MessageKind::Clear, 7, None);
    assert!(h.step());
    assert_eq!(h.model.count_elements(7), Some(0));
    assert_eq!(h.matched(7, "foo(_)"), None);
}

#[test]
fn test_scripted_add_is_stamped_with_its_cycle() {
    let mut h = ModelHarness::new_seeded(2)
        .with_buffer("wm", 7, BufferConfig::new())
        .with_script("strategy", 1, &Fixtures::adds(7, 3, &["late"]));

    h.step_n(5);
    let head = h.model.buffer_contents(7).and_then(|c| c.first()).cloned().unwrap();
    assert_eq!(head.term, Term::atom("late"));
    assert_eq!(head.timestamp, 3);
    assert_eq!(head.activation, 1.0);
}

// ============================================================================
// STOP PROPAGATION
// ============================================================================

#[test]
fn test_stop_to_model_halts_next_step() {
    let mut h = ModelHarness::new_seeded(3).with_buffer("B", 7, BufferConfig::new());
    assert!(h.step());

    h.send(MessageKind::Stop, 0, None);
    assert!(!h.step());
    assert!(h.model.is_stopped());
    // stays halted
    assert!(!h.step());
}

#[test]
fn test_stop_to_buffer_keeps_model_running() {
    let mut h = ModelHarness::new_seeded(4)
        .with_buffer("B", 7, BufferConfig::new())
        .with_buffer("C", 8, BufferConfig::new());

    h.send(MessageKind::Stop, 7, None);
    h.send(MessageKind::Add, 7, Some("x"));
    h.send(MessageKind::Add, 8, Some("y"));
    assert!(h.step());

    assert_eq!(h.model.component_stopped(7), Some(true));
    assert_eq!(h.model.component_stopped(8), Some(false));
    assert!(!h.model.is_stopped());
    assert_eq!(h.count(7), 0);
    assert_eq!(h.count(8), 1);

    h.send(MessageKind::Add, 7, Some("z"));
    assert!(h.step_n(3));
    assert_eq!(h.count(7), 0);
}

#[test]
fn test_halted_cycle_applies_nothing() {
    let mut h = ModelHarness::new_seeded(5)
        .with_buffer("B", 7, BufferConfig::new())
        .with_script(
            "strategy",
            1,
            &[
                Fixtures::step(2, MessageKind::Add, 7, Some("never")),
                Fixtures::step(2, MessageKind::Stop, 0, None),
            ],
        );

    assert_eq!(h.run_until_halt(10), Some(2));
    assert_eq!(h.count(7), 0);
}

// ============================================================================
// PHASE ORDER
// ============================================================================

#[test]
fn test_clear_delete_add_order() {
    let mut h = ModelHarness::new_seeded(6).with_buffer("B", 7, BufferConfig::new());
    h.seed(7, &["keep(1)", "drop(1)"]);

    // Delete hits the seeded element before the new one lands
    h.send(MessageKind::Add, 7, Some("drop(2)"));
    h.send(MessageKind::Delete, 7, Some("drop(_)"));
    h.step();
    assert_eq!(h.contents(7), vec!["drop(2)", "keep(1)"]);

    // Clear wipes everything before Add
    h.send(MessageKind::Add, 7, Some("fresh"));
    h.send(MessageKind::Clear, 7, None);
    h.step();
    assert_eq!(h.contents(7), vec!["fresh"]);
}

#[test]
fn test_delete_removes_one_element_per_message() {
    let mut h = ModelHarness::new_seeded(7).with_buffer("B", 7, BufferConfig::new());
    h.seed(7, &["n(1)", "n(2)", "n(3)"]);

    h.send(MessageKind::Delete, 7, Some("n(X)"));
    h.send(MessageKind::Delete, 7, Some("n(X)"));
    h.send(MessageKind::Delete, 7, Some("missing"));
    h.step();
    assert_eq!(h.contents(7), vec!["n(1)"]);
}

#[test]
fn test_processes_see_state_from_previous_cycle() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let reader = move |model: &mut Model| {
        let mut template = Term::parse("signal(S)").unwrap();
        let found = model.match_above_threshold(7, &mut template, 0.5);
        log.borrow_mut().push((model.cycle(), found.then(|| template.to_string())));
    };

    let mut h = ModelHarness::new_seeded(8)
        .with_buffer("B", 7, BufferConfig::new())
        .with_script(
            "writer",
            1,
            &[
                Fixtures::step(1, MessageKind::Add, 7, Some("signal(on)")),
                Fixtures::step(3, MessageKind::Inhibit, 7, Some("signal(_)")),
            ],
        )
        .with_process("reader", 2, reader);

    h.step_n(4);
    assert_eq!(
        *seen.borrow(),
        vec![
            (1, None),
            (2, Some("signal(on)".to_string())),
            (3, Some("signal(on)".to_string())),
            (4, None),
        ]
    );
}

// ============================================================================
// ACTIVATION
// ============================================================================

#[test]
fn test_excite_and_inhibit_cancel_out() {
    let mut h = ModelHarness::new_seeded(9).with_buffer("B", 7, BufferConfig::new());
    h.model.seed_element(7, "x(1)", 0.4).unwrap();
    h.model.seed_element(7, "y(1)", 0.4).unwrap();

    h.send(MessageKind::Excite, 7, Some("x(_)"));
    h.send(MessageKind::Inhibit, 7, Some("x(_)"));
    h.send(MessageKind::Excite, 7, Some("y(_)"));
    h.send(MessageKind::Excite, 7, Some("y(1)"));
    h.step_n(2);

    let list = h.model.buffer_contents(7).unwrap();
    let y = list.get(0).unwrap();
    let x = list.get(1).unwrap();
    assert_eq!((x.activation, x.timestamp), (0.4, 0));
    assert_eq!((y.activation, y.timestamp), (1.0, 1));
}

// ============================================================================
// DUMP AND LIFECYCLE
// ============================================================================

#[test]
fn test_dump_shows_messages_and_content() {
    let mut h = ModelHarness::new_seeded(10)
        .with_buffer("wm", 7, BufferConfig::new())
        .with_script("strategy", 1, &Fixtures::adds(7, 1, &["item(3)"]));
    h.step();

    let text = h.model.dump(true).to_string();
    assert!(text.starts_with("e2e: BLOCK 0; CYCLE 1\n"));
    assert!(text.contains("  MESSAGE (strategy --> wm; Add): item(3)\n"));
    assert!(text.contains("  COMPONENT: strategy (Process)\n"));
    assert!(text.contains("  COMPONENT: wm (Buffer): [item(3)(1, 1.00)]\n"));
}

#[test]
fn test_new_block_clears_content_but_not_stop_flags() {
    let mut h = ModelHarness::new_seeded(11)
        .with_buffer("B", 7, BufferConfig::new())
        .with_buffer("C", 8, BufferConfig::new());
    h.seed(7, &["a", "b"]);
    h.send(MessageKind::Stop, 8, None);
    h.step();

    h.model.start_new_block();
    h.model.initialise_trial();
    assert_eq!(h.model.block(), 1);
    assert_eq!(h.model.cycle(), 0);
    assert_eq!(h.count(7), 0);
    assert_eq!(h.model.component_stopped(8), Some(true));
}
