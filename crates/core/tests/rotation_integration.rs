//! Integration tests for the rotation cycle
//!
//! Drives `run_cycle` by hand so every delay can be asserted without a
//! running scheduler.

mod support;

use std::time::Duration;

use rotaboard_core::{run_cycle, CadencePolicy, Rotation};
use rotaboard_domain::{CycleOutcome, RotaboardError};
use serde_json::json;
use support::{event_log, Event, RecordingListener, ScriptedWidget};

const BASE: Duration = Duration::from_secs(30);
const RETRY: Duration = Duration::from_millis(100);

fn policy() -> CadencePolicy {
    CadencePolicy::new(BASE, RETRY, Duration::from_secs(5))
}

#[tokio::test]
async fn test_three_widget_scenario() {
    let log = event_log();
    let mut rotation = Rotation::new(vec![
        ScriptedWidget::new("A", 1.0, &[true], &log),
        ScriptedWidget::new("B", 2.0, &[false], &log),
        ScriptedWidget::new("C", 1.0, &[true], &log),
    ])
    .unwrap();
    let listener = RecordingListener::new(&log);

    // Cycle 1: A succeeds, B is next, wait 2 * base
    let first = run_cycle(&mut rotation, &listener, &policy()).await;
    assert_eq!(first.widget, "A");
    assert_eq!(first.outcome, CycleOutcome::Delivered);
    assert_eq!(rotation.position(), 1);
    assert_eq!(first.delay, BASE * 2);

    // Cycle 2: B fails, C is next, fast retry
    let second = run_cycle(&mut rotation, &listener, &policy()).await;
    assert_eq!(second.widget, "B");
    assert_eq!(second.outcome, CycleOutcome::Failed);
    assert_eq!(rotation.position(), 2);
    assert_eq!(second.delay, RETRY);

    // Cycle 3: C succeeds, wraps to A, wait 1 * base
    let third = run_cycle(&mut rotation, &listener, &policy()).await;
    assert_eq!(third.widget, "C");
    assert_eq!(third.outcome, CycleOutcome::Delivered);
    assert_eq!(rotation.position(), 0);
    assert_eq!(third.delay, BASE);

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            Event::Invoked("A".into()),
            Event::Delivered(json!({ "widget": "A" })),
            Event::Invoked("B".into()),
            Event::Invoked("C".into()),
            Event::Delivered(json!({ "widget": "C" })),
        ]
    );
}

#[tokio::test]
async fn test_position_after_k_cycles_regardless_of_outcome() {
    let log = event_log();
    let mut rotation = Rotation::starting_at(
        vec![
            ScriptedWidget::new("w0", 1.0, &[true, false, true], &log),
            ScriptedWidget::new("w1", 3.0, &[false], &log),
            ScriptedWidget::new("w2", 0.5, &[true, true, false], &log),
            ScriptedWidget::new("w3", 2.0, &[false, true], &log),
        ],
        2,
    )
    .unwrap();
    let listener = RecordingListener::new(&log);

    for k in 1..=17 {
        run_cycle(&mut rotation, &listener, &policy()).await;
        assert_eq!(rotation.position(), (2 + k) % 4, "after {k} cycles");
    }
}

#[tokio::test]
async fn test_every_delivery_precedes_next_invocation() {
    let log = event_log();
    let mut rotation = Rotation::new(vec![
        ScriptedWidget::new("ok", 1.0, &[true], &log),
        ScriptedWidget::new("flaky", 1.0, &[true, false], &log),
    ])
    .unwrap();
    let listener = RecordingListener::new(&log);

    for _ in 0..6 {
        run_cycle(&mut rotation, &listener, &policy()).await;
    }

    let events = log.lock().unwrap().clone();
    for (index, event) in events.iter().enumerate() {
        if let Event::Delivered(payload) = event {
            // The widget that produced this payload is the last one invoked.
            let producer = events[..index]
                .iter()
                .rev()
                .find_map(|e| match e {
                    Event::Invoked(name) => Some(name.clone()),
                    Event::Delivered(_) => None,
                })
                .unwrap();
            assert_eq!(payload["widget"], producer.as_str());
        }
    }

    let deliveries = events.iter().filter(|e| matches!(e, Event::Delivered(_))).count();
    // "ok" delivers 3 times, "flaky" delivers once then keeps failing
    assert_eq!(deliveries, 4);
}

#[tokio::test]
async fn test_failed_cycle_never_reaches_listener() {
    let log = event_log();
    let mut rotation =
        Rotation::new(vec![ScriptedWidget::new("broken", 10.0, &[false], &log)]).unwrap();
    let listener = RecordingListener::new(&log);

    for _ in 0..3 {
        let report = run_cycle(&mut rotation, &listener, &policy()).await;
        assert_eq!(report.outcome, CycleOutcome::Failed);
        assert_eq!(report.delay, RETRY);
        assert_eq!(report.next_position, 0);
    }

    assert!(log.lock().unwrap().iter().all(|e| matches!(e, Event::Invoked(_))));
}

#[test]
fn test_empty_rotation_fails_fast() {
    let err = Rotation::new(Vec::new()).unwrap_err();
    assert!(matches!(err, RotaboardError::Config(_)));
}
