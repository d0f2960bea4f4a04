use std::sync::Arc;

use blink_now::{
    commands::{CommandResult, CommandSurface, IntervalBounds},
    state::CountdownStateView,
    timer::{
        testing::{ManualTicker, RecordingSink},
        CountdownEngine,
    },
};

struct Harness {
    commands: CommandSurface,
    sink: Arc<RecordingSink>,
    ticker: Arc<ManualTicker>,
}

fn harness() -> Harness {
    let sink = Arc::new(RecordingSink::new());
    let ticker = Arc::new(ManualTicker::new());
    let engine = CountdownEngine::new(sink.clone(), ticker.clone());
    Harness {
        commands: CommandSurface::new(engine, IntervalBounds::default()),
        sink,
        ticker,
    }
}

#[test]
fn start_sets_total_and_remaining_from_minutes() {
    for minutes in [1, 5, 20, 120] {
        let h = harness();
        assert!(h.commands.start(minutes, "rest").success);

        let status = h.commands.status().unwrap();
        assert_eq!(status.total_seconds, minutes as u64 * 60);
        assert_eq!(status.remaining_seconds, status.total_seconds);
        assert!(status.running);
    }
}

#[test]
fn one_minute_cycle_notifies_once_and_resets() {
    let h = harness();
    assert!(h.commands.start(1, "Blink!").success);

    let first = &h.sink.snapshots()[0];
    assert_eq!(first.remaining_seconds, 60);
    assert_eq!(first.progress_percent, 100.0);

    h.ticker.tick_n(59);
    assert!(h.sink.notifications().is_empty());
    assert_eq!(h.commands.status().unwrap().remaining_seconds, 1);

    h.ticker.tick();
    assert_eq!(h.sink.notifications(), vec!["Blink!".to_string()]);
    // The boundary snapshot shows zero, the state has already reset
    assert_eq!(h.sink.snapshots().last().unwrap().remaining_seconds, 0);
    assert_eq!(h.commands.status().unwrap().remaining_seconds, 60);

    h.ticker.tick();
    let next = h.sink.snapshots().last().unwrap().clone();
    assert_eq!(next.remaining_seconds, 59);
    assert_eq!(h.sink.notifications().len(), 1);
}

#[test]
fn every_tick_lowers_remaining_by_exactly_one() {
    let h = harness();
    h.commands.start(2, "x");

    let mut previous = h.commands.status().unwrap().remaining_seconds;
    for _ in 0..119 {
        h.ticker.tick();
        let remaining = h.commands.status().unwrap().remaining_seconds;
        assert_eq!(remaining, previous - 1);
        previous = remaining;
    }
}

#[test]
fn cycles_repeat_without_stopping() {
    let h = harness();
    h.commands.start(1, "Blink!");

    h.ticker.tick_n(60 * 3);

    assert_eq!(h.sink.notifications().len(), 3);
    assert!(h.commands.status().unwrap().running);
    assert_eq!(h.ticker.active_count(), 1);
}

#[test]
fn progress_never_increases_within_a_cycle() {
    let h = harness();
    h.commands.start(1, "x");
    h.ticker.tick_n(61);

    let snapshots = h.sink.snapshots();
    // start snapshot + 60 ticks of the first cycle
    let cycle = &snapshots[..61];
    for pair in cycle.windows(2) {
        assert!(pair[1].progress_percent <= pair[0].progress_percent);
    }
    // first tick of the second cycle starts from a reset state
    assert_eq!(snapshots[61].remaining_seconds, 59);
    assert!(snapshots[61].progress_percent > snapshots[60].progress_percent);
}

#[test]
fn stop_twice_succeeds_both_times() {
    let h = harness();
    h.commands.start(1, "x");

    assert_eq!(h.commands.stop(), CommandResult::ok());
    assert_eq!(h.commands.stop(), CommandResult::ok());
    assert!(!h.commands.status().unwrap().running);
    assert_eq!(h.ticker.cancelled_count(), 1);
}

#[test]
fn stop_on_fresh_engine_succeeds() {
    let h = harness();
    assert_eq!(h.commands.stop(), CommandResult::ok());
}

#[test]
fn second_start_is_rejected_and_leaves_cycle_alone() {
    let h = harness();
    h.commands.start(1, "x");
    h.ticker.tick_n(5);

    let result = h.commands.start(2, "y");

    assert_eq!(
        result,
        CommandResult {
            success: false,
            error: Some("AlreadyRunning".to_string()),
        }
    );
    let status = h.commands.status().unwrap();
    assert_eq!(status.total_seconds, 60);
    assert_eq!(status.remaining_seconds, 55);
    assert_eq!(status.message, "x");
    assert_eq!(h.ticker.active_count(), 1);
}

#[test]
fn stop_keeps_message_for_inspection() {
    let h = harness();
    h.commands.start(5, "rest");
    h.ticker.tick_n(10);

    h.commands.stop();

    assert_eq!(
        h.commands.status().unwrap(),
        CountdownStateView {
            running: false,
            remaining_seconds: 0,
            total_seconds: 300,
            message: "rest".to_string(),
        }
    );
}

#[test]
fn stop_publishes_no_final_snapshot() {
    let h = harness();
    h.commands.start(1, "x");
    h.ticker.tick_n(3);
    let before = h.sink.snapshots().len();

    h.commands.stop();
    h.ticker.tick_n(3);

    assert_eq!(h.sink.snapshots().len(), before);
}

#[test]
fn restart_uses_a_fresh_registration() {
    let h = harness();
    h.commands.start(1, "x");
    h.commands.stop();
    h.commands.start(2, "y");

    let handles = h.ticker.handles();
    assert_eq!(handles.len(), 2);
    assert_ne!(handles[0], handles[1]);
    assert_eq!(h.ticker.active_count(), 1);

    // A tick from the first cycle that was still in flight changes nothing
    h.ticker.fire_retired(handles[0]);
    let status = h.commands.status().unwrap();
    assert_eq!(status.remaining_seconds, 120);
    assert_eq!(status.message, "y");
}

#[test]
fn failed_notification_does_not_break_the_cycle() {
    let h = harness();
    h.sink.fail_notifications(true);
    h.commands.start(1, "Blink!");

    h.ticker.tick_n(60);
    assert_eq!(h.sink.notifications().len(), 1);
    assert_eq!(h.commands.status().unwrap().remaining_seconds, 60);

    h.sink.fail_notifications(false);
    h.ticker.tick_n(60);
    assert_eq!(h.sink.notifications().len(), 2);
    assert!(h.commands.status().unwrap().running);
}

#[test]
fn missing_display_drops_snapshots_but_keeps_counting() {
    let h = harness();
    h.sink.detach_display();
    h.commands.start(1, "Blink!");
    h.ticker.tick_n(30);

    assert!(h.sink.snapshots().is_empty());
    assert_eq!(h.commands.status().unwrap().remaining_seconds, 30);

    h.sink.attach_display();
    h.ticker.tick();
    assert_eq!(h.sink.snapshots().last().unwrap().remaining_seconds, 29);

    h.sink.detach_display();
    h.ticker.tick_n(29);
    assert_eq!(h.sink.notifications(), vec!["Blink!".to_string()]);
}
