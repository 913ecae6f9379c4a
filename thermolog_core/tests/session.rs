//! Session lifecycle: wake, drain, shutdown, and hardware release order.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use thermolog_core::calibrate::{CalibrationPolicy, LinearCoeffs};
use thermolog_core::mocks::{ScriptedRead, ScriptedSource};
use thermolog_core::runner::{AcquisitionSession, SessionCfg};
use thermolog_traits::{MonotonicClock, ReportSink};

#[derive(Clone, Default)]
struct SharedSink(Arc<Mutex<Vec<String>>>);

impl ReportSink for SharedSink {
    fn emit(&mut self, line: &str) {
        self.0.lock().expect("sink lock").push(line.to_string());
    }
}

fn linear_session(
    source: Arc<Mutex<ScriptedSource>>,
) -> AcquisitionSession<Arc<Mutex<ScriptedSource>>> {
    let cfg = SessionCfg {
        samples_per_read: 16,
        bit_width: 10,
        report_interval: Duration::ZERO,
    };
    AcquisitionSession::new(
        source,
        CalibrationPolicy::Linear(LinearCoeffs::default()),
        cfg,
        Arc::new(MonotonicClock::new()),
    )
}

#[test]
fn session_drains_on_ready_and_stops_cleanly() {
    let source = Arc::new(Mutex::new(ScriptedSource::new([
        ScriptedRead::Batch(vec![500, 500, 500, 500]),
        ScriptedRead::NoData,
    ])));
    let mut session = linear_session(source.clone());
    let handle = session.shutdown_handle();
    let ready = source
        .lock()
        .expect("source lock")
        .ready_callback()
        .expect("callback registered at session construction");

    let sink = SharedSink::default();
    let mut task_sink = sink.clone();
    let consumer = thread::spawn(move || session.run(&mut task_sink));

    thread::sleep(Duration::from_millis(50));
    // The production context announces one frame.
    ready();
    thread::sleep(Duration::from_millis(50));
    handle.request_stop();

    let outcome = consumer.join().expect("join");
    assert!(outcome.is_ok(), "session failed: {:?}", outcome.err());

    let lines = sink.0.lock().expect("lines lock");
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("Avg reading: 500 ("), "line: {}", lines[0]);

    let src = source.lock().expect("source lock");
    assert!(src.started, "source was never started");
    assert!(src.stopped, "source was not stopped");
    assert!(src.torn_down, "source was not torn down");
}

#[test]
fn source_fault_aborts_session_but_releases_hardware() {
    let source = Arc::new(Mutex::new(ScriptedSource::new([ScriptedRead::Fail(
        "conversion engine fault",
    )])));
    let mut session = linear_session(source.clone());
    let ready = source
        .lock()
        .expect("source lock")
        .ready_callback()
        .expect("callback registered");

    let sink = SharedSink::default();
    let mut task_sink = sink.clone();
    let consumer = thread::spawn(move || session.run(&mut task_sink));

    thread::sleep(Duration::from_millis(50));
    ready();

    let outcome = consumer.join().expect("join");
    let err = outcome.expect_err("fault must abort the session");
    let rendered = format!("{err:#}");
    assert!(
        rendered.contains("conversion engine fault"),
        "unexpected error: {rendered}"
    );

    let src = source.lock().expect("source lock");
    assert!(src.stopped && src.torn_down, "hardware was not released");
    assert!(sink.0.lock().expect("lines lock").is_empty());
}

#[test]
fn shutdown_wakes_a_parked_session() {
    let source = Arc::new(Mutex::new(ScriptedSource::new([ScriptedRead::NoData])));
    let mut session = linear_session(source.clone());
    let handle = session.shutdown_handle();

    let sink = SharedSink::default();
    let mut task_sink = sink.clone();
    let consumer = thread::spawn(move || session.run(&mut task_sink));

    // No frame ever becomes ready; the consumer is parked indefinitely
    // until shutdown fires the wake itself.
    thread::sleep(Duration::from_millis(50));
    assert!(!handle.is_stop_requested());
    handle.request_stop();

    let outcome = consumer.join().expect("join");
    assert!(outcome.is_ok());
    assert!(sink.0.lock().expect("lines lock").is_empty());
}
