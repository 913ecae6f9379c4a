//! Producer-thread lifecycle: no leaked threads, prompt joins.

use std::time::{Duration, Instant};
use thermolog_hardware::{SimAdcCfg, SimulatedContinuousAdc, Waveform};
use thermolog_traits::SampleSource;

fn small_cfg() -> SimAdcCfg {
    SimAdcCfg {
        samples_per_frame: 10,
        max_store_samples: 100,
        waveform: Waveform::Constant(512),
        ..SimAdcCfg::default()
    }
}

#[test]
fn stop_joins_the_worker_promptly() {
    let mut src = SimulatedContinuousAdc::new(small_cfg());
    src.start().expect("start");
    std::thread::sleep(Duration::from_millis(50));

    let begin = Instant::now();
    src.stop().expect("stop");
    let elapsed = begin.elapsed();
    assert!(
        elapsed < Duration::from_millis(200),
        "stop took {elapsed:?}, expected < 200ms"
    );
}

#[test]
fn drop_without_stop_joins_the_worker() {
    let mut src = SimulatedContinuousAdc::new(small_cfg());
    src.start().expect("start");
    std::thread::sleep(Duration::from_millis(20));

    let begin = Instant::now();
    drop(src);
    assert!(begin.elapsed() < Duration::from_millis(500));
}

#[test]
fn sources_can_be_created_and_dropped_repeatedly() {
    for _ in 0..5 {
        let mut src = SimulatedContinuousAdc::new(small_cfg());
        src.start().expect("start");
        std::thread::sleep(Duration::from_millis(10));
        drop(src);
    }
}
