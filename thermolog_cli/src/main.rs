//! Binary wiring: config, logging, simulated source, session, shutdown.

mod cli;

use clap::Parser;
use cli::Args;
use eyre::{Result, WrapErr};
use std::path::Path;
use std::sync::{Arc, OnceLock};
use thermolog_config::Config;
use thermolog_core::conversions::policy_from_config;
use thermolog_core::runner::{AcquisitionSession, SessionCfg, ShutdownHandle};
use thermolog_hardware::{SimAdcCfg, SimulatedContinuousAdc, Waveform};
use thermolog_traits::{Clock, MonotonicClock, ReportSink};

static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Prints report lines and, with a `--reports` budget, stops the session
/// once the budget is spent.
struct StdoutSink {
    emitted: u64,
    limit: Option<u64>,
    shutdown: ShutdownHandle,
}

impl ReportSink for StdoutSink {
    fn emit(&mut self, line: &str) {
        println!("{line}");
        self.emitted += 1;
        if let Some(limit) = self.limit {
            if self.emitted >= limit {
                self.shutdown.request_stop();
            }
        }
    }
}

fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading config {}", path.display()))?;
    thermolog_config::load_toml(&text)
        .wrap_err_with(|| format!("parsing config {}", path.display()))
}

fn init_tracing(args: &Args, cfg: &Config) -> Result<()> {
    // The config file may set a level; an explicit --log-level wins.
    let level = match (&cfg.logging.level, args.log_level.as_str()) {
        (Some(from_cfg), "info") => from_cfg.clone(),
        _ => args.log_level.clone(),
    };
    let filter =
        tracing_subscriber::EnvFilter::try_new(&level).wrap_err("invalid log level")?;

    if let Some(path) = &cfg.logging.file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .wrap_err_with(|| format!("opening log file {path}"))?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        let _ = FILE_GUARD.set(guard);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .json()
            .init();
    } else if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let mut cfg = load_config(&args.config)?;
    if let Some(ms) = args.interval_ms {
        cfg.report.interval_ms = ms;
    }
    if let Some(policy) = args.policy {
        cfg.report.policy = policy.into();
    }

    init_tracing(&args, &cfg)?;
    cfg.validate().wrap_err("invalid configuration")?;

    let policy = policy_from_config(&cfg);
    let session_cfg = SessionCfg::from(&cfg);
    let source = SimulatedContinuousAdc::new(SimAdcCfg {
        channel: cfg.adc.channel,
        bit_width: cfg.adc.bit_width,
        sample_rate_hz: cfg.adc.sample_rate_hz,
        samples_per_frame: cfg.adc.samples_per_read,
        max_store_samples: cfg.adc.max_store_samples,
        waveform: Waveform::Triangle {
            base: 512,
            amplitude: 48,
            period_samples: 8192,
        },
    });

    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(MonotonicClock::new());
    let mut session = AcquisitionSession::new(source, policy, session_cfg, clock);

    let handle = session.shutdown_handle();
    {
        let handle = handle.clone();
        ctrlc::set_handler(move || {
            tracing::info!("shutdown requested");
            handle.request_stop();
        })
        .wrap_err("installing ctrl-c handler")?;
    }

    let mut sink = StdoutSink {
        emitted: 0,
        limit: (args.reports > 0).then_some(args.reports),
        shutdown: handle,
    };

    tracing::info!(
        rate_hz = cfg.adc.sample_rate_hz,
        samples_per_read = cfg.adc.samples_per_read,
        interval_ms = cfg.report.interval_ms,
        policy = ?cfg.report.policy,
        "starting acquisition"
    );
    session.run(&mut sink)?;
    Ok(())
}
