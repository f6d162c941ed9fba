use std::sync::Arc;

use config::{Config, ReporterKind};

/// RA Statistics: periodically collects the usage counters of live resource
/// adaptor entities and forwards them to a counters sink.
///
/// This library provides the collection cycle together with the interfaces it
/// consumes (registry, management layer, counters sink, stats reporter) and
/// in-memory and file-backed implementations of them.
pub mod collector;
pub mod config;
pub mod counters;
pub mod entity;
pub mod error;
pub mod management;
pub mod reporter;

/// Runs the statistics collector until interrupted.
///
/// Reads the configuration from the environment, wires the snapshot-backed
/// management layer, the in-memory counters facility and the configured
/// reporter into a [`collector::Collector`], and runs one cycle per interval.
///
/// # Errors
///
/// Possible errors include:
/// - Invalid configuration values (e.g., a non-numeric `STATS_INTERVAL_SECS`).
///
/// A failed collection cycle task is logged and the next tick runs as usual.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    log::debug!("Config: {:?}", config);

    let management = Arc::new(management::SnapshotManagement::new(
        config.snapshot_path.clone(),
    ));
    let facility = Arc::new(counters::CountersFacility::default());

    let mut builder = collector::CollectorBuilder::default();
    builder
        .set_management_layer(management)
        .set_counters_sink(Arc::clone(&facility) as Arc<dyn counters::CountersSink>);
    match config.reporter {
        ReporterKind::Log => {
            builder.set_reporter(Arc::new(reporter::LogReporter::new(Arc::clone(&facility))));
        }
        ReporterKind::Disabled => log::info!("No stats reporter configured"),
    }
    let collector = Arc::new(builder.build()?);

    let mut interval = tokio::time::interval(config.interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                log::info!("Shutting down");
                return Ok(());
            }
        }

        let collector = Arc::clone(&collector);
        let summary = match tokio::task::spawn_blocking(move || {
            let before = std::time::Instant::now();
            let summary = collector.run_cycle();
            let took = before.elapsed();
            log::trace!("run_cycle() took {} nanoseconds", took.as_nanos());
            summary
        })
        .await
        {
            Ok(summary) => summary,
            Err(err) => {
                log::error!("Collection cycle task failed: {}", err);
                continue;
            }
        };

        log::debug!("Collection cycle finished: {}", summary);
    }
}
