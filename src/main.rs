/// Entry point for the RA statistics collector.
///
/// Collects the usage counters of every resource adaptor entity listed in the
/// usage snapshot once per interval and triggers the stats reporter.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=info STATS_INTERVAL_SECS=10 STATS_SNAPSHOT_PATH=./usage.json cargo run
/// ```
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    ra_statistics::run().await
}
