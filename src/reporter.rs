use std::sync::Arc;

use crate::counters::CountersFacility;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("stats report failed: {0}")]
    Failed(String),
    #[error("failed to encode stats report: {0}")]
    Encode(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Exports the collected statistics. Triggered once at the end of every cycle.
pub trait StatsReporter: Send + Sync {
    fn report(&self) -> Result<()>;
}

/// Reporter that writes the current counters as a JSON object to the log.
#[derive(Debug, Clone)]
pub struct LogReporter {
    facility: Arc<CountersFacility>,
}

impl LogReporter {
    pub fn new(facility: Arc<CountersFacility>) -> Self {
        Self { facility }
    }

    fn render(&self) -> Result<String> {
        serde_json::to_string(&self.facility.snapshot()).map_err(Error::Encode)
    }
}

impl StatsReporter for LogReporter {
    fn report(&self) -> Result<()> {
        let rendered = self.render()?;
        log::info!(target: "stats reporter", "counters={rendered}");
        Ok(())
    }
}
