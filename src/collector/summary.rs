use std::fmt;

/// Terminal state of one entity within a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityOutcome {
    /// No usage parameter set could be obtained.
    Unavailable,
    /// The parameter names were listed; `forwarded` counters went to the sink.
    Collected { forwarded: usize, skipped: usize },
    /// The parameter set could not be introspected at all.
    IntrospectionFailed,
}

/// What happened to the stats reporter at the end of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportOutcome {
    /// No reporter is configured.
    #[default]
    Skipped,
    Reported,
    Failed,
}

/// Tally of a single collection cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleSummary {
    /// Entities returned by the registry.
    pub entities: usize,
    pub unavailable: usize,
    pub introspection_failed: usize,
    /// Counters handed to the sink.
    pub forwarded: usize,
    /// Parameters that were absent, non-positive or unreadable.
    pub skipped: usize,
    pub report: ReportOutcome,
}

impl CycleSummary {
    pub(super) fn record(&mut self, outcome: EntityOutcome) {
        self.entities += 1;
        match outcome {
            EntityOutcome::Unavailable => self.unavailable += 1,
            EntityOutcome::IntrospectionFailed => self.introspection_failed += 1,
            EntityOutcome::Collected { forwarded, skipped } => {
                self.forwarded += forwarded;
                self.skipped += skipped;
            }
        }
    }
}

impl fmt::Display for CycleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entities={}, unavailable={}, introspection_failed={}, forwarded={}, skipped={}, report={:?}",
            self.entities,
            self.unavailable,
            self.introspection_failed,
            self.forwarded,
            self.skipped,
            self.report
        )
    }
}
