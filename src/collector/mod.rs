//! The periodic statistics collection cycle.
//!
//! One cycle enumerates the live resource adaptor entities, reads the default
//! usage parameter set of each one and forwards every counter with a value
//! greater than zero to the counters sink. Afterwards the stats reporter, if
//! any, is triggered exactly once.
//!
//! # Failure isolation
//!
//! Nothing that goes wrong for a single entity aborts the cycle:
//!
//! - an unreachable entity is skipped with a warning,
//! - a parameter set without name introspection yields no counters,
//! - a missing or wrong-typed parameter is skipped with a warning,
//! - a failing (or panicking) reporter is logged and counted.
//!
//! # Key Components
//!
//! - [`Collector`] — runs cycles against its configured collaborators.
//! - [`CollectorBuilder`] — wires the registry, management layer, sink and reporter.
//! - [`CycleSummary`] — what a single cycle did.
mod cycle;
mod error;
mod summary;

pub use cycle::{Collector, CollectorBuilder};
pub use error::{Error, Result};
pub use summary::{CycleSummary, EntityOutcome, ReportOutcome};
