use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::counters::CountersSink;
use crate::entity::EntityID;
use crate::error::ResultOkLogExt;
use crate::management::{ResourceRegistry, UsageManagement, UsageParameterSet};
use crate::reporter::StatsReporter;

use super::{CycleSummary, EntityOutcome, Error, ReportOutcome, Result};

const LOG_TARGET: &str = "stats collector";

/// Collects usage counters of all live resource adaptor entities.
pub struct Collector {
    registry: Arc<dyn ResourceRegistry>,
    management: Arc<dyn UsageManagement>,
    sink: Arc<dyn CountersSink>,
    reporter: Option<Arc<dyn StatsReporter>>,
    cycle_lock: Mutex<()>,
    reporter_failures: AtomicU64,
}

impl Collector {
    /// Runs one full collection cycle.
    ///
    /// Always runs to completion over every enumerated entity and never fails;
    /// per-entity problems, panics included, are logged and reflected in the
    /// returned summary. Concurrent callers are serialized.
    pub fn run_cycle(&self) -> CycleSummary {
        let _guard = self
            .cycle_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let entities = contain_panic(
            || "listing resource adaptor entities".to_owned(),
            || self.list_entities(),
        )
        .unwrap_or_default();

        let mut summary = CycleSummary::default();
        for entity in entities {
            log::debug!(target: LOG_TARGET, "RA entity: {}", entity);
            summary.record(self.collect_entity(&entity));
        }

        summary.report = self.trigger_report();
        summary
    }

    fn collect_entity(&self, entity: &EntityID) -> EntityOutcome {
        let set = contain_panic(
            || format!("fetching usage parameter set of `{entity}`"),
            || self.fetch_parameter_set(entity),
        )
        .flatten();

        match set {
            // counters forwarded before a panic stay forwarded
            Some(set) => contain_panic(
                || format!("collecting usage parameters of `{entity}`"),
                || self.update_counters(entity, set.as_ref()),
            )
            .unwrap_or(EntityOutcome::IntrospectionFailed),
            None => EntityOutcome::Unavailable,
        }
    }

    /// Returns the resource adaptor entities registered right now.
    ///
    /// A registry failure is treated as an empty registry.
    pub fn list_entities(&self) -> Vec<EntityID> {
        self.registry
            .resource_adaptor_entities()
            .ok_warn_to(LOG_TARGET, || {
                "can't list resource adaptor entities".to_owned()
            })
            .unwrap_or_default()
    }

    /// Fetches the default usage parameter set of `entity`.
    pub fn fetch_parameter_set(&self, entity: &EntityID) -> Option<Box<dyn UsageParameterSet>> {
        self.management
            .installed_usage_parameter_set(entity, None)
            .ok_warn_to(LOG_TARGET, || {
                format!("can't get usage parameter set: entity={entity}")
            })
    }

    /// Lists the parameter names of `set`, or nothing if the set can't tell.
    pub fn list_parameter_names(
        &self,
        entity: &EntityID,
        set: &dyn UsageParameterSet,
    ) -> BTreeSet<String> {
        self.parameter_names(entity, set).unwrap_or_default()
    }

    fn parameter_names(
        &self,
        entity: &EntityID,
        set: &dyn UsageParameterSet,
    ) -> Option<BTreeSet<String>> {
        set.parameter_names().ok_warn_to(LOG_TARGET, || {
            format!("can't get usage parameter names: entity={entity}")
        })
    }

    /// Reads the parameter `name` from `set`. Never resets it.
    pub fn read_parameter_value(
        &self,
        entity: &EntityID,
        set: &dyn UsageParameterSet,
        name: &str,
    ) -> Option<i64> {
        let value = set.parameter(name).ok_warn_to(LOG_TARGET, || {
            format!("can't get usage parameter value: entity={entity}, param={name}")
        })?;
        if let Some(v) = value.filter(|v| *v > 0) {
            log::debug!(target: LOG_TARGET, "{}: {}", name, v);
        }
        value
    }

    fn update_counters(&self, entity: &EntityID, set: &dyn UsageParameterSet) -> EntityOutcome {
        let Some(names) = self.parameter_names(entity, set) else {
            return EntityOutcome::IntrospectionFailed;
        };

        let mut forwarded = 0;
        let mut skipped = 0;
        for name in &names {
            match self
                .read_parameter_value(entity, set, name)
                .and_then(positive)
            {
                Some(value) => {
                    self.forward(entity, name, value);
                    forwarded += 1;
                }
                None => {
                    log::info!(
                        target: LOG_TARGET,
                        "zero statistics: entity={}, param={}",
                        entity,
                        name
                    );
                    skipped += 1;
                }
            }
        }

        EntityOutcome::Collected { forwarded, skipped }
    }

    /// Hands a single counter sample to the sink.
    pub fn forward(&self, entity: &EntityID, name: &str, value: u64) {
        log::info!(
            target: LOG_TARGET,
            "updating statistics: entity={}, param={}, value={}",
            entity,
            name,
            value
        );
        self.sink.update_counter(name, value);
    }

    /// Triggers the stats reporter, if one is configured.
    ///
    /// Reporter errors and panics end here: they are logged, counted and
    /// otherwise ignored.
    pub fn trigger_report(&self) -> ReportOutcome {
        let Some(reporter) = self.reporter.as_deref() else {
            return ReportOutcome::Skipped;
        };

        log::info!(target: LOG_TARGET, "calling stats reporter");
        match contain_panic(|| "stats reporter".to_owned(), || reporter.report()) {
            Some(Ok(())) => ReportOutcome::Reported,
            Some(Err(err)) => {
                self.reporter_failures.fetch_add(1, Ordering::Relaxed);
                log::warn!(target: LOG_TARGET, "stats reporter failed: {}", err);
                ReportOutcome::Failed
            }
            None => {
                self.reporter_failures.fetch_add(1, Ordering::Relaxed);
                ReportOutcome::Failed
            }
        }
    }

    /// Number of reporter failures since the collector was built.
    pub fn reporter_failures(&self) -> u64 {
        self.reporter_failures.load(Ordering::Relaxed)
    }
}

/// Runs `f`, turning a panic into `None` and an error log entry.
fn contain_panic<R>(context: impl FnOnce() -> String, f: impl FnOnce() -> R) -> Option<R> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(out) => Some(out),
        Err(_) => {
            log::error!(target: LOG_TARGET, "{} panicked", context());
            None
        }
    }
}

fn positive(value: i64) -> Option<u64> {
    u64::try_from(value).ok().filter(|v| *v > 0)
}

#[derive(Default)]
pub struct CollectorBuilder {
    registry: Option<Arc<dyn ResourceRegistry>>,
    management: Option<Arc<dyn UsageManagement>>,
    sink: Option<Arc<dyn CountersSink>>,
    reporter: Option<Arc<dyn StatsReporter>>,
}

impl CollectorBuilder {
    /// Sets the registry used to enumerate resource adaptor entities.
    pub fn set_registry(&mut self, registry: Arc<dyn ResourceRegistry>) -> &mut Self {
        self.registry = Some(registry);
        self
    }

    /// Sets the management layer that resolves usage parameter sets.
    pub fn set_management(&mut self, management: Arc<dyn UsageManagement>) -> &mut Self {
        self.management = Some(management);
        self
    }

    /// Uses one object as both registry and management layer.
    pub fn set_management_layer<M>(&mut self, layer: Arc<M>) -> &mut Self
    where
        M: ResourceRegistry + UsageManagement + 'static,
    {
        self.registry = Some(Arc::clone(&layer) as Arc<dyn ResourceRegistry>);
        self.management = Some(layer);
        self
    }

    pub fn set_counters_sink(&mut self, sink: Arc<dyn CountersSink>) -> &mut Self {
        self.sink = Some(sink);
        self
    }

    /// Sets the reporter triggered at the end of each cycle. Optional.
    pub fn set_reporter(&mut self, reporter: Arc<dyn StatsReporter>) -> &mut Self {
        self.reporter = Some(reporter);
        self
    }

    /// Builds the [`Collector`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCollaborator`] if the registry, the management
    /// layer or the counters sink was not set.
    pub fn build(self) -> Result<Collector> {
        Ok(Collector {
            registry: self.registry.ok_or(Error::MissingCollaborator("registry"))?,
            management: self
                .management
                .ok_or(Error::MissingCollaborator("management layer"))?,
            sink: self
                .sink
                .ok_or(Error::MissingCollaborator("counters sink"))?,
            reporter: self.reporter,
            cycle_lock: Mutex::new(()),
            reporter_failures: AtomicU64::new(0),
        })
    }
}
