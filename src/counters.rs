use std::collections::BTreeMap;

use dashmap::DashMap;

/// Downstream store for named counters.
pub trait CountersSink: Send + Sync {
    /// Records the current value of the counter `name`.
    ///
    /// Must not block indefinitely. Whether repeated updates overwrite or
    /// accumulate is up to the sink.
    fn update_counter(&self, name: &str, value: u64);
}

/// Concurrent in-memory counters sink keeping the latest value per name.
#[derive(Debug, Default)]
pub struct CountersFacility {
    counters: DashMap<String, u64>,
}

impl CountersFacility {
    pub fn get(&self, name: &str) -> Option<u64> {
        self.counters.get(name).map(|value| *value)
    }

    /// Returns a sorted copy of all counters.
    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.counters
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

impl CountersSink for CountersFacility {
    fn update_counter(&self, name: &str, value: u64) {
        log::trace!("counter {name}={value}");
        self.counters.insert(name.to_owned(), value);
    }
}
