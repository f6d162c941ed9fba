//! Interfaces to the resource adaptor registry and the usage management layer.
//!
//! The collector never sees concrete parameter-set types. It only talks to
//! three narrow traits:
//!
//! - [`ResourceRegistry`] — lists the currently registered resource adaptor entities.
//! - [`UsageManagement`] — resolves an entity to its installed [`UsageParameterSet`].
//! - [`UsageParameterSet`] — lists parameter names and looks up a named counter.
//!
//! Two implementations ship with the crate:
//!
//! - [`InMemoryManagement`] — a concurrent in-process registry, useful for embedding and tests.
//! - [`SnapshotManagement`] — re-reads a JSON usage snapshot from disk on every call.
mod error;
mod memory;
mod parameter_set;
mod snapshot;

use std::collections::BTreeSet;

pub use error::{Error, Result};
pub use memory::InMemoryManagement;
pub use parameter_set::{OpaqueParameterSet, ParameterValue, StaticParameterSet};
pub use snapshot::SnapshotManagement;

use crate::entity::EntityID;

/// Lists the resource adaptor entities that are live at call time.
pub trait ResourceRegistry: Send + Sync {
    /// Returns a stable snapshot of the registered entities.
    ///
    /// Two calls against an unchanged registry yield the same order.
    fn resource_adaptor_entities(&self) -> Result<Vec<EntityID>>;
}

/// Resolves an entity to the usage parameter set installed for it.
pub trait UsageManagement: Send + Sync {
    /// Fetches a fresh usage parameter set for `entity`.
    ///
    /// `set_name` selects a named parameter set; `None` selects the default one.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is unknown or its usage parameters
    /// cannot be reached.
    fn installed_usage_parameter_set(
        &self,
        entity: &EntityID,
        set_name: Option<&str>,
    ) -> Result<Box<dyn UsageParameterSet>>;
}

/// A per-entity bundle of named counters whose shape is only known at runtime.
///
/// Both capabilities are optional: the default implementations report
/// [`Error::Unsupported`].
pub trait UsageParameterSet {
    /// Returns the names of all parameters in this set.
    fn parameter_names(&self) -> Result<BTreeSet<String>> {
        Err(Error::Unsupported("listing parameter names"))
    }

    /// Reads the current value of the parameter `name`.
    ///
    /// `Ok(None)` means the parameter exists but currently has no value.
    fn parameter(&self, name: &str) -> Result<Option<i64>> {
        let _ = name;
        Err(Error::Unsupported("reading parameters"))
    }
}
