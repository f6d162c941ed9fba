//! File-backed registry and management layer.
//!
//! The snapshot is a JSON document mapping entity names to their default
//! usage parameter set:
//!
//! ```json
//! {
//!   "entities": {
//!     "RA1": { "calls": 5, "errors": 0 },
//!     "RA2": null
//!   }
//! }
//! ```
//!
//! A `null` entity is registered but its usage parameters are unreachable.
//! Parameter values that are not 64-bit integers are reported as wrong-typed
//! when read.
//!
//! The file is parsed again on every call: once to enumerate entities and once
//! per entity fetch, so a cycle over N entities reads it N + 1 times. A fetch
//! sees the file as it is at fetch time, which may differ from what the
//! enumeration saw earlier in the same cycle. An entity removed in between is
//! reported as not found and skipped like any other unreachable entity.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::entity::EntityID;
use crate::error::ResultOkLogExt;

use super::{
    Error, ParameterValue, ResourceRegistry, Result, StaticParameterSet, UsageManagement,
    UsageParameterSet,
};

#[derive(Debug, Default, serde::Deserialize)]
struct Snapshot {
    #[serde(default)]
    entities: BTreeMap<String, Option<BTreeMap<String, serde_json::Value>>>,
}

#[derive(Debug, Clone)]
pub struct SnapshotManagement {
    path: PathBuf,
}

impl SnapshotManagement {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Snapshot> {
        let file = File::open(&self.path).map_err(|source| Error::SnapshotOpen {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| Error::SnapshotDecode {
            path: self.path.clone(),
            source,
        })
    }
}

impl ResourceRegistry for SnapshotManagement {
    fn resource_adaptor_entities(&self) -> Result<Vec<EntityID>> {
        let snapshot = self.load()?;
        Ok(snapshot
            .entities
            .keys()
            .filter_map(|name| EntityID::new(name).ok_warn("skipping snapshot entity"))
            .collect())
    }
}

impl UsageManagement for SnapshotManagement {
    fn installed_usage_parameter_set(
        &self,
        entity: &EntityID,
        set_name: Option<&str>,
    ) -> Result<Box<dyn UsageParameterSet>> {
        let mut snapshot = self.load()?;
        let parameters = snapshot
            .entities
            .remove(entity.as_ref())
            .ok_or_else(|| Error::EntityNotFound(entity.clone()))?;

        if let Some(set_name) = set_name {
            return Err(Error::ParameterSetNotFound {
                entity: entity.clone(),
                set_name: set_name.to_owned(),
            });
        }

        let parameters = parameters.ok_or_else(|| Error::Unreachable {
            entity: entity.clone(),
            reason: format!("no usage parameters in `{}`", self.path.display()),
        })?;

        Ok(Box::new(StaticParameterSet::new(
            parameters
                .into_iter()
                .map(|(name, value)| (name, ParameterValue::from(value)))
                .collect(),
        )))
    }
}
