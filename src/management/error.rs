use std::path::PathBuf;

use crate::entity::EntityID;

/// Errors reported by a registry or management layer.
///
/// Every variant is recoverable from the collector's point of view: it only
/// ever costs the entity (or the single parameter) it was raised for.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("resource adaptor entity `{0}` not found")]
    EntityNotFound(EntityID),
    #[error("usage parameters of `{entity}` unreachable: {reason}")]
    Unreachable { entity: EntityID, reason: String },
    #[error("usage parameter set `{set_name}` not installed for `{entity}`")]
    ParameterSetNotFound { entity: EntityID, set_name: String },
    #[error("usage parameter set does not support {0}")]
    Unsupported(&'static str),
    #[error("usage parameter `{0}` not found")]
    ParameterNotFound(String),
    #[error("usage parameter `{name}` is not a counter (found {found})")]
    WrongType { name: String, found: String },
    #[error("failed to open usage snapshot `{path}`: {source}")]
    SnapshotOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode usage snapshot `{path}`: {source}")]
    SnapshotDecode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
