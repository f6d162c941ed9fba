use dashmap::DashMap;

use crate::entity::EntityID;

use super::{
    Error, OpaqueParameterSet, ResourceRegistry, Result, StaticParameterSet, UsageManagement,
    UsageParameterSet,
};

#[derive(Debug, Clone)]
enum EntityState {
    Available(StaticParameterSet),
    Opaque,
    Unreachable(String),
}

/// An in-process registry and management layer.
///
/// Every fetch hands out a copy of the entity's parameters, so later updates
/// never leak into a set that is already being collected.
#[derive(Debug, Default)]
pub struct InMemoryManagement {
    entities: DashMap<EntityID, EntityState>,
}

impl InMemoryManagement {
    /// Registers (or replaces) an entity with the given default parameter set.
    pub fn register_entity(&self, entity: EntityID, parameters: StaticParameterSet) {
        self.entities
            .insert(entity, EntityState::Available(parameters));
    }

    /// Registers an entity whose parameter set offers no introspection.
    pub fn register_opaque_entity(&self, entity: EntityID) {
        self.entities.insert(entity, EntityState::Opaque);
    }

    /// Registers an entity whose usage parameters cannot be reached.
    pub fn register_unreachable_entity(&self, entity: EntityID, reason: impl Into<String>) {
        self.entities
            .insert(entity, EntityState::Unreachable(reason.into()));
    }

    pub fn remove_entity(&self, entity: &EntityID) {
        self.entities.remove(entity);
    }

    pub fn size(&self) -> usize {
        self.entities.len()
    }
}

impl ResourceRegistry for InMemoryManagement {
    fn resource_adaptor_entities(&self) -> Result<Vec<EntityID>> {
        let mut out: Vec<EntityID> = self
            .entities
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        // DashMap iteration order depends on shard layout
        out.sort();
        Ok(out)
    }
}

impl UsageManagement for InMemoryManagement {
    fn installed_usage_parameter_set(
        &self,
        entity: &EntityID,
        set_name: Option<&str>,
    ) -> Result<Box<dyn UsageParameterSet>> {
        let state = self
            .entities
            .get(entity)
            .ok_or_else(|| Error::EntityNotFound(entity.clone()))?;

        if let Some(set_name) = set_name {
            return Err(Error::ParameterSetNotFound {
                entity: entity.clone(),
                set_name: set_name.to_owned(),
            });
        }

        match state.value() {
            EntityState::Available(parameters) => Ok(Box::new(parameters.clone())),
            EntityState::Opaque => Ok(Box::new(OpaqueParameterSet)),
            EntityState::Unreachable(reason) => Err(Error::Unreachable {
                entity: entity.clone(),
                reason: reason.clone(),
            }),
        }
    }
}
