//! Input checks run before ordering.
//!
//! All checks fail on the first problem: a plan built from malformed input
//! is never returned, not even partially.

use std::collections::{HashMap, hash_map::Entry};

use kpiseed_core::{
    identifier::Id,
    record::{ObjectRecord, RelationshipRecord},
};

use super::{
    error::{Endpoint, PlanError},
    materialize::AttributePolicy,
};

/// Maps each alias to the index of the object declaring it.
pub(super) fn index_aliases(objects: &[ObjectRecord]) -> Result<HashMap<Id, usize>, PlanError> {
    let mut index = HashMap::with_capacity(objects.len());
    for (position, object) in objects.iter().enumerate() {
        match index.entry(object.alias()) {
            Entry::Occupied(entry) => {
                return Err(PlanError::DuplicateAlias {
                    alias: object.alias(),
                    first: *entry.get(),
                    duplicate: position,
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(position);
            }
        }
    }
    Ok(index)
}

/// Ensures both ends of every relationship name a declared object.
pub(super) fn check_references(
    relationships: &[RelationshipRecord],
    index: &HashMap<Id, usize>,
) -> Result<(), PlanError> {
    for (position, relationship) in relationships.iter().enumerate() {
        for (alias, endpoint) in [
            (relationship.source(), Endpoint::Source),
            (relationship.target(), Endpoint::Target),
        ] {
            if !index.contains_key(&alias) {
                return Err(PlanError::UnresolvedReference {
                    alias,
                    relationship: position,
                    endpoint,
                });
            }
        }
    }
    Ok(())
}

/// Rejects repeated attribute names when the policy asks for it.
pub(super) fn check_attributes(
    objects: &[ObjectRecord],
    policy: AttributePolicy,
) -> Result<(), PlanError> {
    if policy == AttributePolicy::LastWins {
        return Ok(());
    }

    for (position, object) in objects.iter().enumerate() {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (attr_index, attribute) in object.attributes().iter().enumerate() {
            if let Some(first) = seen.insert(attribute.name(), attr_index) {
                return Err(PlanError::DuplicateAttribute {
                    alias: object.alias(),
                    name: attribute.name().to_string(),
                    object: position,
                    first,
                    duplicate: attr_index,
                });
            }
        }
    }
    Ok(())
}
