//! Name to id lookups against the channel and power entity info a registry advertises.

use crate::model::{Channel, PowerEntity};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Returns the ids of all channels whose name is in `names`, in registry order.
pub fn resolve_channel_ids(channels: &[Channel], names: &BTreeSet<String>) -> Vec<i32> {
    channels
        .iter()
        .filter(|channel| names.contains(&channel.name))
        .map(|channel| channel.id)
        .collect()
}

pub fn resolve_entity_id(power_entities: &[PowerEntity], name: &str) -> Option<i32> {
    power_entities
        .iter()
        .find(|power_entity| power_entity.name == name)
        .map(|power_entity| power_entity.id)
}

/// Maps every state name of `power_entity` found in `names` to its state id.
/// Names the entity does not know are absent from the result.
pub fn resolve_state_ids(
    power_entity: &PowerEntity,
    names: &BTreeSet<String>,
) -> BTreeMap<String, i32> {
    power_entity
        .states
        .iter()
        .filter(|state| names.contains(&state.name))
        .map(|state| (state.name.clone(), state.id))
        .collect()
}

/// Re-keys a state name to coefficient mapping by state id, dropping states that
/// do not resolve.
pub fn resolve_coefficients(
    power_entity_name: &str,
    state_ids: &BTreeMap<String, i32>,
    state_coeffs: &BTreeMap<String, i32>,
) -> BTreeMap<i32, i32> {
    let mut coefficients = BTreeMap::new();

    for (state_name, coefficient) in state_coeffs {
        match state_ids.get(state_name) {
            Some(state_id) => {
                coefficients.insert(*state_id, *coefficient);
            }
            None => warn!(
                "State {} of power entity {} could not be resolved; skipping it",
                state_name, power_entity_name
            ),
        }
    }

    coefficients
}
