//! Participant registry: id lookup plus registration order.

use std::collections::HashMap;
use std::sync::Arc;

use divvy_core::ParticipantId;

use crate::participant::Participant;

#[derive(Debug, Default)]
pub struct Registry {
    order: Vec<Arc<Participant>>,
    by_id: HashMap<ParticipantId, Arc<Participant>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `participant` unless its id is already present.
    ///
    /// Returns `false` for a repeat registration; the existing entry and its
    /// balances are kept.
    pub fn register(&mut self, participant: Arc<Participant>) -> bool {
        if self.by_id.contains_key(&participant.id()) {
            return false;
        }
        self.by_id.insert(participant.id(), Arc::clone(&participant));
        self.order.push(participant);
        true
    }

    pub fn lookup(&self, id: ParticipantId) -> Option<&Arc<Participant>> {
        self.by_id.get(&id)
    }

    pub fn contains(&self, id: ParticipantId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn verify_all(&self, ids: impl IntoIterator<Item = ParticipantId>) -> bool {
        self.first_unregistered(ids).is_none()
    }

    /// First id in `ids` that is not registered.
    pub fn first_unregistered(
        &self,
        ids: impl IntoIterator<Item = ParticipantId>,
    ) -> Option<ParticipantId> {
        ids.into_iter().find(|id| !self.contains(*id))
    }

    /// Participants in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Participant>> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
