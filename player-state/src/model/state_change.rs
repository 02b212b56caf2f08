//! State change event types

/// A notification emitted once per processed inbound message
///
/// Observers (the host entity layer) receive exactly one `StateChange` per
/// applied state message or availability message, never one per field.
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    /// A state-topic message was applied
    StateUpdated {
        /// Keys of the fields whose value actually changed (may be empty)
        changed: Vec<&'static str>,
    },

    /// An availability-topic message was applied
    AvailabilityUpdated {
        /// New availability
        available: bool,
        /// Whether the value differs from the previous one
        changed: bool,
    },
}

impl StateChange {
    /// Whether this notification carries an actual value change
    pub fn is_change(&self) -> bool {
        match self {
            StateChange::StateUpdated { changed } => !changed.is_empty(),
            StateChange::AvailabilityUpdated { changed, .. } => *changed,
        }
    }
}
