//! State machine trait for status enums.
//!
//! Gives status lifecycles a single place to declare legal transitions, and
//! treats re-entering the current state as a no-op so repeated deliveries of
//! the same update are harmless.

use super::ValidationError;

/// Result of asking a state machine to move to a target state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition<S> {
    /// The state changed.
    Moved { from: S, to: S },
    /// Target equals the current state; nothing to do.
    Unchanged(S),
}

/// Trait for status enums that represent state machines.
///
/// # Example
///
/// ```ignore
/// match current.transition_to(DonationStatus::Success)? {
///     Transition::Moved { to, .. } => record.status = to,
///     Transition::Unchanged(_) => {}
/// }
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if moving from self to a different target is legal.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation.
    ///
    /// Re-applying the current state yields `Transition::Unchanged`,
    /// even for terminal states.
    fn transition_to(&self, target: Self) -> Result<Transition<Self>, ValidationError> {
        if *self == target {
            return Ok(Transition::Unchanged(target));
        }
        if self.can_transition_to(&target) {
            Ok(Transition::Moved {
                from: *self,
                to: target,
            })
        } else {
            Err(ValidationError::invalid_transition(
                format!("{:?}", self),
                format!("{:?}", target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
