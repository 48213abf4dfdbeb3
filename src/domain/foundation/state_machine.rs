//! Transition guard shared by status enums.

use super::ValidationError;

/// A status enum with a fixed set of legal transitions.
///
/// Implement `can_transition_to` and `valid_transitions`; the checked
/// `transition_to` and `is_terminal` follow from them.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Statuses reachable in one step.
    fn valid_transitions(&self) -> Vec<Self>;

    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// True when no transition leaves this status.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Red,
        Green,
        Off,
    }

    impl StateMachine for Light {
        fn can_transition_to(&self, target: &Self) -> bool {
            use Light::*;
            matches!((self, target), (Red, Green) | (Green, Red) | (Red, Off) | (Green, Off))
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use Light::*;
            match self {
                Red => vec![Green, Off],
                Green => vec![Red, Off],
                Off => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(Light::Red.transition_to(Light::Green), Ok(Light::Green));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let result = Light::Off.transition_to(Light::Red);
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn is_terminal_only_for_states_without_exits() {
        assert!(Light::Off.is_terminal());
        assert!(!Light::Red.is_terminal());
    }
}
