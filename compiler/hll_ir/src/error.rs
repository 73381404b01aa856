//! Contract violations detected at the arena API boundary.
//!
//! These indicate a caller bug. The panicking API (`binary_op`, `set_first_operand`,
//! ...) turns them into a panic at the offending call; the `try_*` variants
//! return them so tooling can report instead of abort.
//!
//! Representability mismatches (incompatible operand types, a downcast to the
//! wrong family) are not errors and never appear here.

use crate::{ValueId, ValueKind};

/// Error raised when an IR operation's preconditions do not hold.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IrError {
    /// A required handle was `ValueId::INVALID`.
    #[error("{role} must be non-null")]
    NullValue { role: &'static str },

    /// The handle refers to a slot that does not exist or was released.
    #[error("{id:?} does not refer to a live value")]
    DeadValue { id: ValueId },

    /// The handle refers to a node of the wrong family for this position.
    #[error("{role} must be {expected}, found {found}")]
    KindMismatch {
        role: &'static str,
        expected: &'static str,
        found: ValueKind,
    },

    /// The node has no child slot with this role.
    #[error("{found} has no {role}")]
    NoSuchEdge { role: &'static str, found: ValueKind },

    /// Releasing would leave an observer pointing at a freed node.
    #[error("cannot release {id:?}: still observed by {observer:?}")]
    StillObserved { id: ValueId, observer: ValueId },

    /// Releasing would free a statement still owned from outside the
    /// released subtree.
    #[error("cannot release {id:?}: still owned by {owner:?}")]
    StillOwned { id: ValueId, owner: ValueId },

    /// The statement already has an owner: a predecessor, or a compound
    /// statement or function holding it as a body.
    #[error("{id:?} is already owned by {owner:?}")]
    AlreadyOwned { id: ValueId, owner: ValueId },

    /// Linking would make a statement reach itself through successor or
    /// body links.
    #[error("linking {id:?} would create a cycle in the statement tree")]
    ChainCycle { id: ValueId },
}

impl IrError {
    pub(crate) fn mismatch(role: &'static str, expected: &'static str, found: ValueKind) -> Self {
        IrError::KindMismatch {
            role,
            expected,
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExprKind;

    #[test]
    fn test_messages() {
        let err = IrError::NullValue {
            role: "first operand",
        };
        assert_eq!(err.to_string(), "first operand must be non-null");

        let err = IrError::mismatch(
            "goto target",
            "a statement",
            ValueKind::Expression(ExprKind::Variable),
        );
        assert_eq!(err.to_string(), "goto target must be a statement, found Variable");

        let err = IrError::StillObserved {
            id: ValueId::new(3),
            observer: ValueId::new(9),
        };
        assert_eq!(
            err.to_string(),
            "cannot release ValueId(3): still observed by ValueId(9)"
        );

        let err = IrError::NoSuchEdge {
            role: "first operand",
            found: ValueKind::Expression(ExprKind::Variable),
        };
        assert_eq!(err.to_string(), "Variable has no first operand");
    }
}
