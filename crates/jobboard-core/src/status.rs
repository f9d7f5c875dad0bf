//! Lifecycle state machines.
//!
//! Each aggregate type declares its statuses as a closed enum whose
//! successor table is static data. Transition methods and field mutators
//! consult the table through [`ensure_transition`] and [`ensure_editable`]
//! instead of comparing statuses inline.

use std::fmt;

use crate::error::DomainError;

/// A closed set of statuses with a static transition table.
pub trait LifecycleStatus: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Every status of the lifecycle.
    const ALL: &'static [Self];

    /// Error code reported for an illegal transition.
    const INVALID_TRANSITION_CODE: &'static str;

    /// Aggregate type name used in error messages.
    const AGGREGATE_TYPE: &'static str;

    /// Statuses reachable from `self` in one step.
    fn successors(self) -> &'static [Self];

    /// Whether `self → target` appears in the table.
    fn can_transition_to(self, target: Self) -> bool {
        self.successors().contains(&target)
    }
}

/// A mutable field whose editability depends on the owning aggregate's status.
pub trait EditableField: Copy + fmt::Debug + Send + Sync + 'static {
    /// Status type of the owning aggregate.
    type Status: LifecycleStatus;

    /// Error code reported when the field is locked.
    const LOCKED_CODE: &'static str;

    /// Field name used in error messages.
    fn name(self) -> &'static str;

    /// Statuses in which the field may be edited.
    fn editable_in(self) -> &'static [Self::Status];

    /// Whether the field may be edited while the aggregate is in `status`.
    fn is_editable_in(self, status: Self::Status) -> bool {
        self.editable_in().contains(&status)
    }
}

/// Checks that `from → to` is permitted.
///
/// # Errors
///
/// Returns `DomainError::Conflict` with the lifecycle's transition code when
/// the table does not contain the pair.
pub fn ensure_transition<S: LifecycleStatus>(from: S, to: S) -> Result<(), DomainError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(DomainError::conflict(
            S::INVALID_TRANSITION_CODE,
            format!("cannot transition {} from {from} to {to}", S::AGGREGATE_TYPE),
        ))
    }
}

/// Checks that `field` may be edited while in `status`.
///
/// # Errors
///
/// Returns `DomainError::Conflict` with the field's locked code otherwise.
pub fn ensure_editable<F: EditableField>(field: F, status: F::Status) -> Result<(), DomainError> {
    if field.is_editable_in(status) {
        Ok(())
    } else {
        Err(DomainError::conflict(
            F::LOCKED_CODE,
            format!(
                "{} cannot be edited while {} is {status}",
                field.name(),
                F::Status::AGGREGATE_TYPE
            ),
        ))
    }
}
