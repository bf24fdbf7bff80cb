//! Order status lifecycle
//!
//! ```text
//! pending ──► completed
//!    │
//!    └─────► cancelled
//! ```
//!
//! Completed and cancelled are terminal. Requesting the current status
//! again is a no-op success, terminal states included.

use shared::models::OrderStatus;

use super::error::{OrderError, OrderResult};

/// Outcome of checking a requested status change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Requested status equals the current one; nothing to write
    Unchanged,
    /// Legal transition; write the new status
    Apply(OrderStatus),
}

/// Validate a raw requested status against the current one
///
/// Unknown status strings are rejected as invalid transitions, not as
/// a separate parse error.
pub fn plan_transition(current: OrderStatus, requested: &str) -> OrderResult<Transition> {
    let Some(target) = OrderStatus::parse(requested) else {
        return Err(OrderError::InvalidTransition {
            from: current,
            requested: requested.to_string(),
        });
    };

    if target == current {
        return Ok(Transition::Unchanged);
    }

    if current.is_terminal() {
        return Err(OrderError::InvalidTransition {
            from: current,
            requested: requested.to_string(),
        });
    }

    Ok(Transition::Apply(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_reaches_both_terminals() {
        assert_eq!(
            plan_transition(OrderStatus::Pending, "completed").unwrap(),
            Transition::Apply(OrderStatus::Completed)
        );
        assert_eq!(
            plan_transition(OrderStatus::Pending, "cancelled").unwrap(),
            Transition::Apply(OrderStatus::Cancelled)
        );
    }

    #[test]
    fn test_terminal_states_reject_changes() {
        for current in [OrderStatus::Completed, OrderStatus::Cancelled] {
            for requested in ["pending", "completed", "cancelled"] {
                let result = plan_transition(current, requested);
                if requested == current.as_str() {
                    assert_eq!(result.unwrap(), Transition::Unchanged);
                } else {
                    assert!(matches!(
                        result,
                        Err(OrderError::InvalidTransition { .. })
                    ));
                }
            }
        }
    }

    #[test]
    fn test_same_status_is_noop() {
        assert_eq!(
            plan_transition(OrderStatus::Pending, "pending").unwrap(),
            Transition::Unchanged
        );
    }

    #[test]
    fn test_unknown_status_rejected() {
        for junk in ["shipped", "PENDING", "", "done"] {
            let result = plan_transition(OrderStatus::Pending, junk);
            assert!(
                matches!(result, Err(OrderError::InvalidTransition { .. })),
                "{junk:?} should be rejected"
            );
        }
    }
}
