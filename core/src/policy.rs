//! Role policy for booking transitions.
//!
//! Authorization is a pure function over `(role, from, to)`, independent of
//! any UI or transport code. Legality of the edge is checked first, so an
//! illegal edge is always reported as illegal even when the role would also
//! have been denied.
//!
//! Policy decisions (recorded in DESIGN.md):
//! - `confirmed -> cancelled` is restricted to the guide; travelers cancel
//!   while the booking is still pending.
//! - Admin may trigger every legal edge, acting as platform moderator.
//! - Manager triggers no booking transition.

use crate::status::BookingStatus;
use crate::types::Role;
use thiserror::Error;

/// Explicit deny result of the transition policy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionDenied {
    /// The requested edge does not exist in the lifecycle graph
    #[error("illegal status change: {from} -> {to}")]
    IllegalEdge {
        /// Current status
        from: BookingStatus,
        /// Requested status
        to: BookingStatus,
    },

    /// The edge exists but the acting role may not trigger it
    #[error("{role} is not permitted to move a booking from {from} to {to}")]
    RoleNotPermitted {
        /// Acting role
        role: Role,
        /// Current status
        from: BookingStatus,
        /// Requested status
        to: BookingStatus,
    },
}

/// Roles permitted to trigger a legal edge. Empty for illegal edges.
const fn permitted_roles(from: BookingStatus, to: BookingStatus) -> &'static [Role] {
    match (from, to) {
        // Guide accepts an incoming order
        (BookingStatus::Pending, BookingStatus::Confirmed) => &[Role::Guide, Role::Admin],
        // Guide rejects, or traveler self-cancels while still pending
        (BookingStatus::Pending, BookingStatus::Cancelled) => {
            &[Role::Traveler, Role::Guide, Role::Admin]
        }
        // Traveler marks the trip finished after the tour date
        (BookingStatus::Confirmed, BookingStatus::Completed) => &[Role::Traveler, Role::Admin],
        // Late cancellation is a guide/moderator call
        (BookingStatus::Confirmed, BookingStatus::Cancelled) => &[Role::Guide, Role::Admin],
        _ => &[],
    }
}

/// Decides whether `role` may move a booking from `from` to `to`.
///
/// Checks edge legality before role permission: completing a `pending`
/// booking is an [`TransitionDenied::IllegalEdge`] no matter who asks.
///
/// # Errors
///
/// Returns [`TransitionDenied::IllegalEdge`] when the edge is not part of
/// the lifecycle graph, and [`TransitionDenied::RoleNotPermitted`] when the
/// edge is legal but gated to other roles.
pub fn authorize_transition(
    role: Role,
    from: BookingStatus,
    to: BookingStatus,
) -> Result<(), TransitionDenied> {
    if !from.can_transition_to(to) {
        return Err(TransitionDenied::IllegalEdge { from, to });
    }
    if permitted_roles(from, to).contains(&role) {
        Ok(())
    } else {
        Err(TransitionDenied::RoleNotPermitted { role, from, to })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ROLES: [Role; 4] = [Role::Traveler, Role::Guide, Role::Manager, Role::Admin];

    #[test]
    fn guide_accepts_pending_booking() {
        assert_eq!(
            authorize_transition(Role::Guide, BookingStatus::Pending, BookingStatus::Confirmed),
            Ok(())
        );
    }

    #[test]
    fn traveler_may_not_confirm() {
        assert_eq!(
            authorize_transition(
                Role::Traveler,
                BookingStatus::Pending,
                BookingStatus::Confirmed
            ),
            Err(TransitionDenied::RoleNotPermitted {
                role: Role::Traveler,
                from: BookingStatus::Pending,
                to: BookingStatus::Confirmed,
            })
        );
    }

    #[test]
    fn traveler_self_cancels_while_pending_but_not_after_confirmation() {
        assert_eq!(
            authorize_transition(
                Role::Traveler,
                BookingStatus::Pending,
                BookingStatus::Cancelled
            ),
            Ok(())
        );
        assert!(matches!(
            authorize_transition(
                Role::Traveler,
                BookingStatus::Confirmed,
                BookingStatus::Cancelled
            ),
            Err(TransitionDenied::RoleNotPermitted { .. })
        ));
    }

    #[test]
    fn completing_a_pending_booking_is_illegal_not_a_role_denial() {
        assert_eq!(
            authorize_transition(
                Role::Traveler,
                BookingStatus::Pending,
                BookingStatus::Completed
            ),
            Err(TransitionDenied::IllegalEdge {
                from: BookingStatus::Pending,
                to: BookingStatus::Completed,
            })
        );
    }

    #[test]
    fn manager_triggers_nothing() {
        for from in BookingStatus::ALL {
            for to in BookingStatus::ALL {
                assert!(authorize_transition(Role::Manager, from, to).is_err());
            }
        }
    }

    fn role_strategy() -> impl Strategy<Value = Role> {
        prop::sample::select(ROLES.to_vec())
    }

    fn status_strategy() -> impl Strategy<Value = BookingStatus> {
        prop::sample::select(BookingStatus::ALL.to_vec())
    }

    proptest! {
        /// No role, admin included, escapes a terminal state.
        #[test]
        fn terminal_states_deny_every_role(
            role in role_strategy(),
            to in status_strategy(),
        ) {
            for from in [BookingStatus::Completed, BookingStatus::Cancelled] {
                prop_assert_eq!(
                    authorize_transition(role, from, to),
                    Err(TransitionDenied::IllegalEdge { from, to })
                );
            }
        }

        /// A permit implies the edge is legal; a role denial never fires on
        /// an illegal edge.
        #[test]
        fn denial_kind_matches_edge_legality(
            role in role_strategy(),
            from in status_strategy(),
            to in status_strategy(),
        ) {
            match authorize_transition(role, from, to) {
                Ok(()) => prop_assert!(from.can_transition_to(to)),
                Err(TransitionDenied::IllegalEdge { .. }) => {
                    prop_assert!(!from.can_transition_to(to));
                }
                Err(TransitionDenied::RoleNotPermitted { .. }) => {
                    prop_assert!(from.can_transition_to(to));
                }
            }
        }

        /// Admin is permitted on exactly the legal edges.
        #[test]
        fn admin_covers_all_legal_edges(
            from in status_strategy(),
            to in status_strategy(),
        ) {
            prop_assert_eq!(
                authorize_transition(Role::Admin, from, to).is_ok(),
                from.can_transition_to(to)
            );
        }
    }
}
