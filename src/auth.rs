//! Capability-based authorization.
//!
//! The acting user's role is resolved once per request into a fixed set of
//! allowed operations, checked at the API boundary. Handlers never branch on
//! raw role values.

use crate::domain::{Role, User, UserId};
use crate::error::AppError;

/// What an acting user is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capabilities {
    Admin,
    Manager,
    Chatter,
}

impl Capabilities {
    pub fn from_role(role: Role) -> Self {
        match role {
            Role::Admin => Capabilities::Admin,
            Role::ChatterManager => Capabilities::Manager,
            Role::Chatter => Capabilities::Chatter,
        }
    }

    /// Manage users, creators, financials, payments, goals.
    pub fn can_administer(&self) -> bool {
        matches!(self, Capabilities::Admin)
    }

    /// See figures across the whole team (dashboard, user list).
    pub fn can_view_team(&self) -> bool {
        matches!(self, Capabilities::Admin | Capabilities::Manager)
    }

    /// Log a sale on behalf of another chatter.
    pub fn can_log_for_others(&self) -> bool {
        matches!(self, Capabilities::Admin | Capabilities::Manager)
    }
}

/// The acting user for one request, resolved from the `X-Actor-Id` header.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user: User,
    pub capabilities: Capabilities,
}

impl Actor {
    pub fn new(user: User) -> Self {
        let capabilities = Capabilities::from_role(user.role);
        Actor { user, capabilities }
    }

    pub fn id(&self) -> &UserId {
        &self.user.id
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    /// Reject unless the actor holds admin capability.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.capabilities.can_administer() {
            Ok(())
        } else {
            Err(AppError::Forbidden("admin access required".to_string()))
        }
    }

    /// Reject unless the actor can see team-wide figures.
    pub fn require_team_view(&self) -> Result<(), AppError> {
        if self.capabilities.can_view_team() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "manager or admin access required".to_string(),
            ))
        }
    }
}
