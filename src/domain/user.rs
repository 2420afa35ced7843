//! User (chatter/manager/admin) type and role enum.

use crate::domain::{Money, UserId};
use serde::{Deserialize, Serialize};

/// Role of a user within the agency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    ChatterManager,
    Chatter,
}

impl Role {
    /// Parse from the stored/wire spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ADMIN" => Some(Role::Admin),
            "CHATTER_MANAGER" => Some(Role::ChatterManager),
            "CHATTER" => Some(Role::Chatter),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::ChatterManager => "CHATTER_MANAGER",
            Role::Chatter => "CHATTER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user of the system.
///
/// Compensation fields are both optional and may coexist; the admin
/// dashboard's retribution column sums every active line (see
/// `engine::commission`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub role: Role,
    /// Commission rate in percent (0-100), if compensated by commission.
    pub commission_percent: Option<Money>,
    /// Fixed monthly salary, if compensated by salary.
    pub fixed_salary: Option<Money>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_roundtrip() {
        for role in [Role::Admin, Role::ChatterManager, Role::Chatter] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("INTERN"), None);
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::ChatterManager).unwrap();
        assert_eq!(json, "\"CHATTER_MANAGER\"");
    }
}
