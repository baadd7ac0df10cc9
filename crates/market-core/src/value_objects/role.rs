//! Account roles - mutually exclusive capability classes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role. Every user has exactly one; roles are not combinable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Buyer,
    Seller,
}

impl Role {
    /// Lowercase string form, matching the stored representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Buyer => "buyer",
            Self::Seller => "seller",
        }
    }

    /// Parse from the stored lowercase representation
    pub fn parse(s: &str) -> Result<Self, RoleParseError> {
        match s {
            "admin" => Ok(Self::Admin),
            "buyer" => Ok(Self::Buyer),
            "seller" => Ok(Self::Seller),
            _ => Err(RoleParseError::UnknownRole),
        }
    }

    #[inline]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    #[inline]
    pub const fn is_buyer(self) -> bool {
        matches!(self, Self::Buyer)
    }

    #[inline]
    pub const fn is_seller(self) -> bool {
        matches!(self, Self::Seller)
    }
}

/// Error when parsing a Role from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RoleParseError {
    #[error("unknown role")]
    UnknownRole,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s)
    }
}

/// Set of roles a gated route accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSet(&'static [Role]);

impl RoleSet {
    pub const ADMIN: Self = Self(&[Role::Admin]);
    pub const BUYER: Self = Self(&[Role::Buyer]);
    pub const SELLER: Self = Self(&[Role::Seller]);

    /// Build a set from a static list of roles
    pub const fn new(roles: &'static [Role]) -> Self {
        Self(roles)
    }

    pub fn contains(self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub const fn roles(self) -> &'static [Role] {
        self.0
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, role) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(role.as_str())?;
        }
        Ok(())
    }
}
