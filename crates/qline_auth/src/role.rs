//! Roles and the landing route each one owns.

use std::fmt;

use qline_config::AuthConfig;
use serde::{Deserialize, Serialize};

/// A user's role as stored on their profile.
///
/// Values the application does not know about are kept verbatim in
/// [`Role::Other`] so they can be logged, but they never match a page's
/// allowed set and never resolve to a home route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Business,
    Customer,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Business => "business",
            Role::Customer => "customer",
            Role::Other(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Role::Other(_))
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            "business" => Role::Business,
            "customer" => Role::Customer,
            _ => Role::Other(value.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::from(value.as_str())
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical landing paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRoutes {
    pub login: String,
    pub admin_home: String,
    pub business_home: String,
    pub customer_home: String,
}

impl RoleRoutes {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            login: config.login_path.clone(),
            admin_home: config.admin_home.clone(),
            business_home: config.business_home.clone(),
            customer_home: config.customer_home.clone(),
        }
    }

    /// Home route for `role`; unrecognized roles are sent to the login page.
    pub fn home_for(&self, role: &Role) -> &str {
        match role {
            Role::Admin => &self.admin_home,
            Role::Business => &self.business_home,
            Role::Customer => &self.customer_home,
            Role::Other(_) => &self.login,
        }
    }
}

impl Default for RoleRoutes {
    fn default() -> Self {
        Self::from_config(&AuthConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing_is_case_insensitive() {
        assert_eq!(Role::from("Admin"), Role::Admin);
        assert_eq!(Role::from(" business "), Role::Business);
        assert_eq!(Role::from("CUSTOMER"), Role::Customer);
        assert_eq!(Role::from("staff"), Role::Other("staff".into()));
        assert!(!Role::from("staff").is_recognized());
    }

    #[test]
    fn test_role_serde_as_plain_string() {
        let json = serde_json::to_string(&Role::Business).unwrap();
        assert_eq!(json, "\"business\"");
        let role: Role = serde_json::from_str("\"moderator\"").unwrap();
        assert_eq!(role, Role::Other("moderator".into()));
    }

    #[test]
    fn test_home_routes() {
        let routes = RoleRoutes::default();
        assert_eq!(routes.home_for(&Role::Admin), "/admin");
        assert_eq!(routes.home_for(&Role::Business), "/business/dashboard");
        assert_eq!(routes.home_for(&Role::Customer), "/customer");
        assert_eq!(routes.home_for(&Role::Other("x".into())), "/login");
    }
}
