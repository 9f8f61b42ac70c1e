//! Shared accounts for the gate flow tests.
#![allow(dead_code)]

use qline_auth::{AuthGate, AuthPolicy, DemoDirectory, DemoSessionStore};
use qline_config::{AuthConfig, DemoUserConfig};
use std::sync::Arc;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const BUSINESS_TOKEN: &str = "business-token";
pub const CUSTOMER_TOKEN: &str = "customer-token";
pub const ORPHAN_TOKEN: &str = "orphan-token";

fn user(token: &str, id: &str, role: &str, has_profile: bool) -> DemoUserConfig {
    DemoUserConfig {
        token: token.to_string(),
        id: id.to_string(),
        email: format!("{}@qline.test", id),
        role: role.to_string(),
        display_name: id.to_string(),
        phone: None,
        has_profile,
    }
}

pub fn demo_users() -> Vec<DemoUserConfig> {
    vec![
        user(ADMIN_TOKEN, "u-admin", "admin", true),
        user(BUSINESS_TOKEN, "u-business", "business", true),
        user(CUSTOMER_TOKEN, "u-customer", "customer", true),
        // Signed up but never got a profile row; claims business in config
        user(ORPHAN_TOKEN, "u-orphan", "business", false),
    ]
}

pub fn directory() -> DemoDirectory {
    DemoDirectory::from_config(&demo_users())
}

/// A gate for whoever holds `token`, plus the store so tests can change the
/// session afterwards.
pub fn gate_for(directory: &DemoDirectory, token: Option<&str>) -> (AuthGate, DemoSessionStore) {
    let store = directory.session_store(token);
    let gate = AuthGate::new(
        Arc::new(store.clone()),
        directory.profile_store(),
        AuthPolicy::from_config(&AuthConfig::default()),
    );
    (gate, store)
}
