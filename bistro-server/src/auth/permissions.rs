//! Permission definitions
//!
//! Permissions are `resource:action` strings carried in the token. Admins
//! pass every check; editors only manage the catalog.

use shared::models::Role;

/// Wines, menu items, drinks and categories
pub const CATALOG_MANAGE: &str = "catalog:manage";
/// Restaurant configuration
pub const SETTINGS_MANAGE: &str = "settings:manage";
/// Back-office accounts
pub const USERS_MANAGE: &str = "users:manage";
/// Every permission
pub const ALL: &str = "all";

pub const DEFAULT_ADMIN_PERMISSIONS: &[&str] = &[ALL];
pub const DEFAULT_EDITOR_PERMISSIONS: &[&str] = &[CATALOG_MANAGE];

/// Permissions granted to a role
pub fn permissions_for(role: Role) -> &'static [&'static str] {
    match role {
        Role::Admin => DEFAULT_ADMIN_PERMISSIONS,
        Role::Editor => DEFAULT_EDITOR_PERMISSIONS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_permissions() {
        assert_eq!(permissions_for(Role::Admin), &[ALL]);
        assert_eq!(permissions_for(Role::Editor), &[CATALOG_MANAGE]);
        assert!(!permissions_for(Role::Editor).contains(&SETTINGS_MANAGE));
        assert!(!permissions_for(Role::Editor).contains(&USERS_MANAGE));
    }
}
