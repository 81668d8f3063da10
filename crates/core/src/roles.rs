//! Well-known role name constants.
//!
//! These must match the seed data in `20261001000001_create_roles_and_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_VENDOR: &str = "vendor";
pub const ROLE_CUSTOMER: &str = "customer";

/// Role assigned to self-registered accounts.
pub const DEFAULT_SIGNUP_ROLE: &str = ROLE_CUSTOMER;

/// Whether `role` may manage catalogue entries and create offline bookings.
pub fn is_back_office(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_VENDOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_and_vendor_are_back_office() {
        assert!(is_back_office(ROLE_ADMIN));
        assert!(is_back_office(ROLE_VENDOR));
    }

    #[test]
    fn customer_is_not_back_office() {
        assert!(!is_back_office(ROLE_CUSTOMER));
        assert!(!is_back_office("guest"));
    }
}
