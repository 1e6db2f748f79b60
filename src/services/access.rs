use crate::types::internal::{Capability, Role};

/// Download eligibility for a (user, pack) pair.
///
/// Pure predicate, evaluated per request, no caching. Rule order:
/// free pack, admin override, active subscription, prior purchase, deny.
/// Whether a login is required before downloading a free pack is platform
/// policy enforced by the HTTP layer, never here.
pub fn can_download(
    role: Role,
    subscription_active: bool,
    pack_is_free: bool,
    has_purchase: bool,
) -> bool {
    if pack_is_free {
        return true;
    }
    if role.allows(Capability::BypassPaywall) {
        return true;
    }
    if subscription_active {
        return true;
    }
    has_purchase
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ROLES: [Role; 4] = [
        Role::User,
        Role::CreatorPending,
        Role::CreatorApproved,
        Role::Admin,
    ];

    #[test]
    fn free_packs_are_open_to_everyone() {
        for role in ALL_ROLES {
            for subscribed in [false, true] {
                for purchased in [false, true] {
                    assert!(can_download(role, subscribed, true, purchased));
                }
            }
        }
    }

    #[test]
    fn subscribers_can_download_any_pack() {
        for role in ALL_ROLES {
            assert!(can_download(role, true, false, false));
        }
    }

    #[test]
    fn admin_needs_no_purchase_and_no_subscription() {
        assert!(can_download(Role::Admin, false, false, false));
    }

    #[test]
    fn purchase_grants_access_to_that_pack_only() {
        // Pack P: purchased
        assert!(can_download(Role::User, false, false, true));
        // Pack Q: not purchased
        assert!(!can_download(Role::User, false, false, false));
    }

    #[test]
    fn unpaid_paid_pack_is_denied() {
        for role in [Role::User, Role::CreatorPending, Role::CreatorApproved] {
            assert!(!can_download(role, false, false, false));
        }
    }
}
