use std::fmt;

/// User role as a tagged variant. Creator approval state is part of the
/// variant rather than a separate flag so role checks happen in one place.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    CreatorPending,
    CreatorApproved,
    Admin,
}

/// Actions gated by role. Every role check in the codebase goes through
/// `Role::allows` instead of comparing role strings ad hoc.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Capability {
    /// Upload packs and view creator earnings
    UploadPacks,
    /// Approve creators, manage invitations, edit any pack
    ManagePlatform,
    /// Download paid packs without a purchase or subscription
    BypassPaywall,
}

impl Role {
    /// Reconstruct a role from its persisted representation.
    pub fn from_db(role: &str, creator_approved: bool) -> Self {
        match role {
            "admin" => Role::Admin,
            "creator" if creator_approved => Role::CreatorApproved,
            "creator" => Role::CreatorPending,
            _ => Role::User,
        }
    }

    /// Persisted representation: (role column, creator_approved column).
    pub fn to_db(self) -> (&'static str, bool) {
        match self {
            Role::User => ("user", false),
            Role::CreatorPending => ("creator", false),
            Role::CreatorApproved => ("creator", true),
            Role::Admin => ("admin", false),
        }
    }

    pub fn allows(self, capability: Capability) -> bool {
        match capability {
            Capability::UploadPacks => {
                matches!(self, Role::CreatorApproved | Role::Admin)
            }
            Capability::ManagePlatform | Capability::BypassPaywall => {
                matches!(self, Role::Admin)
            }
        }
    }

    /// A user applies to become a creator. Idempotent: applying again while
    /// pending, or after approval, changes nothing. Admins stay admins.
    pub fn apply(self) -> Self {
        match self {
            Role::User => Role::CreatorPending,
            other => other,
        }
    }

    /// An admin approves a pending creator. Approving any other state is a
    /// no-op; there is no demotion path.
    pub fn approve(self) -> Self {
        match self {
            Role::CreatorPending => Role::CreatorApproved,
            other => other,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::User => "user",
            Role::CreatorPending => "creator (pending)",
            Role::CreatorApproved => "creator",
            Role::Admin => "admin",
        };
        f.write_str(name)
    }
}
