use serde::{Deserialize, Serialize};

/// Actor roles. Phone-verified sessions default to `farmer`; elevated
/// roles come from the configured directory, never from logic embedded
/// in the authentication path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Farmer,
    Expert,
    Superadmin,
}

/// Externally configured identity → role lookup.
///
/// Replaces the hardcoded credential checks of earlier iterations:
/// expert and superadmin identities are provisioned through
/// configuration and matched exactly against the canonical phone form.
#[derive(Debug, Clone, Default)]
pub struct RoleDirectory {
    experts: Vec<String>,
    superadmins: Vec<String>,
}

impl RoleDirectory {
    pub fn new(experts: Vec<String>, superadmins: Vec<String>) -> Self {
        Self {
            experts,
            superadmins,
        }
    }

    pub fn role_for(&self, identity: &str) -> Role {
        if self.superadmins.iter().any(|id| id == identity) {
            Role::Superadmin
        } else if self.experts.iter().any(|id| id == identity) {
            Role::Expert
        } else {
            Role::Farmer
        }
    }
}
