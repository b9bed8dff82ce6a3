use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::common::Clock;

use super::directory::Role;
use super::models::PhoneNumber;

/// Opaque session token: 32 bytes from the OS CSPRNG, hex-encoded.
pub type SessionToken = String;

const TOKEN_BYTES: usize = 32;

/// Authenticated actor minted after successful OTP verification.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: SessionToken,
    pub identity: PhoneNumber,
    pub name: String,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
}

/// In-memory session store.
///
/// No server-side expiry is enforced here; expiry policy belongs to the
/// deployment (a reverse proxy or an explicit logout via `revoke`).
pub struct SessionStore {
    clock: Arc<dyn Clock>,
    sessions: RwLock<HashMap<SessionToken, Session>>,
}

impl SessionStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Mint a session bound to a verified identity.
    ///
    /// `name` falls back to a suffix-derived label ("Farmer 2345") when
    /// the caller has no profile for the identity.
    pub async fn issue(
        &self,
        identity: PhoneNumber,
        role: Role,
        name: Option<String>,
    ) -> Session {
        let session = Session {
            token: generate_token(),
            name: name.unwrap_or_else(|| default_display_name(&identity, role)),
            role,
            issued_at: self.clock.now(),
            identity,
        };

        let mut sessions = self.sessions.write().await;
        sessions.insert(session.token.clone(), session.clone());
        session
    }

    pub async fn get(&self, token: &str) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions.get(token).cloned()
    }

    /// Delete a session (logout).
    pub async fn revoke(&self, token: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn generate_token() -> SessionToken {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn default_display_name(identity: &PhoneNumber, role: Role) -> String {
    let label = match role {
        Role::Farmer => "Farmer",
        Role::Expert => "Expert",
        Role::Superadmin => "Admin",
    };
    format!("{} {}", label, identity.suffix())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::SystemClock;

    fn store() -> SessionStore {
        SessionStore::new(Arc::new(SystemClock))
    }

    fn identity() -> PhoneNumber {
        PhoneNumber::parse("+919999912345").unwrap()
    }

    #[tokio::test]
    async fn test_issue_and_get() {
        let store = store();
        let session = store.issue(identity(), Role::Farmer, None).await;

        assert_eq!(session.token.len(), TOKEN_BYTES * 2);
        assert!(session.token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(session.name, "Farmer 2345");

        let retrieved = store.get(&session.token).await.unwrap();
        assert_eq!(retrieved.identity, session.identity);
        assert_eq!(retrieved.role, Role::Farmer);
    }

    #[tokio::test]
    async fn test_tokens_are_unique_per_issuance() {
        let store = store();
        let a = store.issue(identity(), Role::Farmer, None).await;
        let b = store.issue(identity(), Role::Farmer, None).await;
        assert_ne!(a.token, b.token);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_revoke() {
        let store = store();
        let session = store.issue(identity(), Role::Expert, Some("Dr. Kumar".into())).await;
        assert_eq!(session.name, "Dr. Kumar");

        assert!(store.revoke(&session.token).await);
        assert!(store.get(&session.token).await.is_none());
        assert!(!store.revoke(&session.token).await);
    }
}
