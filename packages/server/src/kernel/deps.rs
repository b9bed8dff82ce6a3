//! Server dependencies (using traits for testability)
//!
//! Central dependency container passed to the router and background
//! tasks. Everything stateful is constructed here at service start and
//! injected; there are no process-wide singletons.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use whatsapp::{WhatsAppClient, WhatsAppOptions};

use crate::common::{Clock, SystemClock};
use crate::config::Config;
use crate::domains::auth::{
    OtpIssuer, OtpStore, OtpVerifier, PhoneNumber, RoleDirectory, SessionStore, OTP_TTL_MINUTES,
};
use crate::domains::consultation::ConsultationRepository;
use crate::kernel::traits::BaseOtpDelivery;

// =============================================================================
// WhatsAppClient Adapter (implements BaseOtpDelivery trait)
// =============================================================================

/// Wrapper around WhatsAppClient that implements BaseOtpDelivery
pub struct WhatsAppAdapter(pub Arc<WhatsAppClient>);

impl WhatsAppAdapter {
    pub fn new(client: Arc<WhatsAppClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseOtpDelivery for WhatsAppAdapter {
    async fn deliver_otp(&self, identity: &PhoneNumber, code: &str) -> Result<()> {
        let message = format!(
            "🌱 BeejHealth OTP Verification\n\n\
             Your OTP is: *{code}*\n\n\
             This OTP is valid for {OTP_TTL_MINUTES} minutes.\n\n\
             Do not share this OTP with anyone."
        );
        self.0
            .send_text(identity.as_str(), &message)
            .await
            .map(|_| ())
            .map_err(Into::into)
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to handlers and background tasks
pub struct ServerDeps {
    pub clock: Arc<dyn Clock>,
    pub delivery: Arc<dyn BaseOtpDelivery>,
    pub otp_store: Arc<OtpStore>,
    pub sessions: Arc<SessionStore>,
    pub consultations: Arc<ConsultationRepository>,
    pub directory: RoleDirectory,
}

impl ServerDeps {
    /// Wire the production dependency graph from configuration.
    pub fn from_config(config: &Config) -> Self {
        let client = Arc::new(WhatsAppClient::new(WhatsAppOptions {
            api_url: config.whatsapp_api_url.clone(),
            secret: config.whatsapp_api_secret.clone(),
            account: config.whatsapp_account_id.clone(),
        }));
        let delivery: Arc<dyn BaseOtpDelivery> = Arc::new(WhatsAppAdapter::new(client));
        let directory = RoleDirectory::new(
            config.expert_identifiers.clone(),
            config.superadmin_identifiers.clone(),
        );
        Self::new(Arc::new(SystemClock), delivery, directory)
    }

    /// Build deps from explicit parts; tests inject doubles here.
    pub fn new(
        clock: Arc<dyn Clock>,
        delivery: Arc<dyn BaseOtpDelivery>,
        directory: RoleDirectory,
    ) -> Self {
        Self {
            otp_store: Arc::new(OtpStore::new()),
            sessions: Arc::new(SessionStore::new(clock.clone())),
            consultations: Arc::new(ConsultationRepository::new(clock.clone())),
            clock,
            delivery,
            directory,
        }
    }

    pub fn otp_issuer(&self) -> OtpIssuer {
        OtpIssuer::new(
            self.otp_store.clone(),
            self.clock.clone(),
            self.delivery.clone(),
        )
    }

    pub fn otp_verifier(&self) -> OtpVerifier {
        OtpVerifier::new(self.otp_store.clone(), self.clock.clone())
    }
}
