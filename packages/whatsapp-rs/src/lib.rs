//! Minimal client for the WhatsApp message gateway.
//!
//! Only the `send/whatsapp` endpoint is wrapped here; the gateway
//! authenticates with a shared secret plus an account id and accepts
//! form-encoded requests.

use std::collections::HashMap;

pub mod models;

use reqwest::Client;

use crate::models::SendMessageResponse;

#[derive(Debug, Clone)]
pub struct WhatsAppOptions {
    /// Base URL of the gateway, e.g. `https://wa.bitseva.in/api`
    pub api_url: String,
    pub secret: String,
    pub account: String,
}

#[derive(Debug, thiserror::Error)]
pub enum WhatsAppError {
    #[error("request to WhatsApp gateway failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("WhatsApp gateway returned {status}: {body}")]
    Gateway { status: u16, body: String },
}

#[derive(Debug, Clone)]
pub struct WhatsAppClient {
    options: WhatsAppOptions,
    http: Client,
}

impl WhatsAppClient {
    pub fn new(options: WhatsAppOptions) -> Self {
        Self {
            options,
            http: Client::new(),
        }
    }

    /// Send a plain text message to a single recipient.
    pub async fn send_text(
        &self,
        recipient: &str,
        message: &str,
    ) -> Result<SendMessageResponse, WhatsAppError> {
        let url = format!("{}/send/whatsapp", self.options.api_url.trim_end_matches('/'));

        let mut form_body: HashMap<&str, String> = HashMap::new();
        form_body.insert("secret", self.options.secret.clone());
        form_body.insert("account", self.options.account.clone());
        form_body.insert("recipient", recipient.to_string());
        form_body.insert("type", "text".to_string());
        form_body.insert("message", message.to_string());
        form_body.insert("priority", "1".to_string());

        let response = self.http.post(url).form(&form_body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WhatsAppError::Gateway {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<SendMessageResponse>().await?)
    }
}
