use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub whatsapp_api_url: String,
    pub whatsapp_api_secret: String,
    pub whatsapp_account_id: String,
    /// Identities granted the `expert` role (comma-separated env var)
    pub expert_identifiers: Vec<String>,
    /// Identities granted the `superadmin` role (comma-separated env var)
    pub superadmin_identifiers: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            whatsapp_api_url: env::var("WHATSAPP_API_URL")
                .unwrap_or_else(|_| "https://wa.bitseva.in/api".to_string()),
            whatsapp_api_secret: env::var("WHATSAPP_API_SECRET")
                .context("WHATSAPP_API_SECRET must be set")?,
            whatsapp_account_id: env::var("WHATSAPP_ACCOUNT_ID")
                .context("WHATSAPP_ACCOUNT_ID must be set")?,
            expert_identifiers: parse_identifier_list(env::var("EXPERT_IDENTIFIERS").ok()),
            superadmin_identifiers: parse_identifier_list(env::var("SUPERADMIN_IDENTIFIERS").ok()),
        })
    }
}

fn parse_identifier_list(raw: Option<String>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identifier_list() {
        let parsed = parse_identifier_list(Some("+911111111111, +922222222222,,".to_string()));
        assert_eq!(parsed, vec!["+911111111111", "+922222222222"]);

        assert!(parse_identifier_list(None).is_empty());
    }
}
