use serde::Deserialize;

/// Response body of `POST /send/whatsapp`.
///
/// The gateway is loose about which fields it returns, so everything is
/// optional; a 2xx status is the success signal.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageResponse {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}
