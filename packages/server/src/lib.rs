// BeejHealth - consultation service core
//
// Backend core for the crop-consultation platform: phone OTP
// authentication, session issuance and the consultation lifecycle.
// Everything stateful lives behind injected store objects; the HTTP
// layer in server/ is a thin binding over the domain components.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
