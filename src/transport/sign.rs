use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::domain::WebhookSecret;

/// Query parameter name for the signing timestamp (`timestamp`).
pub const TIMESTAMP_FIELD: &str = "timestamp";
/// Query parameter name for the signature (`sign`).
pub const SIGN_FIELD: &str = "sign";

#[derive(Debug, Clone, PartialEq, Eq)]
/// A computed request signature: the millisecond timestamp and the
/// base64-encoded HMAC that the webhook expects as query parameters.
pub struct Signature {
    pub timestamp: String,
    pub sign: String,
}

/// Sign a request at the given wall-clock instant.
///
/// The signing input is `"<timestamp>\n<secret>"` where `timestamp` is the
/// decimal string of `now_millis`; the HMAC-SHA256 key is the secret itself
/// and the result is base64-standard encoded (with padding). Deterministic
/// for fixed inputs.
pub fn sign_request(secret: &WebhookSecret, now_millis: i64) -> Signature {
    let timestamp = now_millis.to_string();
    let payload = format!("{timestamp}\n{}", secret.as_str());

    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_str().as_bytes())
        .expect("HMAC can take a key of any size");
    mac.update(payload.as_bytes());
    let sign = STANDARD.encode(mac.finalize().into_bytes());

    Signature { timestamp, sign }
}
