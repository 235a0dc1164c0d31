//! Transport layer: wire-format details (request signing, serialization).

mod send;
mod sign;

pub use send::{decode_send_response, encode_message};
pub use sign::{SIGN_FIELD, Signature, TIMESTAMP_FIELD, sign_request};
