//! Typed Rust client for the DingTalk custom-robot webhook API.
//!
//! The design follows three layers: a domain layer of strong types, a
//! transport layer for wire-format quirks (JSON body shape, request
//! signing), and a small client layer orchestrating the send call.
//!
//! ```rust,no_run
//! use dingrobot::{AccessToken, DingRobotClient, WebhookSecret};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), dingrobot::DingRobotError> {
//!     let client = DingRobotClient::with_secret(
//!         AccessToken::new("...")?,
//!         WebhookSecret::new("SEC...")?,
//!     );
//!     client
//!         .message()
//!         .markdown("deploy", "**v1.2.3** rolled out")
//!         .mention(false, ["13800000000"])
//!         .send()
//!         .await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{DingRobotClient, DingRobotClientBuilder, DingRobotError, MessageSend};
pub use domain::{
    AccessToken, ActionCard, ButtonOrientation, CardButton, ErrCode, FeedCard, FeedLink,
    KnownErrCode, Markdown, Mention, Message, MessageBody, SendResponse, Text, ValidationError,
    WebhookSecret,
};
pub use transport::{Signature, sign_request};
