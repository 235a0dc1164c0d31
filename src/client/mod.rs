//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use url::Url;

use crate::domain::{
    AccessToken, ActionCard, ErrCode, FeedCard, Mention, Message, MessageBody, SendResponse,
    ValidationError, WebhookSecret,
};
use crate::transport::{SIGN_FIELD, TIMESTAMP_FIELD, sign_request};

const DEFAULT_SEND_ENDPOINT: &str = "https://oapi.dingtalk.com/robot/send";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: std::fmt::Debug + Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        query: Vec<(String, String)>,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        query: Vec<(String, String)>,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .query(&query)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`DingRobotClient`].
///
/// This error preserves:
/// - local builder misuse (no content variant selected),
/// - HTTP-level failures (non-2xx status or transport failures),
/// - API-level failures (non-zero `errcode`),
/// - validation/parse failures.
pub enum DingRobotError {
    /// [`MessageSend::send`] was called before any content variant was set.
    /// No request is issued; set a variant and retry.
    #[error("message has no content variant set")]
    InvalidMessage,

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The webhook returned a non-zero `errcode` with its message text.
    #[error("API error: {errcode:?} {errmsg:?}")]
    Api { errcode: ErrCode, errmsg: String },

    /// Response body could not be parsed as `{errcode, errmsg}` JSON.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`DingRobotClient`].
///
/// Use this when you need a signing secret or want to customize the
/// endpoint, timeout, or user-agent.
pub struct DingRobotClientBuilder {
    token: AccessToken,
    secret: Option<WebhookSecret>,
    endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl DingRobotClientBuilder {
    /// Create a builder with the default endpoint, no secret, and no
    /// timeout/user-agent override.
    pub fn new(token: AccessToken) -> Self {
        Self {
            token,
            secret: None,
            endpoint: DEFAULT_SEND_ENDPOINT.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Enable request signing with the robot's `SEC...` secret.
    pub fn secret(mut self, secret: WebhookSecret) -> Self {
        self.secret = Some(secret);
        self
    }

    /// Override the webhook endpoint URL (test servers, regional hosts).
    /// The value is validated in [`DingRobotClientBuilder::build`].
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`DingRobotClient`].
    pub fn build(self) -> Result<DingRobotClient, DingRobotError> {
        if Url::parse(&self.endpoint).is_err() {
            return Err(DingRobotError::Validation(
                ValidationError::InvalidEndpoint {
                    input: self.endpoint,
                },
            ));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| DingRobotError::Transport(Box::new(err)))?;

        Ok(DingRobotClient {
            token: self.token,
            secret: self.secret,
            endpoint: self.endpoint,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Debug, Clone)]
/// High-level DingTalk custom-robot client.
///
/// Holds the immutable `(access_token, secret)` pair and the HTTP
/// collaborator. Cloning is cheap and a single client may be shared across
/// tasks; each send goes through its own [`MessageSend`] builder.
///
/// By default it posts to `https://oapi.dingtalk.com/robot/send`. Note that
/// the endpoint caps each robot at 20 messages per minute; this client does
/// not throttle, it surfaces the resulting `errcode` (see
/// [`ErrCode::is_rate_limited`]).
pub struct DingRobotClient {
    token: AccessToken,
    secret: Option<WebhookSecret>,
    endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl DingRobotClient {
    /// Create an unsigned client using the default endpoint.
    ///
    /// For signing or more customization, use [`DingRobotClient::builder`].
    pub fn new(token: AccessToken) -> Self {
        Self {
            token,
            secret: None,
            endpoint: DEFAULT_SEND_ENDPOINT.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Create a signing client using the default endpoint.
    pub fn with_secret(token: AccessToken, secret: WebhookSecret) -> Self {
        Self {
            token,
            secret: Some(secret),
            endpoint: DEFAULT_SEND_ENDPOINT.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(token: AccessToken) -> DingRobotClientBuilder {
        DingRobotClientBuilder::new(token)
    }

    /// Start a fluent per-send builder.
    ///
    /// ```rust,no_run
    /// # use dingrobot::{AccessToken, DingRobotClient, DingRobotError};
    /// # async fn run() -> Result<(), DingRobotError> {
    /// # let client = DingRobotClient::new(AccessToken::new("t")?);
    /// client
    ///     .message()
    ///     .text("build finished")
    ///     .mention(false, ["13800000000"])
    ///     .send()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn message(&self) -> MessageSend<'_> {
        MessageSend {
            client: self,
            body: None,
            mention: None,
        }
    }

    /// Send an already-constructed [`Message`] through the webhook.
    ///
    /// Attaches `access_token`, and `timestamp` + `sign` when a secret is
    /// configured, then POSTs the JSON body and decodes the
    /// `{errcode, errmsg}` reply.
    ///
    /// Errors:
    /// - [`DingRobotError::Transport`] for connection-level failures,
    /// - [`DingRobotError::HttpStatus`] for non-2xx HTTP responses,
    /// - [`DingRobotError::Parse`] for undecodable reply bodies,
    /// - [`DingRobotError::Api`] when the webhook returns `errcode != 0`.
    pub async fn send(&self, message: &Message) -> Result<SendResponse, DingRobotError> {
        let mut query = vec![(
            AccessToken::FIELD.to_owned(),
            self.token.as_str().to_owned(),
        )];
        if let Some(secret) = self.secret.as_ref() {
            let signature = sign_request(secret, now_millis());
            query.push((TIMESTAMP_FIELD.to_owned(), signature.timestamp));
            query.push((SIGN_FIELD.to_owned(), signature.sign));
        }

        let body = crate::transport::encode_message(message)
            .map_err(|err| DingRobotError::Transport(Box::new(err)))?;

        tracing::debug!(
            endpoint = %self.endpoint,
            msgtype = message.body().msgtype(),
            signed = self.secret.is_some(),
            "sending robot message"
        );

        let response = self
            .http
            .post_json(&self.endpoint, query, body)
            .await
            .map_err(DingRobotError::Transport)?;

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(DingRobotError::HttpStatus {
                status: response.status,
                body,
            });
        }

        let parsed = crate::transport::decode_send_response(&response.body)
            .map_err(|err| DingRobotError::Parse(Box::new(err)))?;

        if !parsed.is_ok() {
            return Err(DingRobotError::Api {
                errcode: parsed.errcode,
                errmsg: parsed.errmsg,
            });
        }

        Ok(parsed)
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before the unix epoch")
        .as_millis() as i64
}

/// Fluent per-send message builder.
///
/// Each content setter selects (or silently overwrites, last-write-wins)
/// the pending variant; [`MessageSend::mention`] can be called in any order
/// and is independent of the variant. [`MessageSend::send`] consumes the
/// builder, so a message cannot be re-sent by accident.
///
/// A builder belongs to one logical call sequence; share the
/// [`DingRobotClient`] across tasks, not the builder.
#[derive(Clone)]
pub struct MessageSend<'a> {
    client: &'a DingRobotClient,
    body: Option<MessageBody>,
    mention: Option<Mention>,
}

impl MessageSend<'_> {
    /// Select the plain-text variant.
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.body = Some(MessageBody::Text(crate::domain::Text {
            content: content.into(),
        }));
        self
    }

    /// Select the markdown variant.
    pub fn markdown(mut self, title: impl Into<String>, text: impl Into<String>) -> Self {
        self.body = Some(MessageBody::Markdown(crate::domain::Markdown {
            title: title.into(),
            text: text.into(),
        }));
        self
    }

    /// Select the action-card variant.
    pub fn action_card(mut self, card: ActionCard) -> Self {
        self.body = Some(MessageBody::ActionCard(card));
        self
    }

    /// Select the feed-card variant.
    pub fn feed_card(mut self, card: FeedCard) -> Self {
        self.body = Some(MessageBody::FeedCard(card));
        self
    }

    /// Attach (or replace) the mention list.
    pub fn mention(
        mut self,
        notify_all: bool,
        mobiles: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.mention = Some(Mention::new(notify_all, mobiles));
        self
    }

    /// Sign (when configured) and POST the accumulated message.
    ///
    /// Fails with [`DingRobotError::InvalidMessage`] before any network
    /// activity when no content variant has been selected.
    pub async fn send(self) -> Result<SendResponse, DingRobotError> {
        let Some(body) = self.body else {
            return Err(DingRobotError::InvalidMessage);
        };

        let mut message = Message::new(body);
        if let Some(mention) = self.mention {
            message = message.with_mention(mention);
        }
        self.client.send(&message).await
    }
}
