use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// DingTalk robot `access_token`.
///
/// Invariant: non-empty after trimming.
pub struct AccessToken(String);

impl AccessToken {
    /// Query parameter name used by the webhook (`access_token`).
    pub const FIELD: &'static str = "access_token";

    /// Create a validated [`AccessToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// DingTalk robot signing secret (the `SEC...` value from the security settings).
///
/// Invariant: non-empty after trimming. A robot without signing enabled simply
/// carries no [`WebhookSecret`]; an empty secret is unrepresentable, so the
/// signer is never invoked with an empty key.
pub struct WebhookSecret(String);

impl WebhookSecret {
    /// Create a validated [`WebhookSecret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "secret" });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated secret.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// DingTalk `errcode` value.
///
/// Zero means the message was accepted. Non-zero codes are preserved as-is
/// even when the code is unknown to this crate.
pub struct ErrCode(i64);

impl ErrCode {
    /// The success code.
    pub const OK: ErrCode = ErrCode(0);

    /// Construct an error code from its integer representation.
    pub fn new(code: i64) -> Self {
        Self(code)
    }

    /// Get the integer code as returned by the endpoint.
    pub fn as_i64(self) -> i64 {
        self.0
    }

    /// Returns `true` if the endpoint accepted the message.
    pub fn is_ok(self) -> bool {
        self == Self::OK
    }

    /// Map this code to a known variant, if one exists.
    pub fn known_kind(self) -> Option<KnownErrCode> {
        KnownErrCode::from_code(self.0)
    }

    /// Returns `true` if this code means the robot exceeded the
    /// 20-messages-per-minute cap and is being throttled by the endpoint.
    pub fn is_rate_limited(self) -> bool {
        self.known_kind() == Some(KnownErrCode::SendSpeedTooFast)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known DingTalk robot error codes supported by this crate.
///
/// Unknown codes are preserved as [`ErrCode`] and return `None` from
/// [`KnownErrCode::from_code`].
pub enum KnownErrCode {
    /// `130101`: more than 20 messages in one minute; the robot is muted
    /// for ten minutes.
    SendSpeedTooFast,
    /// `310000`: rejected by the robot security settings (keyword filter,
    /// IP allowlist, or signature mismatch).
    SecuritySettingsRejected,
}

impl KnownErrCode {
    /// Convert a raw integer error code into a known variant.
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            130101 => Self::SendSpeedTooFast,
            310000 => Self::SecuritySettingsRejected,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_trims_input() {
        let token = AccessToken::new("  abc123  ").unwrap();
        assert_eq!(token.as_str(), "abc123");
    }

    #[test]
    fn err_code_zero_is_ok() {
        assert!(ErrCode::new(0).is_ok());
        assert!(!ErrCode::new(130101).is_ok());
    }

    #[test]
    fn err_code_known_mapping() {
        assert_eq!(
            ErrCode::new(130101).known_kind(),
            Some(KnownErrCode::SendSpeedTooFast)
        );
        assert_eq!(
            ErrCode::new(310000).known_kind(),
            Some(KnownErrCode::SecuritySettingsRejected)
        );
        assert_eq!(ErrCode::new(999_999).known_kind(), None);
    }

    #[test]
    fn err_code_rate_limit_helper() {
        assert!(ErrCode::new(130101).is_rate_limited());
        assert!(!ErrCode::new(310000).is_rate_limited());
        assert!(!ErrCode::new(0).is_rate_limited());
    }
}
