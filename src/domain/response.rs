use crate::domain::value::ErrCode;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Decoded `{errcode, errmsg}` status reply from the webhook.
pub struct SendResponse {
    pub errcode: ErrCode,
    pub errmsg: String,
}

impl SendResponse {
    /// Returns `true` if the endpoint accepted the message (`errcode == 0`).
    pub fn is_ok(&self) -> bool {
        self.errcode.is_ok()
    }
}
