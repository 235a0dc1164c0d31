//! Domain layer: strong types with validation and invariants (no I/O).

mod message;
mod response;
mod validation;
mod value;

pub use message::{
    ActionCard, ButtonOrientation, CardButton, FeedCard, FeedLink, Markdown, Mention, Message,
    MessageBody, Text,
};
pub use response::SendResponse;
pub use validation::ValidationError;
pub use value::{AccessToken, ErrCode, KnownErrCode, WebhookSecret};
