//! Robot message model.
//!
//! A [`Message`] is exactly one content variant ([`MessageBody`]) plus an
//! optional [`Mention`]. "Exactly one variant" is structural: the body is a
//! sum type, so an ambiguous message is unrepresentable once built. Field
//! values are carried verbatim; the endpoint does its own content checks.

#[derive(Debug, Clone, PartialEq, Eq)]
/// One of the fixed message shapes accepted by the webhook.
pub enum MessageBody {
    Text(Text),
    Markdown(Markdown),
    ActionCard(ActionCard),
    FeedCard(FeedCard),
}

impl MessageBody {
    /// The `msgtype` discriminator sent on the wire.
    pub fn msgtype(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Markdown(_) => "markdown",
            Self::ActionCard(_) => "actionCard",
            Self::FeedCard(_) => "feedCard",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Plain-text message.
pub struct Text {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Markdown message. The endpoint renders a limited markdown subset.
pub struct Markdown {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Button layout of an [`ActionCard`].
pub enum ButtonOrientation {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One button of an [`ActionCard`].
pub struct CardButton {
    pub title: String,
    pub action_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Action-card message: markdown body plus either one jump link
/// (`single_title`/`single_url`) or a list of buttons (`btns`).
pub struct ActionCard {
    pub title: String,
    pub text: String,
    pub hide_avatar: bool,
    pub btn_orientation: ButtonOrientation,
    pub single_title: String,
    pub single_url: String,
    pub btns: Vec<CardButton>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One entry of a [`FeedCard`].
pub struct FeedLink {
    pub title: String,
    pub text: String,
    pub pic_url: String,
    pub message_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Feed-card message: a list of linked headlines with thumbnails.
pub struct FeedCard {
    pub links: Vec<FeedLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Mention list attached to a message.
///
/// Mobiles are carried verbatim (no phone-number parsing); the endpoint
/// matches them against group members itself. Independent of the message
/// variant.
pub struct Mention {
    pub at_mobiles: Vec<String>,
    pub is_at_all: bool,
}

impl Mention {
    /// Mention specific group members by mobile number, and/or everyone.
    pub fn new(is_at_all: bool, at_mobiles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            at_mobiles: at_mobiles.into_iter().map(Into::into).collect(),
            is_at_all,
        }
    }

    /// Mention everyone in the group.
    pub fn everyone() -> Self {
        Self {
            at_mobiles: Vec::new(),
            is_at_all: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A complete robot message, ready to send.
pub struct Message {
    body: MessageBody,
    mention: Option<Mention>,
}

impl Message {
    /// Wrap a content variant into a sendable message without a mention.
    pub fn new(body: MessageBody) -> Self {
        Self {
            body,
            mention: None,
        }
    }

    /// Plain-text message.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(MessageBody::Text(Text {
            content: content.into(),
        }))
    }

    /// Markdown message.
    pub fn markdown(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(MessageBody::Markdown(Markdown {
            title: title.into(),
            text: text.into(),
        }))
    }

    /// Action-card message.
    pub fn action_card(card: ActionCard) -> Self {
        Self::new(MessageBody::ActionCard(card))
    }

    /// Feed-card message.
    pub fn feed_card(card: FeedCard) -> Self {
        Self::new(MessageBody::FeedCard(card))
    }

    /// Attach (or replace) the mention list.
    pub fn with_mention(mut self, mention: Mention) -> Self {
        self.mention = Some(mention);
        self
    }

    /// The selected content variant.
    pub fn body(&self) -> &MessageBody {
        &self.body
    }

    /// The attached mention list, if any.
    pub fn mention(&self) -> Option<&Mention> {
        self.mention.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msgtype_discriminators_match_wire_names() {
        assert_eq!(Message::text("hi").body().msgtype(), "text");
        assert_eq!(Message::markdown("t", "m").body().msgtype(), "markdown");
        assert_eq!(
            Message::action_card(ActionCard::default()).body().msgtype(),
            "actionCard"
        );
        assert_eq!(
            Message::feed_card(FeedCard::default()).body().msgtype(),
            "feedCard"
        );
    }

    #[test]
    fn with_mention_replaces_existing_mention() {
        let msg = Message::text("hi")
            .with_mention(Mention::new(false, ["13800000000"]))
            .with_mention(Mention::everyone());
        let mention = msg.mention().unwrap();
        assert!(mention.is_at_all);
        assert!(mention.at_mobiles.is_empty());
    }
}
