use serde::{Deserialize, Serialize};

use crate::domain::{
    ActionCard, ButtonOrientation, ErrCode, FeedCard, Markdown, Mention, Message, MessageBody,
    SendResponse, Text,
};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Wire shape of the request body: `msgtype` plus exactly one variant key,
/// plus the optional `at` object. Unselected variants are absent, not empty.
#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    msgtype: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<WireText<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    markdown: Option<WireMarkdown<'a>>,
    #[serde(rename = "actionCard", skip_serializing_if = "Option::is_none")]
    action_card: Option<WireActionCard<'a>>,
    #[serde(rename = "feedCard", skip_serializing_if = "Option::is_none")]
    feed_card: Option<WireFeedCard<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    at: Option<WireAt<'a>>,
}

#[derive(Debug, Serialize)]
struct WireText<'a> {
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct WireMarkdown<'a> {
    title: &'a str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct WireActionCard<'a> {
    title: &'a str,
    text: &'a str,
    #[serde(rename = "hideAvatar")]
    hide_avatar: &'static str,
    #[serde(rename = "btnOrientation")]
    btn_orientation: &'static str,
    #[serde(rename = "singleTitle")]
    single_title: &'a str,
    #[serde(rename = "singleURL")]
    single_url: &'a str,
    btns: Vec<WireButton<'a>>,
}

#[derive(Debug, Serialize)]
struct WireButton<'a> {
    title: &'a str,
    #[serde(rename = "actionURL")]
    action_url: &'a str,
}

#[derive(Debug, Serialize)]
struct WireFeedCard<'a> {
    links: Vec<WireFeedLink<'a>>,
}

#[derive(Debug, Serialize)]
struct WireFeedLink<'a> {
    text: &'a str,
    title: &'a str,
    #[serde(rename = "picUrl")]
    pic_url: &'a str,
    #[serde(rename = "messageUrl")]
    message_url: &'a str,
}

#[derive(Debug, Serialize)]
struct WireAt<'a> {
    #[serde(rename = "atMobiles")]
    at_mobiles: &'a [String],
    #[serde(rename = "isAtAll")]
    is_at_all: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct SendJsonResponse {
    errcode: i64,
    #[serde(default)]
    errmsg: String,
}

/// The webhook wants the avatar/orientation flags as the strings "0"/"1".
fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

fn orientation_flag(orientation: ButtonOrientation) -> &'static str {
    match orientation {
        ButtonOrientation::Vertical => "0",
        ButtonOrientation::Horizontal => "1",
    }
}

pub fn encode_message(message: &Message) -> Result<String, TransportError> {
    let mut wire = WireMessage {
        msgtype: message.body().msgtype(),
        text: None,
        markdown: None,
        action_card: None,
        feed_card: None,
        at: message.mention().map(encode_mention),
    };

    match message.body() {
        MessageBody::Text(Text { content }) => {
            wire.text = Some(WireText { content });
        }
        MessageBody::Markdown(Markdown { title, text }) => {
            wire.markdown = Some(WireMarkdown { title, text });
        }
        MessageBody::ActionCard(card) => {
            wire.action_card = Some(encode_action_card(card));
        }
        MessageBody::FeedCard(card) => {
            wire.feed_card = Some(encode_feed_card(card));
        }
    }

    Ok(serde_json::to_string(&wire)?)
}

fn encode_mention(mention: &Mention) -> WireAt<'_> {
    WireAt {
        at_mobiles: &mention.at_mobiles,
        is_at_all: mention.is_at_all,
    }
}

fn encode_action_card(card: &ActionCard) -> WireActionCard<'_> {
    WireActionCard {
        title: &card.title,
        text: &card.text,
        hide_avatar: flag(card.hide_avatar),
        btn_orientation: orientation_flag(card.btn_orientation),
        single_title: &card.single_title,
        single_url: &card.single_url,
        btns: card
            .btns
            .iter()
            .map(|btn| WireButton {
                title: &btn.title,
                action_url: &btn.action_url,
            })
            .collect(),
    }
}

fn encode_feed_card(card: &FeedCard) -> WireFeedCard<'_> {
    WireFeedCard {
        links: card
            .links
            .iter()
            .map(|link| WireFeedLink {
                text: &link.text,
                title: &link.title,
                pic_url: &link.pic_url,
                message_url: &link.message_url,
            })
            .collect(),
    }
}

pub fn decode_send_response(json: &str) -> Result<SendResponse, TransportError> {
    let parsed: SendJsonResponse = serde_json::from_str(json)?;
    Ok(SendResponse {
        errcode: ErrCode::new(parsed.errcode),
        errmsg: parsed.errmsg,
    })
}

#[cfg(test)]
mod tests {
    use crate::domain::{CardButton, FeedLink};

    use super::*;

    fn body_json(message: &Message) -> serde_json::Value {
        serde_json::from_str(&encode_message(message).unwrap()).unwrap()
    }

    #[test]
    fn encode_text_emits_only_selected_variant() {
        let json = body_json(&Message::text("hello"));
        assert_eq!(json["msgtype"], "text");
        assert_eq!(json["text"]["content"], "hello");
        assert!(json.get("markdown").is_none());
        assert!(json.get("actionCard").is_none());
        assert!(json.get("feedCard").is_none());
        assert!(json.get("at").is_none());
    }

    #[test]
    fn encode_markdown() {
        let json = body_json(&Message::markdown("release", "# v1.2.3 shipped"));
        assert_eq!(json["msgtype"], "markdown");
        assert_eq!(json["markdown"]["title"], "release");
        assert_eq!(json["markdown"]["text"], "# v1.2.3 shipped");
    }

    #[test]
    fn encode_action_card_uses_wire_field_names_and_flags() {
        let card = ActionCard {
            title: "deploy".to_owned(),
            text: "approve?".to_owned(),
            hide_avatar: true,
            btn_orientation: ButtonOrientation::Horizontal,
            single_title: String::new(),
            single_url: String::new(),
            btns: vec![
                CardButton {
                    title: "yes".to_owned(),
                    action_url: "https://example.invalid/yes".to_owned(),
                },
                CardButton {
                    title: "no".to_owned(),
                    action_url: "https://example.invalid/no".to_owned(),
                },
            ],
        };

        let json = body_json(&Message::action_card(card));
        assert_eq!(json["msgtype"], "actionCard");
        assert_eq!(json["actionCard"]["hideAvatar"], "1");
        assert_eq!(json["actionCard"]["btnOrientation"], "1");
        assert_eq!(json["actionCard"]["btns"][0]["title"], "yes");
        assert_eq!(
            json["actionCard"]["btns"][1]["actionURL"],
            "https://example.invalid/no"
        );
    }

    #[test]
    fn encode_feed_card_links() {
        let card = FeedCard {
            links: vec![FeedLink {
                title: "headline".to_owned(),
                text: "body".to_owned(),
                pic_url: "https://example.invalid/pic.png".to_owned(),
                message_url: "https://example.invalid/post".to_owned(),
            }],
        };

        let json = body_json(&Message::feed_card(card));
        assert_eq!(json["msgtype"], "feedCard");
        assert_eq!(json["feedCard"]["links"][0]["picUrl"], "https://example.invalid/pic.png");
        assert_eq!(json["feedCard"]["links"][0]["messageUrl"], "https://example.invalid/post");
    }

    #[test]
    fn encode_mention_round_trips_through_at_object() {
        let msg = Message::text("ping").with_mention(Mention::new(
            true,
            ["13800000000", "13900000000"],
        ));

        let json = body_json(&msg);
        assert_eq!(
            json["at"],
            serde_json::json!({
                "atMobiles": ["13800000000", "13900000000"],
                "isAtAll": true,
            })
        );
    }

    #[test]
    fn decode_ok_response() {
        let resp = decode_send_response(r#"{"errcode":0,"errmsg":"ok"}"#).unwrap();
        assert!(resp.is_ok());
        assert_eq!(resp.errmsg, "ok");
    }

    #[test]
    fn decode_error_response_preserves_code_and_text() {
        let resp =
            decode_send_response(r#"{"errcode":130101,"errmsg":"send speed too fast"}"#).unwrap();
        assert_eq!(resp.errcode, ErrCode::new(130101));
        assert!(resp.errcode.is_rate_limited());
        assert_eq!(resp.errmsg, "send speed too fast");
    }

    #[test]
    fn decode_rejects_non_json_body() {
        assert!(decode_send_response("<html>502</html>").is_err());
    }
}
