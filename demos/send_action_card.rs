use std::io;

use dingrobot::{AccessToken, ActionCard, ButtonOrientation, CardButton, DingRobotClient, WebhookSecret};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let token = std::env::var("DINGROBOT_TOKEN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "DINGROBOT_TOKEN environment variable is required",
        )
    })?;

    let mut builder = DingRobotClient::builder(AccessToken::new(token)?);
    if let Ok(secret) = std::env::var("DINGROBOT_SECRET") {
        builder = builder.secret(WebhookSecret::new(secret)?);
    }
    let client = builder.build()?;

    let card = ActionCard {
        title: "release v1.2.3".to_owned(),
        text: "## release v1.2.3\nApprove the rollout?".to_owned(),
        btn_orientation: ButtonOrientation::Horizontal,
        btns: vec![
            CardButton {
                title: "approve".to_owned(),
                action_url: "https://example.com/approve".to_owned(),
            },
            CardButton {
                title: "reject".to_owned(),
                action_url: "https://example.com/reject".to_owned(),
            },
        ],
        ..Default::default()
    };

    let response = client.message().action_card(card).send().await?;
    println!("errcode: {:?}, errmsg: {}", response.errcode, response.errmsg);

    Ok(())
}
