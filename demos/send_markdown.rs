use std::io;

use dingrobot::{AccessToken, DingRobotClient, WebhookSecret};

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

    let response = client
        .message()
        .markdown(
            "deploy finished",
            "### deploy finished\n- service: demo\n- version: **v1.2.3**",
        )
        .mention(true, Vec::<String>::new())
        .send()
        .await?;
    println!("errcode: {:?}, errmsg: {}", response.errcode, response.errmsg);

    Ok(())
}
