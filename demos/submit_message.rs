use std::io;

use nexmo::{MessageText, NexmoClient, PhoneNumber, SenderId, TextMessage};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let from = std::env::var("NEXMO_FROM").unwrap_or_else(|_| "Nexmo".to_owned());
    let phone_raw = std::env::var("NEXMO_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "NEXMO_PHONE environment variable is required (international format)",
        )
    })?;
    let text = std::env::var("NEXMO_MESSAGE")
        .unwrap_or_else(|_| "Hello from the nexmo demo.".to_owned());

    let client = NexmoClient::from_env()?;
    let phone = PhoneNumber::parse(None, phone_raw)?;
    let message = TextMessage::new(SenderId::new(from)?, phone.into(), MessageText::new(text)?);

    let response = client.submit_message(&message).await?;
    println!("message_uuid: {}", response.message_uuid);

    Ok(())
}
