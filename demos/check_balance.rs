use nexmo::NexmoClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = NexmoClient::from_env()?;
    let balance = client.get_balance().await?;
    println!(
        "balance: {}, auto_reload: {}",
        balance.value, balance.auto_reload
    );

    Ok(())
}
