// ask.rs – one-shot command-line check of the chat pipeline
// -----------------------------------------------------------------------------
// Runs a single message through the same interpret / fetch / compose path the
// HTTP service uses, against the provider configured in the environment.
//
//   OPENWEATHERMAP_API_KEY=... cargo run --bin ask -- "Weather in Paris tomorrow?"
// -----------------------------------------------------------------------------

use anyhow::{Result, anyhow};
use weather_chat_svc::config::Config;
use weather_chat_svc::weather::OpenWeatherClient;

#[tokio::main]
async fn main() -> Result<()> {
    let message = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if message.trim().is_empty() {
        return Err(anyhow!("usage: ask <message>, e.g. ask \"What's the weather in London?\""));
    }

    let config = Config::from_env()?;
    if !config.has_api_key() {
        return Err(anyhow!("OPENWEATHERMAP_API_KEY not set"));
    }

    let client = OpenWeatherClient::new(&config)?;

    println!("💬 {}", message);
    let reply = weather_chat_svc::answer(&message, &client, config.scan_mode).await;
    println!("🌤  {}", reply.response);
    println!("🏷  {}", serde_json::to_string(&reply.weather_category)?);

    Ok(())
}
