use std::sync::OnceLock;

use lambda_runtime::{run, service_fn, tracing, Error, LambdaEvent};
use reqwest::Client as HttpClient;
use serde::Deserialize;

mod bot;
mod groupme;
mod scryfall;
mod selector;

use bot::Bot;

#[derive(Deserialize, Debug)]
struct CallbackEvent {
    #[serde(default)]
    text: String,
}

static HTTP: OnceLock<HttpClient> = OnceLock::new();

async fn handler(event: LambdaEvent<CallbackEvent>) -> Result<(), Error> {
    let http = HTTP.get_or_init(HttpClient::new);
    let bot = Bot::from_env(http.clone())?;
    bot.handle(&event.payload.text).await;
    tracing::info!("finished handling message");

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    run(service_fn(handler)).await?;

    Ok(())
}
