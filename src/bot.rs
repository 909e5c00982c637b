use std::sync::OnceLock;

use anyhow::Result;
use lambda_runtime::tracing;
use regex::Regex;
use reqwest::Client;

use crate::groupme::{self, Attachment};
use crate::scryfall::{self, Card, Lookup};
use crate::selector;

static REFERENCE: OnceLock<Regex> = OnceLock::new();

fn reference_regex() -> &'static Regex {
    REFERENCE.get_or_init(|| Regex::new(r"\[\[([^\[\]]+)\]\]").expect("valid reference pattern"))
}

pub fn extract_references(text: &str) -> Vec<&str> {
    reference_regex()
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|name| name.as_str())
        .collect()
}

pub struct Bot {
    bot_id: String,
    access_token: String,
    http: Client,
    scryfall_url: String,
    image_url: String,
    post_url: String,
}

impl Bot {
    pub fn from_env(http: Client) -> Result<Self> {
        let bot_id = std::env::var("BOT_ID")?;
        let access_token = std::env::var("ACCESS_TOKEN")?;

        Ok(Self {
            bot_id,
            access_token,
            http,
            scryfall_url: scryfall::NAMED_URL.to_owned(),
            image_url: groupme::IMAGE_URL.to_owned(),
            post_url: groupme::POST_URL.to_owned(),
        })
    }

    pub async fn handle(&self, message: &str) {
        for name in extract_references(message) {
            tracing::info!("getting '{name}'");
            let Some(card) = self.get_card(name).await else {
                continue;
            };
            self.post_card_details(&card, name).await;
        }
    }

    async fn get_card(&self, name: &str) -> Option<Card> {
        match scryfall::lookup(&self.http, &self.scryfall_url, name).await {
            Ok(Lookup::Found(card)) => Some(card),
            Ok(Lookup::Failed(details)) => {
                self.post(&format!("Scryfall request failed: {details}"), None)
                    .await;
                None
            }
            Err(error) => {
                tracing::error!("fetching '{name}' errored: {error}");
                self.post(&format!("Errored trying to fetch {name} from Scryfall"), None)
                    .await;
                None
            }
        }
    }

    async fn post_card_details(&self, card: &Card, face_name: &str) {
        tracing::info!("uploading art for '{face_name}'");
        let Some(url) = self.upload_card_art(card, face_name).await else {
            return;
        };

        tracing::info!("posting '{face_name}' to chat");
        self.post(&card.scryfall_uri, Some(Attachment::image(url)))
            .await;
        tracing::info!("done posting '{face_name}' details");
    }

    async fn upload_card_art(&self, card: &Card, face_name: &str) -> Option<String> {
        let Some(image_uri) = selector::artwork_uri(card, face_name) else {
            self.post(&format!("Couldn't find an image for {face_name}"), None)
                .await;
            return None;
        };

        match self.transfer_image(image_uri).await {
            Ok(Some(url)) => Some(url),
            Ok(None) => {
                self.post(
                    &format!("Didn't get URL for uploaded image of {face_name}"),
                    None,
                )
                .await;
                None
            }
            Err(error) => {
                tracing::error!("uploading art for '{face_name}' errored: {error}");
                self.post(
                    &format!("Errored trying to upload {face_name} image to groupme"),
                    None,
                )
                .await;
                None
            }
        }
    }

    async fn transfer_image(&self, image_uri: &str) -> Result<Option<String>> {
        let image = self.http.get(image_uri).send().await?.bytes().await?;
        groupme::upload_image(&self.http, &self.image_url, &self.access_token, image.to_vec()).await
    }

    async fn post(&self, text: &str, attachment: Option<Attachment>) {
        groupme::post_message(&self.http, &self.post_url, &self.bot_id, text, attachment).await;
    }
}
