use anyhow::Result;
use lambda_runtime::tracing;
use reqwest::Client;
use serde::Deserialize;

pub const NAMED_URL: &str = "https://api.scryfall.com/cards/named";

#[derive(Deserialize, Debug)]
pub struct Card {
    pub name: String,
    pub scryfall_uri: String,
    pub image_uris: Option<ImageUris>,
    pub card_faces: Option<Vec<CardFace>>,
}

#[derive(Deserialize, Debug)]
pub struct CardFace {
    pub name: String,
    pub image_uris: Option<ImageUris>,
}

#[derive(Deserialize, Debug)]
pub struct ImageUris {
    pub normal: Option<String>,
    pub large: Option<String>,
    pub small: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiError {
    details: String,
}

pub enum Lookup {
    Found(Card),
    Failed(String),
}

pub async fn lookup(client: &Client, url: &str, name: &str) -> Result<Lookup> {
    let response = client
        .get(url)
        .query(&[("fuzzy", name)])
        .header("accept", "application/json")
        .header("user-agent", "groupme-cardbot")
        .send()
        .await?;

    if response.status().as_u16() >= 400 {
        let error: ApiError = response.json().await?;
        tracing::error!("scryfall request failed: {}", error.details);
        return Ok(Lookup::Failed(error.details));
    }

    let card: Card = response.json().await?;
    tracing::info!("successfully retrieved card '{}'", card.name);

    Ok(Lookup::Found(card))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_face_card() {
        let json = r#"{
            "name": "Lightning Bolt",
            "scryfall_uri": "https://scryfall.com/card/clu/141/lightning-bolt",
            "image_uris": { "small": "https://cards.scryfall.io/small/bolt.jpg" }
        }"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.name, "Lightning Bolt");
        assert!(card.card_faces.is_none());
        let uris = card.image_uris.unwrap();
        assert!(uris.normal.is_none());
        assert!(uris.large.is_none());
        assert_eq!(
            uris.small.as_deref(),
            Some("https://cards.scryfall.io/small/bolt.jpg")
        );
    }

    #[test]
    fn parses_double_faced_card() {
        let json = r#"{
            "name": "Delver of Secrets // Insectile Aberration",
            "scryfall_uri": "https://scryfall.com/card/isd/51/delver-of-secrets",
            "card_faces": [
                { "name": "Delver of Secrets", "image_uris": { "normal": "https://cards.scryfall.io/normal/front.jpg" } },
                { "name": "Insectile Aberration", "image_uris": { "normal": "https://cards.scryfall.io/normal/back.jpg" } }
            ]
        }"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert!(card.image_uris.is_none());
        let faces = card.card_faces.unwrap();
        assert_eq!(faces.len(), 2);
        assert_eq!(faces[1].name, "Insectile Aberration");
    }

    #[tokio::test]
    async fn error_status_yields_failed_lookup_with_details() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/cards/named")
            .match_query(mockito::Matcher::UrlEncoded("fuzzy".into(), "Zzyzx".into()))
            .with_status(404)
            .with_body(r#"{"object":"error","status":404,"details":"no card found"}"#)
            .create_async()
            .await;

        let url = format!("{}/cards/named", server.url());
        let result = lookup(&Client::new(), &url, "Zzyzx").await.unwrap();
        match result {
            Lookup::Failed(details) => assert_eq!(details, "no card found"),
            Lookup::Found(_) => panic!("expected failed lookup"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn success_yields_parsed_card() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cards/named")
            .match_query(mockito::Matcher::UrlEncoded(
                "fuzzy".into(),
                "Lightning Bolt".into(),
            ))
            .with_status(200)
            .with_body(
                r#"{
                    "name": "Lightning Bolt",
                    "scryfall_uri": "https://scryfall.com/card/clu/141/lightning-bolt",
                    "image_uris": { "normal": "https://cards.scryfall.io/normal/bolt.jpg" }
                }"#,
            )
            .create_async()
            .await;

        let url = format!("{}/cards/named", server.url());
        let result = lookup(&Client::new(), &url, "Lightning Bolt").await.unwrap();
        match result {
            Lookup::Found(card) => {
                assert_eq!(card.name, "Lightning Bolt");
                assert_eq!(
                    card.scryfall_uri,
                    "https://scryfall.com/card/clu/141/lightning-bolt"
                );
            }
            Lookup::Failed(details) => panic!("unexpected failure: {details}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_transport_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cards/named")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let url = format!("{}/cards/named", server.url());
        assert!(lookup(&Client::new(), &url, "Lightning Bolt").await.is_err());
    }
}
