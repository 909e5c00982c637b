use anyhow::Result;
use lambda_runtime::tracing;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const IMAGE_URL: &str = "https://image.groupme.com/pictures";
pub const POST_URL: &str = "https://api.groupme.com/v3/bots/post";

#[derive(Serialize, Debug)]
pub struct Attachment {
    #[serde(rename = "type")]
    kind: &'static str,
    url: String,
}

impl Attachment {
    pub fn image(url: String) -> Self {
        Self { kind: "image", url }
    }
}

#[derive(Serialize, Debug)]
struct PostBody<'a> {
    bot_id: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachments: Option<Vec<Attachment>>,
}

#[derive(Deserialize, Debug)]
struct UploadResponse {
    payload: UploadPayload,
}

#[derive(Deserialize, Debug)]
struct UploadPayload {
    picture_url: Option<String>,
}

// The picture service wants application/jpeg no matter the actual format
pub async fn upload_image(
    client: &Client,
    url: &str,
    access_token: &str,
    image: Vec<u8>,
) -> Result<Option<String>> {
    let response = client
        .post(url)
        .header("Content-Type", "application/jpeg")
        .header("X-Access-Token", access_token)
        .body(image)
        .send()
        .await?;

    let upload: UploadResponse = response.json().await?;

    Ok(upload.payload.picture_url)
}

pub async fn post_message(
    client: &Client,
    url: &str,
    bot_id: &str,
    text: &str,
    attachment: Option<Attachment>,
) {
    let body = PostBody {
        bot_id,
        text,
        attachments: attachment.map(|attachment| vec![attachment]),
    };

    if let Err(error) = try_post(client, url, &body).await {
        tracing::error!("failed to post message to groupme: {error}");
    }
}

async fn try_post(client: &Client, url: &str, body: &PostBody<'_>) -> Result<()> {
    let response = client.post(url).json(body).send().await?;
    tracing::info!("message post status: {}", response.text().await?);

    Ok(())
}
