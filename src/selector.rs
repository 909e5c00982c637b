use lambda_runtime::tracing;

use crate::scryfall::{Card, ImageUris};

pub fn artwork_uri<'a>(card: &'a Card, face_name: &str) -> Option<&'a str> {
    select_artwork(card, face_name).and_then(select_uri)
}

// Try to get the art for the specified face
fn select_artwork<'a>(card: &'a Card, face_name: &str) -> Option<&'a ImageUris> {
    if card.card_faces.is_none() {
        if let Some(uris) = &card.image_uris {
            return Some(uris);
        }
    }

    let faces = card.card_faces.as_deref().unwrap_or_default();
    let wanted = face_name.to_lowercase();
    let matched = faces
        .iter()
        .find(|face| face.name.to_lowercase().contains(&wanted) && face.image_uris.is_some());

    if let Some(face) = matched {
        return face.image_uris.as_ref();
    }

    match faces.first().and_then(|face| face.image_uris.as_ref()) {
        Some(uris) => {
            tracing::warn!("couldn't find card face with name '{face_name}', showing front face");
            Some(uris)
        }
        None => {
            tracing::error!(
                "face of '{}' doesn't have an image associated with it",
                card.name
            );
            None
        }
    }
}

fn select_uri(uris: &ImageUris) -> Option<&str> {
    uris.normal
        .as_deref()
        .or(uris.large.as_deref())
        .or(uris.small.as_deref())
}
