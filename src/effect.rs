//! Effects - side effects declared by the reducer, and their execution

use tracing::debug;

use crate::action::Action;
use crate::api::CatalogApi;
use crate::artwork::{decode_artwork, ARTWORK_MAX_SIZE};

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadList,
    /// Sprite URLs live on the details resource
    LoadSprite { index: usize, url: String },
    LoadDetail { index: usize, request: u64, url: String },
    LoadArtwork { index: usize, request: u64, url: String },
}

impl Effect {
    /// Task key. Keys are unique per request so no task is ever replaced:
    /// every `show()` on the loading indicator needs its settling action.
    pub fn task_key(&self) -> String {
        match self {
            Effect::LoadList => "list".to_string(),
            Effect::LoadSprite { index, .. } => format!("sprite_{index}"),
            Effect::LoadDetail { request, .. } => format!("detail_{request}"),
            Effect::LoadArtwork { request, .. } => format!("artwork_{request}"),
        }
    }
}

/// Run one effect to completion and report the outcome as an action.
pub async fn perform(effect: Effect, api: &dyn CatalogApi) -> Action {
    debug!(?effect, "performing effect");
    match effect {
        Effect::LoadList => match api.fetch_list().await {
            Ok(candidates) => Action::ListDidLoad(candidates),
            Err(error) => Action::ListDidError(error.to_string()),
        },
        Effect::LoadSprite { index, url } => match api.fetch_detail(&url).await {
            Ok(detail) => Action::SpriteDidLoad {
                index,
                sprite_url: detail.sprite_url,
            },
            Err(error) => Action::SpriteDidError {
                index,
                error: error.to_string(),
            },
        },
        Effect::LoadDetail {
            index,
            request,
            url,
        } => match api.fetch_detail(&url).await {
            Ok(detail) => Action::DetailDidLoad {
                index,
                request,
                detail,
            },
            Err(error) => Action::DetailDidError {
                index,
                request,
                error: error.to_string(),
            },
        },
        Effect::LoadArtwork { index, url, .. } => match api.fetch_bytes(&url).await {
            Ok(bytes) => match decode_artwork(&bytes, ARTWORK_MAX_SIZE) {
                Ok(artwork) => Action::ArtworkDidLoad { index, artwork },
                Err(error) => Action::ArtworkDidError {
                    index,
                    error: error.to_string(),
                },
            },
            Err(error) => Action::ArtworkDidError {
                index,
                error: error.to_string(),
            },
        },
    }
}
