//! Catalog API client

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::CatalogConfig;
use crate::state::{CreatureDetail, ListCandidate};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("could not parse response from {url}: {message}")]
    Parse { url: String, message: String },
}

/// Remote source of catalog data. The binary uses [`PokeApi`]; tests swap in
/// an in-memory implementation.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// GET `{base_url}?limit={limit}`
    async fn fetch_list(&self) -> Result<Vec<ListCandidate>, ApiError>;

    /// GET an absolute details URL taken from a list entry
    async fn fetch_detail(&self, url: &str) -> Result<CreatureDetail, ApiError>;

    /// Raw bytes, used for artwork images
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError>;
}

// ============================================================================
// Response shapes
// ============================================================================

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    id: u32,
    height: u32,
    weight: u32,
    #[serde(default)]
    types: Vec<TypeSlot>,
    #[serde(default)]
    sprites: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

/// Parse a list body. Items of the wrong shape become empty candidates so
/// the repository can reject them one by one.
pub fn parse_list(body: &[u8]) -> Result<Vec<ListCandidate>, serde_json::Error> {
    let response: ListResponse = serde_json::from_slice(body)?;
    Ok(response
        .results
        .iter()
        .map(|item| ListCandidate {
            name: string_field(item, "name"),
            details_url: string_field(item, "url"),
        })
        .collect())
}

pub fn parse_detail(body: &[u8]) -> Result<CreatureDetail, serde_json::Error> {
    let response: DetailResponse = serde_json::from_slice(body)?;
    Ok(CreatureDetail {
        id: response.id,
        height: response.height,
        weight: response.weight,
        types: response
            .types
            .into_iter()
            .map(|slot| slot.type_info.name)
            .collect(),
        sprite_url: pointer_string(&response.sprites, "/front_default"),
        artwork_url: pointer_string(&response.sprites, "/other/official-artwork/front_default"),
    })
}

fn string_field(value: &serde_json::Value, key: &str) -> Option<String> {
    value.get(key).and_then(|v| v.as_str()).map(str::to_string)
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

// ============================================================================
// HTTP implementation
// ============================================================================

pub struct PokeApi {
    client: reqwest::Client,
    config: CatalogConfig,
}

impl PokeApi {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| ApiError::Request {
                url: url.to_string(),
                message: err.to_string(),
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = response.bytes().await.map_err(|err| ApiError::Request {
            url: url.to_string(),
            message: err.to_string(),
        })?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl CatalogApi for PokeApi {
    async fn fetch_list(&self) -> Result<Vec<ListCandidate>, ApiError> {
        let url = self.config.list_url();
        let body = self.get(&url).await?;
        parse_list(&body).map_err(|err| ApiError::Parse {
            url,
            message: err.to_string(),
        })
    }

    async fn fetch_detail(&self, url: &str) -> Result<CreatureDetail, ApiError> {
        let body = self.get(url).await?;
        parse_detail(&body).map_err(|err| ApiError::Parse {
            url: url.to_string(),
            message: err.to_string(),
        })
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        self.get(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_list() {
        let body = br#"{
            "count": 1302,
            "next": "https://pokeapi.co/api/v2/pokemon/?offset=150&limit=150",
            "results": [
                {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
                {"name": "ivysaur"},
                42
            ]
        }"#;

        let candidates = parse_list(body).unwrap();

        assert_eq!(
            candidates,
            vec![
                ListCandidate::new("bulbasaur", "https://pokeapi.co/api/v2/pokemon/1/"),
                ListCandidate {
                    name: Some("ivysaur".into()),
                    details_url: None,
                },
                ListCandidate::default(),
            ]
        );
    }

    #[test]
    fn test_parse_list_without_results_is_empty() {
        assert!(parse_list(b"{}").unwrap().is_empty());
        assert!(parse_list(b"not json").is_err());
    }

    #[test]
    fn test_parse_detail() {
        let body = br#"{
            "id": 1,
            "name": "bulbasaur",
            "height": 7,
            "weight": 69,
            "types": [
                {"slot": 1, "type": {"name": "grass", "url": "https://pokeapi.co/api/v2/type/12/"}},
                {"slot": 2, "type": {"name": "poison", "url": "https://pokeapi.co/api/v2/type/4/"}}
            ],
            "sprites": {
                "front_default": "https://img/1.png",
                "other": {"official-artwork": {"front_default": "https://img/art/1.png"}}
            }
        }"#;

        let detail = parse_detail(body).unwrap();

        assert_eq!(
            detail,
            CreatureDetail {
                id: 1,
                height: 7,
                weight: 69,
                types: vec!["grass".into(), "poison".into()],
                sprite_url: Some("https://img/1.png".into()),
                artwork_url: Some("https://img/art/1.png".into()),
            }
        );
    }

    #[test]
    fn test_parse_detail_with_null_sprites() {
        let body = br#"{"id": 10, "height": 3, "weight": 29, "types": [],
            "sprites": {"front_default": null}}"#;
        let detail = parse_detail(body).unwrap();
        assert_eq!(detail.sprite_url, None);
        assert_eq!(detail.artwork_url, None);
    }

    #[test]
    fn test_parse_detail_requires_id() {
        assert!(parse_detail(br#"{"height": 3, "weight": 29}"#).is_err());
    }
}
