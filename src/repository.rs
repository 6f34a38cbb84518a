//! In-memory catalog of fetched creatures, in list response order

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::{CreatureDetail, ListCandidate};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatureSummary {
    pub name: String,
    pub details_url: String,
    pub sprite_url: Option<String>,
    /// Filled in the first time the creature is opened
    pub detail: Option<CreatureDetail>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("list entry is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("no creature at index {0}")]
    UnknownIndex(usize),
}

/// Append-only store. Names are not required to be unique.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Repository {
    entries: Vec<CreatureSummary>,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a list entry, returning its index.
    ///
    /// Entries without a non-empty `name` or `details_url` are logged and
    /// discarded; the repository is left untouched.
    pub fn add(&mut self, candidate: ListCandidate) -> Result<usize, RepositoryError> {
        let name = non_empty(candidate.name);
        let details_url = non_empty(candidate.details_url);
        let (name, details_url) = match (name, details_url) {
            (Some(name), Some(details_url)) => (name, details_url),
            (None, details_url) => {
                warn!(?details_url, "discarding list entry without a name");
                return Err(RepositoryError::MissingField("name"));
            }
            (Some(name), None) => {
                warn!(%name, "discarding list entry without a details url");
                return Err(RepositoryError::MissingField("details_url"));
            }
        };
        self.entries.push(CreatureSummary {
            name,
            details_url,
            sprite_url: None,
            detail: None,
        });
        Ok(self.entries.len() - 1)
    }

    pub fn get_all(&self) -> &[CreatureSummary] {
        &self.entries
    }

    /// Every entry whose name matches exactly.
    pub fn find(&self, name: &str) -> Vec<&CreatureSummary> {
        self.entries
            .iter()
            .filter(|entry| entry.name == name)
            .collect()
    }

    pub fn get(&self, index: usize) -> Option<&CreatureSummary> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn set_sprite(
        &mut self,
        index: usize,
        sprite_url: Option<String>,
    ) -> Result<(), RepositoryError> {
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(RepositoryError::UnknownIndex(index))?;
        entry.sprite_url = sprite_url;
        Ok(())
    }

    /// Store fetched detail fields on the entry, replacing older ones.
    pub fn merge_detail(
        &mut self,
        index: usize,
        detail: CreatureDetail,
    ) -> Result<(), RepositoryError> {
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(RepositoryError::UnknownIndex(index))?;
        if entry.sprite_url.is_none() {
            entry.sprite_url = detail.sprite_url.clone();
        }
        entry.detail = Some(detail);
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
