//! Application state - single source of truth

use serde::{Deserialize, Serialize};
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::artwork::ArtworkImage;
use crate::repository::{CreatureSummary, Repository};

/// Interval of the `Tick` subscription driving the loading spinner.
pub const LOADING_ANIM_TICK_MS: u64 = 90;
/// Ticks the loading banner stays up after the last call settles.
pub const LOADING_LINGER_TICKS: u32 = 4;

/// A list item as returned by the list endpoint, before validation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ListCandidate {
    pub name: Option<String>,
    pub details_url: Option<String>,
}

impl ListCandidate {
    pub fn new(name: impl Into<String>, details_url: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            details_url: Some(details_url.into()),
        }
    }
}

/// Extended fields fetched from a creature's details URL
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatureDetail {
    pub id: u32,
    /// Decimeters
    pub height: u32,
    /// Hectograms
    pub weight: u32,
    /// Type names in slot order (one or two entries)
    pub types: Vec<String>,
    pub sprite_url: Option<String>,
    pub artwork_url: Option<String>,
}

/// Single shared detail overlay.
///
/// Hidden → Loading on open, Loading → Visible when the latest request
/// resolves, Loading → Hidden when it fails, Visible → Hidden on close.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModalState {
    #[default]
    Hidden,
    Loading {
        index: usize,
    },
    Visible {
        index: usize,
    },
}

impl ModalState {
    pub fn index(&self) -> Option<usize> {
        match self {
            ModalState::Hidden => None,
            ModalState::Loading { index } | ModalState::Visible { index } => Some(*index),
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, ModalState::Hidden)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ModalState::Loading { .. })
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, ModalState::Visible { .. })
    }
}

/// Counts in-flight network calls; lingers briefly once they all settle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadingIndicator {
    in_flight: u32,
    linger_ticks: u32,
}

impl LoadingIndicator {
    /// Call before a network request starts.
    pub fn show(&mut self) {
        self.in_flight = self.in_flight.saturating_add(1);
        self.linger_ticks = 0;
    }

    /// Call once a network request settles, successfully or not.
    pub fn hide(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.in_flight == 0 {
            self.linger_ticks = LOADING_LINGER_TICKS;
        }
    }

    /// Advance the cosmetic delay. Returns true when visibility may have changed.
    pub fn tick(&mut self) -> bool {
        if self.in_flight == 0 && self.linger_ticks > 0 {
            self.linger_ticks -= 1;
            return true;
        }
        false
    }

    pub fn in_flight(&self) -> u32 {
        self.in_flight
    }

    pub fn is_visible(&self) -> bool {
        self.in_flight > 0 || self.linger_ticks > 0
    }
}

/// Decoded artwork for the creature shown in the modal
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadedArtwork {
    pub index: usize,
    pub image: ArtworkImage,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub terminal_size: (u16, u16),
    pub repository: Repository,
    /// Repository indices in the order their sprite fetch resolved
    pub render_order: Vec<usize>,
    /// Position within `render_order`
    pub selected: usize,
    pub modal: ModalState,
    /// Id of the most recently issued detail request
    pub detail_request: u64,
    pub artwork: Option<LoadedArtwork>,
    pub list_loading: bool,
    pub loading: LoadingIndicator,
    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            terminal_size: (80, 24),
            repository: Repository::new(),
            render_order: Vec::new(),
            selected: 0,
            modal: ModalState::Hidden,
            detail_request: 0,
            artwork: None,
            list_loading: false,
            loading: LoadingIndicator::default(),
            tick: 0,
        }
    }
}

impl AppState {
    /// Rendered creatures with their repository index, in render order.
    pub fn rendered(&self) -> impl Iterator<Item = (usize, &CreatureSummary)> + '_ {
        self.render_order
            .iter()
            .filter_map(|&index| self.repository.get(index).map(|creature| (index, creature)))
    }

    /// Repository index of the row at `position` in the list.
    pub fn index_at(&self, position: usize) -> Option<usize> {
        self.render_order.get(position).copied()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.index_at(self.selected)
    }

    pub fn set_selected(&mut self, position: usize) -> bool {
        if self.render_order.is_empty() {
            self.selected = 0;
            return false;
        }
        let bounded = position.min(self.render_order.len() - 1);
        if bounded != self.selected {
            self.selected = bounded;
            return true;
        }
        false
    }

    /// Creature whose details the modal currently presents.
    pub fn modal_creature(&self) -> Option<&CreatureSummary> {
        match self.modal {
            ModalState::Visible { index } => self.repository.get(index),
            _ => None,
        }
    }

    pub fn modal_artwork(&self) -> Option<&ArtworkImage> {
        let index = self.modal.index()?;
        self.artwork
            .as_ref()
            .filter(|artwork| artwork.index == index)
            .map(|artwork| &artwork.image)
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Catalog")
                .entry("total", ron_string(&self.repository.len()))
                .entry("rendered", ron_string(&self.render_order.len()))
                .entry("selected", ron_string(&self.selected))
                .entry("list_loading", ron_string(&self.list_loading)),
            DebugSection::new("Modal")
                .entry("state", ron_string(&self.modal))
                .entry("request", ron_string(&self.detail_request))
                .entry(
                    "artwork",
                    ron_string(&self.artwork.as_ref().map(|artwork| artwork.index)),
                ),
            DebugSection::new("Status")
                .entry("in_flight", ron_string(&self.loading.in_flight()))
                .entry("loading_visible", ron_string(&self.loading.is_visible())),
        ]
    }
}
