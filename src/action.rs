use serde::{Deserialize, Serialize};

use crate::artwork::ArtworkImage;
use crate::state::{CreatureDetail, ListCandidate};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,
    ListDidLoad(Vec<ListCandidate>),
    ListDidError(String),

    SpriteDidLoad {
        index: usize,
        sprite_url: Option<String>,
    },
    SpriteDidError {
        index: usize,
        error: String,
    },

    /// Move the highlighted row by a delta
    SelectionMove(i16),
    /// Highlight the row at a list position
    SelectionSet(usize),
    /// Highlight the row at a list position and open its details
    SelectionActivate(usize),

    /// Open the modal for a repository index
    DetailOpen(usize),
    DetailDidLoad {
        index: usize,
        request: u64,
        detail: CreatureDetail,
    },
    DetailDidError {
        index: usize,
        request: u64,
        error: String,
    },
    ArtworkDidLoad {
        index: usize,
        artwork: ArtworkImage,
    },
    ArtworkDidError {
        index: usize,
        error: String,
    },

    ModalClose,

    UiTerminalResize(u16, u16),
    Tick,
    Quit,
}
