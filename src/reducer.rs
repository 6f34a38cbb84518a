//! Reducer - pure function: (state, action) -> DispatchResult

use tracing::{debug, error, info, warn};
use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, LoadedArtwork, ModalState};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            if state.list_loading || !state.repository.is_empty() {
                return DispatchResult::unchanged();
            }
            state.list_loading = true;
            state.loading.show();
            DispatchResult::changed_with(Effect::LoadList)
        }

        Action::ListDidLoad(candidates) => {
            state.list_loading = false;
            state.loading.hide();
            let received = candidates.len();
            let mut effects = Vec::new();
            for candidate in candidates {
                let Ok(index) = state.repository.add(candidate) else {
                    continue;
                };
                let Some(creature) = state.repository.get(index) else {
                    continue;
                };
                state.loading.show();
                effects.push(Effect::LoadSprite {
                    index,
                    url: creature.details_url.clone(),
                });
            }
            info!(received, accepted = effects.len(), "catalog list loaded");
            DispatchResult::changed_with_many(effects)
        }

        Action::ListDidError(error) => {
            state.list_loading = false;
            state.loading.hide();
            error!(%error, "catalog list failed");
            DispatchResult::changed()
        }

        Action::SpriteDidLoad { index, sprite_url } => {
            state.loading.hide();
            let has_sprite = sprite_url.is_some();
            if let Err(error) = state.repository.set_sprite(index, sprite_url) {
                warn!(%error, "sprite for unknown creature");
                return DispatchResult::changed();
            }
            if !has_sprite {
                warn!(index, "creature has no sprite, not rendering it");
                return DispatchResult::changed();
            }
            if !state.render_order.contains(&index) {
                state.render_order.push(index);
            }
            DispatchResult::changed()
        }

        Action::SpriteDidError { index, error } => {
            state.loading.hide();
            warn!(index, %error, "sprite fetch failed");
            DispatchResult::changed()
        }

        Action::SelectionMove(delta) => {
            let position = (state.selected as i64 + i64::from(delta)).max(0) as usize;
            if !state.set_selected(position) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::SelectionSet(position) => {
            if !state.set_selected(position) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::SelectionActivate(position) => {
            state.set_selected(position);
            match state.selected_index() {
                Some(index) => open_detail(state, index),
                None => DispatchResult::unchanged(),
            }
        }

        Action::DetailOpen(index) => open_detail(state, index),

        Action::DetailDidLoad {
            index,
            request,
            detail,
        } => {
            state.loading.hide();
            let artwork_url = detail.artwork_url.clone();
            if let Err(error) = state.repository.merge_detail(index, detail) {
                warn!(%error, "detail for unknown creature");
                return DispatchResult::changed();
            }
            if request != state.detail_request {
                debug!(index, request, latest = state.detail_request, "stale detail response");
                return DispatchResult::changed();
            }
            if state.modal != (ModalState::Loading { index }) {
                return DispatchResult::changed();
            }
            state.modal = ModalState::Visible { index };
            if state.modal_artwork().is_some() {
                return DispatchResult::changed();
            }
            match artwork_url {
                Some(url) => {
                    state.loading.show();
                    DispatchResult::changed_with(Effect::LoadArtwork {
                        index,
                        request,
                        url,
                    })
                }
                None => DispatchResult::changed(),
            }
        }

        Action::DetailDidError {
            index,
            request,
            error,
        } => {
            state.loading.hide();
            warn!(index, request, %error, "detail fetch failed");
            if request == state.detail_request && state.modal == (ModalState::Loading { index }) {
                state.modal = ModalState::Hidden;
            }
            DispatchResult::changed()
        }

        Action::ArtworkDidLoad { index, artwork } => {
            state.loading.hide();
            if state.modal.index() == Some(index) {
                state.artwork = Some(LoadedArtwork {
                    index,
                    image: artwork,
                });
            }
            DispatchResult::changed()
        }

        Action::ArtworkDidError { index, error } => {
            state.loading.hide();
            warn!(index, %error, "artwork fetch failed");
            DispatchResult::changed()
        }

        Action::ModalClose => {
            if !state.modal.is_visible() {
                return DispatchResult::unchanged();
            }
            state.modal = ModalState::Hidden;
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Tick => {
            let lingering = state.loading.tick();
            if state.loading.is_visible() {
                state.tick = state.tick.wrapping_add(1);
                return DispatchResult::changed();
            }
            if lingering {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn open_detail(state: &mut AppState, index: usize) -> DispatchResult<Effect> {
    let Some(creature) = state.repository.get(index) else {
        warn!(index, "open requested for unknown creature");
        return DispatchResult::unchanged();
    };
    let url = creature.details_url.clone();
    state.detail_request += 1;
    state.modal = ModalState::Loading { index };
    if state
        .artwork
        .as_ref()
        .is_some_and(|artwork| artwork.index != index)
    {
        state.artwork = None;
    }
    state.loading.show();
    debug!(index, request = state.detail_request, "opening detail");
    DispatchResult::changed_with(Effect::LoadDetail {
        index,
        request: state.detail_request,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artwork::ArtworkImage;
    use crate::state::{CreatureDetail, ListCandidate, LOADING_LINGER_TICKS};

    fn loaded_state(names: &[&str]) -> AppState {
        let mut state = AppState::default();
        reducer(&mut state, Action::Init);
        let candidates = names
            .iter()
            .enumerate()
            .map(|(i, name)| ListCandidate::new(*name, format!("https://api/pokemon/{}/", i + 1)))
            .collect();
        reducer(&mut state, Action::ListDidLoad(candidates));
        for index in 0..names.len() {
            reducer(
                &mut state,
                Action::SpriteDidLoad {
                    index,
                    sprite_url: Some(format!("https://img/{index}.png")),
                },
            );
        }
        state
    }

    fn detail(id: u32) -> CreatureDetail {
        CreatureDetail {
            id,
            height: 7,
            weight: 69,
            types: vec!["grass".into()],
            sprite_url: None,
            artwork_url: Some(format!("https://img/art/{id}.png")),
        }
    }

    #[test]
    fn test_init_requests_list() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::Init);

        assert!(result.changed);
        assert!(state.list_loading);
        assert!(state.loading.is_visible());
        assert_eq!(result.effects, vec![Effect::LoadList]);
    }

    #[test]
    fn test_list_load_discards_malformed_entries() {
        let mut state = AppState::default();
        reducer(&mut state, Action::Init);

        let result = reducer(
            &mut state,
            Action::ListDidLoad(vec![
                ListCandidate::new("bulbasaur", "https://api/pokemon/1/"),
                ListCandidate {
                    name: None,
                    details_url: Some("https://api/pokemon/2/".into()),
                },
                ListCandidate::new("venusaur", "https://api/pokemon/3/"),
            ]),
        );

        assert!(!state.list_loading);
        assert_eq!(state.repository.len(), 2);
        assert_eq!(
            result.effects,
            vec![
                Effect::LoadSprite {
                    index: 0,
                    url: "https://api/pokemon/1/".into()
                },
                Effect::LoadSprite {
                    index: 1,
                    url: "https://api/pokemon/3/".into()
                },
            ]
        );
        assert_eq!(state.loading.in_flight(), 2);
        assert!(state.render_order.is_empty(), "nothing renders before sprites");
    }

    #[test]
    fn test_sprites_render_in_resolution_order() {
        let mut state = AppState::default();
        reducer(&mut state, Action::Init);
        reducer(
            &mut state,
            Action::ListDidLoad(vec![
                ListCandidate::new("a", "https://api/1/"),
                ListCandidate::new("b", "https://api/2/"),
            ]),
        );

        reducer(
            &mut state,
            Action::SpriteDidLoad {
                index: 1,
                sprite_url: Some("b.png".into()),
            },
        );
        reducer(
            &mut state,
            Action::SpriteDidLoad {
                index: 0,
                sprite_url: Some("a.png".into()),
            },
        );

        assert_eq!(state.render_order, vec![1, 0]);
        assert_eq!(state.loading.in_flight(), 0);
    }

    #[test]
    fn test_missing_sprite_is_never_rendered() {
        let mut state = AppState::default();
        reducer(&mut state, Action::Init);
        reducer(
            &mut state,
            Action::ListDidLoad(vec![
                ListCandidate::new("a", "https://api/1/"),
                ListCandidate::new("b", "https://api/2/"),
            ]),
        );

        reducer(
            &mut state,
            Action::SpriteDidLoad {
                index: 0,
                sprite_url: None,
            },
        );
        reducer(
            &mut state,
            Action::SpriteDidLoad {
                index: 1,
                sprite_url: Some("b.png".into()),
            },
        );

        assert_eq!(state.render_order, vec![1]);
        assert_eq!(state.loading.in_flight(), 0);
    }

    #[test]
    fn test_failed_sprite_is_never_rendered() {
        let mut state = AppState::default();
        reducer(&mut state, Action::Init);
        reducer(
            &mut state,
            Action::ListDidLoad(vec![ListCandidate::new("a", "https://api/1/")]),
        );

        reducer(
            &mut state,
            Action::SpriteDidError {
                index: 0,
                error: "timeout".into(),
            },
        );

        assert!(state.render_order.is_empty());
        assert_eq!(state.loading.in_flight(), 0);
    }

    #[test]
    fn test_open_moves_modal_to_loading() {
        let mut state = loaded_state(&["bulbasaur"]);

        let result = reducer(&mut state, Action::DetailOpen(0));

        assert_eq!(state.modal, ModalState::Loading { index: 0 });
        assert_eq!(
            result.effects,
            vec![Effect::LoadDetail {
                index: 0,
                request: 1,
                url: "https://api/pokemon/1/".into()
            }]
        );
    }

    #[test]
    fn test_detail_load_shows_modal_and_requests_artwork() {
        let mut state = loaded_state(&["bulbasaur"]);
        reducer(&mut state, Action::DetailOpen(0));

        let result = reducer(
            &mut state,
            Action::DetailDidLoad {
                index: 0,
                request: 1,
                detail: detail(1),
            },
        );

        assert_eq!(state.modal, ModalState::Visible { index: 0 });
        assert_eq!(state.modal_creature().unwrap().detail, Some(detail(1)));
        assert_eq!(
            result.effects,
            vec![Effect::LoadArtwork {
                index: 0,
                request: 1,
                url: "https://img/art/1.png".into()
            }]
        );
    }

    #[test]
    fn test_stale_detail_does_not_replace_latest() {
        let mut state = loaded_state(&["bulbasaur", "ivysaur"]);
        reducer(&mut state, Action::DetailOpen(0));
        reducer(&mut state, Action::DetailOpen(1));

        // The first request resolves last-but-one; it must not open item 0.
        reducer(
            &mut state,
            Action::DetailDidLoad {
                index: 0,
                request: 1,
                detail: detail(1),
            },
        );
        assert_eq!(state.modal, ModalState::Loading { index: 1 });
        assert_eq!(state.repository.get(0).unwrap().detail, Some(detail(1)));

        reducer(
            &mut state,
            Action::DetailDidLoad {
                index: 1,
                request: 2,
                detail: detail(2),
            },
        );
        assert_eq!(state.modal, ModalState::Visible { index: 1 });
    }

    #[test]
    fn test_detail_error_hides_modal() {
        let mut state = loaded_state(&["bulbasaur"]);
        reducer(&mut state, Action::DetailOpen(0));

        reducer(
            &mut state,
            Action::DetailDidError {
                index: 0,
                request: 1,
                error: "HTTP 500".into(),
            },
        );

        assert_eq!(state.modal, ModalState::Hidden);
        assert_eq!(state.loading.in_flight(), 0);
    }

    #[test]
    fn test_close_only_applies_while_visible() {
        let mut state = loaded_state(&["bulbasaur"]);
        assert!(!reducer(&mut state, Action::ModalClose).changed);

        reducer(&mut state, Action::DetailOpen(0));
        assert!(!reducer(&mut state, Action::ModalClose).changed);

        reducer(
            &mut state,
            Action::DetailDidLoad {
                index: 0,
                request: 1,
                detail: detail(1),
            },
        );
        assert!(reducer(&mut state, Action::ModalClose).changed);
        assert_eq!(state.modal, ModalState::Hidden);
    }

    #[test]
    fn test_artwork_is_dropped_when_another_item_opens() {
        let mut state = loaded_state(&["bulbasaur", "ivysaur"]);
        reducer(&mut state, Action::DetailOpen(0));
        reducer(
            &mut state,
            Action::ArtworkDidLoad {
                index: 0,
                artwork: ArtworkImage {
                    width: 1,
                    height: 1,
                    pixels: vec![[0, 0, 0, 255]],
                },
            },
        );
        assert!(state.modal_artwork().is_some());

        reducer(&mut state, Action::DetailOpen(1));

        assert!(state.artwork.is_none());
        assert!(state.modal_artwork().is_none());
    }

    #[test]
    fn test_selection_activate_opens_row_in_render_order() {
        let mut state = loaded_state(&["a", "b", "c"]);
        state.render_order = vec![2, 0, 1];

        let result = reducer(&mut state, Action::SelectionActivate(0));

        assert_eq!(state.selected, 0);
        assert_eq!(state.modal, ModalState::Loading { index: 2 });
        assert_eq!(result.effects.len(), 1);
    }

    #[test]
    fn test_tick_lingers_then_stops() {
        let mut state = loaded_state(&["a"]);
        assert_eq!(state.loading.in_flight(), 0);

        for _ in 0..LOADING_LINGER_TICKS {
            assert!(reducer(&mut state, Action::Tick).changed);
        }
        assert!(!state.loading.is_visible());
        assert!(!reducer(&mut state, Action::Tick).changed);
    }
}
