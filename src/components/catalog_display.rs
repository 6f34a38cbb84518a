use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use tui_dispatch::EventKind;

use super::palette::BG_BASE;
use super::{Component, CreatureList, CreatureListProps, LoadingBanner, LoadingBannerProps};
use crate::action::Action;
use crate::state::AppState;

/// Props for CatalogDisplay - read-only view of state
pub struct CatalogDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Main screen: creature list above the status footer
#[derive(Default)]
pub struct CatalogDisplay {
    list: CreatureList,
    banner: LoadingBanner,
}

impl CatalogDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for CatalogDisplay {
    type Props<'a> = CatalogDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let list_props = CreatureListProps {
            state: props.state,
            is_focused: props.is_focused,
        };
        self.list
            .handle_event(event, list_props)
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);

        let chunks = Layout::vertical([
            Constraint::Min(3),    // List
            Constraint::Length(3), // Footer
        ])
        .split(area);

        self.list.render(
            frame,
            chunks[0],
            CreatureListProps {
                state: props.state,
                is_focused: props.is_focused,
            },
        );
        self.banner
            .render(frame, chunks[1], LoadingBannerProps { state: props.state });
    }
}
