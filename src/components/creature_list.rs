use crossterm::event::{KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle,
};

use super::palette::{ACCENT_TEAL, BG_HIGHLIGHT, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use super::Component;
use crate::action::Action;
use crate::state::AppState;
use crate::units::{format_id, format_name};

pub struct CreatureListProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Clickable list of every creature whose sprite has resolved
pub struct CreatureList {
    list: SelectList,
    /// Row area from the last render, used to hit-test clicks
    rows: Option<Rect>,
    /// First visible position, kept in step with the SelectList viewport
    offset: usize,
}

impl Default for CreatureList {
    fn default() -> Self {
        Self {
            list: SelectList::new(),
            rows: None,
            offset: 0,
        }
    }
}

impl CreatureList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render-order position under a terminal cell, if any.
    fn position_at(&self, column: u16, row: u16, len: usize) -> Option<usize> {
        let rows = self.rows?;
        if !rows.contains(Position::new(column, row)) {
            return None;
        }
        let position = self.offset + usize::from(row - rows.y);
        (position < len).then_some(position)
    }

    fn follow_selection(&mut self, selected: usize, len: usize, viewport: usize) {
        if viewport == 0 {
            return;
        }
        if selected < self.offset {
            self.offset = selected;
        } else if selected >= self.offset + viewport {
            self.offset = selected + 1 - viewport;
        }
        self.offset = self.offset.min(len.saturating_sub(viewport));
    }
}

/// One line per rendered creature, in render order.
pub fn creature_items(state: &AppState) -> Vec<Line<'static>> {
    state
        .rendered()
        .map(|(_, creature)| {
            let id = creature
                .detail
                .as_ref()
                .map(|detail| format_id(detail.id))
                .unwrap_or_else(|| " -- ".to_string());
            Line::from(format!("\u{25c6} {id:<5} {}", format_name(&creature.name)))
        })
        .collect()
}

impl Component<Action> for CreatureList {
    type Props<'a> = CreatureListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || props.state.render_order.is_empty() {
            return Vec::new();
        }

        match event {
            EventKind::Key(key) if key.kind != KeyEventKind::Press => return Vec::new(),
            EventKind::Key(key) if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) => {
                return vec![Action::SelectionActivate(props.state.selected)];
            }
            EventKind::Scroll { delta, .. } => return vec![Action::SelectionMove(*delta as i16)],
            EventKind::Mouse(mouse) => {
                if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
                    return Vec::new();
                }
                // A click both highlights and opens the row under the cursor
                let len = props.state.render_order.len();
                return self
                    .position_at(mouse.column, mouse.row, len)
                    .map(Action::SelectionActivate)
                    .into_iter()
                    .collect();
            }
            _ => {}
        }

        let items = creature_items(props.state);
        let select_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props.state.selected.min(items.len().saturating_sub(1)),
            is_focused: true,
            style: list_style(),
            behavior: list_behavior(),
            on_select: Action::SelectionSet,
            render_item: &|item| item.clone(),
        };
        self.list
            .handle_event(event, select_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let title = format!(
            "CATALOG {}/{}",
            props.state.render_order.len(),
            props.state.repository.len()
        );
        let border = if props.is_focused {
            Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_DIM)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let items = creature_items(props.state);
        if items.is_empty() {
            self.rows = None;
            self.offset = 0;
            let message = if props.state.list_loading {
                "Loading catalog..."
            } else {
                "No creatures loaded."
            };
            frame.render_widget(
                Paragraph::new(message)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(TEXT_DIM)),
                inner,
            );
            return;
        }

        let selected = props.state.selected.min(items.len() - 1);
        self.follow_selection(selected, items.len(), inner.height as usize);
        self.rows = Some(inner);

        let select_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected,
            is_focused: props.is_focused,
            style: list_style(),
            behavior: list_behavior(),
            on_select: Action::SelectionSet,
            render_item: &|item| item.clone(),
        };
        self.list.render(frame, inner, select_props);
    }
}

fn list_behavior() -> SelectListBehavior {
    SelectListBehavior {
        show_scrollbar: true,
        wrap_navigation: false,
    }
}

fn list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}
