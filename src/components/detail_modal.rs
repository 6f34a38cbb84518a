use crossterm::event::{KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    centered_rect, BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding,
};

use super::artwork_view::ArtworkView;
use super::palette::{ACCENT_GOLD, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use super::Component;
use crate::action::Action;
use crate::state::AppState;
use crate::units::{convert_height, convert_weight, format_id, format_name, type_names};

const MODAL_WIDTH: u16 = 44;
const MODAL_HEIGHT: u16 = 24;
const CLOSE_LABEL: &str = "[x]";

pub struct DetailModalProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Overlay showing the selected creature's details.
///
/// Only drawn while the modal is visible. Closes on Esc, `x`, a click on the
/// `[x]` button, or a click on the dimmed backdrop.
pub struct DetailModal {
    modal: Modal,
    close_button: Option<Rect>,
}

impl Default for DetailModal {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
            close_button: None,
        }
    }
}

impl DetailModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of the close button from the last render.
    pub fn close_button(&self) -> Option<Rect> {
        self.close_button
    }
}

pub fn detail_modal_area(area: Rect) -> Rect {
    centered_rect(MODAL_WIDTH, MODAL_HEIGHT, area)
}

fn modal_style() -> ModalStyle {
    ModalStyle {
        dim_factor: 0.6,
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(TEXT_DIM),
                focused_style: Some(Style::default().fg(ACCENT_TEAL)),
            }),
            padding: Padding::all(1),
            bg: Some(BG_PANEL),
            fg: Some(TEXT_MAIN),
        },
    }
}

fn modal_close() -> Action {
    Action::ModalClose
}

impl Component<Action> for DetailModal {
    type Props<'a> = DetailModalProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || !props.state.modal.is_visible() {
            return Vec::new();
        }

        match event {
            EventKind::Key(key) if key.kind == KeyEventKind::Press => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('x')) {
                    return vec![Action::ModalClose];
                }
            }
            EventKind::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let hit = Position::new(mouse.column, mouse.row);
                if self.close_button.is_some_and(|rect| rect.contains(hit)) {
                    return vec![Action::ModalClose];
                }
            }
            _ => {}
        }

        let area = Rect::new(0, 0, props.state.terminal_size.0, props.state.terminal_size.1);
        let mut noop_render = |_frame: &mut Frame, _area: Rect| {};
        let modal_props = ModalProps {
            is_open: true,
            is_focused: true,
            area: detail_modal_area(area),
            style: modal_style(),
            behavior: ModalBehavior {
                close_on_esc: true,
                close_on_backdrop: true,
            },
            on_close: modal_close,
            render_content: &mut noop_render,
        };
        self.modal.handle_event(event, modal_props).into_iter().collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let Some(creature) = props.state.modal_creature() else {
            self.close_button = None;
            return;
        };
        let artwork = props.state.modal_artwork();

        let DetailModal {
            modal,
            close_button,
        } = self;
        let mut render_content = |frame: &mut Frame, inner: Rect| {
            let layout = Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(4),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

            let id = creature
                .detail
                .as_ref()
                .map(|detail| format_id(detail.id))
                .unwrap_or_default();
            let title = Paragraph::new(Line::from(vec![
                Span::styled(
                    format_name(&creature.name),
                    Style::default()
                        .fg(ACCENT_GOLD)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(id, Style::default().fg(TEXT_DIM)),
            ]));
            frame.render_widget(title, layout[0]);

            let close_width = CLOSE_LABEL.len() as u16;
            let close_rect = Rect::new(
                layout[0].right().saturating_sub(close_width),
                layout[0].y,
                close_width.min(layout[0].width),
                1,
            );
            frame.render_widget(
                Paragraph::new(CLOSE_LABEL).style(Style::default().fg(ACCENT_TEAL)),
                close_rect,
            );
            *close_button = Some(close_rect);

            match (artwork, creature.detail.as_ref()) {
                (Some(image), _) => {
                    frame.render_widget(ArtworkView { image }, layout[2]);
                }
                (None, Some(detail)) => {
                    let text = detail
                        .artwork_url
                        .as_deref()
                        .unwrap_or("No artwork available.");
                    frame.render_widget(
                        Paragraph::new(text)
                            .alignment(Alignment::Center)
                            .wrap(Wrap { trim: true })
                            .style(Style::default().fg(TEXT_DIM)),
                        layout[2],
                    );
                }
                (None, None) => {}
            }

            if let Some(detail) = creature.detail.as_ref() {
                let row = |label: &'static str, value: String| {
                    Paragraph::new(Line::from(vec![
                        Span::styled(label, Style::default().fg(TEXT_DIM)),
                        Span::styled(value, Style::default().fg(TEXT_MAIN)),
                    ]))
                };
                frame.render_widget(row("Height: ", convert_height(detail.height)), layout[4]);
                frame.render_widget(
                    row("Weight: ", format!("{} lbs", convert_weight(detail.weight))),
                    layout[5],
                );
                frame.render_widget(
                    Paragraph::new(type_names(&detail.types))
                        .style(Style::default().fg(ACCENT_TEAL)),
                    layout[6],
                );
            }

            let footer = Paragraph::new(Line::from(Span::styled(
                "Esc/x: Close",
                Style::default().fg(TEXT_DIM),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(footer, layout[7]);
        };

        modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: detail_modal_area(area),
                style: modal_style(),
                behavior: ModalBehavior {
                    close_on_esc: true,
                    close_on_backdrop: true,
                },
                on_close: modal_close,
                render_content: &mut render_content,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CreatureDetail, ListCandidate, ModalState};
    use crossterm::event::{KeyEvent, KeyModifiers, MouseEvent};
    use tui_dispatch::testing::*;

    fn left_click(column: u16, row: u16) -> EventKind {
        EventKind::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn click(modal: &mut DetailModal, state: &AppState, column: u16, row: u16) -> Vec<Action> {
        let props = DetailModalProps {
            state,
            is_focused: true,
        };
        modal
            .handle_event(&left_click(column, row), props)
            .into_iter()
            .collect()
    }

    fn rendered_modal(state: &AppState) -> DetailModal {
        let mut render = RenderHarness::new(80, 30);
        let mut component = DetailModal::new();
        render.render_to_string_plain(|frame| {
            let props = DetailModalProps {
                state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });
        component
    }

    fn visible_state() -> AppState {
        let mut state = AppState {
            terminal_size: (80, 30),
            ..Default::default()
        };
        state
            .repository
            .add(ListCandidate::new("bulbasaur", "https://api/1/"))
            .unwrap();
        state
            .repository
            .merge_detail(
                0,
                CreatureDetail {
                    id: 1,
                    height: 7,
                    weight: 69,
                    types: vec!["grass".into(), "poison".into()],
                    sprite_url: Some("front.png".into()),
                    artwork_url: Some("art.png".into()),
                },
            )
            .unwrap();
        state.render_order.push(0);
        state.modal = ModalState::Visible { index: 0 };
        state
    }

    #[test]
    fn test_render_formats_detail() {
        let mut render = RenderHarness::new(80, 30);
        let mut component = DetailModal::new();
        let state = visible_state();

        let output = render.render_to_string_plain(|frame| {
            let props = DetailModalProps {
                state: &state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("Bulbasaur"));
        assert!(output.contains("#001"));
        assert!(output.contains("Height: 2' 04\""));
        assert!(output.contains("Weight: 15.2 lbs"));
        assert!(output.contains("Types: grass, poison"));
        assert!(output.contains("[x]"));
        assert!(component.close_button().is_some());
    }

    #[test]
    fn test_render_nothing_while_loading() {
        let mut render = RenderHarness::new(80, 30);
        let mut component = DetailModal::new();
        let mut state = visible_state();
        state.modal = ModalState::Loading { index: 0 };

        let output = render.render_to_string_plain(|frame| {
            let props = DetailModalProps {
                state: &state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(!output.contains("Bulbasaur"));
        assert!(component.close_button().is_none());
    }

    #[test]
    fn test_escape_and_x_close() {
        let mut component = DetailModal::new();
        let state = visible_state();

        for code in [KeyCode::Esc, KeyCode::Char('x')] {
            let props = DetailModalProps {
                state: &state,
                is_focused: true,
            };
            let actions: Vec<_> = component
                .handle_event(
                    &EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE)),
                    props,
                )
                .into_iter()
                .collect();
            actions.assert_first(Action::ModalClose);
        }
    }

    #[test]
    fn test_ignores_keys_when_hidden() {
        let mut component = DetailModal::new();
        let mut state = visible_state();
        state.modal = ModalState::Hidden;
        let props = DetailModalProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
                props,
            )
            .into_iter()
            .collect();

        actions.assert_empty();
    }

    #[test]
    fn test_backdrop_click_closes() {
        let state = visible_state();
        let mut component = rendered_modal(&state);

        let actions = click(&mut component, &state, 0, 0);

        actions.assert_count(1);
        actions.assert_first(Action::ModalClose);
    }

    #[test]
    fn test_close_button_click_closes() {
        let state = visible_state();
        let mut component = rendered_modal(&state);
        let Some(button) = component.close_button() else {
            panic!("close button should be laid out after render");
        };

        let actions = click(&mut component, &state, button.x + 1, button.y);

        actions.assert_count(1);
        actions.assert_first(Action::ModalClose);
    }

    #[test]
    fn test_click_inside_content_keeps_modal_open() {
        let state = visible_state();
        let mut component = rendered_modal(&state);
        let area = detail_modal_area(Rect::new(0, 0, 80, 30));
        let (column, row) = (area.x + area.width / 2, area.y + area.height / 2);

        let actions = click(&mut component, &state, column, row);

        actions.assert_empty();
    }
}
