use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::Borders,
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps,
    StatusBarSection, StatusBarStyle,
};

use super::palette::{ACCENT_GOLD, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use super::Component;
use crate::action::Action;
use crate::state::AppState;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub struct LoadingBannerProps<'a> {
    pub state: &'a AppState,
}

/// Footer with key hints and the transient loading message
pub struct LoadingBanner {
    status_bar: StatusBar,
}

impl Default for LoadingBanner {
    fn default() -> Self {
        Self {
            status_bar: StatusBar::new(),
        }
    }
}

impl LoadingBanner {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Text of the loading message, or `None` while nothing is loading.
pub fn loading_message(state: &AppState) -> Option<String> {
    if !state.loading.is_visible() {
        return None;
    }
    let frame = SPINNER[(state.tick % SPINNER.len() as u64) as usize];
    let label = if state.list_loading {
        "Loading catalog..."
    } else if state.modal.is_loading() {
        "Loading details..."
    } else {
        "Loading..."
    };
    Some(format!("{frame} {label}"))
}

fn hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    if state.modal.is_visible() {
        vec![
            StatusBarHint::new("Esc/x", "Close"),
            StatusBarHint::new("q", "Quit"),
        ]
    } else {
        vec![
            StatusBarHint::new("j/k", "Move"),
            StatusBarHint::new("Enter", "Details"),
            StatusBarHint::new("q", "Quit"),
        ]
    }
}

impl Component<Action> for LoadingBanner {
    type Props<'a> = LoadingBannerProps<'a>;

    fn handle_event(
        &mut self,
        _event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let message = loading_message(props.state).unwrap_or_default();
        let message_span = Span::styled(message.as_str(), Style::default().fg(ACCENT_GOLD));
        let message_items = [StatusBarItem::span(message_span)];
        let hints = hints(props.state);

        let style = StatusBarStyle {
            base: BaseStyle {
                border: Some(BorderStyle {
                    borders: Borders::ALL,
                    style: Style::default().fg(TEXT_DIM),
                    focused_style: None,
                }),
                padding: Padding::xy(1, 0),
                bg: Some(BG_PANEL),
                fg: Some(TEXT_MAIN),
            },
            text: Style::default().fg(TEXT_DIM),
            hint_key: Style::default()
                .fg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
            hint_label: Style::default().fg(TEXT_DIM),
            separator: Style::default().fg(TEXT_DIM),
        };

        let status_props = StatusBarProps {
            left: StatusBarSection::hints(&hints).with_separator("  "),
            center: StatusBarSection::empty(),
            right: StatusBarSection::items(&message_items).with_separator("  "),
            style,
            is_focused: false,
        };
        Component::<Action>::render(&mut self.status_bar, frame, area, status_props);
    }
}
