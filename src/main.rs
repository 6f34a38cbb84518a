//! dexview - creature catalog browser

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dexview::action::Action;
use dexview::api::{CatalogApi, PokeApi};
use dexview::components::{
    detail_modal_area, CatalogDisplay, CatalogDisplayProps, Component, DetailModal,
    DetailModalProps,
};
use dexview::config::{CatalogArgs, CatalogConfig};
use dexview::effect::{self, Effect};
use dexview::reducer::reducer;
use dexview::state::{AppState, LOADING_ANIM_TICK_MS};
use dexview::telemetry::init_file_telemetry;
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tracing::info;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

#[derive(Parser, Debug)]
#[command(name = "dexview")]
#[command(about = "Browse a creature catalog and inspect details")]
struct Args {
    #[command(flatten)]
    catalog: CatalogArgs,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum DexComponentId {
    List,
    Modal,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum DexContext {
    List,
    Modal,
}

impl EventRoutingState<DexComponentId, DexContext> for AppState {
    fn focused(&self) -> Option<DexComponentId> {
        if self.modal.is_visible() {
            Some(DexComponentId::Modal)
        } else {
            Some(DexComponentId::List)
        }
    }

    fn modal(&self) -> Option<DexComponentId> {
        self.modal.is_visible().then_some(DexComponentId::Modal)
    }

    fn binding_context(&self, id: DexComponentId) -> DexContext {
        match id {
            DexComponentId::List => DexContext::List,
            DexComponentId::Modal => DexContext::Modal,
        }
    }

    fn default_context(&self) -> DexContext {
        DexContext::List
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    init_file_telemetry(&args.catalog.log_file, &args.catalog.log_level)?;

    let config = CatalogConfig::from(&args.catalog);
    info!(list_url = %config.list_url(), "starting dexview");
    let api: Arc<dyn CatalogApi> = Arc::new(PokeApi::new(config));

    let debug = DebugSession::new(args.debug);
    let state = debug
        .load_state_or_else_async(|| async {
            let terminal_size = crossterm::terminal::size().unwrap_or((80, 24));
            Ok::<AppState, io::Error>(AppState {
                terminal_size,
                ..AppState::default()
            })
        })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions, api).await;

    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    Ok(())
}

struct CatalogUi {
    display: CatalogDisplay,
    modal: DetailModal,
}

impl CatalogUi {
    fn new() -> Self {
        Self {
            display: CatalogDisplay::new(),
            modal: DetailModal::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<DexComponentId>,
    ) {
        event_ctx.set_component_area(DexComponentId::List, area);

        let props = CatalogDisplayProps {
            state,
            is_focused: render_ctx.is_focused() && !state.modal.is_visible(),
        };
        self.display.render(frame, area, props);

        if state.modal.is_visible() {
            event_ctx.set_component_area(DexComponentId::Modal, detail_modal_area(area));
            let props = DetailModalProps {
                state,
                is_focused: render_ctx.is_focused(),
            };
            self.modal.render(frame, area, props);
        } else {
            event_ctx.component_areas.remove(&DexComponentId::Modal);
        }
    }

    fn handle_list_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = CatalogDisplayProps {
            state,
            is_focused: true,
        };
        handler_response(self.display.handle_event(event, props).into_iter().collect())
    }

    fn handle_modal_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = DetailModalProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.modal.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    api: Arc<dyn CatalogApi>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(CatalogUi::new()));
    let mut bus: EventBus<AppState, Action, DexComponentId, DexContext> = EventBus::new();
    let keybindings: Keybindings<DexContext> = Keybindings::new();

    let ui_list = Rc::clone(&ui);
    bus.register(DexComponentId::List, move |event, state| {
        ui_list.borrow_mut().handle_list_event(&event.kind, state)
    });

    let ui_modal = Rc::clone(&ui);
    bus.register(DexComponentId::Modal, move |event, state| {
        ui_modal.borrow_mut().handle_modal_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        EventKind::Key(key) if key.code == KeyCode::Char('q') => {
            HandlerResponse::action(Action::Quit)
        }
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_ANIM_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx: &mut EffectContext<Action>| handle_effect(effect, ctx, &api),
        )
        .await
}

/// Run each effect as its own task; completions come back as actions.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, api: &Arc<dyn CatalogApi>) {
    let key = TaskKey::new(effect.task_key());
    let api = Arc::clone(api);
    ctx.tasks()
        .spawn(key, async move { effect::perform(effect, api.as_ref()).await });
}
