//! QuantaWeather - terminal client for the quantum forecast backends

use std::cell::RefCell;
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use quantaweather::action::Action;
use quantaweather::api;
use quantaweather::backend::{Backends, spawn_effect};
use quantaweather::components::{
    AppShell, AppShellProps, Component, NavSearch, NavSearchProps, Palette, Sidebar, SidebarProps,
};
use quantaweather::config::{AppConfig, LoggingConfig, Overrides};
use quantaweather::effect::Effect;
use quantaweather::reducer::reducer;
use quantaweather::state::{AppState, LOADING_ANIM_TICK_MS, Page, Theme};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_components::centered_rect;
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// QuantaWeather - quantum weather forecasts in the terminal
#[derive(Parser, Debug)]
#[command(name = "quantaweather")]
#[command(about = "Terminal client for the QuantaWeather prediction backends")]
struct Args {
    /// JSON config file (endpoints, logging)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL of the quantum forecaster
    #[arg(long)]
    forecast_url: Option<String>,

    /// Base URL of the extreme weather predictor
    #[arg(long)]
    extreme_url: Option<String>,

    /// Base URL of the visualization generator
    #[arg(long)]
    visualization_url: Option<String>,

    /// Where to write logs
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset (e.g. "quantaweather=debug")
    #[arg(long)]
    log_level: Option<String>,

    /// Page shown at startup
    #[arg(long, value_enum, default_value = "home")]
    page: Page,

    /// Start with the light palette
    #[arg(long)]
    light: bool,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum QuantaComponentId {
    Shell,
    Input,
    Search,
    Sidebar,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum QuantaContext {
    Main,
    Input,
    Search,
    Sidebar,
}

impl EventRoutingState<QuantaComponentId, QuantaContext> for AppState {
    fn focused(&self) -> Option<QuantaComponentId> {
        if self.nav_open {
            Some(QuantaComponentId::Search)
        } else if self.sidebar.open {
            Some(QuantaComponentId::Sidebar)
        } else if self.editing {
            Some(QuantaComponentId::Input)
        } else {
            Some(QuantaComponentId::Shell)
        }
    }

    fn modal(&self) -> Option<QuantaComponentId> {
        if self.nav_open {
            Some(QuantaComponentId::Search)
        } else if self.sidebar.open {
            Some(QuantaComponentId::Sidebar)
        } else {
            None
        }
    }

    fn binding_context(&self, id: QuantaComponentId) -> QuantaContext {
        match id {
            QuantaComponentId::Shell => QuantaContext::Main,
            QuantaComponentId::Input => QuantaContext::Input,
            QuantaComponentId::Search => QuantaContext::Search,
            QuantaComponentId::Sidebar => QuantaContext::Sidebar,
        }
    }

    fn default_context(&self) -> QuantaContext {
        QuantaContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        config,
        forecast_url,
        extreme_url,
        visualization_url,
        log_file,
        log_level,
        page,
        light,
        debug: debug_args,
    } = Args::parse();

    let config = AppConfig::load(config.as_deref())
        .map_err(io::Error::other)?
        .apply(Overrides {
            forecast_url,
            extreme_url,
            visualization_url,
            log_file,
            log_level,
        });
    init_logging(&config.logging)?;
    info!(
        forecast = %config.endpoints.forecast_url,
        extreme = %config.endpoints.extreme_url,
        visualization = %config.endpoints.visualization_url,
        "Starting QuantaWeather"
    );

    let client = api::http_client().map_err(io::Error::other)?;
    let backends = Arc::new(Backends::new(client, config.endpoints));

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let theme = if light { Theme::Light } else { Theme::Dark };
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(page, theme))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions, backends).await;

    // ===== Cleanup =====
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
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    info!("Exiting");
    Ok(())
}

/// Logs go to a file; the terminal belongs to the UI.
fn init_logging(logging: &LoggingConfig) -> io::Result<()> {
    let path = logging.file_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::options().create(true).append(true).open(&path)?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .map_err(io::Error::other)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

struct QuantaUi {
    shell: AppShell,
    search: NavSearch,
}

impl QuantaUi {
    fn new() -> Self {
        Self {
            shell: AppShell::new(),
            search: NavSearch::new(),
        }
    }

    fn search_props<'a>(state: &'a AppState, is_focused: bool) -> NavSearchProps<'a> {
        NavSearchProps {
            query: &state.nav_query,
            suggestions: &state.nav_suggestions,
            selected: state.nav_selected,
            is_focused,
            palette: Palette::for_theme(state.theme),
            on_query_change: Action::NavQueryChange,
            on_query_submit: Action::NavQuerySubmit,
            on_select: Action::NavSelect,
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<QuantaComponentId>,
    ) {
        event_ctx.set_component_area(QuantaComponentId::Shell, area);
        event_ctx.set_component_area(QuantaComponentId::Input, area);

        let props = AppShellProps {
            state,
            is_focused: render_ctx.is_focused() && !state.nav_open,
        };
        self.shell.render(frame, area, props);

        if state.sidebar.open {
            event_ctx.set_component_area(QuantaComponentId::Sidebar, area);
        } else {
            event_ctx
                .component_areas
                .remove(&QuantaComponentId::Sidebar);
        }

        self.search.set_open(state.nav_open);
        if state.nav_open {
            let modal_area = centered_rect(56, 12, area);
            event_ctx.set_component_area(QuantaComponentId::Search, modal_area);
            let props = Self::search_props(state, render_ctx.is_focused());
            self.search.render(frame, area, props);
        } else {
            event_ctx
                .component_areas
                .remove(&QuantaComponentId::Search);
        }
    }

    fn handle_shell_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = AppShellProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.shell.handle_event(event, props).into_iter().collect();
        respond(actions)
    }

    fn handle_input_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions = self.shell.handle_input_event(event, state);
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.search.set_open(state.nav_open);
        let props = Self::search_props(state, true);
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }

    fn handle_sidebar_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = SidebarProps {
            state: &state.sidebar,
            is_focused: true,
            palette: Palette::for_theme(state.theme),
        };
        let actions: Vec<_> = Sidebar.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn respond(actions: Vec<Action>) -> HandlerResponse<Action> {
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
    backends: Arc<Backends>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(QuantaUi::new()));
    let mut bus: EventBus<AppState, Action, QuantaComponentId, QuantaContext> = EventBus::new();
    let keybindings: Keybindings<QuantaContext> = Keybindings::new();

    let ui_shell = Rc::clone(&ui);
    bus.register(QuantaComponentId::Shell, move |event, state| {
        ui_shell.borrow_mut().handle_shell_event(&event.kind, state)
    });

    let ui_input = Rc::clone(&ui);
    bus.register(QuantaComponentId::Input, move |event, state| {
        ui_input.borrow_mut().handle_input_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(QuantaComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    let ui_sidebar = Rc::clone(&ui);
    bus.register(QuantaComponentId::Sidebar, move |event, state| {
        ui_sidebar
            .borrow_mut()
            .handle_sidebar_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
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
            move |effect, ctx| handle_effect(effect, ctx, &backends),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, backends: &Arc<Backends>) {
    spawn_effect(effect, ctx.tasks(), backends);
}
